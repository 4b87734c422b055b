use chrono::{DateTime, Utc};
use std::fmt;

use trainer_core::model::{ScenarioDefinition, Step, UserChoiceRecord};
use trainer_core::time;

use super::outcome::{ChoiceOutcome, ScenarioResult, StepTransition};
use crate::error::ScenarioError;
use crate::progress::ProgressTracker;
use crate::view::StepView;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioPhase {
    Loading,
    Active { step_index: usize },
    Completed,
}

/// Mutable progression state of one scenario run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioSessionState {
    pub current_step_index: usize,
    pub score: i64,
    pub choices: Vec<UserChoiceRecord>,
    pub started_at: Option<DateTime<Utc>>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Drives one scenario through its steps.
///
/// A choice and the move to the next step are separate calls so the
/// presentation layer can show feedback in between. Timestamps are supplied by
/// the caller's clock.
pub struct ScenarioSession {
    definition: Option<ScenarioDefinition>,
    phase: ScenarioPhase,
    state: ScenarioSessionState,
    result: Option<ScenarioResult>,
}

impl Default for ScenarioSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioSession {
    /// A session with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: None,
            phase: ScenarioPhase::Loading,
            state: ScenarioSessionState::default(),
            result: None,
        }
    }

    /// Attach `definition` and enter the first step.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::DefinitionMissing` if the definition has no steps,
    /// or `ScenarioError::InvalidDefinition` if it fails validation. The session
    /// is left untouched on error.
    pub fn start(
        &mut self,
        definition: ScenarioDefinition,
        started_at: DateTime<Utc>,
    ) -> Result<(), ScenarioError> {
        if definition.steps.is_empty() {
            return Err(ScenarioError::DefinitionMissing);
        }
        definition.validate()?;

        self.definition = Some(definition);
        self.phase = ScenarioPhase::Active { step_index: 0 };
        self.state = ScenarioSessionState {
            started_at: Some(started_at),
            ..ScenarioSessionState::default()
        };
        self.result = None;
        Ok(())
    }

    #[must_use]
    pub fn phase(&self) -> ScenarioPhase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> &ScenarioSessionState {
        &self.state
    }

    #[must_use]
    pub fn definition(&self) -> Option<&ScenarioDefinition> {
        self.definition.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.state.score
    }

    #[must_use]
    pub fn choices(&self) -> &[UserChoiceRecord] {
        &self.state.choices
    }

    /// Result computed when the last step was passed.
    #[must_use]
    pub fn result(&self) -> Option<&ScenarioResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, ScenarioPhase::Active { .. })
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == ScenarioPhase::Completed
    }

    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        let ScenarioPhase::Active { step_index } = self.phase else {
            return None;
        };
        self.definition.as_ref()?.step(step_index)
    }

    #[must_use]
    pub fn current_step_view(&self) -> Option<StepView> {
        let ScenarioPhase::Active { step_index } = self.phase else {
            return None;
        };
        StepView::for_step(self.definition.as_ref()?, step_index)
    }

    /// Whether a choice was already recorded for the current step.
    #[must_use]
    pub fn current_step_answered(&self) -> bool {
        match self.phase {
            ScenarioPhase::Active { step_index } => self.is_answered(step_index),
            _ => false,
        }
    }

    fn is_answered(&self, step_index: usize) -> bool {
        self.state
            .choices
            .iter()
            .any(|r| r.step_index == step_index && r.choice.is_some())
    }

    /// Record `choice_id` for the current step and report it to `tracker`.
    ///
    /// Only strictly positive points count as a correct answer. The session
    /// stays on the same step until `advance` is called.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::NotActive` outside an active run,
    /// `ScenarioError::UnknownChoice` if the step does not offer `choice_id`, and
    /// `ScenarioError::StepAlreadyAnswered` on a second choice for the same step.
    /// None of these change the session.
    pub fn handle_choice(
        &mut self,
        choice_id: &str,
        tracker: &mut ProgressTracker,
        chosen_at: DateTime<Utc>,
    ) -> Result<ChoiceOutcome, ScenarioError> {
        let ScenarioPhase::Active { step_index } = self.phase else {
            return Err(ScenarioError::NotActive);
        };
        let step = self
            .definition
            .as_ref()
            .and_then(|d| d.step(step_index))
            .ok_or(ScenarioError::NotActive)?;
        let choice = step
            .find_choice(choice_id)
            .ok_or_else(|| ScenarioError::UnknownChoice {
                step: step_index,
                choice_id: choice_id.to_string(),
            })?
            .clone();
        if self.is_answered(step_index) {
            return Err(ScenarioError::StepAlreadyAnswered { step: step_index });
        }

        let outcome = ChoiceOutcome::from_choice(step_index, &choice);
        self.state.score += i64::from(choice.points);
        self.state
            .choices
            .push(UserChoiceRecord::new(step_index, Some(choice), chosen_at));
        tracker.record_answer(outcome.correct);

        log::debug!(
            "step {step_index}: chose {} for {} points",
            outcome.choice_id,
            outcome.points
        );
        Ok(outcome)
    }

    /// Move past the current step.
    ///
    /// Leaving a step that offers choices without picking one records it as
    /// unanswered. Passing the last step completes the session.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::NotActive` before `start`, or
    /// `ScenarioError::Completed` once the session has finished.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<StepTransition, ScenarioError> {
        let step_index = match self.phase {
            ScenarioPhase::Loading => return Err(ScenarioError::NotActive),
            ScenarioPhase::Completed => return Err(ScenarioError::Completed),
            ScenarioPhase::Active { step_index } => step_index,
        };
        let Some(definition) = self.definition.as_ref() else {
            return Err(ScenarioError::NotActive);
        };

        let offers_choices = definition
            .step(step_index)
            .is_some_and(|s| !s.is_informational());
        if offers_choices && !self.is_answered(step_index) {
            self.state
                .choices
                .push(UserChoiceRecord::new(step_index, None, now));
        }

        let next = step_index + 1;
        self.state.current_step_index = next;
        if next < definition.steps.len() {
            self.phase = ScenarioPhase::Active { step_index: next };
            return Ok(StepTransition::Next { step_index: next });
        }

        let elapsed_secs = time::elapsed_secs(self.state.started_at, now);
        let result = ScenarioResult {
            title: definition.title.clone(),
            final_score: definition.final_score(self.state.score),
            score: self.state.score,
            total_possible_points: definition.total_possible_points(),
            elapsed_secs,
            elapsed: time::format_minutes_seconds(elapsed_secs),
            choices: self.state.choices.clone(),
            has_quiz: definition.has_quiz(),
        };
        log::info!(
            "scenario \"{}\" completed with {}%",
            result.title,
            result.final_score
        );

        self.phase = ScenarioPhase::Completed;
        self.result = Some(result.clone());
        Ok(StepTransition::Completed(result))
    }

    /// Drop the definition and all progress; safe to call repeatedly.
    pub fn cleanup(&mut self) {
        self.definition = None;
        self.phase = ScenarioPhase::Loading;
        self.state = ScenarioSessionState::default();
        self.result = None;
    }
}

impl fmt::Debug for ScenarioSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioSession")
            .field("title", &self.definition.as_ref().map(|d| d.title.as_str()))
            .field("phase", &self.phase)
            .field("score", &self.state.score)
            .field("choices_len", &self.state.choices.len())
            .field("started_at", &self.state.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
