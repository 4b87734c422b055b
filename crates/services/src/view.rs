//! View models handed to the presentation layer and the ports it implements.
//!
//! Markup in `content` is passed through untouched; formatting beyond the
//! elapsed-time strings is left to the renderer.

use serde::Serialize;

use trainer_core::model::{ChoiceId, QuizAnswerRecord, QuizQuestion, ScenarioDefinition};
use trainer_core::scoring::Tone;

use crate::progress::ResultsSummary;
use crate::quiz::QuizScorecard;
use crate::scenario::{ChoiceOutcome, ScenarioResult};

//
// ─── STEP ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    pub id: ChoiceId,
    pub text: String,
}

/// One step, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub scenario_title: String,
    pub step_index: usize,
    pub step_count: usize,
    pub title: String,
    pub kind: Option<String>,
    pub content: String,
    pub choices: Vec<ChoiceView>,
}

impl StepView {
    /// Builds the view of step `index`, or `None` when out of range.
    #[must_use]
    pub fn for_step(definition: &ScenarioDefinition, index: usize) -> Option<Self> {
        let step = definition.step(index)?;
        Some(Self {
            scenario_title: definition.title.clone(),
            step_index: index,
            step_count: definition.steps.len(),
            title: step.title.clone(),
            kind: step.kind.clone(),
            content: step.content.clone(),
            choices: step
                .choices
                .iter()
                .map(|c| ChoiceView {
                    id: c.id.clone(),
                    text: c.text.clone(),
                })
                .collect(),
        })
    }

    /// Steps without choices are advanced by the caller without an answer.
    #[must_use]
    pub fn is_informational(&self) -> bool {
        self.choices.is_empty()
    }

    /// 1-based position for "Step 2 of 4" style headers.
    #[must_use]
    pub fn position(&self) -> usize {
        self.step_index + 1
    }
}

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// Feedback shown after a choice or a quiz answer.
///
/// `delay_ms` is how long the presentation layer should keep it up before
/// moving on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackView {
    pub label: String,
    pub education: Option<String>,
    pub tone: Tone,
    pub detailed: bool,
    pub delay_ms: u32,
}

impl FeedbackView {
    #[must_use]
    pub fn from_outcome(outcome: &ChoiceOutcome, delay_ms: u32) -> Self {
        Self {
            label: outcome.feedback.clone(),
            education: outcome.education.clone(),
            tone: outcome.tone,
            detailed: outcome.detailed,
            delay_ms,
        }
    }

    #[must_use]
    pub fn from_quiz_answer(
        answer: &QuizAnswerRecord,
        explanation: Option<&str>,
        delay_ms: u32,
    ) -> Self {
        let (label, tone) = if answer.is_correct {
            ("Correct!", Tone::Positive)
        } else if answer.is_skipped() {
            ("Skipped", Tone::Neutral)
        } else {
            ("Incorrect", Tone::Negative)
        };
        Self {
            label: label.to_string(),
            education: explanation.map(str::to_string),
            tone,
            detailed: false,
            delay_ms,
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub question: String,
    pub options: Vec<String>,
}

impl QuestionView {
    #[must_use]
    pub fn new(index: usize, total: usize, question: &QuizQuestion) -> Self {
        Self {
            index,
            total,
            question: question.question.clone(),
            options: question.options.clone(),
        }
    }

    /// Whole-number progress through the quiz, counting this question as pending.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        let index = u64::try_from(self.index).unwrap_or(u64::MAX);
        let total = u64::try_from(self.total).unwrap_or(u64::MAX);
        trainer_core::scoring::round_percent(index, total)
    }
}

//
// ─── PORTS ─────────────────────────────────────────────────────────────────────
//

/// Draws steps, questions and feedback.
pub trait Renderer {
    fn render_step(&mut self, view: &StepView);
    fn show_feedback(&mut self, view: &FeedbackView);
    fn clear_feedback(&mut self);
    fn render_question(&mut self, view: &QuestionView);
}

/// Receives the final results verbatim.
pub trait ResultsPresenter {
    fn present_results(&mut self, summary: &ResultsSummary, result: &ScenarioResult);
    fn present_scorecard(&mut self, scorecard: &QuizScorecard, summary: &ResultsSummary);
}
