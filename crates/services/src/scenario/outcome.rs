use serde::Serialize;

use trainer_core::model::{Choice, ChoiceId, UserChoiceRecord};
use trainer_core::scoring::Tone;

/// Feedback used when a choice carries none of its own.
pub const DEFAULT_FEEDBACK: &str = "Choice recorded.";

/// What a recorded choice means for the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOutcome {
    pub step_index: usize,
    pub choice_id: ChoiceId,
    pub points: i32,
    pub correct: bool,
    pub tone: Tone,
    pub feedback: String,
    pub education: Option<String>,
    pub detailed: bool,
}

impl ChoiceOutcome {
    #[must_use]
    pub fn from_choice(step_index: usize, choice: &Choice) -> Self {
        Self {
            step_index,
            choice_id: choice.id.clone(),
            points: choice.points,
            correct: choice.is_correct(),
            tone: Tone::from_points(choice.points),
            feedback: choice
                .feedback
                .clone()
                .unwrap_or_else(|| DEFAULT_FEEDBACK.to_string()),
            education: choice.education.clone(),
            detailed: choice.detailed,
        }
    }
}

/// Final result of a completed scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioResult {
    pub title: String,
    pub final_score: u32,
    pub score: i64,
    pub total_possible_points: u64,
    pub elapsed_secs: u64,
    pub elapsed: String,
    pub choices: Vec<UserChoiceRecord>,
    pub has_quiz: bool,
}

impl ScenarioResult {
    /// Choices that earned points.
    #[must_use]
    pub fn correct_choices(&self) -> usize {
        self.choices
            .iter()
            .filter(|r| r.choice.as_ref().is_some_and(Choice::is_correct))
            .count()
    }
}

/// Where `advance` left the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepTransition {
    Next { step_index: usize },
    Completed(ScenarioResult),
}

impl StepTransition {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}
