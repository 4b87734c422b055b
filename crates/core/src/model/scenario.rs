use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::ChoiceId;
use crate::model::quiz::QuizQuestion;
use crate::scoring;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DefinitionError {
    #[error("scenario has no steps")]
    NoSteps,

    #[error("step {step} lists choice `{id}` more than once")]
    DuplicateChoice { step: usize, id: String },

    #[error("step {step} has choices but none with non-negative points")]
    NoScorableChoice { step: usize },

    #[error("quiz question {question} has no options")]
    NoOptions { question: usize },

    #[error("quiz question {question} marks option {index} correct but has {options} options")]
    CorrectAnswerOutOfRange {
        question: usize,
        index: usize,
        options: usize,
    },

    #[error("malformed scenario definition: {0}")]
    Parse(String),
}

//
// ─── CHOICE ────────────────────────────────────────────────────────────────────
//

/// A selectable option at a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: ChoiceId,
    pub text: String,
    #[serde(default)]
    pub points: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default)]
    pub detailed: bool,
}

impl Choice {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>, points: i32) -> Self {
        Self {
            id: ChoiceId::new(id),
            text: text.into(),
            points,
            feedback: None,
            education: None,
            detailed: false,
        }
    }

    #[must_use]
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    #[must_use]
    pub fn with_education(mut self, education: impl Into<String>) -> Self {
        self.education = Some(education.into());
        self
    }

    /// Marks the choice as carrying feedback worth a detailed (modal) display.
    #[must_use]
    pub fn detailed(mut self) -> Self {
        self.detailed = true;
        self
    }

    /// Only strictly positive points count as a correct answer.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.points > 0
    }
}

//
// ─── STEP ──────────────────────────────────────────────────────────────────────
//

/// One decision point. `content` is opaque markup handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub title: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Step {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: None,
            content: content.into(),
            choices: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Steps without choices need no answer before advancing.
    #[must_use]
    pub fn is_informational(&self) -> bool {
        self.choices.is_empty()
    }

    #[must_use]
    pub fn find_choice(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id.as_str() == id)
    }

    /// Best attainable points at this step, floored at zero.
    ///
    /// `None` for informational steps, which do not count toward the total.
    #[must_use]
    pub fn possible_points(&self) -> Option<u32> {
        let best = self.choices.iter().map(|c| c.points).max()?;
        Some(u32::try_from(best).unwrap_or(0))
    }
}

//
// ─── DEFINITION ────────────────────────────────────────────────────────────────
//

/// Immutable description of one scenario type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDefinition {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quiz_questions: Vec<QuizQuestion>,
}

impl ScenarioDefinition {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            steps: Vec::new(),
            quiz_questions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn with_quiz_question(mut self, question: QuizQuestion) -> Self {
        self.quiz_questions.push(question);
        self
    }

    /// Parse a definition from its JSON content-file form and validate it.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::Parse` for malformed JSON, or any validation error.
    pub fn from_json(raw: &str) -> Result<Self, DefinitionError> {
        let definition: Self =
            serde_json::from_str(raw).map_err(|e| DefinitionError::Parse(e.to_string()))?;
        definition.validate()?;
        Ok(definition)
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    #[must_use]
    pub fn has_quiz(&self) -> bool {
        !self.quiz_questions.is_empty()
    }

    /// Sum of per-step best points over steps that have choices.
    #[must_use]
    pub fn total_possible_points(&self) -> u64 {
        self.steps
            .iter()
            .filter_map(Step::possible_points)
            .map(u64::from)
            .sum()
    }

    /// Final percentage for a running `score` against this definition.
    #[must_use]
    pub fn final_score(&self, score: i64) -> u32 {
        scoring::final_score(score, self.total_possible_points())
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first `DefinitionError` found, checking steps before quiz questions.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.steps.is_empty() {
            return Err(DefinitionError::NoSteps);
        }

        for (index, step) in self.steps.iter().enumerate() {
            let mut seen = HashSet::new();
            for choice in &step.choices {
                if !seen.insert(choice.id.as_str()) {
                    return Err(DefinitionError::DuplicateChoice {
                        step: index,
                        id: choice.id.to_string(),
                    });
                }
            }
            if !step.choices.is_empty() && step.choices.iter().all(|c| c.points < 0) {
                return Err(DefinitionError::NoScorableChoice { step: index });
            }
        }

        for (index, question) in self.quiz_questions.iter().enumerate() {
            if question.options.is_empty() {
                return Err(DefinitionError::NoOptions { question: index });
            }
            if question.correct_answer >= question.options.len() {
                return Err(DefinitionError::CorrectAnswerOutOfRange {
                    question: index,
                    index: question.correct_answer,
                    options: question.options.len(),
                });
            }
        }

        Ok(())
    }
}

//
// ─── CHOICE RECORD ─────────────────────────────────────────────────────────────
//

/// One recorded decision. `choice` is `None` when a step was left unanswered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserChoiceRecord {
    pub step_index: usize,
    pub choice: Option<Choice>,
    pub recorded_at: DateTime<Utc>,
}

impl UserChoiceRecord {
    #[must_use]
    pub fn new(step_index: usize, choice: Option<Choice>, recorded_at: DateTime<Utc>) -> Self {
        Self {
            step_index,
            choice,
            recorded_at,
        }
    }

    #[must_use]
    pub fn points(&self) -> i32 {
        self.choice.as_ref().map_or(0, |c| c.points)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
