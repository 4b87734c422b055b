//! Shared error types for the services crate.

use thiserror::Error;

use content::ContentError;
use trainer_core::model::DefinitionError;

/// Errors emitted by `ScenarioSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScenarioError {
    #[error("scenario definition has no steps")]
    DefinitionMissing,
    #[error(transparent)]
    InvalidDefinition(#[from] DefinitionError),
    #[error("choice `{choice_id}` is not offered at step {step}")]
    UnknownChoice { step: usize, choice_id: String },
    #[error("step {step} already has a recorded choice")]
    StepAlreadyAnswered { step: usize },
    #[error("no scenario is active")]
    NotActive,
    #[error("scenario already completed")]
    Completed,
}

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no questions")]
    Empty,
    #[error("quiz already completed")]
    Completed,
}

/// Errors emitted by `SessionCoordinator`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoordinatorError {
    #[error("scenario type \"{0}\" not found")]
    ScenarioNotFound(String),
    #[error(transparent)]
    Content(ContentError),
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

impl From<ContentError> for CoordinatorError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::NotFound(id) => Self::ScenarioNotFound(id),
            other => Self::Content(other),
        }
    }
}
