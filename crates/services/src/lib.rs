#![forbid(unsafe_code)]

pub mod coordinator;
pub mod error;
pub mod progress;
pub mod quiz;
pub mod scenario;
pub mod view;

pub use trainer_core::Clock;

pub use coordinator::{Screen, SessionCoordinator};
pub use error::{CoordinatorError, QuizError, ScenarioError};
pub use progress::{ProgressSnapshot, ProgressTracker, ResultsSummary};
pub use quiz::{QuestionReview, QuizPhase, QuizScorecard, QuizSession, QuizStep, ReviewStatus};
pub use scenario::{
    ChoiceOutcome, ScenarioPhase, ScenarioResult, ScenarioSession, ScenarioSessionState,
    StepTransition,
};
pub use view::{ChoiceView, FeedbackView, QuestionView, Renderer, ResultsPresenter, StepView};
