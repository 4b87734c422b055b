mod outcome;
mod session;

pub use crate::error::ScenarioError;
pub use outcome::{ChoiceOutcome, DEFAULT_FEEDBACK, ScenarioResult, StepTransition};
pub use session::{ScenarioPhase, ScenarioSession, ScenarioSessionState};
