mod ids;
mod quiz;
mod scenario;
mod settings;

pub use ids::{ChoiceId, ParseIdError, ScenarioId};
pub use quiz::{QuizAnswerRecord, QuizQuestion};
pub use scenario::{Choice, DefinitionError, ScenarioDefinition, Step, UserChoiceRecord};
pub use settings::{SettingsError, TrainerSettings};
