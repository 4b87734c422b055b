use thiserror::Error;

use crate::model::{DefinitionError, ParseIdError, SettingsError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Definition(#[from] DefinitionError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ScenarioId, TrainerSettings};

    fn parse_and_configure(raw_id: &str, per_level: u32) -> Result<ScenarioId, Error> {
        let id: ScenarioId = raw_id.parse()?;
        TrainerSettings::new(10, per_level, 0, 0)?;
        Ok(id)
    }

    #[test]
    fn layer_errors_convert_into_umbrella() {
        assert!(matches!(parse_and_configure(" ", 3), Err(Error::Id(_))));
        assert!(matches!(
            parse_and_configure("phishing", 0),
            Err(Error::Settings(SettingsError::InvalidScenariosPerLevel))
        ));
        let err = Error::from(DefinitionError::NoSteps);
        assert_eq!(err.to_string(), "scenario has no steps");
    }
}
