use std::collections::BTreeMap;

use thiserror::Error;
use trainer_core::model::{DefinitionError, ScenarioDefinition, ScenarioId};

use crate::fixtures;

/// Errors surfaced by content providers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentError {
    #[error("scenario type \"{0}\" not found")]
    NotFound(String),

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

/// Builds a scenario definition on demand.
pub type ScenarioLoader = fn() -> ScenarioDefinition;

/// Contract for supplying scenario definitions by identifier.
pub trait ScenarioProvider {
    /// Fetch and validate the definition registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if `id` is unknown, or
    /// `ContentError::Definition` if the stored definition is invalid.
    fn load(&self, id: &ScenarioId) -> Result<ScenarioDefinition, ContentError>;

    /// Identifiers this provider can load, in a stable order.
    fn scenario_ids(&self) -> Vec<ScenarioId>;
}

#[derive(Debug, Clone)]
enum Source {
    Loader(ScenarioLoader),
    Json(String),
}

/// Registry mapping scenario identifiers to their loaders.
///
/// Definitions are rebuilt on every `load`, so each session owns a fresh copy.
#[derive(Debug, Clone, Default)]
pub struct ScenarioRegistry {
    entries: BTreeMap<ScenarioId, Source>,
}

impl ScenarioRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in scenarios.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for (id, loader) in fixtures::BUILTIN {
            registry.register(*id, *loader);
        }
        registry
    }

    /// Register (or replace) a loader under `id`.
    pub fn register(&mut self, id: impl Into<ScenarioId>, loader: ScenarioLoader) {
        let id = id.into();
        log::debug!("registering scenario loader {id}");
        self.entries.insert(id, Source::Loader(loader));
    }

    /// Register (or replace) a scenario from its JSON content file.
    ///
    /// The document is validated up front so bad content fails at registration.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Definition` if the JSON is malformed or invalid.
    pub fn register_json(
        &mut self,
        id: impl Into<ScenarioId>,
        raw: impl Into<String>,
    ) -> Result<(), ContentError> {
        let id = id.into();
        let raw = raw.into();
        ScenarioDefinition::from_json(&raw)?;
        log::debug!("registering scenario document {id}");
        self.entries.insert(id, Source::Json(raw));
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, id: &ScenarioId) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScenarioProvider for ScenarioRegistry {
    fn load(&self, id: &ScenarioId) -> Result<ScenarioDefinition, ContentError> {
        let source = self
            .entries
            .get(id)
            .ok_or_else(|| ContentError::NotFound(id.to_string()))?;

        let definition = match source {
            Source::Loader(loader) => {
                let definition = loader();
                definition.validate()?;
                definition
            }
            Source::Json(raw) => ScenarioDefinition::from_json(raw)?,
        };
        Ok(definition)
    }

    fn scenario_ids(&self) -> Vec<ScenarioId> {
        self.entries.keys().cloned().collect()
    }
}
