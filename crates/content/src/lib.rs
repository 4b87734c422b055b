#![forbid(unsafe_code)]

pub mod fixtures;
pub mod repository;

pub use repository::{ContentError, ScenarioLoader, ScenarioProvider, ScenarioRegistry};
