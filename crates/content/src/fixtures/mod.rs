//! Built-in security-awareness scenarios.

mod data_breach;
mod phishing;
mod ransomware;

pub use data_breach::definition as data_breach;
pub use phishing::definition as phishing;
pub use ransomware::definition as ransomware;

use crate::repository::ScenarioLoader;

pub const PHISHING: &str = "phishing";
pub const RANSOMWARE: &str = "ransomware";
pub const DATA_BREACH: &str = "databreach";

/// Identifier and loader of every built-in scenario.
pub const BUILTIN: &[(&str, ScenarioLoader)] = &[
    (PHISHING, phishing),
    (RANSOMWARE, ransomware),
    (DATA_BREACH, data_breach),
];

fn options(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
