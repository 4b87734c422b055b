use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("points per correct answer must be > 0")]
    InvalidPointsPerCorrect,

    #[error("scenarios per level must be > 0")]
    InvalidScenariosPerLevel,

    #[error("feedback delay must be at most 60000 ms")]
    InvalidFeedbackDelay,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

const MAX_DELAY_MS: u32 = 60_000;

/// Tunables for scoring and pacing.
///
/// The delays are hints for the presentation layer; the engine never waits on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerSettings {
    points_per_correct: u32,
    scenarios_per_level: u32,
    choice_feedback_delay_ms: u32,
    quiz_feedback_delay_ms: u32,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            points_per_correct: 10,
            scenarios_per_level: 3,
            choice_feedback_delay_ms: 1_500,
            quiz_feedback_delay_ms: 2_000,
        }
    }
}

impl TrainerSettings {
    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns error if a count is zero or a delay exceeds one minute.
    pub fn new(
        points_per_correct: u32,
        scenarios_per_level: u32,
        choice_feedback_delay_ms: u32,
        quiz_feedback_delay_ms: u32,
    ) -> Result<Self, SettingsError> {
        if points_per_correct == 0 {
            return Err(SettingsError::InvalidPointsPerCorrect);
        }
        if scenarios_per_level == 0 {
            return Err(SettingsError::InvalidScenariosPerLevel);
        }
        if choice_feedback_delay_ms > MAX_DELAY_MS || quiz_feedback_delay_ms > MAX_DELAY_MS {
            return Err(SettingsError::InvalidFeedbackDelay);
        }

        Ok(Self {
            points_per_correct,
            scenarios_per_level,
            choice_feedback_delay_ms,
            quiz_feedback_delay_ms,
        })
    }

    /// Same settings with both delays zeroed, for scripted runs.
    #[must_use]
    pub fn without_delays(mut self) -> Self {
        self.choice_feedback_delay_ms = 0;
        self.quiz_feedback_delay_ms = 0;
        self
    }

    #[must_use]
    pub fn points_per_correct(&self) -> u32 {
        self.points_per_correct
    }

    #[must_use]
    pub fn scenarios_per_level(&self) -> u32 {
        self.scenarios_per_level
    }

    #[must_use]
    pub fn choice_feedback_delay_ms(&self) -> u32 {
        self.choice_feedback_delay_ms
    }

    #[must_use]
    pub fn quiz_feedback_delay_ms(&self) -> u32 {
        self.quiz_feedback_delay_ms
    }

    /// Level reached after completing `completed` distinct scenarios.
    #[must_use]
    pub fn level_for(&self, completed: usize) -> u32 {
        let completed = u32::try_from(completed).unwrap_or(u32::MAX);
        completed / self.scenarios_per_level + 1
    }
}
