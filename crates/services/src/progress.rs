use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use trainer_core::model::{ScenarioId, TrainerSettings};
use trainer_core::scoring::{self, PerformanceBand};
use trainer_core::time;

//
// ─── SUMMARIES ─────────────────────────────────────────────────────────────────
//

/// Results handed to the presenter when a scenario is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsSummary {
    pub percentage: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub elapsed_secs: u64,
    pub elapsed_formatted: String,
    pub band: PerformanceBand,
    pub title: String,
    pub message: String,
}

/// Point-in-time view of the aggregate progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub score: u64,
    pub level: u32,
    pub completed_scenarios: Vec<ScenarioId>,
    pub total_completed: usize,
}

//
// ─── TRACKER ───────────────────────────────────────────────────────────────────
//

/// Cross-session aggregate of score, level and completion history.
///
/// Counters cover the scenario in progress; `completed_scenarios` survives `reset`.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    settings: TrainerSettings,
    score: u64,
    level: u32,
    total_questions: u32,
    correct_answers: u32,
    started_at: Option<DateTime<Utc>>,
    completed: BTreeSet<ScenarioId>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(TrainerSettings::default())
    }
}

impl ProgressTracker {
    #[must_use]
    pub fn new(settings: TrainerSettings) -> Self {
        Self {
            settings,
            score: 0,
            level: 1,
            total_questions: 0,
            correct_answers: 0,
            started_at: None,
            completed: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &TrainerSettings {
        &self.settings
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn has_completed(&self, id: &ScenarioId) -> bool {
        self.completed.contains(id)
    }

    pub fn completed_scenarios(&self) -> impl Iterator<Item = &ScenarioId> {
        self.completed.iter()
    }

    /// Begin tracking a new scenario: clears the per-scenario counters.
    pub fn start_scenario(&mut self, now: DateTime<Utc>) {
        self.total_questions = 0;
        self.correct_answers = 0;
        self.started_at = Some(now);
    }

    /// Record one answer worth the configured points per correct answer.
    pub fn record_answer(&mut self, correct: bool) {
        self.record_answer_with_points(correct, self.settings.points_per_correct());
    }

    pub fn record_answer_with_points(&mut self, correct: bool, points: u32) {
        self.total_questions = self.total_questions.saturating_add(1);
        if correct {
            self.correct_answers = self.correct_answers.saturating_add(1);
            self.score = self.score.saturating_add(u64::from(points));
        }
    }

    /// Mark `id` completed, refresh the level and summarize the current counters.
    ///
    /// Completing the same scenario again does not raise the level.
    pub fn complete_scenario(&mut self, id: &ScenarioId, now: DateTime<Utc>) -> ResultsSummary {
        if self.completed.insert(id.clone()) {
            log::debug!("scenario {id} completed for the first time");
        }
        self.level = self.settings.level_for(self.completed.len());

        let percentage = scoring::round_percent(
            u64::from(self.correct_answers),
            u64::from(self.total_questions),
        );
        let band = PerformanceBand::from_percentage(percentage);
        let elapsed_secs = time::elapsed_secs(self.started_at, now);

        ResultsSummary {
            percentage,
            correct_answers: self.correct_answers,
            total_questions: self.total_questions,
            elapsed_secs,
            elapsed_formatted: time::format_minutes_seconds(elapsed_secs),
            band,
            title: band.title().to_string(),
            message: band.message().to_string(),
        }
    }

    /// Zero score and counters and drop back to level 1.
    ///
    /// The completed set is kept, so the next completion recomputes the level from it.
    pub fn reset(&mut self) {
        self.score = 0;
        self.level = 1;
        self.total_questions = 0;
        self.correct_answers = 0;
        self.started_at = None;
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            score: self.score,
            level: self.level,
            completed_scenarios: self.completed.iter().cloned().collect(),
            total_completed: self.completed.len(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
