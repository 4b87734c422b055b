//! Percentage math and the qualitative labels derived from it.

use serde::Serialize;

/// `round(100 * part / whole)` with halves rounded up; 0 when `whole` is 0.
#[must_use]
pub fn round_percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = (200 * u128::from(part) + u128::from(whole)) / (2 * u128::from(whole));
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Final scenario percentage.
///
/// Full credit when nothing was scorable. Negative running scores count as 0
/// and the result never exceeds 100.
#[must_use]
pub fn final_score(score: i64, total_possible: u64) -> u32 {
    if total_possible == 0 {
        return 100;
    }
    let earned = u64::try_from(score.max(0)).unwrap_or(0);
    round_percent(earned, total_possible).min(100)
}

//
// ─── PERFORMANCE BAND ──────────────────────────────────────────────────────────
//

/// Four-level rating derived from a percentage.
///
/// The same thresholds label scenario results and quiz scorecards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    /// 90 and above.
    Excellent,
    /// 75 to 89.
    Great,
    /// 60 to 74.
    Good,
    /// Below 60.
    KeepLearning,
}

impl PerformanceBand {
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 90 {
            Self::Excellent
        } else if percentage >= 75 {
            Self::Great
        } else if percentage >= 60 {
            Self::Good
        } else {
            Self::KeepLearning
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent!",
            Self::Great => "Great Job!",
            Self::Good => "Good Effort!",
            Self::KeepLearning => "Keep Learning!",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => {
                "You're a cybersecurity expert! You identified threats accurately."
            }
            Self::Great => {
                "You have a strong understanding of cyber threats. Minor improvements needed."
            }
            Self::Good => {
                "You're on the right track! Review the feedback to improve your skills."
            }
            Self::KeepLearning => {
                "Consider reviewing cybersecurity best practices. Practice makes perfect!"
            }
        }
    }
}

//
// ─── TONE ──────────────────────────────────────────────────────────────────────
//

/// Feedback tone for a choice, taken from the sign of its points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    #[must_use]
    pub fn from_points(points: i32) -> Self {
        match points.signum() {
            1 => Self::Positive,
            -1 => Self::Negative,
            _ => Self::Neutral,
        }
    }
}
