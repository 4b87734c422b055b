use serde::Serialize;

use trainer_core::model::{QuizAnswerRecord, QuizQuestion};
use trainer_core::scoring::{self, PerformanceBand};
use trainer_core::time;

const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Correct,
    Incorrect,
    Skipped,
}

impl ReviewStatus {
    #[must_use]
    pub fn from_answer(answer: &QuizAnswerRecord) -> Self {
        if answer.is_skipped() {
            Self::Skipped
        } else if answer.is_correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }
}

/// Per-question line of the scorecard review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionReview {
    pub question_index: usize,
    pub preview: String,
    pub selected: Option<String>,
    pub correct: String,
    pub status: ReviewStatus,
}

/// Final tally of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizScorecard {
    pub score: u32,
    pub correct: usize,
    pub incorrect: usize,
    pub skipped: usize,
    pub total: usize,
    pub elapsed_secs: u64,
    pub elapsed: String,
    pub band: PerformanceBand,
    pub title: String,
    pub message: String,
    pub reviews: Vec<QuestionReview>,
}

impl QuizScorecard {
    /// Tallies `answers` against the `questions` they were given for.
    #[must_use]
    pub fn tally(
        questions: &[QuizQuestion],
        answers: &[QuizAnswerRecord],
        elapsed_secs: u64,
    ) -> Self {
        let total = answers.len();
        let correct = answers.iter().filter(|a| a.is_correct).count();
        let skipped = answers.iter().filter(|a| a.is_skipped()).count();
        let incorrect = total - correct - skipped;

        let score = scoring::round_percent(
            u64::try_from(correct).unwrap_or(u64::MAX),
            u64::try_from(total).unwrap_or(u64::MAX),
        );
        let band = PerformanceBand::from_percentage(score);

        let reviews = answers
            .iter()
            .filter_map(|answer| {
                let question = questions.get(answer.question_index)?;
                Some(QuestionReview {
                    question_index: answer.question_index,
                    preview: preview(&question.question),
                    selected: answer
                        .selected_index
                        .and_then(|i| question.option(i))
                        .map(str::to_string),
                    correct: question.correct_option().unwrap_or_default().to_string(),
                    status: ReviewStatus::from_answer(answer),
                })
            })
            .collect();

        Self {
            score,
            correct,
            incorrect,
            skipped,
            total,
            elapsed_secs,
            elapsed: time::format_clock(elapsed_secs),
            band,
            title: band.title().to_string(),
            message: band.message().to_string(),
            reviews,
        }
    }
}

fn preview(question: &str) -> String {
    if question.chars().count() <= PREVIEW_CHARS {
        return question.to_string();
    }
    let mut short: String = question.chars().take(PREVIEW_CHARS).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<QuizQuestion> {
        vec![
            QuizQuestion::new("Q1", vec!["a".into(), "b".into()], 0),
            QuizQuestion::new("Q2", vec!["a".into(), "b".into()], 1),
            QuizQuestion::new("Q3", vec!["a".into(), "b".into()], 1),
        ]
    }

    #[test]
    fn counts_partition_the_answers() {
        let qs = questions();
        let answers = vec![
            QuizAnswerRecord::new(0, &qs[0], Some(0)),
            QuizAnswerRecord::new(1, &qs[1], None),
            QuizAnswerRecord::new(2, &qs[2], Some(0)),
        ];
        let card = QuizScorecard::tally(&qs, &answers, 65);
        assert_eq!(card.correct, 1);
        assert_eq!(card.skipped, 1);
        assert_eq!(card.incorrect, 1);
        assert_eq!(card.total, 3);
        assert_eq!(card.score, 33);
        assert_eq!(card.elapsed, "1:05");
        assert_eq!(card.title, "Keep Learning!");

        let statuses: Vec<ReviewStatus> = card.reviews.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                ReviewStatus::Correct,
                ReviewStatus::Skipped,
                ReviewStatus::Incorrect
            ]
        );
        assert_eq!(card.reviews[1].selected, None);
        assert_eq!(card.reviews[2].selected.as_deref(), Some("a"));
        assert_eq!(card.reviews[2].correct, "b");
    }

    #[test]
    fn out_of_range_selection_has_no_option_text() {
        let qs = questions();
        let answers = vec![QuizAnswerRecord::new(0, &qs[0], Some(7))];
        let card = QuizScorecard::tally(&qs, &answers, 0);
        assert_eq!(card.incorrect, 1);
        assert_eq!(card.reviews[0].selected, None);
        assert_eq!(card.reviews[0].status, ReviewStatus::Incorrect);
    }

    #[test]
    fn empty_tally_scores_zero() {
        let card = QuizScorecard::tally(&[], &[], 0);
        assert_eq!(card.score, 0);
        assert_eq!(card.total, 0);
        assert!(card.reviews.is_empty());
    }

    #[test]
    fn long_questions_are_truncated_in_review() {
        let long = "x".repeat(61);
        assert_eq!(preview(&long), format!("{}...", "x".repeat(60)));
        let exact = "y".repeat(60);
        assert_eq!(preview(&exact), exact);
    }
}
