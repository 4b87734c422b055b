use chrono::{DateTime, Utc};
use std::fmt;

use trainer_core::model::{QuizAnswerRecord, QuizQuestion};
use trainer_core::time;

use super::scorecard::QuizScorecard;
use crate::error::QuizError;
use crate::view::QuestionView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Active { question_index: usize },
    Completed,
}

/// Result of answering one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    Next {
        answer: QuizAnswerRecord,
        explanation: Option<String>,
        next_index: usize,
    },
    Completed {
        answer: QuizAnswerRecord,
        explanation: Option<String>,
        scorecard: QuizScorecard,
    },
}

impl QuizStep {
    #[must_use]
    pub fn answer(&self) -> &QuizAnswerRecord {
        match self {
            Self::Next { answer, .. } | Self::Completed { answer, .. } => answer,
        }
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        match self {
            Self::Next { explanation, .. } | Self::Completed { explanation, .. } => {
                explanation.as_deref()
            }
        }
    }
}

/// Linear question/answer run with its own scoring.
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    phase: QuizPhase,
    answers: Vec<QuizAnswerRecord>,
    started_at: DateTime<Utc>,
    scorecard: Option<QuizScorecard>,
}

impl QuizSession {
    /// Start a quiz over `questions` at the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if there are no questions.
    pub fn start(
        questions: Vec<QuizQuestion>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        Ok(Self {
            questions,
            phase: QuizPhase::Active { question_index: 0 },
            answers: Vec::new(),
            started_at,
            scorecard: None,
        })
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[QuizAnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn scorecard(&self) -> Option<&QuizScorecard> {
        self.scorecard.as_ref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == QuizPhase::Completed
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.phase {
            QuizPhase::Active { question_index } => self.questions.get(question_index),
            QuizPhase::Completed => None,
        }
    }

    #[must_use]
    pub fn current_question_view(&self) -> Option<QuestionView> {
        let QuizPhase::Active { question_index } = self.phase else {
            return None;
        };
        let question = self.questions.get(question_index)?;
        Some(QuestionView::new(
            question_index,
            self.questions.len(),
            question,
        ))
    }

    /// Answer the current question and move to the next one.
    ///
    /// `None` skips the question. An out-of-range index is recorded as incorrect.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` once every question has been answered.
    pub fn submit_answer(
        &mut self,
        selected: Option<usize>,
        answered_at: DateTime<Utc>,
    ) -> Result<QuizStep, QuizError> {
        let QuizPhase::Active { question_index } = self.phase else {
            return Err(QuizError::Completed);
        };
        let question = self
            .questions
            .get(question_index)
            .ok_or(QuizError::Completed)?;

        let answer = QuizAnswerRecord::new(question_index, question, selected);
        let explanation = question.explanation.clone();
        self.answers.push(answer);

        let next_index = question_index + 1;
        if next_index < self.questions.len() {
            self.phase = QuizPhase::Active {
                question_index: next_index,
            };
            return Ok(QuizStep::Next {
                answer,
                explanation,
                next_index,
            });
        }

        let elapsed = time::elapsed_secs(Some(self.started_at), answered_at);
        let scorecard = QuizScorecard::tally(&self.questions, &self.answers, elapsed);
        log::info!(
            "quiz completed: {}/{} correct, {} skipped",
            scorecard.correct,
            scorecard.total,
            scorecard.skipped
        );
        self.phase = QuizPhase::Completed;
        self.scorecard = Some(scorecard.clone());
        Ok(QuizStep::Completed {
            answer,
            explanation,
            scorecard,
        })
    }

    /// Same as submitting `None`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` once every question has been answered.
    pub fn skip(&mut self, skipped_at: DateTime<Utc>) -> Result<QuizStep, QuizError> {
        self.submit_answer(None, skipped_at)
    }

    /// Restart the same questions from the first one with no history.
    pub fn retake(&mut self, started_at: DateTime<Utc>) {
        self.phase = QuizPhase::Active { question_index: 0 };
        self.answers.clear();
        self.started_at = started_at;
        self.scorecard = None;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("phase", &self.phase)
            .field("answers_len", &self.answers.len())
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}
