use serde::{Deserialize, Serialize};

/// A multiple-choice question asked after a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuizQuestion {
    #[must_use]
    pub fn new(question: impl Into<String>, options: Vec<String>, correct_answer: usize) -> Self {
        Self {
            question: question.into(),
            options,
            correct_answer,
            explanation: None,
        }
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// A skipped (`None`) or out-of-range selection is never correct.
    #[must_use]
    pub fn is_correct(&self, selected: Option<usize>) -> bool {
        selected == Some(self.correct_answer)
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.option(self.correct_answer)
    }
}

/// Outcome of one quiz question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizAnswerRecord {
    pub question_index: usize,
    pub selected_index: Option<usize>,
    pub correct_index: usize,
    pub is_correct: bool,
}

impl QuizAnswerRecord {
    #[must_use]
    pub fn new(question_index: usize, question: &QuizQuestion, selected: Option<usize>) -> Self {
        Self {
            question_index,
            selected_index: selected,
            correct_index: question.correct_answer,
            is_correct: question.is_correct(selected),
        }
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.selected_index.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> QuizQuestion {
        QuizQuestion::new(
            "Which is a red flag?",
            vec!["Your name".into(), "Urgency".into(), "Good formatting".into()],
            1,
        )
    }

    #[test]
    fn only_exact_index_is_correct() {
        let q = question();
        assert!(q.is_correct(Some(1)));
        assert!(!q.is_correct(Some(0)));
        assert!(!q.is_correct(Some(9)));
        assert!(!q.is_correct(None));
    }

    #[test]
    fn skipped_record_is_incorrect() {
        let record = QuizAnswerRecord::new(3, &question(), None);
        assert!(record.is_skipped());
        assert!(!record.is_correct);
        assert_eq!(record.correct_index, 1);
        assert_eq!(record.question_index, 3);
    }

    #[test]
    fn correct_option_text_lookup() {
        assert_eq!(question().correct_option(), Some("Urgency"));
        assert_eq!(question().option(5), None);
    }
}
