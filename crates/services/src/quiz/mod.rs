mod scorecard;
mod session;

pub use crate::error::QuizError;
pub use scorecard::{QuestionReview, QuizScorecard, ReviewStatus};
pub use session::{QuizPhase, QuizSession, QuizStep};
