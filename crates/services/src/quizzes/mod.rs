mod progress;
mod session;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::{QuizLoopError, QuizSessionError};
pub use progress::QuizProgress;
pub use session::{Advance, AnswerFeedback, QuizSession};
pub use workflow::{QuizCompletion, QuizLoopService};
