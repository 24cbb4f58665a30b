#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod grading;
pub mod model;
pub mod progress;
pub mod time;

pub use catalog::{Catalog, QuizFilter, VideoFilter};
pub use error::Error;
pub use grading::{grade_answer, is_answer_correct};
pub use model::ProgressCounts;
pub use progress::ProgressStore;
pub use time::Clock;
