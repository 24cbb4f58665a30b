use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::{ProfileError, QuizError, QuizResultError, VideoError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    QuizResult(#[from] QuizResultError),
    #[error(transparent)]
    Video(#[from] VideoError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
