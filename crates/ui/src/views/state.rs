use dioxus::prelude::*;
use services::{ProgressError, QuizLoopError, VideoServiceError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The requested quiz or video is not in the catalog.
    NotFound,
    /// The action needs a learner profile.
    NoProfile,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::NotFound => "We couldn't find that one. Let's pick another!",
            ViewError::NoProfile => "Create your profile first so we can save your stars!",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<QuizLoopError> for ViewError {
    fn from(err: QuizLoopError) -> Self {
        match err {
            QuizLoopError::NotFound(_) => ViewError::NotFound,
            QuizLoopError::NoActiveUser => ViewError::NoProfile,
            _ => ViewError::Unknown,
        }
    }
}

impl From<VideoServiceError> for ViewError {
    fn from(err: VideoServiceError) -> Self {
        match err {
            VideoServiceError::NotFound(_) => ViewError::NotFound,
            _ => ViewError::Unknown,
        }
    }
}

impl From<ProgressError> for ViewError {
    fn from(err: ProgressError) -> Self {
        match err {
            ProgressError::NoActiveUser => ViewError::NoProfile,
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
