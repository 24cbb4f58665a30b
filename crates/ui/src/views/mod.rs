mod components;
mod home;
mod quiz;
mod quiz_result;
mod quizzes;
mod settings;
mod state;
mod video_player;
mod videos;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use quiz::QuizView;
pub use quiz_result::QuizResultView;
pub use quizzes::QuizzesView;
pub use settings::SettingsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use video_player::VideoPlayerView;
pub use videos::VideosView;
