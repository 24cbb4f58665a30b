mod catalog_vm;
mod progress_vm;
mod quiz_vm;
mod result_vm;
mod score_vm;
mod time_fmt;
mod video_vm;
mod voice_vm;

pub use catalog_vm::{
    QuizCardVm, VideoCardVm, VideoSectionVm, filter_summary, group_videos_by_category,
    map_quiz_card, map_video_card,
};
pub use progress_vm::{
    BadgeVm, LearnerVm, ProfileFormVm, ProgressVm, age_label, map_progress, profile_notice,
};
pub use quiz_vm::{AnswerOptionVm, OptionState, QuizOutcome, QuizPhase, QuizVm, start_quiz};
pub use result_vm::{AnswerRowVm, ResultVm, map_result};
pub use score_vm::{MAX_STARS, ScoreTier, star_count, trophy_icon};
pub use time_fmt::{format_completed_at, format_elapsed, format_time};
pub use video_vm::{PlayerVm, open_video};
pub use voice_vm::{ListenOutcome, listen, recognition_notice, speak_options_for};
