use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::{AnswerFeedback, RecognitionError, VoiceError};
use tracing::debug;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::views::components::ProgressBar;
use crate::vm::{
    AnswerOptionVm, QuizOutcome, QuizPhase, QuizVm, listen, recognition_notice,
    speak_options_for, start_quiz,
};

const FEEDBACK_DELAY: Duration = Duration::from_secs(3);
const SPEAKING_RESET: Duration = Duration::from_secs(5);

/// Render-time copy of the current question.
struct QuestionScreen {
    phase: QuizPhase,
    percent: u32,
    progress_label: String,
    title: String,
    question: String,
    is_voice: bool,
    options: Vec<AnswerOptionVm>,
    voice_answer: Option<String>,
    feedback: Option<AnswerFeedback>,
    can_go_back: bool,
}

impl QuestionScreen {
    fn from_vm(vm: &QuizVm) -> Self {
        Self {
            phase: vm.phase(),
            percent: vm.progress().percent,
            progress_label: vm.progress_label(),
            title: vm.title().to_string(),
            question: vm.question_text().unwrap_or_default().to_string(),
            is_voice: vm.is_voice_question(),
            options: vm.options(),
            voice_answer: vm.voice_answer().map(str::to_string),
            feedback: vm.feedback().cloned(),
            can_go_back: vm.can_go_back(),
        }
    }
}

#[component]
pub fn QuizView(quiz_id: String) -> Element {
    rsx! {
        QuizScreen { key: "{quiz_id}", quiz_id: quiz_id.clone() }
    }
}

#[component]
fn QuizScreen(quiz_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();
    let text_to_speech = ctx.text_to_speech();
    let speech_to_text = ctx.speech_to_text();

    let vm = use_signal({
        let quiz_loop = quiz_loop.clone();
        let quiz_id = quiz_id.clone();
        move || start_quiz(&quiz_loop, &quiz_id)
    });
    let error = use_signal(|| None::<ViewError>);
    let notice = use_signal(|| None::<&'static str>);
    let speaking = use_signal(|| false);
    let recording = use_signal(|| false);

    use_effect(move || {
        if matches!(*vm.read(), Err(ViewError::NotFound)) {
            let _ = navigator.replace(Route::Quizzes {});
        }
    });

    let advance = {
        let ctx = ctx.clone();
        let quiz_loop = quiz_loop.clone();
        use_callback(move |()| {
            let mut vm = vm;
            let mut error = error;

            let outcome = match vm.write().as_mut() {
                Ok(vm) if vm.phase() != QuizPhase::Answering => vm.continue_quiz(&quiz_loop),
                _ => return,
            };
            match outcome {
                Ok(QuizOutcome::Continue) => error.set(None),
                Ok(QuizOutcome::Completed(completion)) => {
                    let quiz_id = completion.result.quiz_id().to_string();
                    ctx.stash_completion(completion);
                    let _ = navigator.push(Route::QuizResult { quiz_id });
                }
                Err(err) => error.set(Some(err)),
            }
        })
    };

    let choose = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |answer: String| {
            let mut vm = vm;
            let mut error = error;

            let feedback = match vm.write().as_mut() {
                Ok(vm) if vm.phase() == QuizPhase::Answering => vm.answer(&quiz_loop, &answer),
                _ => return,
            };
            match feedback {
                Ok(_) => {
                    error.set(None);
                    spawn(async move {
                        tokio::time::sleep(FEEDBACK_DELAY).await;
                        advance.call(());
                    });
                }
                Err(err) => error.set(Some(err)),
            }
        })
    };

    let read_aloud = {
        let progress = ctx.progress();
        let text_to_speech = text_to_speech.clone();
        use_callback(move |text: String| {
            let mut speaking = speaking;
            let mut notice = notice;

            if speaking() {
                text_to_speech.stop();
                speaking.set(false);
                return;
            }
            speaking.set(true);
            let learner = progress.active_user().ok().flatten();
            let options = speak_options_for(learner.as_ref());
            let text_to_speech = text_to_speech.clone();
            spawn(async move {
                match text_to_speech.speak(&text, options).await {
                    Ok(()) | Err(VoiceError::Interrupted) => {}
                    Err(VoiceError::Unsupported) => {
                        notice.set(Some("Reading aloud is not supported here."));
                    }
                    Err(err) => debug!(error = %err, "read aloud failed"),
                }
                speaking.set(false);
            });
            // The indicator never sticks, even if the engine never reports back.
            spawn(async move {
                tokio::time::sleep(SPEAKING_RESET).await;
                speaking.set(false);
            });
        })
    };

    let toggle_recording = {
        let speech_to_text = speech_to_text.clone();
        use_callback(move |()| {
            let mut vm = vm;
            let mut recording = recording;
            let mut notice = notice;

            if recording() {
                speech_to_text.stop_listening();
                recording.set(false);
                return;
            }
            notice.set(None);
            recording.set(true);
            let mut outcomes = listen(&speech_to_text);
            spawn(async move {
                match outcomes.recv().await {
                    Some(Ok(transcript)) => {
                        if let Ok(vm) = vm.write().as_mut() {
                            vm.set_voice_answer(transcript.text);
                        }
                    }
                    Some(Err(RecognitionError::Aborted)) | None => {}
                    Some(Err(err)) => notice.set(Some(recognition_notice(&err))),
                }
                recording.set(false);
            });
        })
    };

    let go_back = use_callback(move |()| {
        let mut vm = vm;
        let mut notice = notice;
        if let Ok(vm) = vm.write().as_mut() {
            if vm.previous() {
                notice.set(None);
            }
        }
    });

    let screen = match &*vm.read() {
        Ok(vm) => Ok(QuestionScreen::from_vm(vm)),
        Err(err) => Err(*err),
    };
    let QuestionScreen {
        phase,
        percent,
        progress_label,
        title,
        question,
        is_voice,
        options,
        voice_answer,
        feedback,
        can_go_back,
    } = match screen {
        Ok(screen) => screen,
        Err(err) => {
            return rsx! {
                div { class: "page quiz",
                    div { class: "empty",
                        div { class: "empty-icon", "🧩" }
                        h3 {
                            if err == ViewError::NotFound { "Quiz not found" } else { "Oops!" }
                        }
                        p { class: "muted", "{err.message()}" }
                        Link { class: "button button--primary", to: Route::Quizzes {}, "Back to Quizzes" }
                    }
                }
            };
        }
    };

    let answering = phase == QuizPhase::Answering;

    rsx! {
        div { class: "page quiz",
            header { class: "quiz-header",
                Link { class: "button button--ghost button--sm", to: Route::Quizzes {}, "← Quizzes" }
                h1 { class: "quiz-title", "{title}" }
                span { class: "muted", "{progress_label}" }
            }
            ProgressBar { percent }

            if let Some(err) = error() {
                div { class: "notice notice--error",
                    p { "{err.message()}" }
                    if err == ViewError::NoProfile {
                        Link { class: "button button--primary button--sm", to: Route::Settings {}, "Create Profile" }
                    }
                    if phase == QuizPhase::ReadyToFinish {
                        button {
                            class: "button button--outline button--sm",
                            r#type: "button",
                            onclick: move |_| advance.call(()),
                            "Finish Quiz"
                        }
                    }
                }
            }
            if let Some(message) = notice() {
                p { class: "notice", "{message}" }
            }

            section { class: "panel question",
                div { class: "question-header",
                    h2 { class: "question-text", "{question}" }
                    button {
                        class: "button button--outline button--sm",
                        r#type: "button",
                        onclick: {
                            let question = question.clone();
                            move |_| read_aloud.call(question.clone())
                        },
                        if speaking() { "⏹ Stop" } else { "🔊 Listen" }
                    }
                }

                if is_voice {
                    div { class: "voice-answer",
                        button {
                            class: if recording() { "button button--danger button--lg recording" } else { "button button--fun button--lg" },
                            r#type: "button",
                            disabled: !answering,
                            onclick: move |_| toggle_recording.call(()),
                            if recording() { "⏹ Stop Recording" } else { "🎤 Start Recording" }
                        }
                        if recording() {
                            p { class: "muted listening", "Listening... say your answer!" }
                        }
                        if let Some(answer) = voice_answer {
                            div { class: "voice-transcript",
                                p {
                                    "Your answer: "
                                    strong { "{answer}" }
                                }
                                if answering {
                                    button {
                                        class: "button button--primary",
                                        r#type: "button",
                                        onclick: {
                                            let answer = answer.clone();
                                            move |_| choose.call(answer.clone())
                                        },
                                        "Submit Answer"
                                    }
                                }
                            }
                        }
                    }
                } else {
                    div { class: "options",
                        for option in options {
                            button {
                                key: "{option.letter}",
                                class: "{option.state.css_class()}",
                                r#type: "button",
                                disabled: !answering,
                                onclick: {
                                    let text = option.text.clone();
                                    move |_| choose.call(text.clone())
                                },
                                span { class: "option-letter", "{option.letter}" }
                                span { class: "option-text", "{option.text}" }
                            }
                        }
                    }
                }
            }

            if let Some(feedback) = feedback {
                section { class: if feedback.is_correct { "panel feedback feedback--correct" } else { "panel feedback feedback--wrong" },
                    h3 {
                        if feedback.is_correct { "Correct! 🎉" } else { "Not quite! 🤔" }
                    }
                    if !feedback.is_correct {
                        p { "The answer is: " strong { "{feedback.correct_answer}" } }
                    }
                    if let Some(explanation) = feedback.explanation.as_deref() {
                        p { class: "muted", "{explanation}" }
                    }
                    p { class: "muted",
                        if feedback.is_last { "Quiz completing..." } else { "Moving to next question..." }
                    }
                }
            }

            if can_go_back {
                div { class: "quiz-nav",
                    button {
                        class: "button button--outline",
                        r#type: "button",
                        onclick: move |_| go_back.call(()),
                        "← Previous"
                    }
                }
            }
        }
    }
}
