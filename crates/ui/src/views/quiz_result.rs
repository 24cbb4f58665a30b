use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::Link;
use kids_core::model::QuizId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::views::components::{BadgeTile, ScoreStars};
use crate::vm::{ResultVm, map_result};

const CELEBRATION: Duration = Duration::from_secs(5);

/// The attempt that just finished, or the latest recorded one for `quiz_id`.
///
/// Only the attempt handed over by the quiz screen carries new badges.
fn load_result(ctx: &AppContext, quiz_id: &str) -> Result<Option<ResultVm>, ViewError> {
    let quiz_id = QuizId::new(quiz_id);
    let catalog = ctx.catalog();
    let quiz = catalog.quiz(&quiz_id).ok_or(ViewError::NotFound)?;

    if let Some(completion) = ctx.take_completion(&quiz_id) {
        return Ok(Some(map_result(
            quiz,
            &completion.result,
            &completion.new_badges,
            catalog.badges(),
        )));
    }
    let latest = ctx.progress().latest_result_for(&quiz_id)?;
    Ok(latest.map(|result| map_result(quiz, &result, &[], catalog.badges())))
}

#[component]
pub fn QuizResultView(quiz_id: String) -> Element {
    rsx! {
        QuizResultScreen { key: "{quiz_id}", quiz_id: quiz_id.clone() }
    }
}

#[component]
fn QuizResultScreen(quiz_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let loaded = use_hook(|| load_result(&ctx, &quiz_id));

    let mut celebrating = use_signal(|| matches!(loaded, Ok(Some(_))));
    use_hook(move || {
        spawn(async move {
            tokio::time::sleep(CELEBRATION).await;
            celebrating.set(false);
        });
    });

    let vm = match loaded {
        Ok(Some(vm)) => vm,
        Ok(None) | Err(ViewError::NotFound) => {
            return rsx! {
                div { class: "page result",
                    div { class: "empty",
                        div { class: "empty-icon", "🧩" }
                        h3 { "Quiz results not found" }
                        p { class: "muted", "Finish a quiz to see how you did!" }
                        Link { class: "button button--primary", to: Route::Quizzes {}, "Back to Quizzes" }
                    }
                }
            };
        }
        Err(err) => {
            return rsx! {
                div { class: "page result",
                    p { class: "notice notice--error", "{err.message()}" }
                }
            };
        }
    };

    rsx! {
        div { class: "page result",
            if celebrating() {
                div {
                    class: "celebration",
                    onclick: move |_| celebrating.set(false),
                    div { class: "celebration-card",
                        div { class: "celebration-icon", "🎉" }
                        h2 { "Quiz Complete! 🎉" }
                        p { class: "muted", "You scored {vm.score}%" }
                    }
                }
            }

            section { class: "panel result-summary {vm.tier.css_class()}",
                div { class: "trophy", "{vm.trophy}" }
                h1 { "{vm.title} Results" }
                p { class: "lead", "{vm.tier.message()}" }
                ScoreStars { score: vm.score }
                div { class: "result-score",
                    span { class: "score-value", "{vm.score}%" }
                    p { class: "muted", "{vm.correct_answers} out of {vm.total_questions} correct" }
                }
                div { class: "result-meta",
                    span { class: "pill", "⏱ {vm.time_spent}" }
                    span { class: "pill", "📅 {vm.completed_at}" }
                }
            }

            if !vm.new_badges.is_empty() {
                section { class: "panel new-badges",
                    h3 { class: "panel-title", "New Badge Earned! 🎉" }
                    div { class: "badges",
                        for badge in vm.new_badges.iter() {
                            BadgeTile { key: "{badge.id}", badge: badge.clone() }
                        }
                    }
                }
            }

            section { class: "panel breakdown",
                h3 { class: "panel-title", "Question Breakdown" }
                for row in vm.rows.iter() {
                    div {
                        key: "{row.number}",
                        class: if row.is_correct { "breakdown-row breakdown-row--correct" } else { "breakdown-row breakdown-row--wrong" },
                        div { class: "breakdown-mark",
                            if row.is_correct { "✅" } else { "❌" }
                        }
                        div {
                            p { class: "breakdown-question", "{row.number}. {row.question}" }
                            p { class: "muted",
                                "Your answer: "
                                match row.user_answer.as_deref() {
                                    Some(answer) => rsx! { strong { "{answer}" } },
                                    None => rsx! { em { "No answer" } },
                                }
                            }
                            if !row.is_correct {
                                p { class: "muted",
                                    "Correct answer: "
                                    strong { "{row.correct_answer}" }
                                }
                            }
                        }
                    }
                }
            }

            div { class: "actions",
                Link { class: "button button--fun", to: Route::Quiz { quiz_id: vm.quiz_id.clone() }, "🔄 Try Again" }
                Link { class: "button button--primary", to: Route::Videos {}, "🎬 Watch Videos" }
                Link { class: "button button--outline", to: Route::Quizzes {}, "🧩 More Quizzes" }
                Link { class: "button button--ghost", to: Route::Home {}, "🏠 Go Home" }
            }
        }
    }
}
