use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::StatTile;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::map_progress;

const WELCOME_ANIMATION: Duration = Duration::from_secs(2);

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();

    let mut show_welcome = use_signal(|| true);
    use_hook(move || {
        spawn(async move {
            tokio::time::sleep(WELCOME_ANIMATION).await;
            show_welcome.set(false);
        });
    });

    let resource = use_resource(move || {
        let progress = progress.clone();
        async move {
            let snapshot = progress.snapshot().map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_progress(&snapshot))
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page home",
            header { class: if show_welcome() { "hero hero--welcome" } else { "hero" },
                h1 {
                    "Welcome to "
                    span { class: "gradient-text", "Kids Learning!" }
                }
                p { class: "lead", "Fun learning with quizzes and videos! 🎉" }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "notice notice--error", "{err.message()}" }
                },
                ViewState::Ready(vm) => rsx! {
                    if let Some(learner) = vm.learner.as_ref() {
                        section { class: "panel learner-panel",
                            div { class: "learner-greeting",
                                h2 { "Hi, {learner.name}! 👋" }
                                p { class: "muted", "Keep up the great work!" }
                            }
                            div { class: "learner-score",
                                span { class: "score-value", "🏆 {vm.total_score}" }
                                p { class: "muted", "Total Points" }
                            }
                        }
                    } else {
                        section { class: "panel",
                            h2 { "Who's learning today?" }
                            p { class: "muted", "Create a profile to collect stars and badges." }
                            Link { class: "button button--primary", to: Route::Settings {}, "Create Profile" }
                        }
                    }

                    div { class: "actions",
                        Link { class: "button button--fun button--xl", to: Route::Quizzes {},
                            span { class: "button-title", "▶ Play Quizzes" }
                            span { class: "button-caption", "Test your knowledge with fun questions!" }
                        }
                        Link { class: "button button--primary button--xl", to: Route::Videos {},
                            span { class: "button-title", "🎬 Watch Videos" }
                            span { class: "button-caption", "Learn with exciting educational videos!" }
                        }
                    }

                    section { class: "panel",
                        h3 { class: "panel-title", "Learning Progress" }
                        div { class: "stats",
                            StatTile { icon: "🎯", value: format!("{} Quizzes", vm.completed_quizzes), label: "Completed" }
                            StatTile { icon: "📺", value: format!("{} Videos", vm.completed_videos), label: "Watched" }
                            StatTile { icon: "⭐", value: format!("{} Points", vm.total_score), label: "Earned" }
                        }
                        p { class: "muted badge-count", "Badges earned: {vm.earned_count()} of {vm.badges.len()}" }
                    }
                },
            }
        }
    }
}
