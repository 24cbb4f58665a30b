use std::time::Duration;

use dioxus::core::Task;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use kids_core::Catalog;
use kids_core::model::Video;
use services::{PlaybackEvent, ProgressService};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::views::components::{ProgressBar, QuizCard, VideoCard};
use crate::vm::{PlayerVm, QuizCardVm, VideoCardVm, map_quiz_card, map_video_card, open_video};

const TICK: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, PartialEq)]
struct Related {
    watched: bool,
    quizzes: Vec<QuizCardVm>,
    videos: Vec<VideoCardVm>,
}

fn related_content(
    catalog: &Catalog,
    progress: &ProgressService,
    video: &Video,
) -> Result<Related, ViewError> {
    let snapshot = progress.snapshot()?;
    let user = snapshot.user.as_ref();
    Ok(Related {
        watched: user.is_some_and(|user| user.has_watched(video.id())),
        quizzes: catalog
            .related_quizzes(video)
            .into_iter()
            .map(|quiz| map_quiz_card(quiz, user, &snapshot.results))
            .collect(),
        videos: catalog
            .related_videos(video)
            .into_iter()
            .map(|other| map_video_card(other, user))
            .collect(),
    })
}

#[component]
pub fn VideoPlayerView(video_id: String) -> Element {
    rsx! {
        VideoPlayerScreen { key: "{video_id}", video_id: video_id.clone() }
    }
}

#[component]
fn VideoPlayerScreen(video_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let catalog = ctx.catalog();
    let progress = ctx.progress();
    let videos = ctx.videos();

    let player = use_signal({
        let videos = videos.clone();
        let video_id = video_id.clone();
        move || open_video(&videos, &video_id)
    });
    let error = use_signal(|| None::<ViewError>);
    let ticker = use_signal(|| None::<Task>);

    use_effect(move || {
        if matches!(*player.read(), Err(ViewError::NotFound)) {
            let _ = navigator.replace(Route::Videos {});
        }
    });

    let toggle_playback = use_callback(move |()| {
        let mut player = player;
        let mut ticker = ticker;
        let mut error = error;

        let playing = match player.write().as_mut() {
            Ok(player) => player.toggle(),
            Err(_) => return,
        };
        if let Some(task) = ticker.write().take() {
            task.cancel();
        }
        if !playing {
            return;
        }

        let videos = videos.clone();
        let task = spawn(async move {
            loop {
                tokio::time::sleep(TICK).await;
                let event = match player.write().as_mut() {
                    Ok(player) => player.tick(&videos),
                    Err(_) => return,
                };
                match event {
                    Ok(PlaybackEvent::Ended) | Ok(PlaybackEvent::Idle) => return,
                    Ok(_) => {}
                    Err(err) => {
                        error.set(Some(err));
                        return;
                    }
                }
            }
        });
        ticker.set(Some(task));
    });

    let loaded = match &*player.read() {
        Ok(player) => Ok(PlayerScreen::from_vm(player)),
        Err(err) => Err(*err),
    };
    let screen = match loaded {
        Ok(screen) => screen,
        Err(err) => {
            return rsx! {
                div { class: "page player",
                    div { class: "empty",
                        div { class: "empty-icon", "🎬" }
                        h3 {
                            if err == ViewError::NotFound { "Video not found" } else { "Oops!" }
                        }
                        p { class: "muted", "{err.message()}" }
                        Link { class: "button button--primary", to: Route::Videos {}, "Back to Videos" }
                    }
                }
            };
        }
    };

    let related = catalog
        .video(screen.video.id())
        .ok_or(ViewError::NotFound)
        .and_then(|video| related_content(&catalog, &progress, video));
    let watched = screen.reached_threshold
        || related.as_ref().is_ok_and(|related| related.watched);
    let first_related_quiz = related
        .as_ref()
        .ok()
        .and_then(|related| related.quizzes.first())
        .map(|quiz| quiz.id.clone());

    rsx! {
        div { class: "page player",
            header { class: "page-header",
                Link { class: "button button--ghost button--sm", to: Route::Videos {}, "← Videos" }
                span { class: "pill", "{screen.video.category().icon()} {screen.video.category().name()}" }
            }

            div { class: "player-frame",
                if screen.is_playing {
                    iframe {
                        class: "player-embed",
                        src: "{screen.video.video_url()}",
                        title: "{screen.video.title()}",
                        allow: "autoplay; encrypted-media",
                    }
                } else {
                    img {
                        class: "player-thumb",
                        src: "{screen.video.thumbnail_url()}",
                        alt: "{screen.video.title()}",
                    }
                }
                button {
                    class: if screen.is_playing { "player-toggle player-toggle--playing" } else { "player-toggle" },
                    r#type: "button",
                    onclick: move |_| toggle_playback.call(()),
                    if screen.is_playing { "⏸" } else { "▶" }
                }
            }

            div { class: "player-controls",
                ProgressBar { percent: screen.percent }
                div { class: "player-meta",
                    span { class: "muted", "{screen.position_label}" }
                    if watched {
                        span { class: "pill pill--done", "✓ Watched" }
                    }
                }
            }

            section { class: "panel",
                h1 { class: "player-title", "{screen.video.title()}" }
                p { "{screen.video.description()}" }
                div { class: "tags",
                    for tag in screen.video.tags().iter() {
                        span { class: "tag", "#{tag}" }
                    }
                }
            }

            if let Some(err) = error() {
                p { class: "notice notice--error", "{err.message()}" }
            }

            if screen.show_suggestions {
                section { class: "panel suggestions",
                    h3 { "Great job watching the video! 🎉" }
                    p { class: "muted", "Ready to test what you learned?" }
                    if let Some(quiz_id) = first_related_quiz {
                        Link { class: "button button--fun", to: Route::Quiz { quiz_id }, "🧩 Take Related Quiz" }
                    }
                }
            }

            match related {
                Err(err) => rsx! {
                    p { class: "notice notice--error", "{err.message()}" }
                },
                Ok(related) => rsx! {
                    if !related.quizzes.is_empty() {
                        section { class: "related",
                            h2 { class: "section-title", "Test Your Knowledge" }
                            div { class: "grid",
                                for card in related.quizzes.iter() {
                                    QuizCard { key: "{card.id}", card: card.clone() }
                                }
                            }
                        }
                    }
                    if !related.videos.is_empty() {
                        section { class: "related",
                            h2 { class: "section-title", "You Might Also Like" }
                            div { class: "grid",
                                for card in related.videos.iter() {
                                    VideoCard { key: "{card.id}", card: card.clone() }
                                }
                            }
                        }
                    }
                },
            }

            div { class: "actions",
                Link { class: "button button--primary", to: Route::Videos {}, "🎬 Browse More Videos" }
                Link { class: "button button--outline", to: Route::Quizzes {}, "🧩 Take a Quiz" }
            }
        }
    }
}

/// Render-time copy of the player.
struct PlayerScreen {
    video: Video,
    is_playing: bool,
    percent: u32,
    position_label: String,
    show_suggestions: bool,
    reached_threshold: bool,
}

impl PlayerScreen {
    fn from_vm(player: &PlayerVm) -> Self {
        Self {
            video: player.video().clone(),
            is_playing: player.is_playing(),
            percent: player.percent(),
            position_label: player.position_label(),
            show_suggestions: player.show_suggestions(),
            reached_threshold: player.has_reached_threshold(),
        }
    }
}
