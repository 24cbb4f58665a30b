use std::collections::BTreeSet;

use dioxus::prelude::*;
use dioxus_router::Link;
use kids_core::model::AgeGroup;

use crate::routes::Route;
use crate::vm::{BadgeVm, MAX_STARS, QuizCardVm, VideoCardVm, star_count};

#[component]
pub(super) fn QuizCard(card: QuizCardVm) -> Element {
    rsx! {
        div { class: if card.completed { "card quiz-card quiz-card--done" } else { "card quiz-card" },
            div { class: "card-header",
                span { class: "card-icon", "{card.icon}" }
                div {
                    h3 { class: "card-title", "{card.title}" }
                    p { class: "card-subtitle", "{card.category_label} • {card.age_label}" }
                }
                if card.completed {
                    span { class: "pill pill--done", "✓ Done" }
                }
            }
            p { class: "card-body", "{card.description}" }
            div { class: "card-meta",
                span { class: "pill", "{card.difficulty_label}" }
                span { class: "pill", "{card.question_count} questions" }
                if let Some(score) = card.best_score {
                    span { class: "pill pill--score", "Best: {score}%" }
                }
            }
            Link { class: "button button--fun", to: Route::Quiz { quiz_id: card.id.clone() },
                if card.completed { "Play Again" } else { "Start Quiz" }
            }
        }
    }
}

#[component]
pub(super) fn VideoCard(card: VideoCardVm) -> Element {
    rsx! {
        div { class: "card video-card",
            Link { class: "video-thumb", to: Route::VideoPlayer { video_id: card.id.clone() },
                img { src: "{card.thumbnail_url}", alt: "{card.title}" }
                span { class: "video-duration", "{card.duration_label}" }
                if card.watched {
                    span { class: "pill pill--done video-watched", "👁 Watched" }
                }
            }
            h3 { class: "card-title", "{card.title}" }
            p { class: "card-body", "{card.description}" }
            div { class: "card-meta",
                span { class: "pill", "{card.category_icon} {card.category_label}" }
                span { class: "pill", "{card.age_label}" }
            }
            div { class: "tags",
                for tag in card.tags.iter() {
                    span { class: "tag", "#{tag}" }
                }
            }
        }
    }
}

#[component]
pub(super) fn ScoreStars(score: u32) -> Element {
    let earned = star_count(score);
    rsx! {
        div { class: "stars", title: "{earned} of {MAX_STARS} stars",
            for index in 0..MAX_STARS {
                span {
                    class: if index < earned { "star star--on" } else { "star" },
                    "★"
                }
            }
        }
    }
}

#[component]
pub(super) fn BadgeTile(badge: BadgeVm) -> Element {
    rsx! {
        div { class: if badge.earned { "badge badge--earned" } else { "badge" },
            span { class: "badge-icon", "{badge.icon}" }
            div {
                p { class: "badge-name", "{badge.name}" }
                p { class: "badge-description", "{badge.description}" }
            }
        }
    }
}

#[component]
pub(super) fn StatTile(icon: &'static str, value: String, label: &'static str) -> Element {
    rsx! {
        div { class: "stat",
            div { class: "stat-icon", "{icon}" }
            div { class: "stat-value", "{value}" }
            div { class: "stat-label", "{label}" }
        }
    }
}

#[component]
pub(super) fn ProgressBar(percent: u32) -> Element {
    let width = percent.min(100);
    rsx! {
        div { class: "progress",
            div { class: "progress-fill", style: "width: {width}%;" }
        }
    }
}

#[component]
pub(super) fn FilterChip(
    icon: &'static str,
    label: &'static str,
    selected: bool,
    on_toggle: Callback<()>,
) -> Element {
    rsx! {
        button {
            class: if selected { "chip chip--selected" } else { "chip" },
            r#type: "button",
            onclick: move |_| on_toggle.call(()),
            span { "{icon}" }
            span { "{label}" }
        }
    }
}

#[component]
pub(super) fn AgeFilterBar(selected: BTreeSet<AgeGroup>, on_toggle: Callback<AgeGroup>) -> Element {
    rsx! {
        div { class: "filter-bar",
            h4 { "Age group" }
            div { class: "chips",
                for group in AgeGroup::ALL {
                    FilterChip {
                        key: "{group.id()}",
                        icon: group.icon(),
                        label: group.label(),
                        selected: selected.contains(&group),
                        on_toggle: move |()| on_toggle.call(group),
                    }
                }
            }
        }
    }
}

/// Add `value` if missing, remove it otherwise.
pub(super) fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}
