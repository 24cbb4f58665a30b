use dioxus::prelude::*;
use kids_core::QuizFilter;
use kids_core::model::{AgeGroup, QuizCategory};

use crate::context::AppContext;
use crate::views::components::{AgeFilterBar, FilterChip, QuizCard, toggle};
use crate::views::ViewError;
use crate::vm::{QuizCardVm, filter_summary, map_quiz_card};

#[derive(Clone, Debug, PartialEq)]
struct QuizListing {
    cards: Vec<QuizCardVm>,
    total: usize,
}

#[component]
pub fn QuizzesView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let progress = ctx.progress();

    let mut filter = use_signal(QuizFilter::default);
    let mut show_filters = use_signal(|| false);

    let listing = use_memo(move || {
        let filter = filter.read();
        let snapshot = progress.snapshot().map_err(ViewError::from)?;
        let cards = catalog
            .filter_quizzes(&filter)
            .map(|quiz| map_quiz_card(quiz, snapshot.user.as_ref(), &snapshot.results))
            .collect();
        Ok::<_, ViewError>(QuizListing {
            cards,
            total: catalog.quizzes().len(),
        })
    });

    let on_age_toggle = use_callback(move |group: AgeGroup| {
        toggle(&mut filter.write().age_groups, group);
    });
    let on_category_toggle = use_callback(move |category: QuizCategory| {
        toggle(&mut filter.write().categories, category);
    });
    let clear_filters = move |_: MouseEvent| filter.set(QuizFilter::default());

    let has_filters = !filter.read().is_empty();

    rsx! {
        div { class: "page quizzes",
            header { class: "page-header",
                div {
                    h1 { "Fun Quizzes 🧩" }
                    p { class: "muted", "Pick a quiz and show what you know!" }
                }
                button {
                    class: "button button--outline button--sm",
                    r#type: "button",
                    onclick: move |_| show_filters.toggle(),
                    if show_filters() { "Hide" } else { "Filters" }
                }
            }

            if show_filters() {
                section { class: "panel filters",
                    AgeFilterBar {
                        selected: filter.read().age_groups.clone(),
                        on_toggle: on_age_toggle,
                    }
                    div { class: "filter-bar",
                        h4 { "Category" }
                        div { class: "chips",
                            for category in QuizCategory::ALL {
                                FilterChip {
                                    key: "{category.id()}",
                                    icon: category.icon(),
                                    label: category.name(),
                                    selected: filter.read().categories.contains(&category),
                                    on_toggle: move |()| on_category_toggle.call(category),
                                }
                            }
                        }
                    }
                    if has_filters {
                        button { class: "button button--ghost button--sm", r#type: "button", onclick: clear_filters,
                            "Clear All Filters"
                        }
                    }
                }
            }

            match &*listing.read() {
                Err(err) => rsx! {
                    p { class: "notice notice--error", "{err.message()}" }
                },
                Ok(listing) => {
                    let summary = filter_summary(listing.cards.len(), listing.total, "quizzes", "");
                    rsx! {
                    if has_filters {
                        div { class: "filter-summary",
                            span { "{summary}" }
                            button { class: "link-button", r#type: "button", onclick: clear_filters, "Clear filters" }
                        }
                    }
                    if listing.cards.is_empty() {
                        div { class: "empty",
                            div { class: "empty-icon", "🔍" }
                            h3 { "No quizzes found" }
                            p { class: "muted", "Try adjusting your filters or check back later for new quizzes!" }
                        }
                    } else {
                        div { class: "grid",
                            for card in listing.cards.iter() {
                                QuizCard { key: "{card.id}", card: card.clone() }
                            }
                        }
                    }
                    }
                }
            }
        }
    }
}
