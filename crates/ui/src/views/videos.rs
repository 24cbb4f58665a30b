use dioxus::prelude::*;
use kids_core::VideoFilter;
use kids_core::model::{AgeGroup, VideoCategory};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::views::components::{AgeFilterBar, FilterChip, VideoCard, toggle};
use crate::vm::{VideoSectionVm, filter_summary, group_videos_by_category};

#[derive(Clone, Debug, PartialEq)]
struct VideoListing {
    sections: Vec<VideoSectionVm>,
    shown: usize,
    total: usize,
}

#[component]
pub fn VideosView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let progress = ctx.progress();

    let mut filter = use_signal(VideoFilter::default);
    let mut show_filters = use_signal(|| false);

    let listing = use_memo(move || {
        let filter = filter.read();
        let user = progress.active_user().map_err(ViewError::from)?;
        let sections = group_videos_by_category(catalog.filter_videos(&filter), user.as_ref());
        let shown = sections.iter().map(|section| section.videos.len()).sum();
        Ok::<_, ViewError>(VideoListing {
            sections,
            shown,
            total: catalog.videos().len(),
        })
    });

    let on_age_toggle = use_callback(move |group: AgeGroup| {
        toggle(&mut filter.write().age_groups, group);
    });
    let on_category_toggle = use_callback(move |category: VideoCategory| {
        toggle(&mut filter.write().categories, category);
    });
    let clear_filters = move |_: MouseEvent| filter.set(VideoFilter::default());

    let (has_filters, query) = {
        let current = filter.read();
        let has_filters = !current.age_groups.is_empty()
            || !current.categories.is_empty()
            || !current.query.trim().is_empty();
        (has_filters, current.query.clone())
    };

    rsx! {
        div { class: "page videos",
            header { class: "page-header",
                div {
                    h1 { "Learning Videos 🎬" }
                    p { class: "muted", "Watch, learn and have fun!" }
                }
                button {
                    class: "button button--outline button--sm",
                    r#type: "button",
                    onclick: move |_| show_filters.toggle(),
                    if show_filters() { "Hide" } else { "Filters" }
                }
            }

            div { class: "search",
                span { class: "search-icon", "🔍" }
                input {
                    class: "search-input",
                    r#type: "search",
                    placeholder: "Search videos...",
                    value: "{query}",
                    oninput: move |evt| filter.write().query = evt.value(),
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
                            for category in VideoCategory::ALL {
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
                    let summary = filter_summary(listing.shown, listing.total, "videos", &query);
                    rsx! {
                        if has_filters {
                            div { class: "filter-summary",
                                span { "{summary}" }
                                button { class: "link-button", r#type: "button", onclick: clear_filters, "Clear filters" }
                            }
                        } else {
                            nav { class: "quick-nav",
                                for group in listing.sections.iter() {
                                    a {
                                        key: "{group.category.id()}",
                                        class: "chip",
                                        href: "#{group.category.id()}",
                                        "{group.category.icon()} {group.category.name()}"
                                    }
                                }
                            }
                        }
                        if listing.sections.is_empty() {
                            div { class: "empty",
                                div { class: "empty-icon", "🎬" }
                                h3 { "No videos found" }
                                p { class: "muted", "Try a different search or clear your filters." }
                            }
                        } else {
                            for group in listing.sections.iter() {
                                section { key: "{group.category.id()}", id: "{group.category.id()}", class: "video-section",
                                    h2 { class: "section-title",
                                        "{group.category.icon()} {group.category.name()}"
                                        span { class: "pill", "{group.videos.len()} videos" }
                                    }
                                    div { class: "grid",
                                        for card in group.videos.iter() {
                                            VideoCard { key: "{card.id}", card: card.clone() }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
