use dioxus::prelude::*;
use dioxus_router::Link;
use kids_core::model::{Language, MAX_PROFILE_AGE, MIN_PROFILE_AGE};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::views::components::{BadgeTile, StatTile};
use crate::vm::{ProfileFormVm, ProgressVm, age_label, map_progress, profile_notice};

#[derive(Clone, Debug, PartialEq)]
enum SaveState {
    Idle,
    Saved,
    Error(&'static str),
}

#[component]
pub fn SettingsView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let default_language = ctx.language();

    // Bumped after every profile change so the snapshot is re-read.
    let mut revision = use_signal(|| 0_u32);
    let snapshot = use_memo({
        let progress = progress.clone();
        move || {
            let _ = revision();
            progress
                .snapshot()
                .map(|snapshot| {
                    let form = snapshot.user.as_ref().map(ProfileFormVm::from_profile);
                    (map_progress(&snapshot), form)
                })
                .map_err(ViewError::from)
        }
    });

    let mut profile_form = use_signal(|| {
        snapshot
            .peek()
            .as_ref()
            .ok()
            .and_then(|(_, form)| form.clone())
            .unwrap_or_else(|| ProfileFormVm::blank(default_language))
    });
    let mut save_state = use_signal(|| SaveState::Idle);

    let submit = {
        let progress = progress.clone();
        use_callback(move |()| {
            let has_profile = matches!(&*snapshot.peek(), Ok((vm, _)) if vm.learner.is_some());
            let draft = profile_form.peek().to_draft();
            let saved = if has_profile {
                progress.update_profile(draft)
            } else {
                progress.create_profile(draft)
            };
            match saved {
                Ok(profile) => {
                    profile_form.set(ProfileFormVm::from_profile(&profile));
                    save_state.set(SaveState::Saved);
                    *revision.write() += 1;
                }
                Err(err) => save_state.set(SaveState::Error(profile_notice(&err))),
            }
        })
    };

    let switch_learner = use_callback(move |()| match progress.clear_profile() {
        Ok(_) => {
            profile_form.set(ProfileFormVm::blank(default_language));
            save_state.set(SaveState::Idle);
            *revision.write() += 1;
        }
        Err(err) => save_state.set(SaveState::Error(profile_notice(&err))),
    });

    let (vm, has_profile): (ProgressVm, bool) = match &*snapshot.read() {
        Ok((vm, _)) => (vm.clone(), vm.learner.is_some()),
        Err(err) => {
            return rsx! {
                div { class: "page settings",
                    p { class: "notice notice--error", "{err.message()}" }
                }
            };
        }
    };
    let current = profile_form();
    let can_submit = current.can_submit();

    rsx! {
        div { class: "page settings",
            header { class: "page-header",
                div {
                    h1 { if has_profile { "My Profile ⚙️" } else { "Welcome! 👋" } }
                    p { class: "muted",
                        if has_profile { "Update your details and see your achievements." } else { "Tell us about yourself to start learning." }
                    }
                }
            }

            section { class: "panel profile-form",
                h3 { class: "panel-title", if has_profile { "Edit Profile" } else { "Create Your Profile" } }
                form {
                    onsubmit: move |evt| {
                        evt.prevent_default();
                        submit.call(());
                    },
                    label { class: "field",
                        span { class: "field-label", "What's your name?" }
                        input {
                            class: "input",
                            r#type: "text",
                            placeholder: "Enter your name",
                            value: "{current.name}",
                            oninput: move |evt| {
                                profile_form.write().name = evt.value();
                                save_state.set(SaveState::Idle);
                            },
                        }
                    }
                    label { class: "field",
                        span { class: "field-label", "How old are you?" }
                        select {
                            class: "input",
                            value: "{current.age}",
                            onchange: move |evt| {
                                if let Ok(age) = evt.value().parse::<u8>() {
                                    profile_form.write().age = age;
                                    save_state.set(SaveState::Idle);
                                }
                            },
                            for age in MIN_PROFILE_AGE..=MAX_PROFILE_AGE {
                                option {
                                    key: "{age}",
                                    value: "{age}",
                                    selected: age == current.age,
                                    "{age_label(age)}"
                                }
                            }
                        }
                    }
                    label { class: "field",
                        span { class: "field-label", "Language" }
                        select {
                            class: "input",
                            value: "{current.language.code()}",
                            onchange: move |evt| {
                                if let Ok(language) = evt.value().parse::<Language>() {
                                    profile_form.write().language = language;
                                    save_state.set(SaveState::Idle);
                                }
                            },
                            for language in Language::ALL {
                                option {
                                    key: "{language.code()}",
                                    value: "{language.code()}",
                                    selected: language == current.language,
                                    "{language.label()}"
                                }
                            }
                        }
                    }
                    button {
                        class: "button button--fun button--lg",
                        r#type: "submit",
                        disabled: !can_submit,
                        if has_profile { "Save Changes" } else { "Start Learning! 🚀" }
                    }
                }
                match save_state() {
                    SaveState::Idle => rsx! {},
                    SaveState::Saved => rsx! {
                        p { class: "notice notice--success", "Saved! ✨" }
                    },
                    SaveState::Error(message) => rsx! {
                        p { class: "notice notice--error", "{message}" }
                    },
                }
            }

            if let Some(learner) = vm.learner.as_ref() {
                section { class: "panel",
                    h3 { class: "panel-title", "Hi, {learner.name}!" }
                    p { class: "muted", "{age_label(learner.age)} • {learner.age_group.label()} • {learner.language_label}" }
                    div { class: "stats",
                        StatTile { icon: "🎯", value: vm.completed_quizzes.to_string(), label: "Quizzes" }
                        StatTile { icon: "📺", value: vm.completed_videos.to_string(), label: "Videos" }
                        StatTile { icon: "⭐", value: vm.total_score.to_string(), label: "Points" }
                    }
                    button {
                        class: "button button--ghost button--sm",
                        r#type: "button",
                        onclick: move |_| switch_learner.call(()),
                        "Switch Learner"
                    }
                }

                section { class: "panel achievements",
                    h3 { class: "panel-title", "Achievements 🏅" }
                    if vm.earned_count() == 0 {
                        p { class: "muted", "Start completing quizzes and watching videos to earn badges!" }
                    }
                    div { class: "badges",
                        for badge in vm.badges.iter() {
                            BadgeTile { key: "{badge.id}", badge: badge.clone() }
                        }
                    }
                }
            } else {
                div { class: "actions",
                    Link { class: "button button--outline", to: Route::Home {}, "🏠 Back Home" }
                }
            }
        }
    }
}
