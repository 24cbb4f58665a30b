use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use kids_core::model::{Language, ProfileDraft};
use kids_core::time::fixed_clock;
use services::{AppServices, SpeechEngines};

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::{
    HomeView, QuizResultView, QuizView, QuizzesView, SettingsView, VideoPlayerView, VideosView,
};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quizzes,
    Quiz(&'static str),
    QuizResult(&'static str),
    Videos,
    VideoPlayer(&'static str),
    Settings,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    ctx: AppContext,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    use_context_provider(|| props.ctx.clone());
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quizzes => rsx! { QuizzesView {} },
        ViewKind::Quiz(quiz_id) => rsx! { QuizView { quiz_id: quiz_id.to_string() } },
        ViewKind::QuizResult(quiz_id) => rsx! { QuizResultView { quiz_id: quiz_id.to_string() } },
        ViewKind::Videos => rsx! { VideosView {} },
        ViewKind::VideoPlayer(video_id) => {
            rsx! { VideoPlayerView { video_id: video_id.to_string() } }
        }
        ViewKind::Settings => rsx! { SettingsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: Arc<AppServices>,
    pub ctx: AppContext,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn test_services() -> AppServices {
    AppServices::in_memory(fixed_clock(), Language::En, SpeechEngines::unsupported())
        .expect("builtin catalog")
}

/// Services with an active learner called Ava, age 8.
pub fn services_with_learner() -> AppServices {
    let services = test_services();
    services
        .progress()
        .create_profile(ProfileDraft::new("Ava", 8, Language::En))
        .expect("create profile");
    services
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_services(view, test_services())
}

pub fn setup_view_harness_with_services(view: ViewKind, services: AppServices) -> ViewHarness {
    let services = Arc::new(services);
    let app: Arc<dyn UiApp> = services.clone();
    let ctx = build_app_context(&app);

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            ctx: ctx.clone(),
            view,
        },
    );

    ViewHarness { dom, services, ctx }
}
