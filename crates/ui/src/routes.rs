use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{
    HomeView, QuizResultView, QuizView, QuizzesView, SettingsView, VideoPlayerView, VideosView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quizzes", QuizzesView)] Quizzes {},
        #[route("/quiz/:quiz_id", QuizView)] Quiz { quiz_id: String },
        #[route("/quiz/:quiz_id/result", QuizResultView)] QuizResult { quiz_id: String },
        #[route("/videos", VideosView)] Videos {},
        #[route("/videos/:video_id", VideoPlayerView)] VideoPlayer { video_id: String },
        #[route("/settings", SettingsView)] Settings {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            main { class: "content",
                Outlet::<Route> {}
            }
            FooterNav {}
        }
    }
}

#[component]
fn FooterNav() -> Element {
    rsx! {
        nav { class: "footer-nav",
            Link { class: "footer-link", to: Route::Home {},
                span { class: "footer-icon", "🏠" }
                span { "Home" }
            }
            Link { class: "footer-link", to: Route::Quizzes {},
                span { class: "footer-icon", "🧩" }
                span { "Quizzes" }
            }
            Link { class: "footer-link", to: Route::Videos {},
                span { class: "footer-icon", "🎬" }
                span { "Videos" }
            }
            Link { class: "footer-link", to: Route::Settings {},
                span { class: "footer-icon", "⚙️" }
                span { "Profile" }
            }
        }
    }
}
