use dioxus::prelude::*;
use dioxus_router::Router;
use tracing::debug;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();

    // Speech outlives any single screen, so silence it once the window goes away.
    use_drop(move || {
        ctx.text_to_speech().stop();
        ctx.speech_to_text().stop_listening();
        debug!("voice engines stopped on shutdown");
    });

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Kids Learning" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        div { class: "fatal-icon", "🙈" }
                        h1 { "Oops! Something went wrong" }
                        p { class: "muted", "Close the window and open it again to keep learning." }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
