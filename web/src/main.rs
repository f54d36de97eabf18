use dioxus::logger::tracing::{warn, Level};
use dioxus::prelude::*;

use ui::cohort::init_cohort;
use ui::components::{register_nav, AppNavbar, NavBuilder};
use ui::core::config::AppConfig;
use ui::views::{CohortPage, ComparePage, EmbryoPage};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    CohortPage {},
    #[route("/embryo/:embryo_id")]
    EmbryoPage { embryo_id: String },
    #[route("/compare?:embryos")]
    ComparePage { embryos: String },
}

fn nav_cohort(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::CohortPage {},
        "{label}"
    })
}
fn nav_compare(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::ComparePage { embryos: String::new() },
        "{label}"
    })
}

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        warn!("logger already initialised: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    let config = use_hook(AppConfig::load);
    init_cohort(&config);
    use_context_provider(|| config);

    let lang_code = use_signal(|| ui::i18n::FALLBACK_LANGUAGE.to_string());
    use_context_provider(|| lang_code);

    register_nav(NavBuilder {
        cohort: nav_cohort,
        compare: nav_compare,
    });

    rsx! {
        // The shared theme is inlined; the web bundle ships no separate stylesheet.
        document::Style { "{ui::THEME_CSS}" }
        document::Title { "Embryolens" }

        Router::<Route> {}
    }
}

/// Wraps every route in the shared navbar.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar {}
        Outlet::<Route> {}
    }
}
