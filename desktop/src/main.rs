#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use std::path::PathBuf;

use dioxus::logger::tracing::{warn, Level};
#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::prelude::*;

use ui::cohort::init_cohort;
use ui::components::{register_nav, AppNavbar, NavBuilder};
use ui::core::config::AppConfig;
use ui::views::{CohortPage, ComparePage, EmbryoPage};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(DesktopNavbar)]
    #[route("/")]
    CohortPage {},
    #[route("/embryo/:embryo_id")]
    EmbryoPage { embryo_id: String },
    #[route("/compare?:embryos")]
    ComparePage { embryos: String },
}

#[cfg(feature = "desktop")]
fn main() {
    init_logging();
    let resource_dir = resolve_resource_dir();

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(format!("Embryolens – v{}", env!("CARGO_PKG_VERSION")))
                        .with_maximized(true),
                )
                .with_resource_directory(resource_dir),
        )
        .launch(App);
}

#[cfg(all(feature = "server", not(feature = "desktop")))]
fn main() {
    init_logging();
    LaunchBuilder::server().launch(App);
}

fn init_logging() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        warn!("logger already initialised: {err}");
    }
}

fn nav_cohort(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::CohortPage {}, "{label}" })
}
fn nav_compare(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::ComparePage { embryos: String::new() }, "{label}" })
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    let config = use_hook(AppConfig::load);
    init_cohort(&config);
    use_context_provider(|| config);

    // AppNavbar writes the selected locale here; keying the router on it
    // remounts every view after a switch.
    let lang_code = use_signal(|| ui::i18n::FALLBACK_LANGUAGE.to_string());
    use_context_provider(|| lang_code);

    register_nav(NavBuilder {
        cohort: nav_cohort,
        compare: nav_compare,
    });

    // Window managers sometimes ignore the builder's maximize flag.
    #[cfg(feature = "desktop")]
    {
        let win = dioxus::desktop::use_window();
        use_effect(move || {
            win.set_maximized(true);
        });
    }

    rsx! {
        document::Style { "{ui::THEME_CSS}" }

        div {
            key: "{lang_code()}",
            div { style: "display:none", "{lang_code()}" }
            Router::<Route> { }
        }
    }
}

#[cfg(feature = "desktop")]
fn resolve_resource_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
    }

    #[cfg(not(debug_assertions))]
    {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("assets")))
            .unwrap_or_else(|| PathBuf::from("assets"))
    }
}

/// Desktop layout: shared navbar above the routed view.
#[component]
fn DesktopNavbar() -> Element {
    rsx! {
        AppNavbar { }

        Outlet::<Route> {}
    }
}
