use dioxus::prelude::*;

use crate::cohort::metrics::{max_frame_count, resolve_comparison, MIN_COMPARE};
use crate::cohort::{cohort_repository, CohortRepository, Embryo, PlaybackState};
use crate::core::{config::AppConfig, routes};
use crate::dashboard::{use_playback_clock, ComparisonPanel, ComparisonSummary, PlaybackControls};
use crate::i18n::use_language_marker;
use crate::t;

#[component]
pub fn ComparePage(embryos: String) -> Element {
    let lang_marker = use_language_marker();
    let picked = resolve_comparison(cohort_repository().cohort(), &embryos);

    let body = if picked.len() < MIN_COMPARE {
        rsx! {
            section { class: "page page-compare page-compare--empty",
                h1 { {t!("compare-title")} }
                p { {t!("compare-need-more")} }
                Link { class: "button", to: routes::COHORT_PATH, {t!("back-to-cohort")} }
            }
        }
    } else {
        rsx! {
            ComparisonView { key: "{embryos}", embryos: picked }
        }
    };

    rsx! {
        div { style: "display:none", "{lang_marker}" }
        {body}
    }
}

#[component]
fn ComparisonView(embryos: Vec<&'static Embryo>) -> Element {
    let config = try_use_context::<AppConfig>().unwrap_or_default();
    let frame_count = max_frame_count(&embryos);
    let playback = use_signal(|| PlaybackState::new(frame_count, config.default_playback_fps));
    use_playback_clock(playback);

    let grid_class = if embryos.len() == 2 {
        "comparison-grid comparison-grid--two"
    } else {
        "comparison-grid comparison-grid--three"
    };

    rsx! {
        section { class: "page page-compare",
            header { class: "page__header",
                Link { class: "button button--small", to: routes::COHORT_PATH, {t!("back-link")} }
                h1 { {t!("compare-title")} }
                p { class: "page__subtitle", {t!("compare-subtitle", count = embryos.len())} }
            }

            section { class: "dashboard-card",
                PlaybackControls { playback }
            }

            div { class: "{grid_class}",
                for embryo in embryos.iter().copied() {
                    ComparisonPanel { key: "{embryo.id}", embryo, playback }
                }
            }

            ComparisonSummary { embryos: embryos.clone() }
        }
    }
}
