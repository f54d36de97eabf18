use dioxus::prelude::*;

use crate::cohort::{cohort_repository, CohortRepository, Embryo, PlaybackState};
use crate::core::{config::AppConfig, format, routes};
use crate::dashboard::{
    use_playback_clock, DevelopmentMetrics, DevelopmentTimeline, EmbryoReportButton,
    FrameAnalytics, FrameViewer, ModelOutputPanel, OverlayToggles, Overlays, PlaybackControls,
    TransitionList,
};
use crate::i18n::use_language_marker;
use crate::t;

#[component]
pub fn EmbryoPage(embryo_id: String) -> Element {
    let lang_marker = use_language_marker();

    let body = match cohort_repository().find(&embryo_id) {
        Some(embryo) => rsx! {
            EmbryoDetail { key: "{embryo.id}", embryo }
        },
        None => {
            tracing::debug!(%embryo_id, "embryo not in cohort");
            rsx! {
                section { class: "page page-not-found",
                    h1 { {t!("embryo-not-found-title")} }
                    p { {t!("embryo-not-found-body", id = embryo_id.as_str())} }
                    Link { class: "button", to: routes::COHORT_PATH, {t!("back-to-cohort")} }
                }
            }
        }
    };

    rsx! {
        div { style: "display:none", "{lang_marker}" }
        {body}
    }
}

#[component]
fn EmbryoDetail(embryo: &'static Embryo) -> Element {
    let config = try_use_context::<AppConfig>().unwrap_or_default();
    let mut playback =
        use_signal(|| PlaybackState::new(embryo.frames.len(), config.default_playback_fps));
    use_playback_clock(playback);
    let overlays = use_signal(Overlays::default);

    let index = playback().current_index;
    let subtitle = t!(
        "embryo-subtitle",
        frames = embryo.total_frames,
        duration = format::format_hours(embryo.observation_duration_hours),
        viability = format::format_score(embryo.model_output.viability_score)
    );

    rsx! {
        section { class: "page page-embryo",
            header { class: "page__header page__header--split",
                div { class: "page__heading",
                    Link { class: "button button--small", to: routes::COHORT_PATH, {t!("back-link")} }
                    div {
                        h1 { {t!("embryo-title", id = embryo.id.as_str())} }
                        p { class: "page__subtitle", {subtitle} }
                    }
                }
                EmbryoReportButton { embryo }
            }

            div { class: "page-embryo__layout",
                div { class: "page-embryo__main",
                    section { class: "dashboard-card",
                        FrameViewer { embryo, index, overlays: overlays() }
                        PlaybackControls { playback, show_steps: true }
                        OverlayToggles { overlays }
                    }
                    DevelopmentTimeline {
                        embryo,
                        index,
                        on_seek: move |frame: usize| playback.write().seek(frame),
                    }
                    FrameAnalytics { embryo, index }
                }
                aside { class: "page-embryo__side",
                    ModelOutputPanel { embryo }
                    DevelopmentMetrics { embryo }
                    TransitionList { embryo }
                }
            }
        }
    }
}
