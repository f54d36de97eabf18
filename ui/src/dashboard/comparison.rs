use dioxus::prelude::*;

use super::labels::{speed_label, yes_no_label};
use super::timeline::DevelopmentTimeline;
use super::viewer::FrameViewer;
use crate::cohort::metrics::{stage_interval, ViabilityTier};
use crate::cohort::{Embryo, PlaybackState};
use crate::core::format;
use crate::t;

/// One column of the side-by-side view. All columns share one playback index.
#[component]
pub fn ComparisonPanel(embryo: &'static Embryo, playback: Signal<PlaybackState>) -> Element {
    let mut playback = playback;
    let index = playback().current_index;
    let tier = ViabilityTier::from_score(embryo.model_output.viability_score);
    let intervals = [
        ("t2", format::format_optional_hours(embryo.time_to_t2)),
        ("t3", format::format_optional_hours(embryo.time_to_t3)),
        ("t5", format::format_optional_hours(embryo.time_to_t5)),
        (
            "t2→t3",
            format::format_optional_hours(stage_interval(embryo.time_to_t2, embryo.time_to_t3)),
        ),
        (
            "t3→t5",
            format::format_optional_hours(stage_interval(embryo.time_to_t3, embryo.time_to_t5)),
        ),
    ];

    rsx! {
        article { class: "comparison-panel",
            header { class: "dashboard-card",
                h2 { "{embryo.id}" }
                dl { class: "metric-list",
                    div { class: "metric-list__row",
                        dt { {t!("label-viability")} ":" }
                        dd { class: "mono {tier.css_class()}", {format::format_score(embryo.model_output.viability_score)} }
                    }
                    div { class: "metric-list__row",
                        dt { {t!("label-development")} ":" }
                        dd { {speed_label(embryo.development_speed)} }
                    }
                    div { class: "metric-list__row",
                        dt { {t!("label-blastocyst")} ":" }
                        dd { {yes_no_label(embryo.blastocyst_formation)} }
                    }
                }
            }

            FrameViewer { embryo, index, compact: true }

            DevelopmentTimeline {
                embryo,
                index,
                on_seek: move |frame: usize| playback.write().seek(frame),
            }

            section { class: "dashboard-card",
                h3 { class: "dashboard-card__title", {t!("comparison-times-title")} }
                dl { class: "metric-list",
                    for (label, value) in intervals {
                        div { key: "{label}", class: "metric-list__row",
                            dt { "{label}:" }
                            dd { class: "mono", "{value}" }
                        }
                    }
                }
            }

            if !embryo.model_output.risk_factors.is_empty() {
                section { class: "dashboard-card",
                    h3 { class: "dashboard-card__title", {t!("label-risk-factors")} }
                    ul { class: "risk-summary",
                        for factor in embryo.model_output.risk_factors.iter() {
                            li { key: "{factor.name}",
                                span { "{factor.name}" }
                                span { class: "mono", {format::format_impact(factor.impact)} }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ComparisonSummary(embryos: Vec<&'static Embryo>) -> Element {
    let rows: Vec<(String, Vec<String>)> = vec![
        (
            t!("label-viability-score"),
            embryos
                .iter()
                .map(|e| format::format_score(e.model_output.viability_score))
                .collect(),
        ),
        (
            t!("label-model-confidence"),
            embryos
                .iter()
                .map(|e| format::format_percent(e.model_output.confidence))
                .collect(),
        ),
        (
            t!("metric-time-t2"),
            embryos
                .iter()
                .map(|e| format::format_optional_hours(e.time_to_t2))
                .collect(),
        ),
        (
            t!("metric-time-t5"),
            embryos
                .iter()
                .map(|e| format::format_optional_hours(e.time_to_t5))
                .collect(),
        ),
        (
            t!("label-blastocyst"),
            embryos
                .iter()
                .map(|e| yes_no_label(e.blastocyst_formation))
                .collect(),
        ),
        (
            t!("label-risk-factors"),
            embryos
                .iter()
                .map(|e| e.model_output.risk_factors.len().to_string())
                .collect(),
        ),
    ];

    rsx! {
        section { class: "dashboard-card",
            h2 { {t!("comparison-summary-title")} }
            table { class: "summary-table",
                thead {
                    tr {
                        th { {t!("comparison-metric")} }
                        for embryo in embryos.iter() {
                            th { key: "{embryo.id}", class: "align-right", "{embryo.id}" }
                        }
                    }
                }
                tbody {
                    for (label, values) in rows {
                        tr { key: "{label}",
                            td { "{label}" }
                            for (i, value) in values.into_iter().enumerate() {
                                td { key: "{i}", class: "align-right mono", "{value}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
