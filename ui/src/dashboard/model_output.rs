use dioxus::prelude::*;

use super::labels::speed_label;
use crate::cohort::metrics::{stage_interval, ViabilityTier};
use crate::cohort::{Embryo, RiskFactor};
use crate::core::format;
use crate::t;

#[component]
pub fn ModelOutputPanel(embryo: &'static Embryo) -> Element {
    let output = &embryo.model_output;
    let tier = ViabilityTier::from_score(output.viability_score);
    let viability_width = output.viability_score * 100.0;
    let confidence_width = output.confidence;

    rsx! {
        section { class: "dashboard-card model-output",
            h3 { class: "dashboard-card__title", {t!("model-output-title")} }

            div { class: "meter",
                div { class: "meter__heading",
                    span { {t!("label-viability-score")} }
                    strong { class: "meter__value mono", {format::format_score(output.viability_score)} }
                }
                div { class: "meter__track",
                    div { class: "meter__fill {tier.css_class()}", style: "width: {viability_width}%" }
                }
            }

            div { class: "meter",
                div { class: "meter__heading",
                    span { {t!("label-model-confidence")} }
                    strong { class: "mono", {format::format_percent(output.confidence)} }
                }
                div { class: "meter__track meter__track--thin",
                    div { class: "meter__fill meter__fill--confidence", style: "width: {confidence_width}%" }
                }
            }

            if !output.risk_factors.is_empty() {
                div { class: "risk-factors",
                    h4 { {t!("label-risk-factors")} }
                    for factor in output.risk_factors.iter() {
                        {render_risk_factor(factor)}
                    }
                }
            }

            if !output.sensitivity_insights.is_empty() {
                div { class: "insights",
                    h4 { {t!("model-output-interpretability")} }
                    for (i, insight) in output.sensitivity_insights.iter().enumerate() {
                        p { key: "{i}", class: "insights__item", "{insight}" }
                    }
                }
            }
        }
    }
}

fn render_risk_factor(factor: &RiskFactor) -> Element {
    let direction = if factor.impact > 0.0 {
        "risk-factor__bar--positive"
    } else {
        "risk-factor__bar--negative"
    };
    let width = factor.impact.abs() * 100.0;
    let importance = t!(
        "risk-importance",
        value = format!("{:.2}", factor.importance)
    );

    rsx! {
        div { key: "{factor.name}", class: "risk-factor",
            span { class: "risk-factor__name", "{factor.name}" }
            div { class: "risk-factor__track",
                div { class: "risk-factor__bar {direction}", style: "width: {width}%" }
            }
            span { class: "risk-factor__importance", "{importance}" }
            span { class: "risk-factor__impact mono {direction}", {format::format_impact(factor.impact)} }
        }
    }
}

#[component]
pub fn DevelopmentMetrics(embryo: &'static Embryo) -> Element {
    let rows = [
        (t!("metric-time-t2"), format::format_optional_hours(embryo.time_to_t2)),
        (t!("metric-time-t3"), format::format_optional_hours(embryo.time_to_t3)),
        (t!("metric-time-t5"), format::format_optional_hours(embryo.time_to_t5)),
        (
            t!("metric-interval-t2-t3"),
            format::format_optional_hours(stage_interval(embryo.time_to_t2, embryo.time_to_t3)),
        ),
        (
            t!("metric-interval-t3-t5"),
            format::format_optional_hours(stage_interval(embryo.time_to_t3, embryo.time_to_t5)),
        ),
    ];
    let (blastocyst_label, blastocyst_class) = if embryo.blastocyst_formation {
        (t!("blastocyst-confirmed"), "flag flag--yes")
    } else {
        (t!("blastocyst-not-observed"), "flag flag--no")
    };
    let speed = embryo.development_speed;

    rsx! {
        section { class: "dashboard-card",
            h3 { class: "dashboard-card__title", {t!("metrics-title")} }
            dl { class: "metric-list",
                for (label, value) in rows {
                    div { key: "{label}", class: "metric-list__row",
                        dt { "{label}:" }
                        dd { class: "mono", "{value}" }
                    }
                }
                div { class: "metric-list__row",
                    dt { {t!("label-blastocyst")} ":" }
                    dd { class: "{blastocyst_class}", "{blastocyst_label}" }
                }
                div { class: "metric-list__row",
                    dt { {t!("label-development-speed")} ":" }
                    dd { span { class: "speed-badge {speed.css_class()}", {speed_label(speed)} } }
                }
            }
        }
    }
}

#[component]
pub fn TransitionList(embryo: &'static Embryo) -> Element {
    let truth_title = t!("tag-ground-truth");
    let predicted_title = t!("tag-model-prediction");

    rsx! {
        section { class: "dashboard-card",
            h3 { class: "dashboard-card__title", {t!("transitions-title")} }
            ul { class: "transition-list",
                for transition in embryo.stage_transitions.iter() {
                    li { key: "{transition.stage.label()}", class: "transition-list__row",
                        span { class: "stage-badge {transition.stage.css_class()}", "{transition.stage}" }
                        span { class: "mono", {format::format_hours(transition.time_hours)} }
                        if transition.is_ground_truth {
                            span { class: "tag tag--truth", title: "{truth_title}", "GT" }
                        } else {
                            span { class: "tag tag--predicted", title: "{predicted_title}", "AI" }
                        }
                    }
                }
            }
        }
    }
}
