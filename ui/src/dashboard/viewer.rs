use dioxus::prelude::*;

use crate::cohort::Embryo;
use crate::core::format;
use crate::t;

/// Which overlays are drawn on top of the simulated microscopy image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlays {
    pub stage: bool,
    pub confidence: bool,
    pub anomalies: bool,
}

impl Default for Overlays {
    fn default() -> Self {
        Self {
            stage: true,
            confidence: true,
            anomalies: true,
        }
    }
}

/// Simulated well image for one frame. `index` is clamped to the embryo's own
/// frame range so a shared comparison index never overruns a shorter sequence.
#[component]
pub fn FrameViewer(
    embryo: &'static Embryo,
    index: usize,
    #[props(default)] overlays: Overlays,
    #[props(default)] compact: bool,
) -> Element {
    let Some(frame) = embryo.frame_clamped(index) else {
        return rsx! {
            div { class: "frame-viewer frame-viewer--empty", {t!("viewer-no-frames")} }
        };
    };
    let class = if compact {
        "frame-viewer frame-viewer--compact"
    } else {
        "frame-viewer"
    };
    let stage = frame.predicted_stage;

    rsx! {
        div { class: "{class}",
            div { class: "frame-viewer__image",
                div { class: "frame-viewer__cell",
                    span { class: "frame-viewer__frame-number", {t!("frame-number", n = frame.index)} }
                }
                if !compact {
                    span { class: "frame-viewer__caption", {t!("viewer-caption")} }
                }
            }

            if overlays.stage {
                span { class: "frame-viewer__overlay frame-viewer__overlay--stage {stage.css_class()}",
                    if compact {
                        "{stage}"
                    } else {
                        {t!("viewer-stage", stage = stage.label())}
                    }
                }
            }
            if overlays.confidence {
                span { class: "frame-viewer__overlay frame-viewer__overlay--confidence",
                    if compact {
                        {format::format_percent(frame.confidence)}
                    } else {
                        {t!("viewer-confidence", value = format::format_percent(frame.confidence))}
                    }
                }
            }
            if overlays.anomalies {
                if let Some(flag) = frame.anomaly_flag.as_ref() {
                    span { class: "frame-viewer__overlay frame-viewer__overlay--anomaly", "⚠ {flag}" }
                }
            }
            span { class: "frame-viewer__time mono", {format::format_hours_precise(frame.time_hours)} }
        }
    }
}

#[component]
pub fn OverlayToggles(overlays: Signal<Overlays>) -> Element {
    let mut overlays = overlays;
    let current = overlays();

    rsx! {
        div { class: "overlay-toggles",
            label {
                input {
                    r#type: "checkbox",
                    checked: current.stage,
                    onchange: move |evt| overlays.write().stage = evt.checked(),
                }
                " "
                {t!("overlay-stage")}
            }
            label {
                input {
                    r#type: "checkbox",
                    checked: current.confidence,
                    onchange: move |evt| overlays.write().confidence = evt.checked(),
                }
                " "
                {t!("overlay-confidence")}
            }
            label {
                input {
                    r#type: "checkbox",
                    checked: current.anomalies,
                    onchange: move |evt| overlays.write().anomalies = evt.checked(),
                }
                " "
                {t!("overlay-anomalies")}
            }
        }
    }
}
