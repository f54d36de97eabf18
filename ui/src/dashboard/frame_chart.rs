use dioxus::prelude::*;

use super::geometry::{polyline_points, Axis, Frame2D};
use crate::cohort::metrics::{anomaly_frames, ANOMALY_LIST_LIMIT};
use crate::cohort::Embryo;
use crate::core::format;
use crate::t;

const CHART_FRAME: Frame2D = Frame2D::new(480.0, 200.0);
const HIGH_CONFIDENCE: f64 = 90.0;

#[component]
pub fn FrameAnalytics(embryo: &'static Embryo, index: usize) -> Element {
    let Some(frame) = embryo.frame_clamped(index) else {
        return rsx! {};
    };
    let time_axis = Axis::new(0.0, embryo.observation_duration_hours);
    let morphology: Vec<(f64, f64)> = embryo
        .frames
        .iter()
        .map(|f| (f.time_hours, f.morphological_change))
        .collect();
    let confidence: Vec<(f64, f64)> = embryo
        .frames
        .iter()
        .map(|f| (f.time_hours, f.confidence))
        .collect();
    let anomalies = anomaly_frames(embryo, ANOMALY_LIST_LIMIT);

    rsx! {
        section { class: "dashboard-card frame-analytics",
            h3 { class: "dashboard-card__title", {t!("frame-analytics-title")} }

            {line_chart(
                &t!("chart-morphology-title"),
                &t!("chart-morphology-caption"),
                &time_axis,
                &Axis::new(0.0, 1.0),
                &morphology,
                frame.time_hours,
                None,
                t!("chart-current-value", value = format::format_score(frame.morphological_change)),
            )}

            {line_chart(
                &t!("chart-confidence-title"),
                &t!("chart-confidence-caption"),
                &time_axis,
                &Axis::new(60.0, 100.0),
                &confidence,
                frame.time_hours,
                Some(HIGH_CONFIDENCE),
                t!("chart-current-value", value = format::format_percent(frame.confidence)),
            )}

            div { class: "frame-analytics__anomalies",
                h4 { {t!("anomalies-title")} }
                if anomalies.is_empty() {
                    p { class: "dashboard-card__placeholder", {t!("anomalies-none")} }
                } else {
                    ul {
                        for anomaly in anomalies {
                            li { key: "{anomaly.index}", class: "anomaly-row",
                                span { class: "mono", {t!("frame-number", n = anomaly.index)} }
                                span { {format::format_hours(anomaly.time_hours)} }
                                span { class: "anomaly-row__flag", {anomaly.anomaly_flag.clone().unwrap_or_default()} }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn line_chart(
    title: &str,
    caption: &str,
    x_axis: &Axis,
    y_axis: &Axis,
    data: &[(f64, f64)],
    cursor_time: f64,
    threshold: Option<f64>,
    current: String,
) -> Element {
    let frame = CHART_FRAME;
    let points = polyline_points(&frame, x_axis, y_axis, data);
    let cursor_x = frame.x(x_axis, cursor_time);
    let threshold_y = threshold.map(|v| frame.y(y_axis, v));
    let baseline = frame.baseline();
    let plot_right = frame.width - frame.right;
    let threshold_label = t!("chart-high-confidence");

    rsx! {
        div { class: "line-chart",
            h4 { "{title}" }
            p { class: "line-chart__caption", "{caption}" }
            svg { class: "line-chart__plot", view_box: "{frame.view_box()}", role: "img", "aria-label": "{title}",
                line { class: "chart-axis", x1: "{frame.left}", x2: "{plot_right}", y1: "{baseline}", y2: "{baseline}" }
                line { class: "chart-axis", x1: "{frame.left}", x2: "{frame.left}", y1: "{frame.top}", y2: "{baseline}" }
                text { class: "chart-tick", x: "{frame.left - 4.0}", y: "{frame.top + 8.0}", text_anchor: "end", "{y_axis.max}" }
                text { class: "chart-tick", x: "{frame.left - 4.0}", y: "{baseline}", text_anchor: "end", "{y_axis.min}" }
                if let Some(y) = threshold_y {
                    line { class: "chart-threshold", x1: "{frame.left}", x2: "{plot_right}", y1: "{y}", y2: "{y}" }
                    text { class: "chart-tick", x: "{plot_right}", y: "{y - 4.0}", text_anchor: "end", "{threshold_label}" }
                }
                polyline { class: "chart-line", points: "{points}" }
                line { class: "chart-cursor", x1: "{cursor_x}", x2: "{cursor_x}", y1: "{frame.top}", y2: "{baseline}" }
            }
            p { class: "line-chart__current mono", "{current}" }
        }
    }
}
