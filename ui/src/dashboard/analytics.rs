use dioxus::prelude::*;

use super::geometry::{ticks, Axis, Frame2D};
use super::labels::{metric_heading, speed_label};
use crate::cohort::metrics::{
    blastocyst_scatter, box_plot_for, histogram, BoxPlotSummary, HistogramSpec, ScatterPoint,
    T2_HISTOGRAM, T3_HISTOGRAM, T5_HISTOGRAM,
};
use crate::cohort::{CohortData, DevelopmentSpeed};
use crate::core::format;
use crate::t;

const SCATTER_FRAME: Frame2D = Frame2D::new(640.0, 320.0);

#[component]
pub fn PopulationAnalytics(cohort: &'static CohortData) -> Element {
    let points = blastocyst_scatter(&cohort.embryos);

    rsx! {
        div { class: "analytics",
            section { class: "dashboard-card",
                div { class: "dashboard-card__header",
                    h2 { {t!("analytics-distributions-title")} }
                }
                div { class: "analytics__distributions",
                    for spec in [T2_HISTOGRAM, T3_HISTOGRAM, T5_HISTOGRAM] {
                        {render_distribution(cohort, spec)}
                    }
                }
            }
            BlastocystScatter { points }
        }
    }
}

fn render_distribution(cohort: &CohortData, spec: HistogramSpec) -> Element {
    let bins = histogram(&cohort.embryos, &spec);
    let tallest = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;
    let columns: Vec<(String, usize, f64, String)> = bins
        .into_iter()
        .map(|bin| {
            let height = bin.count as f64 / tallest * 100.0;
            let tooltip = t!("histogram-bar-title", range = bin.label.as_str(), count = bin.count);
            (bin.label, bin.count, height, tooltip)
        })
        .collect();
    let summary = box_plot_for(&cohort.embryos, spec.metric);
    let axis = Axis::new(spec.min, spec.max);

    rsx! {
        div { key: "{spec.metric.title()}", class: "distribution",
            h3 { class: "distribution__title", {metric_heading(spec.metric)} }
            div { class: "histogram",
                for (label, count, height, tooltip) in columns {
                    div { key: "{label}", class: "histogram__column",
                        div { class: "histogram__bar-track",
                            div {
                                class: "histogram__bar",
                                style: "height: {height}%",
                                title: "{tooltip}",
                            }
                        }
                        span { class: "histogram__count", "{count}" }
                        span { class: "histogram__label", "{label}" }
                    }
                }
            }
            if let Some(summary) = summary {
                {render_box_plot(&axis, summary)}
            } else {
                p { class: "dashboard-card__placeholder", {t!("analytics-no-values")} }
            }
        }
    }
}

fn render_box_plot(axis: &Axis, summary: BoxPlotSummary) -> Element {
    let pct = |v: f64| axis.fraction(v) * 100.0;
    let whisker_left = pct(summary.min);
    let whisker_width = pct(summary.max) - whisker_left;
    let box_left = pct(summary.q1);
    let box_width = pct(summary.q3) - box_left;
    let median = pct(summary.median);
    let cells = [
        (t!("boxplot-min"), summary.min),
        (t!("boxplot-q1"), summary.q1),
        (t!("boxplot-median"), summary.median),
        (t!("boxplot-q3"), summary.q3),
        (t!("boxplot-max"), summary.max),
    ];

    rsx! {
        div { class: "box-plot",
            div { class: "box-plot__track",
                div { class: "box-plot__whisker", style: "left: {whisker_left}%; width: {whisker_width}%" }
                div { class: "box-plot__box", style: "left: {box_left}%; width: {box_width}%" }
                div { class: "box-plot__median", style: "left: {median}%" }
            }
            dl { class: "box-plot__stats",
                for (label, value) in cells {
                    div { key: "{label}", class: "box-plot__stat",
                        dt { "{label}" }
                        dd { {format!("{value:.1}")} }
                    }
                }
            }
        }
    }
}

#[component]
fn BlastocystScatter(points: Vec<ScatterPoint>) -> Element {
    let frame = SCATTER_FRAME;
    let x_axis = Axis::fit(points.iter().map(|p| p.time_to_blastocyst), 2.0);
    let y_axis = Axis::fit(points.iter().map(|p| p.viability), 0.05);
    let x_ticks = ticks(&x_axis, 5);
    let y_ticks = ticks(&y_axis, 5);
    let baseline = frame.baseline();
    let plot_right = frame.width - frame.right;
    let scatter_aria = t!("scatter-aria");

    rsx! {
        section { class: "dashboard-card",
            div { class: "dashboard-card__header",
                h2 { {t!("scatter-title")} }
                span { class: "dashboard-card__meta",
                    {t!("scatter-meta", count = points.len())}
                }
            }
            if points.is_empty() {
                p { class: "dashboard-card__placeholder", {t!("scatter-empty")} }
            } else {
                svg {
                    class: "scatter",
                    view_box: "{frame.view_box()}",
                    role: "img",
                    "aria-label": "{scatter_aria}",
                    for t in x_ticks {
                        g { key: "x{t}",
                            line {
                                class: "chart-grid",
                                x1: "{frame.x(&x_axis, t)}",
                                x2: "{frame.x(&x_axis, t)}",
                                y1: "{frame.top}",
                                y2: "{baseline}",
                            }
                            text {
                                class: "chart-tick",
                                x: "{frame.x(&x_axis, t)}",
                                y: "{baseline + 16.0}",
                                text_anchor: "middle",
                                {format::format_hours(t)}
                            }
                        }
                    }
                    for v in y_ticks {
                        g { key: "y{v}",
                            line {
                                class: "chart-grid",
                                x1: "{frame.left}",
                                x2: "{plot_right}",
                                y1: "{frame.y(&y_axis, v)}",
                                y2: "{frame.y(&y_axis, v)}",
                            }
                            text {
                                class: "chart-tick",
                                x: "{frame.left - 4.0}",
                                y: "{frame.y(&y_axis, v) + 4.0}",
                                text_anchor: "end",
                                {format!("{v:.2}")}
                            }
                        }
                    }
                    for point in points.iter() {
                        circle {
                            key: "{point.embryo_id}",
                            class: "scatter__point {point.speed.css_class()}",
                            cx: "{frame.x(&x_axis, point.time_to_blastocyst)}",
                            cy: "{frame.y(&y_axis, point.viability)}",
                            r: "6",
                            title { "{point.embryo_id}: {format::format_hours(point.time_to_blastocyst)}, {format::format_score(point.viability)}" }
                        }
                    }
                }
                ul { class: "legend",
                    for speed in [DevelopmentSpeed::Slow, DevelopmentSpeed::Normal, DevelopmentSpeed::Fast] {
                        li { key: "{speed.label()}",
                            span { class: "legend__swatch {speed.css_class()}" }
                            {speed_label(speed)}
                        }
                    }
                }
            }
        }
    }
}
