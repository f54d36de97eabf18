use std::rc::Rc;

use dioxus::prelude::*;
use tracing::debug;

use crate::cohort::metrics::{
    closest_frame_index, percent_of, seek_hours, time_markers, timeline_segments,
    TIME_MARKER_INTERVAL_HOURS,
};
use crate::cohort::Embryo;
use crate::core::format;
use crate::t;

/// Segments narrower than this (in percent) drop their inline label.
const LABEL_MIN_WIDTH: f64 = 8.0;

#[component]
pub fn DevelopmentTimeline(
    embryo: &'static Embryo,
    index: usize,
    on_seek: EventHandler<usize>,
) -> Element {
    let mut track: Signal<Option<Rc<MountedData>>> = use_signal(|| None);

    let Some(frame) = embryo.frame_clamped(index) else {
        return rsx! {};
    };
    let duration = embryo.observation_duration_hours;
    let segments = timeline_segments(embryo);
    let markers = time_markers(duration, TIME_MARKER_INTERVAL_HOURS);
    let cursor = percent_of(frame.time_hours, duration);
    let current_stage = frame.predicted_stage;
    let truth_label = t!("timeline-source-truth");
    let predicted_label = t!("timeline-source-predicted");

    let on_track_click = move |evt: MouseEvent| async move {
        // Client coordinates, so clicks on child segments map onto the whole track.
        let client_x = evt.client_coordinates().x;
        let Some(node) = track() else {
            return;
        };
        match node.get_client_rect().await {
            Ok(rect) if rect.width() > 0.0 => {
                let target = seek_hours(client_x, rect.origin.x, rect.width(), duration);
                on_seek.call(closest_frame_index(&embryo.frames, target));
            }
            Ok(_) => {}
            Err(err) => debug!("timeline rect unavailable: {err:?}"),
        }
    };

    rsx! {
        section { class: "dashboard-card timeline",
            h3 { class: "dashboard-card__title", {t!("timeline-title")} }

            div { class: "timeline__markers",
                for (hours, percent) in markers {
                    span {
                        key: "{hours}",
                        class: "timeline__marker",
                        style: "left: {percent}%",
                        "{hours}h"
                    }
                }
            }

            div {
                class: "timeline__track",
                onmounted: move |evt| track.set(Some(evt.data())),
                onclick: on_track_click,
                for segment in segments {
                    div {
                        key: "{segment.stage.label()}",
                        class: format!(
                            "timeline__segment {} {}",
                            segment.stage.css_class(),
                            if segment.is_ground_truth { "timeline__segment--truth" } else { "timeline__segment--predicted" }
                        ),
                        style: "left: {segment.start_percent}%; width: {segment.width_percent}%",
                        title: format!(
                            "{} · {} - {} · {}",
                            segment.stage,
                            format::format_hours(segment.start_time),
                            format::format_hours(segment.end_time),
                            if segment.is_ground_truth { &truth_label } else { &predicted_label }
                        ),
                        if segment.width_percent > LABEL_MIN_WIDTH {
                            span { class: "timeline__label", "{segment.stage}" }
                        }
                    }
                }
                div { class: "timeline__cursor", style: "left: {cursor}%" }
            }

            ul { class: "legend",
                li { span { class: "legend__swatch legend__swatch--cursor" } {t!("timeline-legend-current", time = format::format_hours(frame.time_hours))} }
                li { span { class: "legend__swatch legend__swatch--truth" } {t!("timeline-legend-truth")} }
                li { span { class: "legend__swatch legend__swatch--predicted" } {t!("timeline-legend-predicted")} }
            }

            dl { class: "timeline__current",
                div {
                    dt { {t!("timeline-current-time")} }
                    dd { class: "mono", {format::format_hours_precise(frame.time_hours)} }
                }
                div {
                    dt { {t!("timeline-current-stage")} }
                    dd { class: "mono", "{current_stage}" }
                }
                div {
                    dt { {t!("timeline-description")} }
                    dd { "{current_stage.description()}" }
                }
            }
        }
    }
}
