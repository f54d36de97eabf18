//! Localized display names for enum values shown across the dashboard.

use crate::cohort::metrics::{SortField, TimingMetric};
use crate::cohort::DevelopmentSpeed;
use crate::t;

pub fn speed_label(speed: DevelopmentSpeed) -> String {
    match speed {
        DevelopmentSpeed::Slow => t!("speed-slow"),
        DevelopmentSpeed::Normal => t!("speed-normal"),
        DevelopmentSpeed::Fast => t!("speed-fast"),
    }
}

pub fn column_label(field: SortField) -> String {
    match field {
        SortField::Id => t!("column-id"),
        SortField::TotalFrames => t!("column-frames"),
        SortField::ObservationDuration => t!("column-duration"),
        SortField::LastStage => t!("column-last-stage"),
        SortField::TimeToT2 => t!("column-t2"),
        SortField::TimeToT3 => t!("column-t3"),
        SortField::TimeToT5 => t!("column-t5"),
        SortField::Blastocyst => t!("column-blastocyst"),
        SortField::Speed => t!("column-speed"),
        SortField::Viability => t!("column-viability"),
        SortField::Confidence => t!("column-confidence"),
    }
}

/// Distribution heading, with units.
pub fn metric_heading(metric: TimingMetric) -> String {
    match metric {
        TimingMetric::T2 => t!("distribution-t2"),
        TimingMetric::T3 => t!("distribution-t3"),
        TimingMetric::T5 => t!("distribution-t5"),
    }
}

pub fn yes_no_label(value: bool) -> String {
    if value {
        t!("answer-yes")
    } else {
        t!("answer-no")
    }
}
