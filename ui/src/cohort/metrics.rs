//! Cohort-level derivations consumed directly by the views: sorting,
//! filtering, histograms, box plots, scatter series, timeline segments and
//! the comparison selection. Everything here is pure.

use std::cmp::Ordering;

use serde::Serialize;

use super::model::{CohortData, DevelopmentSpeed, DevelopmentStage, Embryo, Frame};

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    TotalFrames,
    ObservationDuration,
    LastStage,
    TimeToT2,
    TimeToT3,
    TimeToT5,
    Blastocyst,
    Speed,
    Viability,
    Confidence,
}

impl SortField {
    pub const ALL: [SortField; 11] = [
        Self::Id,
        Self::TotalFrames,
        Self::ObservationDuration,
        Self::LastStage,
        Self::TimeToT2,
        Self::TimeToT3,
        Self::TimeToT5,
        Self::Blastocyst,
        Self::Speed,
        Self::Viability,
        Self::Confidence,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Self::Id => "Embryo ID",
            Self::TotalFrames => "Frames",
            Self::ObservationDuration => "Duration (h)",
            Self::LastStage => "Last Stage",
            Self::TimeToT2 => "t2 (h)",
            Self::TimeToT3 => "t3 (h)",
            Self::TimeToT5 => "t5 (h)",
            Self::Blastocyst => "Blastocyst",
            Self::Speed => "Speed",
            Self::Viability => "Viability",
            Self::Confidence => "Confidence",
        }
    }

    fn key(self, embryo: &Embryo) -> SortKey<'_> {
        match self {
            Self::Id => SortKey::Text(&embryo.id),
            Self::TotalFrames => SortKey::Number(embryo.total_frames as f64),
            Self::ObservationDuration => SortKey::Number(embryo.observation_duration_hours),
            Self::LastStage => SortKey::Text(embryo.last_observed_stage.label()),
            Self::TimeToT2 => embryo.time_to_t2.into(),
            Self::TimeToT3 => embryo.time_to_t3.into(),
            Self::TimeToT5 => embryo.time_to_t5.into(),
            Self::Blastocyst => SortKey::Number(if embryo.blastocyst_formation { 1.0 } else { 0.0 }),
            Self::Speed => SortKey::Text(embryo.development_speed.label()),
            Self::Viability => SortKey::Number(embryo.model_output.viability_score),
            Self::Confidence => SortKey::Number(embryo.model_output.confidence),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SortKey<'a> {
    Text(&'a str),
    Number(f64),
    Missing,
}

impl From<Option<f64>> for SortKey<'_> {
    fn from(value: Option<f64>) -> Self {
        value.map(SortKey::Number).unwrap_or(SortKey::Missing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Table sort state. Toggling one field cycles none → ascending → descending → none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub field: Option<SortField>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    pub fn toggle(&mut self, field: SortField) {
        if self.field == Some(field) {
            match self.direction {
                Some(SortDirection::Ascending) => {
                    self.direction = Some(SortDirection::Descending);
                }
                Some(SortDirection::Descending) | None => {
                    self.field = None;
                    self.direction = None;
                }
            }
        } else {
            self.field = Some(field);
            self.direction = Some(SortDirection::Ascending);
        }
    }

    pub fn direction_for(&self, field: SortField) -> Option<SortDirection> {
        if self.field == Some(field) {
            self.direction
        } else {
            None
        }
    }
}

/// Locale-style text comparison: case-insensitive first, exact as tie-break.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_keys(a: SortKey<'_>, b: SortKey<'_>, direction: SortDirection) -> Ordering {
    // Missing values trail in both directions.
    let ordering = match (a, b) {
        (SortKey::Missing, SortKey::Missing) => return Ordering::Equal,
        (SortKey::Missing, _) => return Ordering::Greater,
        (_, SortKey::Missing) => return Ordering::Less,
        (SortKey::Text(x), SortKey::Text(y)) => compare_text(x, y),
        (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
    };

    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Stable sort; with no active field the insertion order is returned.
pub fn sort_embryos<'a>(embryos: &'a [Embryo], state: &SortState) -> Vec<&'a Embryo> {
    let mut sorted: Vec<&Embryo> = embryos.iter().collect();
    if let (Some(field), Some(direction)) = (state.field, state.direction) {
        sorted.sort_by(|a, b| compare_keys(field.key(a), field.key(b), direction));
    }
    sorted
}

pub fn filter_by_id<'a>(embryos: Vec<&'a Embryo>, term: &str) -> Vec<&'a Embryo> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return embryos;
    }
    embryos
        .into_iter()
        .filter(|e| e.id.to_lowercase().contains(&needle))
        .collect()
}

// ---------------------------------------------------------------------------
// Distributions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingMetric {
    T2,
    T3,
    T5,
}

impl TimingMetric {
    pub fn value(self, embryo: &Embryo) -> Option<f64> {
        match self {
            Self::T2 => embryo.time_to_t2,
            Self::T3 => embryo.time_to_t3,
            Self::T5 => embryo.time_to_t5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::T2 => "Time to t2 (2-cell)",
            Self::T3 => "Time to t3 (3-cell)",
            Self::T5 => "Time to t5 (5-cell)",
        }
    }
}

/// Fixed bin layout: `[min, max)` in steps of `bin_size` hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramSpec {
    pub metric: TimingMetric,
    pub min: f64,
    pub max: f64,
    pub bin_size: f64,
}

pub const T2_HISTOGRAM: HistogramSpec = HistogramSpec {
    metric: TimingMetric::T2,
    min: 22.0,
    max: 34.0,
    bin_size: 2.0,
};

pub const T3_HISTOGRAM: HistogramSpec = HistogramSpec {
    metric: TimingMetric::T3,
    min: 33.0,
    max: 48.0,
    bin_size: 3.0,
};

pub const T5_HISTOGRAM: HistogramSpec = HistogramSpec {
    metric: TimingMetric::T5,
    min: 45.0,
    max: 63.0,
    bin_size: 3.0,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub label: String,
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

pub fn histogram(embryos: &[Embryo], spec: &HistogramSpec) -> Vec<HistogramBin> {
    let mut bins = Vec::new();
    let mut lo = spec.min;
    while lo < spec.max {
        let hi = lo + spec.bin_size;
        let count = embryos
            .iter()
            .filter_map(|e| spec.metric.value(e))
            .filter(|v| *v >= lo && *v < hi)
            .count();
        bins.push(HistogramBin {
            label: format!("{lo}-{hi}h"),
            lo,
            hi,
            count,
        });
        lo = hi;
    }
    bins
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxPlotSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Nearest-rank summary (`floor(n * p)`) over the sorted values.
pub fn box_plot(values: &[f64]) -> Option<BoxPlotSummary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let n = sorted.len();
    let rank = |p: f64| sorted[((n as f64 * p).floor() as usize).min(n - 1)];

    Some(BoxPlotSummary {
        min: sorted[0],
        q1: rank(0.25),
        median: rank(0.5),
        q3: rank(0.75),
        max: sorted[n - 1],
    })
}

pub fn box_plot_for(embryos: &[Embryo], metric: TimingMetric) -> Option<BoxPlotSummary> {
    let values: Vec<f64> = embryos.iter().filter_map(|e| metric.value(e)).collect();
    box_plot(&values)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub embryo_id: String,
    pub time_to_blastocyst: f64,
    pub viability: f64,
    pub speed: DevelopmentSpeed,
}

/// Time of `tB` against viability for embryos that reached blastocyst.
pub fn blastocyst_scatter(embryos: &[Embryo]) -> Vec<ScatterPoint> {
    embryos
        .iter()
        .filter(|e| e.blastocyst_formation)
        .map(|e| ScatterPoint {
            embryo_id: e.id.clone(),
            time_to_blastocyst: e
                .transition(DevelopmentStage::TB)
                .map(|t| t.time_hours)
                .unwrap_or(0.0),
            viability: e.model_output.viability_score,
            speed: e.development_speed,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Per-embryo derivations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSegment {
    pub stage: DevelopmentStage,
    pub start_time: f64,
    pub end_time: f64,
    pub start_percent: f64,
    pub width_percent: f64,
    pub is_ground_truth: bool,
}

/// One segment per transition; the last runs to the end of observation.
pub fn timeline_segments(embryo: &Embryo) -> Vec<TimelineSegment> {
    let max_time = embryo.observation_duration_hours;
    let transitions = &embryo.stage_transitions;

    transitions
        .iter()
        .enumerate()
        .map(|(i, current)| {
            let start_time = current.time_hours;
            let end_time = transitions
                .get(i + 1)
                .map(|next| next.time_hours)
                .unwrap_or(max_time);
            TimelineSegment {
                stage: current.stage,
                start_time,
                end_time,
                start_percent: percent_of(start_time, max_time),
                width_percent: percent_of(end_time - start_time, max_time),
                is_ground_truth: current.is_ground_truth,
            }
        })
        .collect()
}

pub const TIME_MARKER_INTERVAL_HOURS: f64 = 12.0;

/// `(hours, percent)` ticks every `interval` hours from zero.
pub fn time_markers(duration_hours: f64, interval: f64) -> Vec<(f64, f64)> {
    if interval <= 0.0 {
        return Vec::new();
    }
    let mut markers = Vec::new();
    let mut t = 0.0;
    while t <= duration_hours {
        markers.push((t, percent_of(t, duration_hours)));
        t += interval;
    }
    markers
}

pub fn percent_of(value: f64, total: f64) -> f64 {
    if total <= 0.0 {
        0.0
    } else {
        value / total * 100.0
    }
}

/// Hours under a pointer at `client_x` on a track spanning
/// `[track_left, track_left + track_width]`, clamped to `[0, duration]`.
pub fn seek_hours(client_x: f64, track_left: f64, track_width: f64, duration_hours: f64) -> f64 {
    if track_width <= 0.0 || duration_hours <= 0.0 {
        return 0.0;
    }
    let fraction = ((client_x - track_left) / track_width).clamp(0.0, 1.0);
    fraction * duration_hours
}

/// Index of the frame nearest to `target_hours`; earlier frames win ties.
pub fn closest_frame_index(frames: &[Frame], target_hours: f64) -> usize {
    let mut best = 0;
    let mut best_diff = f64::INFINITY;
    for (i, frame) in frames.iter().enumerate() {
        let diff = (frame.time_hours - target_hours).abs();
        if diff < best_diff {
            best_diff = diff;
            best = i;
        }
    }
    best
}

/// Hours between two optional milestones, when both are present.
pub fn stage_interval(from: Option<f64>, to: Option<f64>) -> Option<f64> {
    match (from, to) {
        (Some(a), Some(b)) => Some(b - a),
        _ => None,
    }
}

pub const ANOMALY_LIST_LIMIT: usize = 5;

pub fn anomaly_frames(embryo: &Embryo, limit: usize) -> Vec<&Frame> {
    embryo
        .frames
        .iter()
        .filter(|f| f.anomaly_flag.is_some())
        .take(limit)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViabilityTier {
    High,
    Moderate,
    Low,
}

impl ViabilityTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::High
        } else if score >= 0.7 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::High => "viability--high",
            Self::Moderate => "viability--moderate",
            Self::Low => "viability--low",
        }
    }
}

// ---------------------------------------------------------------------------
// Comparison selection
// ---------------------------------------------------------------------------

pub const MAX_COMPARE: usize = 3;
pub const MIN_COMPARE: usize = 2;

/// Ordered set of up to three embryo ids picked for side-by-side review.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonSelection {
    ids: Vec<String>,
}

impl ComparisonSelection {
    /// Adds or removes `id`. Additions beyond the cap are ignored.
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(pos);
        } else if self.ids.len() < MAX_COMPARE {
            self.ids.push(id.to_string());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn can_compare(&self) -> bool {
        self.ids.len() >= MIN_COMPARE
    }
}

/// Resolve a comma-joined id list: unknown ids are dropped, at most three kept.
pub fn resolve_comparison<'a>(cohort: &'a CohortData, raw_ids: &str) -> Vec<&'a Embryo> {
    crate::core::routes::parse_id_list(raw_ids)
        .iter()
        .filter_map(|id| cohort.find(id))
        .take(MAX_COMPARE)
        .collect()
}

/// Longest frame sequence among the compared embryos.
pub fn max_frame_count(embryos: &[&Embryo]) -> usize {
    embryos.iter().map(|e| e.frames.len()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohort::generator::generate_mock_cohort;

    #[test]
    fn box_plot_uses_nearest_rank() {
        let summary = box_plot(&[30.2, 22.0, 25.8, 24.3, 26.9]).unwrap();
        assert_eq!(
            summary,
            BoxPlotSummary {
                min: 22.0,
                q1: 24.3,
                median: 25.8,
                q3: 26.9,
                max: 30.2,
            }
        );
        assert!(box_plot(&[]).is_none());
    }

    #[test]
    fn histogram_bins_are_literal() {
        let cohort = generate_mock_cohort(1);
        let bins = histogram(&cohort.embryos, &T2_HISTOGRAM);
        let labels: Vec<_> = bins.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["22-24h", "24-26h", "26-28h", "28-30h", "30-32h", "32-34h"]
        );
        assert_eq!(histogram(&cohort.embryos, &T3_HISTOGRAM).len(), 5);
        assert_eq!(histogram(&cohort.embryos, &T5_HISTOGRAM).len(), 6);
    }

    #[test]
    fn toggling_three_times_restores_insertion_order() {
        let cohort = generate_mock_cohort(2);
        let original: Vec<_> = cohort.embryos.iter().map(|e| e.id.clone()).collect();

        let mut state = SortState::default();
        state.toggle(SortField::Viability);
        assert_eq!(state.direction, Some(SortDirection::Ascending));
        state.toggle(SortField::Viability);
        assert_eq!(state.direction, Some(SortDirection::Descending));
        state.toggle(SortField::Viability);
        assert_eq!(state, SortState::default());

        let ids: Vec<_> = sort_embryos(&cohort.embryos, &state)
            .iter()
            .map(|e| e.id.clone())
            .collect();
        assert_eq!(ids, original);
    }

    #[test]
    fn switching_field_restarts_ascending() {
        let mut state = SortState::default();
        state.toggle(SortField::Id);
        state.toggle(SortField::Id);
        state.toggle(SortField::TimeToT2);
        assert_eq!(state.field, Some(SortField::TimeToT2));
        assert_eq!(state.direction, Some(SortDirection::Ascending));
        assert_eq!(state.direction_for(SortField::Id), None);
    }

    #[test]
    fn missing_values_sort_last_both_ways() {
        let mut cohort = generate_mock_cohort(3);
        cohort.embryos[0].time_to_t3 = None;
        let missing_id = cohort.embryos[0].id.clone();

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let state = SortState {
                field: Some(SortField::TimeToT3),
                direction: Some(direction),
            };
            let sorted = sort_embryos(&cohort.embryos, &state);
            assert_eq!(sorted.last().unwrap().id, missing_id);
        }
    }

    #[test]
    fn descending_viability_puts_best_first() {
        let cohort = generate_mock_cohort(4);
        let state = SortState {
            field: Some(SortField::Viability),
            direction: Some(SortDirection::Descending),
        };
        let sorted = sort_embryos(&cohort.embryos, &state);
        assert_eq!(sorted[0].id, "EMB-001");
        assert_eq!(sorted.last().unwrap().id, "EMB-008");
    }

    #[test]
    fn speed_sort_is_textual_and_stable() {
        let cohort = generate_mock_cohort(4);
        let state = SortState {
            field: Some(SortField::Speed),
            direction: Some(SortDirection::Ascending),
        };
        let ids: Vec<_> = sort_embryos(&cohort.embryos, &state)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        // Fast < Normal < Slow, insertion order kept within each group.
        assert_eq!(&ids[..2], &["EMB-003", "EMB-007"]);
        assert_eq!(&ids[9..], &["EMB-004", "EMB-008", "EMB-011"]);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let cohort = generate_mock_cohort(5);
        let all = sort_embryos(&cohort.embryos, &SortState::default());
        let hits = filter_by_id(all.clone(), "emb-01");
        let ids: Vec<_> = hits.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["EMB-010", "EMB-011", "EMB-012"]);
        assert_eq!(filter_by_id(all.clone(), "").len(), 12);
        assert!(filter_by_id(all, " emb-001").is_empty());
    }

    #[test]
    fn scatter_only_includes_blastocysts() {
        let cohort = generate_mock_cohort(6);
        let points = blastocyst_scatter(&cohort.embryos);
        assert_eq!(points.len(), cohort.blastocyst_count());
        let first = &points[0];
        assert_eq!(first.embryo_id, "EMB-001");
        assert_eq!(first.time_to_blastocyst, 105.3);
        assert_eq!(first.viability, 0.847);
        assert_eq!(first.speed, DevelopmentSpeed::Normal);
    }

    #[test]
    fn segments_cover_the_observation_window() {
        let cohort = generate_mock_cohort(7);
        let embryo = cohort.find("EMB-004").unwrap();
        let segments = timeline_segments(embryo);
        assert_eq!(segments.len(), embryo.stage_transitions.len());
        let last = segments.last().unwrap();
        assert_eq!(last.stage, DevelopmentStage::TM);
        assert_eq!(last.end_time, embryo.observation_duration_hours);
        assert!((segments[0].start_percent - 1.2 / 82.3 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn markers_every_twelve_hours() {
        let markers = time_markers(82.3, TIME_MARKER_INTERVAL_HOURS);
        let hours: Vec<_> = markers.iter().map(|(t, _)| *t).collect();
        assert_eq!(hours, vec![0.0, 12.0, 24.0, 36.0, 48.0, 60.0, 72.0]);
    }

    #[test]
    fn closest_frame_prefers_nearest() {
        let cohort = generate_mock_cohort(8);
        let embryo = cohort.find("EMB-001").unwrap();
        let step = embryo.frames[1].time_hours;
        assert_eq!(closest_frame_index(&embryo.frames, 0.0), 0);
        assert_eq!(closest_frame_index(&embryo.frames, step * 10.2), 10);
        assert_eq!(closest_frame_index(&embryo.frames, 1_000.0), embryo.frames.len() - 1);
    }

    #[test]
    fn seek_uses_position_within_track() {
        let (left, width, duration) = (100.0, 400.0, 105.3);
        assert!((seek_hours(200.0, left, width, duration) - 26.325).abs() < 1e-9);
        // A click a few pixels into a segment that starts mid-track.
        let mid = seek_hours(left + width * 0.5 + 5.0, left, width, duration);
        assert!((mid - (205.0 / 400.0) * duration).abs() < 1e-9);
        assert_eq!(seek_hours(50.0, left, width, duration), 0.0);
        assert_eq!(seek_hours(900.0, left, width, duration), duration);
        assert_eq!(seek_hours(200.0, left, 0.0, duration), 0.0);
    }

    #[test]
    fn seek_lands_on_matching_frame() {
        let cohort = generate_mock_cohort(8);
        let embryo = cohort.find("EMB-001").unwrap();
        let target = seek_hours(200.0, 100.0, 400.0, embryo.observation_duration_hours);
        assert_eq!(closest_frame_index(&embryo.frames, target), 158);
    }

    #[test]
    fn intervals_need_both_ends() {
        assert!((stage_interval(Some(26.2), Some(38.5)).unwrap() - 12.3).abs() < 1e-9);
        assert_eq!(stage_interval(None, Some(38.5)), None);
    }

    #[test]
    fn viability_tiers() {
        assert_eq!(ViabilityTier::from_score(0.847), ViabilityTier::High);
        assert_eq!(ViabilityTier::from_score(0.7), ViabilityTier::Moderate);
        assert_eq!(ViabilityTier::from_score(0.612), ViabilityTier::Low);
    }

    #[test]
    fn selection_caps_at_three() {
        let mut selection = ComparisonSelection::default();
        for id in ["EMB-001", "EMB-002", "EMB-003", "EMB-004"] {
            selection.toggle(id);
        }
        assert_eq!(selection.ids(), &["EMB-001", "EMB-002", "EMB-003"]);
        selection.toggle("EMB-002");
        assert_eq!(selection.len(), 2);
        assert!(selection.can_compare());
        assert!(!selection.contains("EMB-002"));
    }

    #[test]
    fn comparison_resolves_known_ids_only() {
        let cohort = generate_mock_cohort(9);
        let picked = resolve_comparison(&cohort, "EMB-002,EMB-999,EMB-005,EMB-006,EMB-007");
        let ids: Vec<_> = picked.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["EMB-002", "EMB-005", "EMB-006"]);
        assert_eq!(
            max_frame_count(&picked),
            picked.iter().map(|e| e.frames.len()).max().unwrap()
        );
        assert!(resolve_comparison(&cohort, "").is_empty());
    }
}
