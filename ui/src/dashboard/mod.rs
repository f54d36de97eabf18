//! Dashboard building blocks shared by the cohort, embryo and comparison pages.

mod analytics;
pub use analytics::PopulationAnalytics;

mod comparison;
pub use comparison::{ComparisonPanel, ComparisonSummary};

mod export_actions;
pub use export_actions::{CohortExportButton, EmbryoReportButton};

mod frame_chart;
pub use frame_chart::FrameAnalytics;

pub mod geometry;

mod labels;
pub use labels::{column_label, metric_heading, speed_label, yes_no_label};

mod model_output;
pub use model_output::{DevelopmentMetrics, ModelOutputPanel, TransitionList};

mod playback;
pub use playback::{use_playback_clock, PlaybackControls};

mod table;
pub use table::CohortTable;

mod timeline;
pub use timeline::DevelopmentTimeline;

mod viewer;
pub use viewer::{FrameViewer, OverlayToggles, Overlays};
