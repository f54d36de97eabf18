//! Synthetic cohort generation and the derived metrics consumed by the views.
//!
//! Leaves first: `timeline` builds stage transitions, `frames` samples them
//! into a frame sequence, `scoring` derives risk factors and insights,
//! `generator` assembles whole embryos and owns the process-wide cohort, and
//! `metrics` holds the pure cohort-level derivations (sort, filter,
//! histograms, box plots, scatter series, timeline segments).

pub mod frames;
pub mod generator;
pub mod metrics;
pub mod model;
pub mod playback;
pub mod scoring;
pub mod timeline;

pub use generator::{
    cohort_repository, create_embryo, generate_mock_cohort, init_cohort, CohortRepository,
    EmbryoParams, MockCohortRepository,
};
pub use model::{
    CohortData, DevelopmentSpeed, DevelopmentStage, Embryo, Frame, ModelOutput, RiskFactor,
    StageTransition,
};
pub use playback::PlaybackState;
pub use scoring::{Assessment, MilestoneHeuristics, ScoringPolicy};
pub use timeline::{Milestones, TimelineError};
