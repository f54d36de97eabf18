//! Embryo assembly and the process-wide cohort provider.
//!
//! The cohort is built once from literal parameter sets and is immutable
//! afterwards. Consumers go through [`CohortRepository`] so another data
//! source can replace the mock generator without touching the views.

use once_cell::sync::OnceCell;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::frames::{round_to, synthesize_frames};
use super::model::{CohortData, DevelopmentSpeed, DevelopmentStage, Embryo, ModelOutput};
use super::scoring::{MilestoneHeuristics, ScoringPolicy};
use super::timeline::{build_transitions, validate_transitions, Milestones};
use crate::core::config::AppConfig;

pub const MOCK_CYCLE_ID: &str = "CYC-2026-02-12-A";

const CONFIDENCE_WITH_BLASTOCYST: f64 = 88.0;
const CONFIDENCE_PROVISIONAL: f64 = 75.0;
const CONFIDENCE_SPREAD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbryoParams {
    pub milestones: Milestones,
    pub development_speed: DevelopmentSpeed,
    pub viability_score: f64,
}

impl EmbryoParams {
    const fn new(
        t2_time: f64,
        t3_time: f64,
        t5_time: f64,
        blastocyst_time: Option<f64>,
        development_speed: DevelopmentSpeed,
        viability_score: f64,
    ) -> Self {
        Self {
            milestones: Milestones {
                t2_time,
                t3_time,
                t5_time,
                blastocyst_time,
            },
            development_speed,
            viability_score,
        }
    }
}

pub fn create_embryo<R: Rng + ?Sized>(
    id: &str,
    params: &EmbryoParams,
    policy: &dyn ScoringPolicy,
    rng: &mut R,
) -> Embryo {
    let milestones = &params.milestones;
    let duration_hours = milestones.observation_hours();
    let total_frames = milestones.frame_count();

    let stage_transitions = build_transitions(milestones);
    if let Err(err) = validate_transitions(&stage_transitions) {
        warn!(embryo = id, "non-monotonic stage timeline kept as built: {err}");
    }

    let frames = synthesize_frames(total_frames, duration_hours, &stage_transitions, rng);
    let assessment = policy.assess(milestones, params.development_speed);

    let blastocyst_formation = milestones.blastocyst_time.is_some();
    let confidence_base = if blastocyst_formation {
        CONFIDENCE_WITH_BLASTOCYST
    } else {
        CONFIDENCE_PROVISIONAL
    };
    let confidence_variance = (rng.gen::<f64>() - 0.5) * CONFIDENCE_SPREAD;

    let last_observed_stage = stage_transitions
        .last()
        .map(|t| t.stage)
        .unwrap_or(DevelopmentStage::TPb2);

    debug!(
        embryo = id,
        frames = total_frames,
        risks = assessment.risk_factors.len(),
        "assembled embryo"
    );

    Embryo {
        id: id.to_string(),
        total_frames,
        observation_duration_hours: round_to(duration_hours, 1),
        last_observed_stage,
        time_to_t2: Some(milestones.t2_time),
        time_to_t3: Some(milestones.t3_time),
        time_to_t5: Some(milestones.t5_time),
        blastocyst_formation,
        development_speed: params.development_speed,
        model_output: ModelOutput {
            viability_score: round_to(params.viability_score, 3),
            confidence: round_to(confidence_base + confidence_variance, 1),
            risk_factors: assessment.risk_factors,
            sensitivity_insights: assessment.sensitivity_insights,
        },
        frames,
        stage_transitions,
    }
}

/// Literal parameter sets for the demo cycle, in creation order.
pub fn mock_parameters() -> [(&'static str, EmbryoParams); 12] {
    use DevelopmentSpeed::*;

    [
        ("EMB-001", EmbryoParams::new(26.2, 38.5, 52.1, Some(105.3), Normal, 0.847)),
        ("EMB-002", EmbryoParams::new(28.7, 40.1, 54.8, Some(112.6), Normal, 0.782)),
        ("EMB-003", EmbryoParams::new(24.3, 35.2, 48.6, Some(98.2), Fast, 0.723)),
        ("EMB-004", EmbryoParams::new(31.5, 44.8, 58.3, None, Slow, 0.612)),
        ("EMB-005", EmbryoParams::new(25.8, 37.9, 51.2, Some(108.9), Normal, 0.815)),
        ("EMB-006", EmbryoParams::new(29.4, 42.3, 56.7, Some(115.2), Normal, 0.758)),
        ("EMB-007", EmbryoParams::new(23.1, 33.8, 46.9, Some(96.5), Fast, 0.698)),
        ("EMB-008", EmbryoParams::new(32.8, 46.2, 61.5, None, Slow, 0.584)),
        ("EMB-009", EmbryoParams::new(27.3, 39.6, 53.4, Some(109.7), Normal, 0.801)),
        ("EMB-010", EmbryoParams::new(26.9, 38.8, 52.6, Some(106.8), Normal, 0.834)),
        ("EMB-011", EmbryoParams::new(30.2, 43.5, 57.8, None, Slow, 0.647)),
        ("EMB-012", EmbryoParams::new(25.1, 36.7, 50.3, Some(102.4), Normal, 0.822)),
    ]
}

pub fn generate_mock_cohort(seed: u64) -> CohortData {
    generate_mock_cohort_with(seed, &MilestoneHeuristics)
}

pub fn generate_mock_cohort_with(seed: u64, policy: &dyn ScoringPolicy) -> CohortData {
    let mut rng = StdRng::seed_from_u64(seed);
    let embryos = mock_parameters()
        .iter()
        .map(|(id, params)| create_embryo(id, params, policy, &mut rng))
        .collect();

    CohortData {
        cycle_id: MOCK_CYCLE_ID.to_string(),
        embryos,
    }
}

pub trait CohortRepository: Send + Sync {
    fn cohort(&self) -> &CohortData;

    fn find(&self, id: &str) -> Option<&Embryo> {
        self.cohort().find(id)
    }
}

/// In-memory repository over a generated mock cohort.
#[derive(Debug, Clone)]
pub struct MockCohortRepository {
    seed: u64,
    data: CohortData,
}

impl MockCohortRepository {
    pub fn generate(seed: u64) -> Self {
        Self {
            seed,
            data: generate_mock_cohort(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl CohortRepository for MockCohortRepository {
    fn cohort(&self) -> &CohortData {
        &self.data
    }
}

static COHORT: OnceCell<MockCohortRepository> = OnceCell::new();

/// Build the process-wide cohort (idempotent; later calls keep the first build).
pub fn init_cohort(config: &AppConfig) -> &'static MockCohortRepository {
    COHORT.get_or_init(|| {
        let seed = config.cohort_seed.unwrap_or_else(rand::random);
        let repo = MockCohortRepository::generate(seed);
        info!(
            seed,
            cycle = %repo.cohort().cycle_id,
            embryos = repo.cohort().embryos.len(),
            "mock cohort generated"
        );
        repo
    })
}

/// The process-wide cohort, built from the loaded config on first access.
pub fn cohort_repository() -> &'static MockCohortRepository {
    match COHORT.get() {
        Some(repo) => repo,
        None => init_cohort(&AppConfig::load()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohort::scoring::{Assessment, OPTIMAL_BLASTOCYST};

    #[test]
    fn embryo_summary_fields_follow_milestones() {
        let (_, params) = mock_parameters()[0];
        let mut rng = StdRng::seed_from_u64(1);
        let embryo = create_embryo("EMB-001", &params, &MilestoneHeuristics, &mut rng);

        assert_eq!(embryo.total_frames, 631);
        assert_eq!(embryo.frames.len(), 631);
        assert_eq!(embryo.observation_duration_hours, 105.3);
        assert_eq!(embryo.last_observed_stage, DevelopmentStage::TEb);
        assert!(embryo.blastocyst_formation);
        assert_eq!(embryo.model_output.viability_score, 0.847);
        assert!((83.0..=93.0).contains(&embryo.model_output.confidence));
    }

    #[test]
    fn embryo_without_blastocyst_stops_at_morula() {
        let (_, params) = mock_parameters()[3];
        let mut rng = StdRng::seed_from_u64(1);
        let embryo = create_embryo("EMB-004", &params, &MilestoneHeuristics, &mut rng);

        assert!(!embryo.blastocyst_formation);
        assert_eq!(embryo.last_observed_stage, DevelopmentStage::TM);
        assert!(embryo.transition(DevelopmentStage::TB).is_none());
        assert_eq!(embryo.observation_duration_hours, 82.3);
        assert_eq!(embryo.total_frames, 493);
        assert!((70.0..=80.0).contains(&embryo.model_output.confidence));
    }

    #[test]
    fn custom_policy_replaces_heuristics() {
        struct NoRisk;
        impl ScoringPolicy for NoRisk {
            fn assess(&self, _: &Milestones, _: DevelopmentSpeed) -> Assessment {
                Assessment::default()
            }
        }

        let cohort = generate_mock_cohort_with(5, &NoRisk);
        assert!(cohort
            .embryos
            .iter()
            .all(|e| e.model_output.risk_factors.is_empty()));

        let heuristic = generate_mock_cohort(5);
        let emb3 = heuristic.find("EMB-003").unwrap();
        assert!(emb3
            .model_output
            .risk_factors
            .iter()
            .any(|rf| rf.name == OPTIMAL_BLASTOCYST));
    }

    #[test]
    fn repository_finds_by_id() {
        let repo = MockCohortRepository::generate(11);
        assert_eq!(repo.seed(), 11);
        assert_eq!(repo.cohort().cycle_id, MOCK_CYCLE_ID);
        assert!(repo.find("EMB-012").is_some());
        assert!(repo.find("EMB-404").is_none());
    }
}
