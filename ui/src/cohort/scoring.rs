//! Risk factor and sensitivity insight derivation.
//!
//! `ScoringPolicy` is the seam where a real model's explanation output can
//! replace the milestone heuristics without touching the generator or views.

use super::model::{DevelopmentSpeed, RiskFactor};
use super::timeline::Milestones;

pub const DELAYED_CLEAVAGE: &str = "Delayed 2-cell division";
pub const RAPID_T2_T3: &str = "Rapid t2→t3 transition";
pub const ACCELERATED_DEVELOPMENT: &str = "Accelerated development";
pub const OPTIMAL_BLASTOCYST: &str = "Optimal blastocyst timing";

pub const INSIGHT_T2_SENSITIVITY: &str =
    "Time to t2 is a critical predictor; reduction by 2h would increase score by ~0.08";
pub const INSIGHT_MULTIPLE_FACTORS: &str =
    "Multiple minor risk factors present; primary sensitivity to blastocyst formation timing";
pub const INSIGHT_PROVISIONAL: &str = "Blastocyst formation not yet observed; score is provisional";

const DELAYED_T2_HOURS: f64 = 28.0;
const RAPID_T2_T3_HOURS: f64 = 10.0;
const OPTIMAL_BLASTOCYST_HOURS: f64 = 100.0;
const T2_SENSITIVITY_HOURS: f64 = 27.0;
const MULTIPLE_FACTOR_COUNT: usize = 2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assessment {
    pub risk_factors: Vec<RiskFactor>,
    /// Ordered; append order is evaluation order.
    pub sensitivity_insights: Vec<String>,
}

pub trait ScoringPolicy {
    fn assess(&self, milestones: &Milestones, speed: DevelopmentSpeed) -> Assessment;
}

/// Literal-threshold heuristics over milestone timings.
#[derive(Debug, Clone, Copy, Default)]
pub struct MilestoneHeuristics;

impl ScoringPolicy for MilestoneHeuristics {
    fn assess(&self, milestones: &Milestones, speed: DevelopmentSpeed) -> Assessment {
        let mut risk_factors = Vec::new();

        if milestones.t2_time > DELAYED_T2_HOURS {
            risk_factors.push(RiskFactor::new(DELAYED_CLEAVAGE, -0.25, 0.82));
        }
        if milestones.t3_time - milestones.t2_time < RAPID_T2_T3_HOURS {
            risk_factors.push(RiskFactor::new(RAPID_T2_T3, -0.15, 0.65));
        }
        if speed == DevelopmentSpeed::Fast {
            risk_factors.push(RiskFactor::new(ACCELERATED_DEVELOPMENT, -0.12, 0.58));
        }
        if matches!(milestones.blastocyst_time, Some(tb) if tb < OPTIMAL_BLASTOCYST_HOURS) {
            risk_factors.push(RiskFactor::new(OPTIMAL_BLASTOCYST, 0.28, 0.91));
        }

        let mut sensitivity_insights = Vec::new();
        if milestones.t2_time > T2_SENSITIVITY_HOURS {
            sensitivity_insights.push(INSIGHT_T2_SENSITIVITY.to_string());
        }
        if risk_factors.len() > MULTIPLE_FACTOR_COUNT {
            sensitivity_insights.push(INSIGHT_MULTIPLE_FACTORS.to_string());
        }
        if milestones.blastocyst_time.is_none() {
            sensitivity_insights.push(INSIGHT_PROVISIONAL.to_string());
        }

        Assessment {
            risk_factors,
            sensitivity_insights,
        }
    }
}

/// Shorthand for the default heuristic policy.
pub fn derive_risk(milestones: &Milestones, speed: DevelopmentSpeed) -> Assessment {
    MilestoneHeuristics.assess(milestones, speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(assessment: &Assessment) -> Vec<&str> {
        assessment
            .risk_factors
            .iter()
            .map(|rf| rf.name.as_str())
            .collect()
    }

    #[test]
    fn delayed_rapid_and_optimal_fire_together() {
        let assessment = derive_risk(
            &Milestones::new(29.0, 37.0, 52.0, Some(95.0)),
            DevelopmentSpeed::Normal,
        );
        assert_eq!(
            names(&assessment),
            vec![DELAYED_CLEAVAGE, RAPID_T2_T3, OPTIMAL_BLASTOCYST]
        );
        assert_eq!(
            assessment.sensitivity_insights,
            vec![INSIGHT_T2_SENSITIVITY, INSIGHT_MULTIPLE_FACTORS]
        );
    }

    #[test]
    fn each_threshold_is_strict() {
        let at_edges = derive_risk(
            &Milestones::new(28.0, 38.0, 52.0, Some(100.0)),
            DevelopmentSpeed::Normal,
        );
        assert!(names(&at_edges).is_empty());
        assert_eq!(at_edges.sensitivity_insights, vec![INSIGHT_T2_SENSITIVITY]);
    }

    #[test]
    fn fast_speed_only_adds_acceleration() {
        let assessment = derive_risk(
            &Milestones::new(24.3, 35.2, 48.6, Some(98.2)),
            DevelopmentSpeed::Fast,
        );
        assert_eq!(names(&assessment), vec![ACCELERATED_DEVELOPMENT, OPTIMAL_BLASTOCYST]);
        assert!(assessment.sensitivity_insights.is_empty());
    }

    #[test]
    fn missing_blastocyst_is_provisional() {
        let assessment = derive_risk(
            &Milestones::new(31.5, 44.8, 58.3, None),
            DevelopmentSpeed::Slow,
        );
        assert_eq!(names(&assessment), vec![DELAYED_CLEAVAGE]);
        assert_eq!(
            assessment.sensitivity_insights,
            vec![INSIGHT_T2_SENSITIVITY, INSIGHT_PROVISIONAL]
        );
        let delayed = &assessment.risk_factors[0];
        assert_eq!((delayed.impact, delayed.importance), (-0.25, 0.82));
    }
}
