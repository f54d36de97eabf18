//! Stage-transition timeline construction.
//!
//! The early-cleavage skeleton uses fixed offsets; later stages are placed
//! relative to the supplied milestones. Construction never reorders or
//! rejects input: inconsistent milestones yield an out-of-order timeline,
//! which `validate_transitions` reports without altering.

use super::model::{DevelopmentStage, StageTransition};

/// Uniform sampling rate of the time-lapse camera.
pub const FRAMES_PER_HOUR: f64 = 6.0;

const PB2_HOURS: f64 = 1.2;
const PNA_HOURS: f64 = 4.5;
const PNF_HOURS: f64 = 18.3;

const T4_AFTER_T3: f64 = 2.1;
const T8_AFTER_T5: f64 = 6.2;
const MORULA_AFTER_T5: f64 = 18.5;
const START_BLASTULATION_BEFORE_TB: f64 = 8.0;
const EXPANDED_AFTER_TB: f64 = 6.0;

/// Hours post-insemination for the annotated checkpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Milestones {
    pub t2_time: f64,
    pub t3_time: f64,
    pub t5_time: f64,
    pub blastocyst_time: Option<f64>,
}

impl Milestones {
    pub fn new(t2_time: f64, t3_time: f64, t5_time: f64, blastocyst_time: Option<f64>) -> Self {
        Self {
            t2_time,
            t3_time,
            t5_time,
            blastocyst_time,
        }
    }

    /// Observation window: up to blastocyst if observed, else one day past t5.
    pub fn observation_hours(&self) -> f64 {
        self.blastocyst_time.unwrap_or(self.t5_time + 24.0)
    }

    pub fn frame_count(&self) -> usize {
        (self.observation_hours() * FRAMES_PER_HOUR).floor() as usize
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimelineError {
    #[error(
        "{stage} at {time_hours:.1}h precedes {previous_stage} at {previous_time_hours:.1}h"
    )]
    OutOfOrder {
        stage: DevelopmentStage,
        time_hours: f64,
        previous_stage: DevelopmentStage,
        previous_time_hours: f64,
    },
}

pub fn build_transitions(milestones: &Milestones) -> Vec<StageTransition> {
    use DevelopmentStage::*;

    let mut transitions = vec![
        StageTransition::new(TPb2, PB2_HOURS, true),
        StageTransition::new(TPna, PNA_HOURS, true),
        StageTransition::new(TPnf, PNF_HOURS, true),
        StageTransition::new(T2, milestones.t2_time, true),
        StageTransition::new(T3, milestones.t3_time, true),
        StageTransition::new(T4, milestones.t3_time + T4_AFTER_T3, false),
        StageTransition::new(T5, milestones.t5_time, true),
        StageTransition::new(T8, milestones.t5_time + T8_AFTER_T5, false),
        StageTransition::new(TM, milestones.t5_time + MORULA_AFTER_T5, false),
    ];

    if let Some(tb) = milestones.blastocyst_time {
        transitions.extend([
            StageTransition::new(TSb, tb - START_BLASTULATION_BEFORE_TB, false),
            StageTransition::new(TB, tb, true),
            StageTransition::new(TEb, tb + EXPANDED_AFTER_TB, false),
        ]);
    }

    transitions
}

/// Checks that transition times never decrease in sequence order.
pub fn validate_transitions(transitions: &[StageTransition]) -> Result<(), TimelineError> {
    for pair in transitions.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.time_hours < prev.time_hours {
            return Err(TimelineError::OutOfOrder {
                stage: next.stage,
                time_hours: next.time_hours,
                previous_stage: prev.stage,
                previous_time_hours: prev.time_hours,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use DevelopmentStage::*;

    #[test]
    fn skeleton_without_blastocyst_ends_at_morula() {
        let transitions = build_transitions(&Milestones::new(31.5, 44.8, 58.3, None));
        let stages: Vec<_> = transitions.iter().map(|t| t.stage).collect();
        assert_eq!(stages, vec![TPb2, TPna, TPnf, T2, T3, T4, T5, T8, TM]);
        assert!((transitions[5].time_hours - 46.9).abs() < 1e-9);
        assert!(!transitions[5].is_ground_truth);
        assert!((transitions[8].time_hours - 76.8).abs() < 1e-9);
    }

    #[test]
    fn blastocyst_adds_three_stages() {
        let transitions = build_transitions(&Milestones::new(26.2, 38.5, 52.1, Some(105.3)));
        assert_eq!(transitions.len(), 12);
        let tail: Vec<_> = transitions[9..]
            .iter()
            .map(|t| (t.stage, t.time_hours, t.is_ground_truth))
            .collect();
        assert_eq!(tail[0].0, TSb);
        assert!((tail[0].1 - 97.3).abs() < 1e-9);
        assert_eq!(tail[1], (TB, 105.3, true));
        assert_eq!(tail[2].0, TEb);
        assert!(!tail[2].2);
        assert!(validate_transitions(&transitions).is_ok());
    }

    #[test]
    fn inconsistent_milestones_are_kept_but_reported() {
        // t3 before t2: construction keeps the given order.
        let transitions = build_transitions(&Milestones::new(30.0, 25.0, 50.0, None));
        assert_eq!(transitions[3].stage, T2);
        assert_eq!(transitions[4].stage, T3);

        let err = validate_transitions(&transitions).unwrap_err();
        assert_eq!(
            err,
            TimelineError::OutOfOrder {
                stage: T3,
                time_hours: 25.0,
                previous_stage: T2,
                previous_time_hours: 30.0,
            }
        );
        assert_eq!(err.to_string(), "t3 at 25.0h precedes t2 at 30.0h");
    }

    #[test]
    fn frame_count_uses_six_per_hour() {
        assert_eq!(Milestones::new(26.2, 38.5, 52.1, Some(105.3)).frame_count(), 631);
        assert_eq!(Milestones::new(31.5, 44.8, 58.3, None).frame_count(), 493);
    }
}
