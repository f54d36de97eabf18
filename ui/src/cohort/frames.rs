//! Frame synthesis: uniform sampling over the observation window with
//! per-frame confidence, morphology and anomaly signals.
//!
//! Signals depend on distance to the nearest transition. The random source
//! is injected so seeded runs reproduce exactly.

use rand::Rng;

use super::model::{DevelopmentStage, Frame, StageTransition};

/// Samples within this many hours of a transition count as "near".
pub const TRANSITION_WINDOW_HOURS: f64 = 2.0;

const STABLE_CONFIDENCE: f64 = 92.0;
const TRANSITION_CONFIDENCE: f64 = 70.0;
const CONFIDENCE_JITTER: f64 = 8.0;

const STABLE_CHANGE_BASE: f64 = 0.15;
const STABLE_CHANGE_SPAN: f64 = 0.15;
const TRANSITION_CHANGE_BASE: f64 = 0.6;
const TRANSITION_CHANGE_SPAN: f64 = 0.3;

const ANOMALY_THRESHOLD: f64 = 0.85;
pub const ANOMALY_LABEL: &str = "Stage transition";

/// Stage in effect at `time_hours`: the transition with the greatest time at or
/// before it (later entries win ties), or `tPB2` when none qualifies.
pub fn stage_at(transitions: &[StageTransition], time_hours: f64) -> DevelopmentStage {
    let mut current: Option<&StageTransition> = None;
    for transition in transitions {
        if transition.time_hours > time_hours {
            continue;
        }
        match current {
            Some(best) if transition.time_hours < best.time_hours => {}
            _ => current = Some(transition),
        }
    }
    current
        .map(|t| t.stage)
        .unwrap_or(DevelopmentStage::TPb2)
}

pub fn is_near_transition(transitions: &[StageTransition], time_hours: f64) -> bool {
    transitions
        .iter()
        .any(|t| (t.time_hours - time_hours).abs() < TRANSITION_WINDOW_HOURS)
}

pub fn synthesize_frames<R: Rng + ?Sized>(
    frame_count: usize,
    duration_hours: f64,
    transitions: &[StageTransition],
    rng: &mut R,
) -> Vec<Frame> {
    if frame_count == 0 {
        return Vec::new();
    }

    let hours_per_frame = duration_hours / frame_count as f64;

    (0..frame_count)
        .map(|index| {
            let time_hours = index as f64 * hours_per_frame;
            let near = is_near_transition(transitions, time_hours);

            let base_confidence = if near {
                TRANSITION_CONFIDENCE
            } else {
                STABLE_CONFIDENCE
            };
            let confidence = base_confidence + rng.gen::<f64>() * CONFIDENCE_JITTER;

            let morphological_change = if near {
                TRANSITION_CHANGE_BASE + rng.gen::<f64>() * TRANSITION_CHANGE_SPAN
            } else {
                STABLE_CHANGE_BASE + rng.gen::<f64>() * STABLE_CHANGE_SPAN
            };

            let anomaly_flag = (near && rng.gen::<f64>() > ANOMALY_THRESHOLD)
                .then(|| ANOMALY_LABEL.to_string());

            Frame {
                index,
                time_hours,
                image_path: format!("frame_{index:04}.png"),
                predicted_stage: stage_at(transitions, time_hours),
                confidence: round_to(confidence, 1),
                morphological_change: round_to(morphological_change, 3),
                anomaly_flag,
            }
        })
        .collect()
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohort::timeline::{build_transitions, Milestones};
    use rand::{rngs::StdRng, SeedableRng};

    fn sample_transitions() -> Vec<StageTransition> {
        build_transitions(&Milestones::new(26.2, 38.5, 52.1, Some(105.3)))
    }

    #[test]
    fn stage_lookup_is_a_step_function() {
        let transitions = sample_transitions();
        assert_eq!(stage_at(&transitions, 0.0), DevelopmentStage::TPb2);
        assert_eq!(stage_at(&transitions, 1.2), DevelopmentStage::TPb2);
        assert_eq!(stage_at(&transitions, 4.6), DevelopmentStage::TPna);
        assert_eq!(stage_at(&transitions, 26.1), DevelopmentStage::TPnf);
        assert_eq!(stage_at(&transitions, 26.2), DevelopmentStage::T2);
        assert_eq!(stage_at(&transitions, 100.0), DevelopmentStage::TSb);
    }

    #[test]
    fn stage_lookup_uses_latest_time_not_sequence_position() {
        let transitions = vec![
            StageTransition::new(DevelopmentStage::T2, 30.0, true),
            StageTransition::new(DevelopmentStage::T3, 25.0, true),
        ];
        assert_eq!(stage_at(&transitions, 31.0), DevelopmentStage::T2);
        assert_eq!(stage_at(&transitions, 26.0), DevelopmentStage::T3);
    }

    #[test]
    fn frames_are_uniform_and_contiguous() {
        let transitions = sample_transitions();
        let mut rng = StdRng::seed_from_u64(7);
        let frames = synthesize_frames(631, 105.3, &transitions, &mut rng);

        assert_eq!(frames.len(), 631);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.index, i);
            assert_eq!(frame.time_hours, i as f64 * (105.3 / 631.0));
            assert_eq!(frame.predicted_stage, stage_at(&transitions, frame.time_hours));
        }
        assert_eq!(frames[12].image_path, "frame_0012.png");
    }

    #[test]
    fn signals_stay_in_their_bands() {
        let transitions = sample_transitions();
        let mut rng = StdRng::seed_from_u64(99);
        let frames = synthesize_frames(631, 105.3, &transitions, &mut rng);

        for frame in &frames {
            if is_near_transition(&transitions, frame.time_hours) {
                assert!((70.0..=78.0).contains(&frame.confidence));
                assert!((0.6..=0.9).contains(&frame.morphological_change));
            } else {
                assert!((92.0..=100.0).contains(&frame.confidence));
                assert!((0.15..=0.3).contains(&frame.morphological_change));
                assert!(frame.anomaly_flag.is_none());
            }
        }
    }

    #[test]
    fn same_seed_same_frames() {
        let transitions = sample_transitions();
        let a = synthesize_frames(200, 40.0, &transitions, &mut StdRng::seed_from_u64(3));
        let b = synthesize_frames(200, 40.0, &transitions, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_frames_is_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(synthesize_frames(0, 10.0, &[], &mut rng).is_empty());
    }
}
