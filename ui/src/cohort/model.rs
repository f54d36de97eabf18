//! Core data entities for embryo time-lapse analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Morphological checkpoints in temporal order (declaration order is the ordering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DevelopmentStage {
    #[serde(rename = "tPB2")]
    TPb2,
    #[serde(rename = "tPNa")]
    TPna,
    #[serde(rename = "tPNf")]
    TPnf,
    #[serde(rename = "t2")]
    T2,
    #[serde(rename = "t3")]
    T3,
    #[serde(rename = "t4")]
    T4,
    #[serde(rename = "t5")]
    T5,
    #[serde(rename = "t8")]
    T8,
    #[serde(rename = "tM")]
    TM,
    #[serde(rename = "tSB")]
    TSb,
    #[serde(rename = "tB")]
    TB,
    #[serde(rename = "tEB")]
    TEb,
}

impl DevelopmentStage {
    pub const ALL: [DevelopmentStage; 12] = [
        Self::TPb2,
        Self::TPna,
        Self::TPnf,
        Self::T2,
        Self::T3,
        Self::T4,
        Self::T5,
        Self::T8,
        Self::TM,
        Self::TSb,
        Self::TB,
        Self::TEb,
    ];

    /// Conventional annotation shorthand.
    pub fn label(self) -> &'static str {
        match self {
            Self::TPb2 => "tPB2",
            Self::TPna => "tPNa",
            Self::TPnf => "tPNf",
            Self::T2 => "t2",
            Self::T3 => "t3",
            Self::T4 => "t4",
            Self::T5 => "t5",
            Self::T8 => "t8",
            Self::TM => "tM",
            Self::TSb => "tSB",
            Self::TB => "tB",
            Self::TEb => "tEB",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::TPb2 => "Second polar body extrusion",
            Self::TPna => "Pronuclei appearance",
            Self::TPnf => "Pronuclei fading",
            Self::T2 => "2-cell stage",
            Self::T3 => "3-cell stage",
            Self::T4 => "4-cell stage",
            Self::T5 => "5-cell stage",
            Self::T8 => "8-cell stage",
            Self::TM => "Morula",
            Self::TSb => "Start blastulation",
            Self::TB => "Blastocyst",
            Self::TEb => "Expanded blastocyst",
        }
    }

    /// CSS modifier used by timeline segments and stage badges.
    pub fn css_class(self) -> String {
        format!("stage--{}", self.label().to_ascii_lowercase())
    }
}

impl fmt::Display for DevelopmentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DevelopmentSpeed {
    Slow,
    Normal,
    Fast,
}

impl DevelopmentSpeed {
    pub fn label(self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Slow => "speed--slow",
            Self::Normal => "speed--normal",
            Self::Fast => "speed--fast",
        }
    }
}

impl fmt::Display for DevelopmentSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTransition {
    pub stage: DevelopmentStage,
    pub time_hours: f64,
    /// Manual annotation (`true`) versus model inference (`false`). Informational only.
    pub is_ground_truth: bool,
}

impl StageTransition {
    pub fn new(stage: DevelopmentStage, time_hours: f64, is_ground_truth: bool) -> Self {
        Self {
            stage,
            time_hours,
            is_ground_truth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub index: usize,
    pub time_hours: f64,
    pub image_path: String,
    pub predicted_stage: DevelopmentStage,
    /// 0–100.
    pub confidence: f64,
    /// Frame-to-frame change magnitude, 0–1.
    pub morphological_change: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly_flag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    /// -1 to 1; negative reduces viability.
    pub impact: f64,
    /// 0 to 1.
    pub importance: f64,
}

impl RiskFactor {
    pub fn new(name: &str, impact: f64, importance: f64) -> Self {
        Self {
            name: name.to_string(),
            impact,
            importance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOutput {
    pub viability_score: f64,
    pub confidence: f64,
    pub risk_factors: Vec<RiskFactor>,
    pub sensitivity_insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Embryo {
    pub id: String,
    pub total_frames: usize,
    pub observation_duration_hours: f64,
    pub last_observed_stage: DevelopmentStage,
    pub time_to_t2: Option<f64>,
    pub time_to_t3: Option<f64>,
    pub time_to_t5: Option<f64>,
    pub blastocyst_formation: bool,
    pub development_speed: DevelopmentSpeed,
    pub model_output: ModelOutput,
    pub frames: Vec<Frame>,
    pub stage_transitions: Vec<StageTransition>,
}

impl Embryo {
    pub fn transition(&self, stage: DevelopmentStage) -> Option<&StageTransition> {
        self.stage_transitions.iter().find(|t| t.stage == stage)
    }

    /// Frame at `index`, clamped to the last frame.
    pub fn frame_clamped(&self, index: usize) -> Option<&Frame> {
        let last = self.frames.len().checked_sub(1)?;
        self.frames.get(index.min(last))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortData {
    pub cycle_id: String,
    pub embryos: Vec<Embryo>,
}

impl CohortData {
    pub fn find(&self, id: &str) -> Option<&Embryo> {
        self.embryos.iter().find(|e| e.id == id)
    }

    pub fn blastocyst_count(&self) -> usize {
        self.embryos.iter().filter(|e| e.blastocyst_formation).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_order_temporally() {
        let mut shuffled = vec![
            DevelopmentStage::TEb,
            DevelopmentStage::T2,
            DevelopmentStage::TPb2,
            DevelopmentStage::TM,
        ];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![
                DevelopmentStage::TPb2,
                DevelopmentStage::T2,
                DevelopmentStage::TM,
                DevelopmentStage::TEb,
            ]
        );
        assert!(DevelopmentStage::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn stage_serializes_as_shorthand() {
        let json = serde_json::to_string(&DevelopmentStage::TSb).unwrap();
        assert_eq!(json, "\"tSB\"");
        let back: DevelopmentStage = serde_json::from_str("\"tPNa\"").unwrap();
        assert_eq!(back, DevelopmentStage::TPna);
    }
}
