//! Client for the federated-learning node's `/fl/execute` endpoint.
//!
//! The node accepts a multipart body with one or more `images` parts and a
//! single `clinical_data` part, runs a local inference step and answers with
//! an [`FlResponse`]. The request is sent once: no retry, no timeout, no
//! chunking. Callers surface any [`FlError`] as a single failure state.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Endpoint used when no configuration overrides it (the node's default bind).
pub const DEFAULT_FL_ENDPOINT: &str = "http://localhost:8000/fl/execute";

/// A file selected for upload, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPart {
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadPart {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: None,
            bytes,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    fn into_part(self) -> Result<Part, FlError> {
        let part = Part::bytes(self.bytes).file_name(self.file_name);
        match self.mime {
            Some(mime) => part.mime_str(&mime).map_err(FlError::Transport),
            None => Ok(part),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlResponse {
    pub status: String,
    pub fl_round: u32,
    pub node_id: String,
    pub results: FlResults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlResults {
    pub viability_score: f64,
    pub confidence: f64,
    pub frames_processed: u32,
    #[serde(default)]
    pub predictions: Vec<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum FlError {
    #[error("FL request could not be sent: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("FL Task failed: {code} {reason}")]
    Status { code: u16, reason: String },
    #[error("FL response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Thin wrapper around a shared `reqwest::Client` bound to one endpoint.
#[derive(Debug, Clone)]
pub struct FlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl Default for FlClient {
    fn default() -> Self {
        Self::new(DEFAULT_FL_ENDPOINT)
    }
}

impl FlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload an image sequence plus clinical CSV and return the node's answer.
    pub async fn execute_fl_task(
        &self,
        images: Vec<UploadPart>,
        clinical_data: UploadPart,
    ) -> Result<FlResponse, FlError> {
        let image_count = images.len();
        let form = build_form(images, clinical_data)?;

        debug!(endpoint = %self.endpoint, images = image_count, "sending FL task");

        let resp = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                error!(endpoint = %self.endpoint, "Federated Learning Protocol Error: {err}");
                FlError::Transport(err)
            })?;

        let status = resp.status();
        if !status.is_success() {
            let err = FlError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            };
            error!(endpoint = %self.endpoint, "Federated Learning Protocol Error: {err}");
            return Err(err);
        }

        let body: FlResponse = resp.json().await.map_err(|err| {
            error!(endpoint = %self.endpoint, "Federated Learning Protocol Error: {err}");
            FlError::Decode(err)
        })?;

        info!(
            node = %body.node_id,
            round = body.fl_round,
            frames = body.results.frames_processed,
            "FL task completed"
        );
        Ok(body)
    }
}

/// Convenience for one-off calls against the default endpoint.
pub async fn execute_fl_task(
    images: Vec<UploadPart>,
    clinical_data: UploadPart,
) -> Result<FlResponse, FlError> {
    FlClient::default()
        .execute_fl_task(images, clinical_data)
        .await
}

fn build_form(images: Vec<UploadPart>, clinical_data: UploadPart) -> Result<Form, FlError> {
    let mut form = Form::new();
    for image in images {
        form = form.part("images", image.into_part()?);
    }
    Ok(form.part("clinical_data", clinical_data.into_part()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_decodes_node_payload() {
        let raw = r#"{
            "status": "success",
            "fl_round": 1,
            "node_id": "local_node_1",
            "results": {
                "viability_score": 0.61,
                "confidence": 61.0,
                "frames_processed": 3,
                "predictions": [3, 3, 4]
            }
        }"#;
        let resp: FlResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.node_id, "local_node_1");
        assert_eq!(resp.results.frames_processed, 3);
        assert_eq!(resp.results.predictions, vec![3.0, 3.0, 4.0]);
    }

    #[test]
    fn status_error_mentions_code() {
        let err = FlError::Status {
            code: 500,
            reason: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "FL Task failed: 500 Internal Server Error");
    }

    #[test]
    fn form_accepts_parts_without_mime() {
        let images = vec![
            UploadPart::new("frame_0000.png", vec![1, 2, 3]),
            UploadPart::new("frame_0001.png", vec![4, 5, 6]).with_mime("image/png"),
        ];
        let clinical = UploadPart::new("clinical.csv", b"Time\n0\n".to_vec());
        assert!(build_form(images, clinical).is_ok());
    }
}
