use api::{FlError, FlResponse, UploadPart};
use tracing::debug;

pub const MISSING_INPUTS_MESSAGE: &str =
    "Both Image Sequence and Clinical Data are required for Multimodal Analysis.";
pub const PROTOCOL_FAILED_MESSAGE: &str =
    "Federated Learning Protocol failed. Ensure the FL Node is running.";

/// Delay before a successful upload dismisses the dialog.
pub const SUCCESS_CLOSE_DELAY_MS: u64 = 2_000;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error(String),
}

/// State behind the upload dialog. Selection changes always clear a previous outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    pub embryo_id: String,
    pub images: Vec<UploadPart>,
    pub clinical: Option<UploadPart>,
    pub status: UploadStatus,
    pub last_response: Option<FlResponse>,
}

impl UploadForm {
    pub fn add_images(&mut self, parts: Vec<UploadPart>) {
        self.images.extend(parts);
        self.status = UploadStatus::Idle;
    }

    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    pub fn set_clinical(&mut self, part: UploadPart) {
        self.clinical = Some(part);
        self.status = UploadStatus::Idle;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_busy(&self) -> bool {
        self.status == UploadStatus::Uploading
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.images.is_empty() || self.clinical.is_none() {
            Err(MISSING_INPUTS_MESSAGE)
        } else {
            Ok(())
        }
    }

    /// Validate and move to `Uploading`, handing back the request payload.
    /// Returns `None` (with an error status set) when inputs are incomplete.
    pub fn begin_upload(&mut self) -> Option<(Vec<UploadPart>, UploadPart)> {
        if self.is_busy() {
            return None;
        }
        if let Err(message) = self.validate() {
            self.status = UploadStatus::Error(message.to_string());
            return None;
        }
        let clinical = self.clinical.clone()?;
        self.status = UploadStatus::Uploading;
        self.last_response = None;
        Some((self.images.clone(), clinical))
    }

    /// Record the endpoint outcome. The detailed error is logged by the client;
    /// users only see the static failure message.
    pub fn finish(&mut self, outcome: Result<FlResponse, FlError>) {
        match outcome {
            Ok(response) => {
                debug!(node = %response.node_id, "upload accepted");
                self.status = UploadStatus::Success;
                self.last_response = Some(response);
            }
            Err(_) => {
                self.status = UploadStatus::Error(PROTOCOL_FAILED_MESSAGE.to_string());
            }
        }
    }
}

/// Builds an upload part, tagging common image and CSV types.
pub fn part_for(file_name: &str, bytes: Vec<u8>) -> UploadPart {
    let part = UploadPart::new(file_name, bytes);
    match guess_mime(file_name) {
        Some(mime) => part.with_mime(mime),
        None => part,
    }
}

fn guess_mime(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "tif" | "tiff" => Some("image/tiff"),
        "csv" => Some("text/csv"),
        _ => None,
    }
}
