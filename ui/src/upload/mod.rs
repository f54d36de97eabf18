//! Multimodal upload dialog: an image sequence plus a clinical CSV sent to
//! the FL node in one request.

mod form;
pub use form::{
    part_for, UploadForm, UploadStatus, MISSING_INPUTS_MESSAGE, PROTOCOL_FAILED_MESSAGE,
    SUCCESS_CLOSE_DELAY_MS,
};

mod modal;
pub use modal::UploadModal;
