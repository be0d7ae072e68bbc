//! Validate-all entry points used by the workflows.
//!
//! The field rules themselves are derived on the models with garde; this
//! module flattens a garde report into the per-field message map the form
//! renders inline. Validation never reaches the network layer: a request
//! that fails here is rejected before any submission state change.

use std::collections::BTreeMap;

use garde::Validate;

use crate::models::request::PredictionRequest;
use crate::models::upload::SpreadsheetUpload;

/// Field name mapped to a human-readable violation message.
///
/// A BTreeMap keeps iteration order stable for display and logging.
pub type FieldErrors = BTreeMap<String, String>;

fn collect(report: garde::Report) -> FieldErrors {
    report
        .iter()
        .map(|(path, error)| (path.to_string(), error.to_string()))
        .collect()
}

/// Validate a single prediction candidate.
///
/// "today" is re-read from the clock inside the date rule on every call, so
/// a request that was valid when the form was filled in can still be
/// rejected at submit time.
pub fn validate_request(candidate: &PredictionRequest) -> Result<(), FieldErrors> {
    candidate.validate().map_err(collect)
}

/// Validate the batch upload envelope (size and MIME type only).
pub fn validate_upload(upload: &SpreadsheetUpload) -> Result<(), FieldErrors> {
    upload.validate().map_err(collect)
}
