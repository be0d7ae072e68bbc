//! Submission state machine for the spreadsheet upload path.

use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::models::prediction::LocationPrice;
use crate::models::upload::SpreadsheetUpload;
use crate::services::api::PredictionApi;
use crate::services::notify::{Notifier, Severity};
use crate::services::validation::{self, FieldErrors};

/// Workflow states, independent of the single-prediction machine: the two
/// workflows share no state.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchState {
    Idle,
    Submitting,
    Success(Vec<LocationPrice>),
    Error,
}

/// What a submit event produced.
#[derive(Debug, PartialEq)]
pub enum BatchOutcome {
    /// Envelope violations (size or MIME type); nothing was sent.
    Rejected(FieldErrors),
    /// An upload is already in flight.
    InFlight,
    Completed(Vec<LocationPrice>),
    Failed,
}

pub struct BatchUploadWorkflow {
    api: Arc<dyn PredictionApi>,
    notifier: Arc<dyn Notifier>,
    state: BatchState,
    charted: Option<Vec<LocationPrice>>,
}

impl BatchUploadWorkflow {
    pub fn new(api: Arc<dyn PredictionApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: BatchState::Idle,
            charted: None,
        }
    }

    pub fn state(&self) -> &BatchState {
        &self.state
    }

    /// The collection currently feeding the chart, in service order.
    /// Survives later failed uploads.
    pub fn charted(&self) -> Option<&[LocationPrice]> {
        self.charted.as_deref()
    }

    /// Drive the submit event: gate the envelope, transfer the file, and
    /// settle into `Success` or `Error`. All-or-nothing: a 2xx response
    /// must carry the full collection.
    pub async fn submit(&mut self, upload: &SpreadsheetUpload) -> BatchOutcome {
        if matches!(self.state, BatchState::Submitting) {
            return BatchOutcome::InFlight;
        }

        if let Err(errors) = validation::validate_upload(upload) {
            tracing::debug!(
                file_name = %upload.file_name,
                fields = errors.len(),
                "spreadsheet upload rejected by envelope checks"
            );
            return BatchOutcome::Rejected(errors);
        }

        let submission_id = Uuid::new_v4();
        tracing::info!(
            %submission_id,
            file_name = %upload.file_name,
            size_bytes = upload.bytes.len(),
            "uploading spreadsheet for batch prediction"
        );

        self.state = BatchState::Submitting;
        metrics::counter!("batch_uploads_total").increment(1);
        let start = Instant::now();

        match self.api.predict_batch(upload).await {
            Ok(predictions) => {
                metrics::histogram!("batch_upload_seconds")
                    .record(start.elapsed().as_secs_f64());
                tracing::info!(
                    %submission_id,
                    locations = predictions.len(),
                    "batch predictions received"
                );
                self.charted = Some(predictions.clone());
                self.state = BatchState::Success(predictions.clone());
                self.notifier.notify(
                    Severity::Success,
                    "Success",
                    "File processed successfully!",
                );
                BatchOutcome::Completed(predictions)
            }
            Err(e) => {
                metrics::counter!("batch_upload_failures_total").increment(1);
                tracing::warn!(%submission_id, error = %e, "batch upload failed");
                self.state = BatchState::Error;
                self.notifier.notify(
                    Severity::Error,
                    "Error",
                    "Failed to process file. Please try again.",
                );
                BatchOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::upload::{XLSX_CONTENT_TYPE, XLS_CONTENT_TYPE};
    use crate::services::api::ApiError;
    use crate::workflows::testing::{RecordingNotifier, ScriptedApi};

    fn sample_upload() -> SpreadsheetUpload {
        SpreadsheetUpload {
            file_name: "indicators.xlsx".to_string(),
            content_type: XLSX_CONTENT_TYPE.to_string(),
            bytes: vec![0u8; 1024],
        }
    }

    fn sample_predictions() -> Vec<LocationPrice> {
        vec![
            LocationPrice {
                location: "Lagos".to_string(),
                price: 210.0,
            },
            LocationPrice {
                location: "Abuja".to_string(),
                price: 198.0,
            },
        ]
    }

    fn workflow(
        api: &Arc<ScriptedApi>,
        notifier: &Arc<RecordingNotifier>,
    ) -> BatchUploadWorkflow {
        BatchUploadWorkflow::new(api.clone(), notifier.clone())
    }

    #[tokio::test]
    async fn successful_upload_charts_predictions_in_service_order() {
        let api = Arc::new(ScriptedApi::default());
        let notifier = Arc::new(RecordingNotifier::default());
        api.push_batch(Ok(sample_predictions()));

        let mut wf = workflow(&api, &notifier);
        let outcome = wf.submit(&sample_upload()).await;

        assert_eq!(outcome, BatchOutcome::Completed(sample_predictions()));
        assert_eq!(*wf.state(), BatchState::Success(sample_predictions()));

        let charted = wf.charted().unwrap();
        assert_eq!(charted[0].location, "Lagos");
        assert_eq!(charted[0].price, 210.0);
        assert_eq!(charted[1].location, "Abuja");
        assert_eq!(charted[1].price, 198.0);

        let (severity, _, description) = notifier.last().unwrap();
        assert_eq!(severity, Severity::Success);
        assert_eq!(description, "File processed successfully!");
    }

    #[tokio::test]
    async fn failed_upload_keeps_the_previous_chart() {
        let api = Arc::new(ScriptedApi::default());
        let notifier = Arc::new(RecordingNotifier::default());
        api.push_batch(Ok(sample_predictions()));
        api.push_batch(Err(ApiError::Status(500)));

        let mut wf = workflow(&api, &notifier);
        wf.submit(&sample_upload()).await;
        let outcome = wf.submit(&sample_upload()).await;

        assert_eq!(outcome, BatchOutcome::Failed);
        assert_eq!(*wf.state(), BatchState::Error);
        // The chart drawn from the first upload is still there.
        assert_eq!(wf.charted(), Some(sample_predictions().as_slice()));

        let (severity, _, description) = notifier.last().unwrap();
        assert_eq!(severity, Severity::Error);
        assert_eq!(description, "Failed to process file. Please try again.");
    }

    #[tokio::test]
    async fn oversized_file_is_rejected_before_transfer() {
        let api = Arc::new(ScriptedApi::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let mut wf = workflow(&api, &notifier);
        let upload = SpreadsheetUpload {
            bytes: vec![0u8; 6 * 1024 * 1024],
            ..sample_upload()
        };

        match wf.submit(&upload).await {
            BatchOutcome::Rejected(errors) => assert!(errors.contains_key("bytes")),
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(api.call_count(), 0);
        assert_eq!(*wf.state(), BatchState::Idle);
        assert!(notifier.last().is_none());
    }

    #[tokio::test]
    async fn legacy_xls_files_are_accepted() {
        let api = Arc::new(ScriptedApi::default());
        let notifier = Arc::new(RecordingNotifier::default());
        api.push_batch(Ok(sample_predictions()));

        let mut wf = workflow(&api, &notifier);
        let upload = SpreadsheetUpload {
            file_name: "indicators.xls".to_string(),
            content_type: XLS_CONTENT_TYPE.to_string(),
            bytes: vec![0u8; 1024 * 1024],
        };

        assert!(matches!(wf.submit(&upload).await, BatchOutcome::Completed(_)));
    }

    #[tokio::test]
    async fn non_spreadsheet_file_is_rejected_before_transfer() {
        let api = Arc::new(ScriptedApi::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let mut wf = workflow(&api, &notifier);
        let upload = SpreadsheetUpload {
            file_name: "indicators.txt".to_string(),
            content_type: "text/plain".to_string(),
            bytes: vec![0u8; 1024 * 1024],
        };

        assert!(matches!(wf.submit(&upload).await, BatchOutcome::Rejected(_)));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn in_flight_upload_is_rejected() {
        let api = Arc::new(ScriptedApi::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let mut wf = workflow(&api, &notifier);
        wf.state = BatchState::Submitting;

        assert_eq!(wf.submit(&sample_upload()).await, BatchOutcome::InFlight);
        assert_eq!(api.call_count(), 0);
    }
}
