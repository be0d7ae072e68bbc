//! Submission state machine for single prediction requests.

use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::models::prediction::PredictionResult;
use crate::models::request::PredictionRequest;
use crate::services::api::PredictionApi;
use crate::services::notify::{Notifier, Severity};
use crate::services::validation::{self, FieldErrors};

/// Workflow states.
///
/// `Submitting` doubles as the mutual-exclusion guard: a submit event
/// arriving while a request is in flight settles to
/// [`SubmitOutcome::InFlight`] without touching the network.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    Idle,
    Submitting,
    Success(PredictionResult),
    Error,
}

/// What a submit event produced.
#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Field-level violations; shown inline per field, nothing was sent.
    Rejected(FieldErrors),
    /// A submission is already in flight.
    InFlight,
    Completed(PredictionResult),
    Failed,
}

pub struct SinglePredictionWorkflow {
    api: Arc<dyn PredictionApi>,
    notifier: Arc<dyn Notifier>,
    state: WorkflowState,
    displayed: Option<PredictionResult>,
}

impl SinglePredictionWorkflow {
    pub fn new(api: Arc<dyn PredictionApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: WorkflowState::Idle,
            displayed: None,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Last successful prediction. Survives later failed submissions, so the
    /// host UI never blanks a result just because a retry failed.
    pub fn displayed_result(&self) -> Option<&PredictionResult> {
        self.displayed.as_ref()
    }

    /// Drive the submit event: validate, send, and settle into `Success`
    /// or `Error`. Resubmission is allowed from any settled state.
    pub async fn submit(&mut self, candidate: &PredictionRequest) -> SubmitOutcome {
        if matches!(self.state, WorkflowState::Submitting) {
            return SubmitOutcome::InFlight;
        }

        if let Err(errors) = validation::validate_request(candidate) {
            tracing::debug!(fields = errors.len(), "prediction request rejected by schema");
            return SubmitOutcome::Rejected(errors);
        }

        let submission_id = Uuid::new_v4();
        let payload = candidate.to_payload();
        tracing::info!(
            %submission_id,
            location = %payload.location,
            date = %payload.date,
            "submitting prediction request"
        );

        self.state = WorkflowState::Submitting;
        metrics::counter!("prediction_submissions_total").increment(1);
        let start = Instant::now();

        match self.api.predict(&payload).await {
            Ok(result) => {
                metrics::histogram!("prediction_request_seconds")
                    .record(start.elapsed().as_secs_f64());
                tracing::info!(%submission_id, price = result.price, "prediction received");
                self.displayed = Some(result);
                self.state = WorkflowState::Success(result);
                self.notifier.notify(
                    Severity::Success,
                    "Success",
                    "Prediction generated successfully!",
                );
                SubmitOutcome::Completed(result)
            }
            Err(e) => {
                metrics::counter!("prediction_failures_total").increment(1);
                tracing::warn!(%submission_id, error = %e, "prediction request failed");
                self.state = WorkflowState::Error;
                self.notifier.notify(
                    Severity::Error,
                    "Error",
                    "Failed to generate prediction. Please try again.",
                );
                SubmitOutcome::Failed
            }
        }
    }
}
