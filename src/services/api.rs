use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;

use crate::models::prediction::{BatchPredictions, LocationPrice, PredictionResult};
use crate::models::request::PredictionPayload;
use crate::models::upload::SpreadsheetUpload;

/// Remote prediction endpoints used by the workflows.
///
/// The workflows depend on this trait rather than on a concrete client so
/// they can be driven against a scripted service in tests.
#[async_trait]
pub trait PredictionApi: Send + Sync {
    /// Submit a single prediction request, returning the forecast price.
    async fn predict(&self, payload: &PredictionPayload) -> Result<PredictionResult, ApiError>;

    /// Submit a spreadsheet as multipart form data, returning per-location
    /// prices in service order.
    async fn predict_batch(
        &self,
        upload: &SpreadsheetUpload,
    ) -> Result<Vec<LocationPrice>, ApiError>;
}

/// HTTP client for the prediction service.
pub struct HttpPredictionApi {
    http: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct PredictResponse {
    price: f64,
}

impl HttpPredictionApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Http)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PredictionApi for HttpPredictionApi {
    async fn predict(&self, payload: &PredictionPayload) -> Result<PredictionResult, ApiError> {
        let url = format!("{}/api/predict", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(ApiError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let body: PredictResponse = response.json().await.map_err(ApiError::Http)?;
        Ok(PredictionResult { price: body.price })
    }

    async fn predict_batch(
        &self,
        upload: &SpreadsheetUpload,
    ) -> Result<Vec<LocationPrice>, ApiError> {
        let url = format!("{}/predict", self.base_url);

        let part = multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)
            .map_err(ApiError::Http)?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let body: BatchPredictions = response.json().await.map_err(ApiError::Http)?;
        Ok(body.predictions)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("prediction service answered with status {0}")]
    Status(u16),
}
