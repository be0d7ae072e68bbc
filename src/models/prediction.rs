use serde::{Deserialize, Serialize};

/// Forecast price returned by the model for a single request.
///
/// Ephemeral display state: replaced on each successful submission,
/// retained across later failed ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub price: f64,
}

/// One bar of the batch chart. The collection order is exactly the order
/// the service returned; the category axis preserves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPrice {
    pub location: String,
    pub price: f64,
}

/// Body of a successful batch response.
#[derive(Debug, Deserialize)]
pub struct BatchPredictions {
    pub predictions: Vec<LocationPrice>,
}
