use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::services::calendar;

/// Nigerian states covered by the price model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, EnumIter)]
pub enum Location {
    Lagos,
    Abuja,
    Anambra,
    Kano,
    Rivers,
    Oyo,
}

/// A single prediction request as captured from the entry form.
///
/// `location` stays a free-form string (what a select control yields);
/// membership in [`Location`] is a validation rule, not a type constraint,
/// so a bad value surfaces as an inline field message rather than a parse
/// failure.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PredictionRequest {
    #[garde(custom(known_location))]
    pub location: String,

    /// Instant picked in the form; interpreted on the GMT+1 calendar.
    /// Must fall on today's GMT+1 day or later at validation time.
    #[garde(custom(today_or_later))]
    pub date: DateTime<Utc>,

    /// Consumer Price Index for food items
    #[garde(range(min = 0.0, max = 10_000.0))]
    pub cpi_food_items: f64,

    /// Premium Motor Spirit (petrol) price in Naira per liter
    #[garde(range(min = 0.0, max = 10_000.0))]
    pub pms_price: f64,

    /// Official USD to Naira exchange rate set by the Central Bank
    #[garde(range(min = 0.0, max = 10_000.0))]
    pub central_rate_usd: f64,

    /// Monetary Policy Rate in percent
    #[garde(range(min = 0.0, max = 100.0))]
    pub mpr: f64,
}

fn known_location(value: &str, _cx: &()) -> garde::Result {
    if value.parse::<Location>().is_ok() {
        return Ok(());
    }
    Err(garde::Error::new("Location is required"))
}

fn today_or_later(value: &DateTime<Utc>, _cx: &()) -> garde::Result {
    if calendar::is_past_day(*value) {
        return Err(garde::Error::new(
            "Date must be today or in the future (GMT+1)",
        ));
    }
    Ok(())
}

impl Default for PredictionRequest {
    /// Initial form state: no location, today's date, zeroed indicators.
    fn default() -> Self {
        Self {
            location: String::new(),
            date: Utc::now(),
            cpi_food_items: 0.0,
            pms_price: 0.0,
            central_rate_usd: 0.0,
            mpr: 0.0,
        }
    }
}

impl PredictionRequest {
    /// Build the wire payload. The date is fixed to the GMT+1 calendar here;
    /// serializing the raw instant in UTC would shift the day near midnight.
    pub fn to_payload(&self) -> PredictionPayload {
        PredictionPayload {
            location: self.location.clone(),
            date: calendar::wire_date(self.date),
            cpi_food_items: self.cpi_food_items,
            pms_price: self.pms_price,
            central_rate_usd: self.central_rate_usd,
            mpr: self.mpr,
        }
    }
}

/// JSON body for `POST /api/predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionPayload {
    pub location: String,
    /// Calendar date as `YYYY-MM-DD` on the GMT+1 calendar.
    pub date: String,
    pub cpi_food_items: f64,
    pub pms_price: f64,
    pub central_rate_usd: f64,
    pub mpr: f64,
}
