pub mod features;
pub mod outcome;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use features::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};
pub use outcome::{Outcome, Severity};

pub const SERVICE_TITLE: &str = "Credit Card Fraud Detection API";
pub const SERVICE_VERSION: &str = "1.0.0";

/// Body of `POST /predict`. Each field takes a JSON number or a numeric
/// string such as `"100"`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PredictionRequest {
    #[serde(deserialize_with = "deserialize_lenient_float")]
    pub amt: f64,
    #[serde(deserialize_with = "deserialize_lenient_float")]
    pub age: f64,
    #[serde(deserialize_with = "deserialize_lenient_float")]
    pub distance_km: f64,
}

// Numbers that arrive as strings are coerced, anything else is rejected
fn deserialize_lenient_float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom(format!("Number out of range: {}", n))),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            serde::de::Error::custom(format!("Input should be a valid number: {:?}", s))
        }),
        other => Err(serde::de::Error::custom(format!(
            "Input should be a valid number, got {}",
            other
        ))),
    }
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            amt: 100.0,
            age: 35.0,
            distance_km: 5.0,
        }
    }
}

#[derive(
    Debug,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum Verdict {
    #[serde(rename = "fraudulent")]
    #[strum(serialize = "fraudulent")]
    Fraudulent,
    #[serde(rename = "not fraudulent")]
    #[strum(serialize = "not fraudulent")]
    NotFraudulent,
}

impl Verdict {
    /// Class label the model emits for a fraudulent transaction.
    pub const FRAUD_CLASS: i64 = 1;

    pub fn from_class(class: i64) -> Self {
        if class == Self::FRAUD_CLASS {
            Verdict::Fraudulent
        } else {
            Verdict::NotFraudulent
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PredictionResponse {
    pub prediction: Verdict,
}

/// Error body returned by the inference service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorDetail {
    pub detail: String,
}
