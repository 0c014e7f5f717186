//! How the demo client reads a `/predict` exchange.

use std::fmt::Display;

use crate::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Alert,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Success status with one of the two known labels.
    Predicted(Verdict),
    /// Success status, but the body did not carry a known label.
    Unrecognized,
    /// The service answered with a non-success status.
    ApiError { status: u16, body: String },
    /// The request never got an answer.
    Unreachable(String),
}

impl Outcome {
    pub fn from_response(status: u16, body: &str) -> Self {
        if !(200..300).contains(&status) {
            return Outcome::ApiError {
                status,
                body: body.to_string(),
            };
        }

        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("prediction")
                    .and_then(|label| label.as_str())
                    .and_then(|label| label.parse::<Verdict>().ok())
            })
            .map_or(Outcome::Unrecognized, Outcome::Predicted)
    }

    pub fn unreachable(reason: impl Display) -> Self {
        Outcome::Unreachable(reason.to_string())
    }

    pub fn severity(&self) -> Severity {
        match self {
            Outcome::Predicted(Verdict::Fraudulent) => Severity::Alert,
            Outcome::Predicted(Verdict::NotFraudulent) => Severity::Success,
            Outcome::Unrecognized => Severity::Warning,
            Outcome::ApiError { .. } | Outcome::Unreachable(_) => Severity::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Outcome::Predicted(Verdict::Fraudulent) => {
                "🚨 This transaction is predicted as FRAUDULENT.".to_string()
            }
            Outcome::Predicted(Verdict::NotFraudulent) => {
                "✅ This transaction is predicted as NOT FRAUDULENT.".to_string()
            }
            Outcome::Unrecognized => "Could not interpret the prediction result.".to_string(),
            Outcome::ApiError { status, body } => format!("Error from API: {} - {}", status, body),
            Outcome::Unreachable(reason) => format!(
                "Could not connect to the inference service. Please ensure it's running. Error: {}",
                reason
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_their_variants() {
        let fraud = Outcome::from_response(200, r#"{"prediction":"fraudulent"}"#);
        assert_eq!(fraud, Outcome::Predicted(Verdict::Fraudulent));
        assert_eq!(fraud.severity(), Severity::Alert);
        assert!(fraud.message().contains("FRAUDULENT"));

        let clean = Outcome::from_response(200, r#"{"prediction":"not fraudulent"}"#);
        assert_eq!(clean.severity(), Severity::Success);
        assert!(clean.message().contains("NOT FRAUDULENT"));
    }

    #[test]
    fn unknown_or_missing_labels_are_a_warning() {
        for body in [
            r#"{"prediction":"maybe"}"#,
            r#"{"prediction":1}"#,
            r#"{"label":"fraudulent"}"#,
            "not json",
        ] {
            let outcome = Outcome::from_response(200, body);
            assert_eq!(outcome, Outcome::Unrecognized, "body: {body}");
            assert_eq!(outcome.severity(), Severity::Warning);
        }
    }

    #[test]
    fn failure_status_keeps_status_and_body() {
        let outcome = Outcome::from_response(500, r#"{"detail":"Model loading error: missing"}"#);
        assert_eq!(outcome.severity(), Severity::Error);
        assert_eq!(
            outcome.message(),
            r#"Error from API: 500 - {"detail":"Model loading error: missing"}"#
        );
    }

    #[test]
    fn failure_status_wins_over_a_valid_label() {
        let outcome = Outcome::from_response(503, r#"{"prediction":"fraudulent"}"#);
        assert!(matches!(outcome, Outcome::ApiError { status: 503, .. }));
    }

    #[test]
    fn unreachable_service_reports_the_reason() {
        let outcome = Outcome::unreachable("connection refused");
        assert_eq!(outcome.severity(), Severity::Error);
        assert!(outcome.message().contains("connection refused"));
    }

    #[test]
    fn severity_names_are_css_friendly() {
        assert_eq!(Severity::Alert.to_string(), "alert");
        assert_eq!(Severity::Success.to_string(), "success");
    }
}
