use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use shared::ErrorDetail;

use crate::model::InferenceError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Model loading error: {0}")]
    ModelUnavailable(String),
    #[error("Prediction error: {0}")]
    Prediction(#[from] InferenceError),
    #[error("Invalid request body: {0}")]
    InvalidPayload(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ModelUnavailable(_) | ApiError::Prediction(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::InvalidPayload(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail {
            detail: self.to_string(),
        })
    }
}

/// Type-coercion failures on JSON bodies answer 422 with a `detail` string.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected body for {}: {}", req.path(), err);
    ApiError::InvalidPayload(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;

    #[actix_web::test]
    async fn server_errors_carry_a_detail_body() {
        let err = ApiError::ModelUnavailable("model file not found: model.onnx".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let detail: ErrorDetail = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            detail.detail,
            "Model loading error: model file not found: model.onnx"
        );
    }

    #[test]
    fn inference_failures_are_prediction_errors() {
        let err: ApiError = InferenceError::Output("empty label tensor".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Prediction error:"));
    }

    #[test]
    fn payload_errors_are_unprocessable() {
        let err = ApiError::InvalidPayload("missing field `age`".to_string());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
