use gloo_net::http::Request;
use shared::{Outcome, PredictionRequest};

pub const PREDICT_URL: &str = "http://127.0.0.1:8000/predict";

/// Sends one prediction request. Every failure ends up as an [`Outcome`].
pub async fn request_prediction(payload: PredictionRequest) -> Outcome {
    let request = match Request::post(PREDICT_URL).json(&payload) {
        Ok(request) => request,
        Err(e) => return Outcome::unreachable(e),
    };

    match request.send().await {
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Outcome::from_response(status, &body)
        }
        Err(e) => {
            gloo_console::error!(format!("Network error: {}", e));
            Outcome::unreachable(e)
        }
    }
}
