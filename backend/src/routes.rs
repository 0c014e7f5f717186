use actix_cors::Cors;
use actix_files::NamedFile;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, web};
use log::{error, info};
use shared::{PredictionRequest, PredictionResponse, SERVICE_TITLE, SERVICE_VERSION};

use crate::error::{ApiError, json_error_handler};
use crate::model::{self, InferenceError};
use crate::state::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(web::resource("/").route(web::get().to(banner)))
        .service(web::resource("/favicon.png").route(web::get().to(favicon)))
        .service(web::resource("/predict").route(web::post().to(predict)))
        .service(web::resource("/model").route(web::get().to(model_info)));
}

/// CORS for the demo client, which is served from its own origin.
pub fn cors_policy(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}

fn banner_text() -> String {
    format!(
        "\n{} v{} 🙌🏻\n\nNote: add \"/model\" to the URL to see the loaded model and its feature order.\n",
        SERVICE_TITLE, SERVICE_VERSION
    )
}

async fn banner() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(banner_text())
}

async fn favicon(state: web::Data<AppState>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open_async(state.favicon_path()).await?)
}

async fn predict(
    state: web::Data<AppState>,
    request: web::Json<PredictionRequest>,
) -> Result<HttpResponse, ApiError> {
    let classifier = state.classifier().inspect_err(|e| error!("{}", e))?;
    let request = request.into_inner();

    let verdict = web::block(move || model::predict(classifier.as_ref(), &request))
        .await
        .map_err(|e| InferenceError::Worker(e.to_string()))
        .and_then(|result| result)
        .inspect_err(|e| error!("Prediction failed: {}", e))?;

    info!(
        "Prediction for amt={} age={} distance_km={}: {}",
        request.amt, request.age, request.distance_km, verdict
    );
    Ok(HttpResponse::Ok().json(PredictionResponse {
        prediction: verdict,
    }))
}

async fn model_info(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.model_info())
}
