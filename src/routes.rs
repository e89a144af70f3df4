// src/routes.rs
use std::sync::Arc;
use warp::reject::Rejection;
use crate::handlers::roi::{get_models, get_projection, get_settings, post_projection, ClampQuery, RoiQuery};
use crate::models::CalculatorInput;
use crate::services::calculator::Calculator;
use log::{error, info, warn};

use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Filter, Reply};
use crate::handlers::error::ApiError;

/// Largest JSON body accepted by the POST endpoint.
const MAX_BODY_BYTES: u64 = 16 * 1024;

// Map rejections to a JSON error body
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message: String;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        warn!("Invalid query string: {}", e);
        code = StatusCode::BAD_REQUEST;
        message = "Invalid query string".to_string();
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        warn!("Invalid request body: {}", e);
        code = StatusCode::BAD_REQUEST;
        message = format!("Invalid request body: {}", e);
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        code = StatusCode::UNSUPPORTED_MEDIA_TYPE;
        message = "Expected a JSON body".to_string();
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        code = StatusCode::LENGTH_REQUIRED;
        message = "Content-Length required".to_string();
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        code = StatusCode::PAYLOAD_TOO_LARGE;
        message = "Request body too large".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        error!("Unhandled rejection: {:?}", err);
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(calculator: Arc<Calculator>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let calculator_filter = warp::any().map(move || calculator.clone());

    let projection_route = warp::path!("api" / "v1" / "roi")
        .and(warp::get())
        .and(warp::query::<RoiQuery>())
        .and(calculator_filter.clone())
        .and_then(get_projection);

    let post_projection_route = warp::path!("api" / "v1" / "roi")
        .and(warp::post())
        .and(warp::query::<ClampQuery>())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<CalculatorInput>())
        .and(calculator_filter.clone())
        .and_then(post_projection);

    let models_route = warp::path!("api" / "v1" / "roi" / "models")
        .and(warp::get())
        .and(calculator_filter.clone())
        .and_then(get_models);

    let settings_route = warp::path!("api" / "v1" / "roi" / "settings")
        .and(warp::get())
        .and(calculator_filter.clone())
        .and_then(get_settings);

    info!("All routes configured successfully.");

    projection_route
        .or(post_projection_route)
        .or(models_route)
        .or(settings_route)
        .recover(handle_rejection)
}

/// Routes plus the CORS policy the calculator widget is served with.
pub fn api(calculator: Arc<Calculator>) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET", "POST"]);

    routes(calculator).with(cors)
}
