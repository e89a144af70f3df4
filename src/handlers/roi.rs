// src/handlers/roi.rs
use crate::handlers::error::ApiError;
use crate::models::{CalculatorInput, ModelProfile, Projection, PublishingModel};
use crate::services::calculator::{Calculator, SliderBounds, SLIDER_BOUNDS};
use crate::services::comparison::{summarize, Comparison};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

/// Query parameters for `GET /api/v1/roi`. Missing values fall back to the configured defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiQuery {
    pub target_subscribers: Option<u32>,
    pub monthly_price: Option<f64>,
    pub estimated_visitors: Option<u64>,
    pub clamp: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClampQuery {
    pub clamp: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub input: CalculatorInput,
    pub projection: Projection,
    pub comparison: Comparison,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelEntry {
    model: PublishingModel,
    display_name: &'static str,
    #[serde(flatten)]
    profile: ModelProfile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsResponse<'a> {
    title: &'a str,
    description: &'a str,
    default_input: CalculatorInput,
    bounds: SliderBounds,
}

impl RoiQuery {
    pub fn resolve(&self, defaults: CalculatorInput) -> CalculatorInput {
        CalculatorInput {
            target_subscribers: self.target_subscribers.unwrap_or(defaults.target_subscribers),
            monthly_price: self.monthly_price.unwrap_or(defaults.monthly_price),
            estimated_visitors: self.estimated_visitors.unwrap_or(defaults.estimated_visitors),
        }
    }
}

/// Clamps if asked, validates, then runs the calculator.
pub fn project(
    calculator: &Calculator,
    input: CalculatorInput,
    clamp: bool,
) -> Result<ProjectionResponse, ApiError> {
    let input = if clamp { input.clamped() } else { input };
    input.validate().map_err(|e| {
        warn!("Rejecting calculator input {:?}: {}", input, e);
        ApiError::bad_request(e.to_string())
    })?;

    let projection = calculator.recalculate(&input);
    let comparison = summarize(&input, &projection);
    debug!(
        "Best net ROI: {}, fewest visitors: {}",
        comparison.best_net_roi, comparison.fewest_visitors_needed
    );

    Ok(ProjectionResponse {
        input,
        projection,
        comparison,
    })
}

pub async fn get_projection(query: RoiQuery, calculator: Arc<Calculator>) -> Result<Json, Rejection> {
    info!("Handling request to project ROI: {:?}", query);
    let input = query.resolve(calculator.default_input());
    let response = project(&calculator, input, query.clamp.unwrap_or(false))
        .map_err(warp::reject::custom)?;
    Ok(warp::reply::json(&response))
}

pub async fn post_projection(
    query: ClampQuery,
    input: CalculatorInput,
    calculator: Arc<Calculator>,
) -> Result<Json, Rejection> {
    info!("Handling posted ROI projection: {:?}", input);
    let response = project(&calculator, input, query.clamp.unwrap_or(false))
        .map_err(warp::reject::custom)?;
    Ok(warp::reply::json(&response))
}

pub async fn get_models(calculator: Arc<Calculator>) -> Result<Json, Rejection> {
    info!("Handling request to list publishing models");
    let table = calculator.rate_table();
    let models: Vec<ModelEntry> = PublishingModel::ALL
        .into_iter()
        .map(|model| ModelEntry {
            model,
            display_name: model.display_name(),
            profile: *table.profile(model),
        })
        .collect();
    Ok(warp::reply::json(&models))
}

pub async fn get_settings(calculator: Arc<Calculator>) -> Result<Json, Rejection> {
    info!("Handling request to get calculator settings");
    let settings = calculator.settings();
    Ok(warp::reply::json(&SettingsResponse {
        title: &settings.title,
        description: &settings.description,
        default_input: settings.default_input,
        bounds: SLIDER_BOUNDS,
    }))
}
