use axum::{
    Form, Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{validate_coffee_price, validate_new_cafe};
use super::{
    AddCafeRequest, ApiError, AppState, CafeMap, HealthResponse, RandomCafeResponse,
    ReportClosedQuery, SearchQuery, SearchResponse, SuccessResponse, UpdatePriceQuery, optional,
};
use crate::domain::CafeId;
use crate::services::CafeError;

/// GET /api/random
pub async fn random_cafe(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RandomCafeResponse>, ApiError> {
    let cafe = state.cafes().random_cafe().await?;
    Ok(Json(RandomCafeResponse {
        cafe: cafe.to_map(),
    }))
}

/// GET /api/all
pub async fn all_cafes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<CafeMap>>, ApiError> {
    let cafes = state.cafes().list_cafes().await?;
    Ok(Json(cafes.iter().map(|c| c.to_map()).collect()))
}

/// GET /api/search?loc=
pub async fn search_cafes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let not_found =
        || ApiError::NotFound("Sorry, we don't have a cafe at that location.".to_string());

    let Some(location) = params.loc else {
        return Err(not_found());
    };

    let cafes = state.cafes().search_by_location(&location).await?;
    if cafes.is_empty() {
        return Err(not_found());
    }

    Ok(Json(SearchResponse {
        cafes: cafes.iter().map(|c| c.to_map()).collect(),
    }))
}

/// POST /api/add
pub async fn add_cafe(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<AddCafeRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let new_cafe = payload.to_new_cafe();
    validate_new_cafe(&new_cafe).map_err(|errors| ApiError::bad_request(errors.summary()))?;

    state.cafes().add_cafe(new_cafe).await?;
    Ok(Json(SuccessResponse::new("Successfully added the new cafe.")))
}

/// PATCH /api/update-price/{id}?new_price=
pub async fn update_price(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Query(params): Query<UpdatePriceQuery>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let new_price = optional(params.new_price.as_deref());
    validate_coffee_price(new_price.as_deref())
        .map_err(|errors| ApiError::bad_request(errors.summary()))?;

    state
        .cafes()
        .update_price(CafeId::new(id), new_price)
        .await
        .map_err(|e| match e {
            CafeError::NotFound(_) => ApiError::NotFound(
                "Sorry a cafe with that id was not found in the database.".to_string(),
            ),
            other => other.into(),
        })?;

    Ok(Json(SuccessResponse::new("Successfully updated the price.")))
}

/// DELETE /api/report-closed/{id}?api_key=
pub async fn report_closed(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Query(params): Query<ReportClosedQuery>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .cafes()
        .report_closed(CafeId::new(id), params.api_key.as_deref().unwrap_or_default())
        .await
        .map_err(|e| match e {
            CafeError::NotFound(_) => {
                ApiError::NotFound("Sorry, a cafe with that id was not found.".to_string())
            }
            other => other.into(),
        })?;

    Ok(Json(SuccessResponse::new(
        "Successfully deleted cafe from database.",
    )))
}

/// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ApiError> {
    state.store().ping().await?;
    let cafes = state.store().count_cafes().await?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.start_time.elapsed().as_secs(),
        cafes,
    }))
}
