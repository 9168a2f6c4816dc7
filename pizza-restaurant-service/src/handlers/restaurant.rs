use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::{info, instrument};

use crate::error::{ApiError, ServiceError};
use crate::serializer::{
    serialize_restaurant, serialize_restaurant_details, RestaurantDetails, RestaurantSummary,
};
use crate::service;

use super::{parse_id, with_connection, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants", body = Vec<RestaurantSummary>),
        (status = 500, description = "Internal error", body = super::ErrorsResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantSummary>>, ApiError> {
    let restaurants = with_connection(&state, service::list_restaurants).await?;

    Ok(Json(restaurants.iter().map(serialize_restaurant).collect()))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant details", body = RestaurantDetails),
        (status = 404, description = "Restaurant not found", body = super::ErrorResponse),
        (status = 500, description = "Internal error", body = super::ErrorsResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> Result<Json<RestaurantDetails>, ApiError> {
    let restaurant_id = parse_id(&restaurant_id).ok_or(ServiceError::RestaurantNotFound)?;

    let (restaurant, restaurant_pizzas) = with_connection(&state, move |conn| {
        service::get_restaurant(conn, restaurant_id)
    })
    .await?;

    Ok(Json(serialize_restaurant_details(
        &restaurant,
        &restaurant_pizzas,
    )))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its pizza prices deleted"),
        (status = 404, description = "Restaurant not found", body = super::ErrorResponse),
        (status = 500, description = "Internal error", body = super::ErrorsResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let restaurant_id = parse_id(&restaurant_id).ok_or(ServiceError::RestaurantNotFound)?;

    let removed = with_connection(&state, move |conn| {
        service::delete_restaurant(conn, restaurant_id)
    })
    .await?;
    info!(restaurant_id, removed, "deleted restaurant");

    Ok(StatusCode::NO_CONTENT)
}
