use axum::{extract::State, response::Json, routing::get, Router};
use tracing::instrument;

use crate::error::ApiError;
use crate::serializer::{serialize_pizza, PizzaSummary};
use crate::service;

use super::{with_connection, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "List of pizzas", body = Vec<PizzaSummary>),
        (status = 500, description = "Internal error", body = super::ErrorsResponse),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(
    State(state): State<AppState>,
) -> Result<Json<Vec<PizzaSummary>>, ApiError> {
    let pizzas = with_connection(&state, service::list_pizzas).await?;

    Ok(Json(pizzas.iter().map(serialize_pizza).collect()))
}
