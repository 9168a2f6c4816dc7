pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use axum::{response::Html, routing::get, Json, Router};
use diesel::SqliteConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::db::DbPool;
use crate::error::{ApiError, ServiceError};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Runs a blocking data-access closure on a pooled connection off the async
/// runtime.
async fn with_connection<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    let pool = state.pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        f(&mut *conn)
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("Blocking task failed: {e}")))?
    .map_err(ApiError::from)
}

/// Path ids that are not integers cannot name a row.
fn parse_id(raw: &str) -> Option<i32> {
    raw.parse().ok()
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting page", content_type = "text/html", body = String),
    ),
    tag = "index"
)]
pub async fn index() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api-docs/openapi.json", get(openapi))
        .merge(restaurant_router())
        .merge(pizza_router())
        .merge(restaurant_pizza_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        index,
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(
            crate::serializer::RestaurantSummary,
            crate::serializer::RestaurantDetails,
            crate::serializer::RestaurantPizzaDetails,
            crate::serializer::PizzaSummary,
            crate::serializer::CreatedRestaurantPizza,
            restaurant_pizza::CreateRestaurantPizzaRequest,
            ErrorResponse,
            ErrorsResponse,
        )
    ),
    tags(
        (name = "index", description = "Landing page"),
        (name = "restaurants", description = "Restaurant endpoints"),
        (name = "pizzas", description = "Pizza endpoints"),
        (name = "restaurant_pizzas", description = "Priced pizza/restaurant associations"),
    ),
    info(
        title = "Pizza Restaurant Service",
        description = "Restaurants, pizzas and the prices restaurants charge for them",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

#[derive(utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(utoipa::ToSchema)]
pub struct ErrorsResponse {
    /// Error messages
    pub errors: Vec<String>,
}
