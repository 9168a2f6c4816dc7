use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::error::{ApiError, ValidationError};
use crate::models::NewRestaurantPizza;
use crate::serializer::{serialize_created_restaurant_pizza, CreatedRestaurantPizza};
use crate::service;

use super::{with_connection, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

/// Fields are kept as raw JSON so that wrong types surface as validation
/// errors instead of extractor rejections.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price in whole currency units, greater than 0
    #[schema(value_type = i32)]
    pub price: Option<Value>,
    /// ID of an existing pizza
    #[schema(value_type = i32)]
    pub pizza_id: Option<Value>,
    /// ID of an existing restaurant
    #[schema(value_type = i32)]
    pub restaurant_id: Option<Value>,
}

fn as_i32(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|v| i32::try_from(v).ok())
}

impl CreateRestaurantPizzaRequest {
    /// Checks the shape of the request. Whether the referenced pizza and
    /// restaurant exist is decided when the row is written.
    pub fn validate(&self) -> Result<NewRestaurantPizza, ValidationError> {
        let price = match &self.price {
            None | Some(Value::Null) => return Err(ValidationError::MissingPrice),
            Some(price) => as_i32(price)
                .filter(|price| *price > 0)
                .ok_or(ValidationError::InvalidPrice)?,
        };
        let pizza_id = self
            .pizza_id
            .as_ref()
            .and_then(as_i32)
            .ok_or(ValidationError::InvalidPizzaId)?;
        let restaurant_id = self
            .restaurant_id
            .as_ref()
            .and_then(as_i32)
            .ok_or(ValidationError::InvalidRestaurantId)?;

        Ok(NewRestaurantPizza {
            price,
            restaurant_id,
            pizza_id,
        })
    }
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Pizza price created", body = CreatedRestaurantPizza),
        (status = 400, description = "Validation errors", body = super::ErrorsResponse),
        (status = 500, description = "Internal error", body = super::ErrorsResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedRestaurantPizza>), ApiError> {
    let Json(payload) =
        payload.map_err(|e| ValidationError::MalformedBody(e.body_text()))?;
    let new_restaurant_pizza = payload.validate()?;

    let (restaurant_pizza, pizza, restaurant) = with_connection(&state, move |conn| {
        service::create_restaurant_pizza(conn, &new_restaurant_pizza)
    })
    .await?;
    info!(
        id = restaurant_pizza.id,
        restaurant_id = restaurant.id,
        pizza_id = pizza.id,
        "created restaurant pizza"
    );

    Ok((
        StatusCode::CREATED,
        Json(serialize_created_restaurant_pizza(
            &restaurant_pizza,
            &pizza,
            &restaurant,
        )),
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(body: Value) -> CreateRestaurantPizzaRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_validate() {
        let new = request(json!({ "price": 10, "pizza_id": 2, "restaurant_id": 3 }))
            .validate()
            .unwrap();

        assert_eq!(
            new,
            NewRestaurantPizza {
                price: 10,
                restaurant_id: 3,
                pizza_id: 2,
            }
        );
    }

    #[test]
    fn test_validate_rejects_bad_prices() {
        for price in [json!(0), json!(-5), json!(10.5), json!("10"), json!(4_000_000_000i64)] {
            let result = request(json!({ "price": price, "pizza_id": 1, "restaurant_id": 1 }))
                .validate();
            assert_eq!(result, Err(ValidationError::InvalidPrice), "price {price}");
        }
    }

    #[test]
    fn test_validate_checks_price_first() {
        let result = request(json!({})).validate();
        assert_eq!(result, Err(ValidationError::MissingPrice));

        let result = request(json!({ "price": null, "pizza_id": 1 })).validate();
        assert_eq!(result, Err(ValidationError::MissingPrice));
    }

    #[test]
    fn test_validate_rejects_bad_ids() {
        let result = request(json!({ "price": 5, "pizza_id": "one", "restaurant_id": 1 })).validate();
        assert_eq!(result, Err(ValidationError::InvalidPizzaId));

        let result = request(json!({ "price": 5, "pizza_id": 1 })).validate();
        assert_eq!(result, Err(ValidationError::InvalidRestaurantId));
    }
}
