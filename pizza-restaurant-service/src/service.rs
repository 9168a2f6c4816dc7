use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::error::{ServiceError, ValidationError};
use crate::models::{
    NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza,
};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub type RestaurantPizzaWithPizza = (RestaurantPizza, Pizza);

pub fn list_restaurants(conn: &mut SqliteConnection) -> Result<Vec<Restaurant>, ServiceError> {
    let results = restaurants::table
        .select(Restaurant::as_select())
        .order(restaurants::id)
        .load(conn)?;
    Ok(results)
}

fn find_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> Result<Option<Restaurant>, diesel::result::Error> {
    restaurants::table
        .find(restaurant_id)
        .select(Restaurant::as_select())
        .first(conn)
        .optional()
}

fn find_pizza(
    conn: &mut SqliteConnection,
    pizza_id: i32,
) -> Result<Option<Pizza>, diesel::result::Error> {
    pizzas::table
        .find(pizza_id)
        .select(Pizza::as_select())
        .first(conn)
        .optional()
}

pub fn get_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> Result<(Restaurant, Vec<RestaurantPizzaWithPizza>), ServiceError> {
    let restaurant = find_restaurant(conn, restaurant_id)?.ok_or(ServiceError::RestaurantNotFound)?;

    let restaurant_pizzas = RestaurantPizza::belonging_to(&restaurant)
        .inner_join(pizzas::table)
        .select((RestaurantPizza::as_select(), Pizza::as_select()))
        .order(restaurant_pizzas::id)
        .load::<RestaurantPizzaWithPizza>(conn)?;

    Ok((restaurant, restaurant_pizzas))
}

/// Deletes a restaurant together with its `restaurant_pizzas` rows and
/// returns how many of those rows were removed.
pub fn delete_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> Result<usize, ServiceError> {
    conn.immediate_transaction::<_, ServiceError, _>(|conn| {
        let restaurant =
            find_restaurant(conn, restaurant_id)?.ok_or(ServiceError::RestaurantNotFound)?;

        let removed = diesel::delete(RestaurantPizza::belonging_to(&restaurant)).execute(conn)?;
        diesel::delete(&restaurant).execute(conn)?;

        Ok(removed)
    })
}

pub fn list_pizzas(conn: &mut SqliteConnection) -> Result<Vec<Pizza>, ServiceError> {
    let results = pizzas::table
        .select(Pizza::as_select())
        .order(pizzas::id)
        .load(conn)?;
    Ok(results)
}

pub fn create_restaurant(
    conn: &mut SqliteConnection,
    restaurant: &NewRestaurant,
) -> Result<Restaurant, ServiceError> {
    let created = diesel::insert_into(restaurants::table)
        .values(restaurant)
        .returning(Restaurant::as_returning())
        .get_result(conn)?;
    Ok(created)
}

pub fn create_pizza(conn: &mut SqliteConnection, pizza: &NewPizza) -> Result<Pizza, ServiceError> {
    let created = diesel::insert_into(pizzas::table)
        .values(pizza)
        .returning(Pizza::as_returning())
        .get_result(conn)?;
    Ok(created)
}

/// Validates and stores a priced pizza/restaurant association. The existence
/// checks and the insert share one transaction.
pub fn create_restaurant_pizza(
    conn: &mut SqliteConnection,
    new_restaurant_pizza: &NewRestaurantPizza,
) -> Result<(RestaurantPizza, Pizza, Restaurant), ServiceError> {
    if new_restaurant_pizza.price <= 0 {
        return Err(ValidationError::InvalidPrice.into());
    }

    conn.immediate_transaction::<_, ServiceError, _>(|conn| {
        let pizza = find_pizza(conn, new_restaurant_pizza.pizza_id)?
            .ok_or(ValidationError::UnknownPizza(new_restaurant_pizza.pizza_id))?;
        let restaurant = find_restaurant(conn, new_restaurant_pizza.restaurant_id)?.ok_or(
            ValidationError::UnknownRestaurant(new_restaurant_pizza.restaurant_id),
        )?;

        let restaurant_pizza = diesel::insert_into(restaurant_pizzas::table)
            .values(new_restaurant_pizza)
            .returning(RestaurantPizza::as_returning())
            .get_result(conn)?;

        Ok((restaurant_pizza, pizza, restaurant))
    })
}
