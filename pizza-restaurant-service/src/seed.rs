use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::error::ServiceError;
use crate::models::{NewPizza, NewRestaurant, NewRestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::service;

const RESTAURANTS: [(&str, &str); 3] = [
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: [(&str, &str); 3] = [
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (restaurant index, pizza index, price)
const PRICES: [(usize, usize, i32); 5] = [(0, 0, 1), (0, 2, 4), (1, 1, 5), (1, 2, 6), (2, 0, 3)];

#[derive(Debug, Default, PartialEq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

/// Replaces every row in the database with the demo data set.
pub fn seed(conn: &mut SqliteConnection) -> Result<SeedSummary, ServiceError> {
    conn.immediate_transaction::<_, ServiceError, _>(|conn| {
        diesel::delete(restaurant_pizzas::table).execute(conn)?;
        diesel::delete(pizzas::table).execute(conn)?;
        diesel::delete(restaurants::table).execute(conn)?;

        let created_restaurants = RESTAURANTS
            .iter()
            .map(|&(name, address)| service::create_restaurant(conn, &NewRestaurant { name, address }))
            .collect::<Result<Vec<_>, _>>()?;
        let created_pizzas = PIZZAS
            .iter()
            .map(|&(name, ingredients)| service::create_pizza(conn, &NewPizza { name, ingredients }))
            .collect::<Result<Vec<_>, _>>()?;

        let prices = PRICES
            .iter()
            .map(|&(restaurant, pizza, price)| NewRestaurantPizza {
                price,
                restaurant_id: created_restaurants[restaurant].id,
                pizza_id: created_pizzas[pizza].id,
            })
            .collect::<Vec<_>>();
        // `immediate_transaction` does not nest, so these skip `service::create_restaurant_pizza`.
        let inserted = diesel::insert_into(restaurant_pizzas::table)
            .values(&prices)
            .execute(conn)?;

        Ok(SeedSummary {
            restaurants: created_restaurants.len(),
            pizzas: created_pizzas.len(),
            restaurant_pizzas: inserted,
        })
    })
    .inspect(|summary| info!(?summary, "seeded database"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::in_memory_pool;

    #[test]
    fn test_seed_replaces_existing_rows() {
        let pool = in_memory_pool().unwrap();
        let conn = &mut pool.get().unwrap();

        let first = seed(conn).unwrap();
        let second = seed(conn).unwrap();

        assert_eq!(first, second);
        assert_eq!(service::list_restaurants(conn).unwrap().len(), RESTAURANTS.len());
        assert_eq!(service::list_pizzas(conn).unwrap().len(), PIZZAS.len());
        let rows: i64 = restaurant_pizzas::table.count().get_result(conn).unwrap();
        assert_eq!(rows as usize, PRICES.len());
    }
}
