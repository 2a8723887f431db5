//! Restaurant business logic - Handles all restaurant-related operations.
//!
//! Reads accept any connection or transaction. Mutations take the pooled
//! connection and run inside their own database transaction: the transaction is
//! committed on success and rolled back when an early return drops it.

use crate::{
    core::menu_item::get_menu_items_for_restaurant,
    entities::{MenuItem, Restaurant, menu_item, restaurant},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// Retrieves every restaurant in insertion (id) order.
pub async fn get_all_restaurants<C>(db: &C) -> Result<Vec<restaurant::Model>>
where
    C: ConnectionTrait,
{
    Restaurant::find()
        .order_by_asc(restaurant::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a restaurant by its id.
///
/// # Errors
/// Returns [`Error::RestaurantNotFound`] if no restaurant has this id.
pub async fn get_restaurant_by_id<C>(db: &C, restaurant_id: i64) -> Result<restaurant::Model>
where
    C: ConnectionTrait,
{
    Restaurant::find_by_id(restaurant_id)
        .one(db)
        .await?
        .ok_or(Error::RestaurantNotFound { id: restaurant_id })
}

/// Loads a restaurant together with its menu items, oldest item first.
///
/// # Errors
/// Returns [`Error::RestaurantNotFound`] if no restaurant has this id.
pub async fn get_restaurant_with_menu<C>(
    db: &C,
    restaurant_id: i64,
) -> Result<(restaurant::Model, Vec<menu_item::Model>)>
where
    C: ConnectionTrait,
{
    let restaurant = get_restaurant_by_id(db, restaurant_id).await?;
    let items = get_menu_items_for_restaurant(db, restaurant_id).await?;
    Ok((restaurant, items))
}

/// Creates a restaurant. Empty and duplicate names are accepted as given.
#[instrument(skip(db))]
pub async fn create_restaurant(db: &DatabaseConnection, name: String) -> Result<restaurant::Model> {
    let now = chrono::Utc::now().naive_utc();
    let txn = db.begin().await?;

    let restaurant = restaurant::ActiveModel {
        name: Set(name),
        date_created: Set(now),
        date_modified: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!(id = restaurant.id, "Created restaurant");
    Ok(restaurant)
}

/// Overwrites a restaurant's name and refreshes its modification time.
///
/// # Errors
/// Returns [`Error::RestaurantNotFound`] if no restaurant has this id.
#[instrument(skip(db))]
pub async fn update_restaurant(
    db: &DatabaseConnection,
    restaurant_id: i64,
    name: String,
) -> Result<restaurant::Model> {
    let txn = db.begin().await?;

    let mut restaurant: restaurant::ActiveModel =
        get_restaurant_by_id(&txn, restaurant_id).await?.into();
    restaurant.name = Set(name);
    restaurant.date_modified = Set(chrono::Utc::now().naive_utc());
    let restaurant = restaurant.update(&txn).await?;

    txn.commit().await?;
    info!(id = restaurant.id, "Updated restaurant");
    Ok(restaurant)
}

/// Deletes a restaurant and every menu item it owns, returning the deleted row.
///
/// # Errors
/// Returns [`Error::RestaurantNotFound`] if no restaurant has this id.
#[instrument(skip(db))]
pub async fn delete_restaurant(
    db: &DatabaseConnection,
    restaurant_id: i64,
) -> Result<restaurant::Model> {
    let txn = db.begin().await?;

    let restaurant = get_restaurant_by_id(&txn, restaurant_id).await?;
    let removed_items = MenuItem::delete_many()
        .filter(menu_item::Column::RestaurantId.eq(restaurant_id))
        .exec(&txn)
        .await?
        .rows_affected;
    Restaurant::delete_by_id(restaurant_id).exec(&txn).await?;

    txn.commit().await?;
    debug!(removed_items, "Removed menu items with restaurant");
    info!(id = restaurant_id, "Deleted restaurant");
    Ok(restaurant)
}
