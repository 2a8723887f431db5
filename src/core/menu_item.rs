//! Menu item business logic.
//!
//! A menu item always belongs to exactly one restaurant. Creation checks that
//! the restaurant exists before inserting; after that the item's own
//! `restaurant_id` is the only record of who owns it.

use crate::{
    core::restaurant::get_restaurant_by_id,
    entities::{MenuItem, menu_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// The user-editable fields of a menu item.
///
/// Every field is stored exactly as given; updates overwrite all four at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemFields {
    /// Dish name
    pub name: String,
    /// Free-form price text such as `$2.99`
    pub price: String,
    /// Free-form description
    pub description: String,
    /// Course label such as `Entree`
    pub course: String,
}

/// Finds a menu item by its id.
///
/// # Errors
/// Returns [`Error::MenuItemNotFound`] if no menu item has this id.
pub async fn get_menu_item_by_id<C>(db: &C, menu_item_id: i64) -> Result<menu_item::Model>
where
    C: ConnectionTrait,
{
    MenuItem::find_by_id(menu_item_id)
        .one(db)
        .await?
        .ok_or(Error::MenuItemNotFound { id: menu_item_id })
}

/// Lists the menu items owned by a restaurant, oldest first.
pub async fn get_menu_items_for_restaurant<C>(
    db: &C,
    restaurant_id: i64,
) -> Result<Vec<menu_item::Model>>
where
    C: ConnectionTrait,
{
    MenuItem::find()
        .filter(menu_item::Column::RestaurantId.eq(restaurant_id))
        .order_by_asc(menu_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a menu item under an existing restaurant.
///
/// # Errors
/// Returns [`Error::RestaurantNotFound`] if the restaurant does not exist.
#[instrument(skip(db))]
pub async fn create_menu_item(
    db: &DatabaseConnection,
    restaurant_id: i64,
    fields: MenuItemFields,
) -> Result<menu_item::Model> {
    let now = chrono::Utc::now().naive_utc();
    let txn = db.begin().await?;

    get_restaurant_by_id(&txn, restaurant_id).await?;

    let item = menu_item::ActiveModel {
        restaurant_id: Set(restaurant_id),
        name: Set(fields.name),
        price: Set(fields.price),
        description: Set(fields.description),
        course: Set(fields.course),
        date_created: Set(now),
        date_modified: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!(id = item.id, restaurant_id, "Created menu item");
    Ok(item)
}

/// Overwrites all editable fields of a menu item.
///
/// # Errors
/// Returns [`Error::MenuItemNotFound`] if no menu item has this id.
#[instrument(skip(db))]
pub async fn update_menu_item(
    db: &DatabaseConnection,
    menu_item_id: i64,
    fields: MenuItemFields,
) -> Result<menu_item::Model> {
    let txn = db.begin().await?;

    let mut item: menu_item::ActiveModel = get_menu_item_by_id(&txn, menu_item_id).await?.into();
    item.name = Set(fields.name);
    item.price = Set(fields.price);
    item.description = Set(fields.description);
    item.course = Set(fields.course);
    item.date_modified = Set(chrono::Utc::now().naive_utc());
    let item = item.update(&txn).await?;

    txn.commit().await?;
    info!(id = item.id, "Updated menu item");
    Ok(item)
}

/// Deletes a menu item, returning the deleted row.
///
/// # Errors
/// Returns [`Error::MenuItemNotFound`] if no menu item has this id.
#[instrument(skip(db))]
pub async fn delete_menu_item(db: &DatabaseConnection, menu_item_id: i64) -> Result<menu_item::Model> {
    let txn = db.begin().await?;

    let item = get_menu_item_by_id(&txn, menu_item_id).await?;
    MenuItem::delete_by_id(menu_item_id).exec(&txn).await?;

    txn.commit().await?;
    info!(id = menu_item_id, restaurant_id = item.restaurant_id, "Deleted menu item");
    Ok(item)
}
