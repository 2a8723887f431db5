//! Entity module - Contains the SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

/// Menu items, each owned by one restaurant
pub mod menu_item;
/// Restaurants
pub mod restaurant;

pub use menu_item::{Column as MenuItemColumn, Entity as MenuItem, Model as MenuItemModel};
pub use restaurant::{Column as RestaurantColumn, Entity as Restaurant, Model as RestaurantModel};
