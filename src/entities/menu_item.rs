//! Menu item entity - A dish offered by a restaurant.
//!
//! `price` and `course` are free text; nothing parses them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Menu item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_item")]
pub struct Model {
    /// Unique identifier, assigned by the database
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the owning restaurant
    pub restaurant_id: i64,
    /// Dish name, as entered
    pub name: String,
    /// Price as entered, e.g. `"$5.99"`
    pub price: String,
    /// Description, as entered
    pub description: String,
    /// Course as entered, e.g. `"Entree"` or `"Dessert"`
    pub course: String,
    /// When the item was created
    pub date_created: DateTime,
    /// When the item was last modified
    pub date_modified: DateTime,
}

/// Defines relationships between this and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each menu item belongs to one restaurant
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id",
        on_delete = "Cascade"
    )]
    Restaurant,
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
