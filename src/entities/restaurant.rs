//! Restaurant entity - A named restaurant owning zero or more menu items.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Restaurant database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurant")]
pub struct Model {
    /// Unique identifier, assigned by the database
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, duplicates allowed
    pub name: String,
    /// When the restaurant was created
    pub date_created: DateTime,
    /// When the restaurant was last modified
    pub date_modified: DateTime,
}

/// Defines relationships between this and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One restaurant has many menu items
    #[sea_orm(has_many = "super::menu_item::Entity")]
    MenuItems,
}

impl Related<super::menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
