//! Core business logic - framework-agnostic restaurant and menu item operations.

/// Menu item create, read, update and delete
pub mod menu_item;
/// Restaurant create, read, update and delete
pub mod restaurant;

pub use menu_item::MenuItemFields;
