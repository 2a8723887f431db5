//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL. There is no migration tooling: existing
//! tables are left untouched.

use crate::entities::{MenuItem, Restaurant};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Establishes a connection to the database at `database_url`.
///
/// For file-backed `SQLite` URLs the parent directory is created first, since
/// `mode=rwc` only creates the file itself.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(dir) = sqlite_parent_dir(database_url) {
        debug!("Ensuring database directory exists: {}", dir.display());
        std::fs::create_dir_all(dir)?;
    }

    Database::connect(database_url).await.map_err(Into::into)
}

/// Returns the directory holding a file-backed `SQLite` database, if any.
fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next()?;
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

/// Creates the restaurant and menu item tables if they do not exist yet.
///
/// The restaurant table is created first so the menu item foreign key has
/// something to reference.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut restaurant_table = schema.create_table_from_entity(Restaurant);
    let mut menu_item_table = schema.create_table_from_entity(MenuItem);

    restaurant_table.if_not_exists();
    menu_item_table.if_not_exists();

    db.execute(builder.build(&restaurant_table)).await?;
    db.execute(builder.build(&menu_item_table)).await?;

    info!("Database tables ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{MenuItemModel, RestaurantModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<RestaurantModel> = Restaurant::find().limit(1).all(&db).await?;
        let _: Vec<MenuItemModel> = MenuItem::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<RestaurantModel> = Restaurant::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir("sqlite://data/restaurants.sqlite?mode=rwc"),
            Some(Path::new("data"))
        );
        assert_eq!(sqlite_parent_dir("sqlite://app.db"), None);
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_parent_dir("postgres://localhost/db"), None);
    }
}
