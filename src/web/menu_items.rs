//! Menu pages scoped to a restaurant.
//!
//! For edit and delete, the owning restaurant is always read from the menu
//! item's own `restaurant_id`. The restaurant segment of the URL only has to be
//! an integer; it is not checked against the item.

use crate::{
    core::{MenuItemFields, menu_item, restaurant},
    entities::{MenuItemModel, RestaurantModel},
    errors::Result,
    web::{AppState, Ids, flash, take_messages},
};
use axum::{
    Form, Router,
    extract::State,
    response::{Html, Redirect},
    routing::get,
};
use axum_messages::Messages;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Menu page and menu item form routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{restaurant_id}/", get(show_menu))
        .route("/{restaurant_id}/menu/", get(show_menu))
        .route(
            "/restaurant/{restaurant_id}/menu/new/",
            get(new_menu_item_form).post(create_menu_item),
        )
        .route(
            "/restaurant/{restaurant_id}/menu/{menu_id}/edit/",
            get(edit_menu_item_form).post(update_menu_item),
        )
        .route(
            "/restaurant/{restaurant_id}/menu/{menu_id}/delete/",
            get(delete_menu_item_form).post(delete_menu_item),
        )
}

/// Path of the menu page for a restaurant.
#[must_use]
pub fn menu_path(restaurant_id: i64) -> String {
    format!("/{restaurant_id}/menu/")
}

/// Submitted by both the "new" and "edit" menu item forms.
#[derive(Debug, Deserialize)]
pub struct MenuItemForm {
    /// Dish name
    #[serde(rename = "inputMenuItemName")]
    pub name: String,
    /// Price text
    #[serde(rename = "inputMenuItemPrice")]
    pub price: String,
    /// Description text
    #[serde(rename = "inputMenuItemDescription")]
    pub description: String,
    /// Course label
    #[serde(rename = "inputMenuItemCourse")]
    pub course: String,
}

impl From<MenuItemForm> for MenuItemFields {
    fn from(form: MenuItemForm) -> Self {
        Self {
            name: form.name,
            price: form.price,
            description: form.description,
            course: form.course,
        }
    }
}

#[derive(Serialize)]
struct MenuView {
    restaurant: RestaurantModel,
    items: Vec<MenuItemModel>,
}

#[derive(Serialize)]
struct RestaurantView {
    restaurant: RestaurantModel,
}

#[derive(Serialize)]
struct MenuItemView {
    restaurant: RestaurantModel,
    item: MenuItemModel,
}

/// Loads a menu item and the restaurant its foreign key points at.
async fn load_item_view(state: &AppState, menu_id: i64) -> Result<MenuItemView> {
    let item = menu_item::get_menu_item_by_id(&state.database, menu_id).await?;
    let restaurant = restaurant::get_restaurant_by_id(&state.database, item.restaurant_id).await?;
    Ok(MenuItemView { restaurant, item })
}

/// Shows a restaurant's menu, with any pending flash messages.
#[instrument(skip(state, messages))]
pub async fn show_menu(
    State(state): State<AppState>,
    Ids(restaurant_id): Ids<i64>,
    messages: Messages,
) -> Result<Html<String>> {
    let (restaurant, items) =
        restaurant::get_restaurant_with_menu(&state.database, restaurant_id).await?;
    state.templates.render_with_messages(
        "menu/showMenu.html",
        &MenuView { restaurant, items },
        &take_messages(messages),
    )
}

/// Shows the empty "new menu item" form for a restaurant.
#[instrument(skip(state))]
pub async fn new_menu_item_form(
    State(state): State<AppState>,
    Ids(restaurant_id): Ids<i64>,
) -> Result<Html<String>> {
    let restaurant = restaurant::get_restaurant_by_id(&state.database, restaurant_id).await?;
    state
        .templates
        .render("menu/newMenuItem.html", &RestaurantView { restaurant })
}

/// Adds a menu item to a restaurant.
#[instrument(skip(state, messages))]
pub async fn create_menu_item(
    State(state): State<AppState>,
    Ids(restaurant_id): Ids<i64>,
    messages: Messages,
    Form(form): Form<MenuItemForm>,
) -> Result<Redirect> {
    let restaurant = restaurant::get_restaurant_by_id(&state.database, restaurant_id).await?;
    menu_item::create_menu_item(&state.database, restaurant_id, form.into()).await?;
    flash(messages, format!("New menu item for {} created!", restaurant.name));
    Ok(Redirect::to(&menu_path(restaurant_id)))
}

/// Shows the edit form for a menu item.
#[instrument(skip(state))]
pub async fn edit_menu_item_form(
    State(state): State<AppState>,
    Ids((_, menu_id)): Ids<(i64, i64)>,
) -> Result<Html<String>> {
    let view = load_item_view(&state, menu_id).await?;
    state.templates.render("menu/editMenuItem.html", &view)
}

/// Overwrites a menu item with the submitted form.
#[instrument(skip(state, messages))]
pub async fn update_menu_item(
    State(state): State<AppState>,
    Ids((_, menu_id)): Ids<(i64, i64)>,
    messages: Messages,
    Form(form): Form<MenuItemForm>,
) -> Result<Redirect> {
    let item = menu_item::update_menu_item(&state.database, menu_id, form.into()).await?;
    flash(messages, format!("Changes for {} saved.", item.name));
    Ok(Redirect::to(&menu_path(item.restaurant_id)))
}

/// Asks for confirmation before deleting a menu item.
#[instrument(skip(state))]
pub async fn delete_menu_item_form(
    State(state): State<AppState>,
    Ids((_, menu_id)): Ids<(i64, i64)>,
) -> Result<Html<String>> {
    let view = load_item_view(&state, menu_id).await?;
    state.templates.render("menu/deleteMenuItem.html", &view)
}

/// Deletes a menu item.
#[instrument(skip(state, messages))]
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Ids((_, menu_id)): Ids<(i64, i64)>,
    messages: Messages,
) -> Result<Redirect> {
    let item = menu_item::delete_menu_item(&state.database, menu_id).await?;
    flash(messages, format!("Menu item {} deleted.", item.name));
    Ok(Redirect::to(&menu_path(item.restaurant_id)))
}
