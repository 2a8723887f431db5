//! Read-only JSON API.

use crate::{
    core::{menu_item, restaurant},
    entities::{MenuItemModel, RestaurantModel},
    web::{AppState, Ids, error::ApiError},
};
use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use tracing::instrument;

/// JSON routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants/json/", get(list_restaurants))
        .route("/restaurant/{restaurant_id}/menu/json/", get(get_restaurant))
        .route(
            "/restaurant/{restaurant_id}/menu/{menu_id}/json/",
            get(get_menu_item),
        )
}

/// Public projection of a restaurant. Menu items are not included.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RestaurantJson {
    /// Restaurant id
    pub id: i64,
    /// Display name
    pub name: String,
}

impl From<RestaurantModel> for RestaurantJson {
    fn from(model: RestaurantModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// Public projection of a menu item.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MenuItemJson {
    /// Menu item id
    pub id: i64,
    /// Owning restaurant id
    pub restaurant_id: i64,
    /// Dish name
    pub name: String,
    /// Price text as entered
    pub price: String,
    /// Description text
    pub description: String,
    /// Course label
    pub course: String,
}

impl From<MenuItemModel> for MenuItemJson {
    fn from(model: MenuItemModel) -> Self {
        Self {
            id: model.id,
            restaurant_id: model.restaurant_id,
            name: model.name,
            price: model.price,
            description: model.description,
            course: model.course,
        }
    }
}

/// Body of `GET /restaurants/json/`.
#[derive(Debug, Serialize)]
pub struct RestaurantList {
    /// Every restaurant, in id order
    #[serde(rename = "Restaurants")]
    pub restaurants: Vec<RestaurantJson>,
}

/// `GET /restaurants/json/`
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<RestaurantList>, ApiError> {
    let restaurants = restaurant::get_all_restaurants(&state.database)
        .await?
        .into_iter()
        .map(RestaurantJson::from)
        .collect();
    Ok(Json(RestaurantList { restaurants }))
}

/// `GET /restaurant/{restaurant_id}/menu/json/`, the restaurant without its menu.
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Ids(restaurant_id): Ids<i64>,
) -> Result<Json<RestaurantJson>, ApiError> {
    let restaurant = restaurant::get_restaurant_by_id(&state.database, restaurant_id).await?;
    Ok(Json(restaurant.into()))
}

/// `GET /restaurant/{restaurant_id}/menu/{menu_id}/json/`. The restaurant segment
/// is not checked against the item.
#[instrument(skip(state))]
pub async fn get_menu_item(
    State(state): State<AppState>,
    Ids((_, menu_id)): Ids<(i64, i64)>,
) -> Result<Json<MenuItemJson>, ApiError> {
    let item = menu_item::get_menu_item_by_id(&state.database, menu_id).await?;
    Ok(Json(item.into()))
}
