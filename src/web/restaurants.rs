//! Restaurant pages: list, create, edit and delete.

use crate::{
    core::restaurant,
    entities::RestaurantModel,
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

const LIST_PATH: &str = "/restaurants/";

/// Restaurant list and restaurant form routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_restaurants))
        .route(LIST_PATH, get(list_restaurants))
        .route(
            "/restaurant/new/",
            get(new_restaurant_form).post(create_restaurant),
        )
        .route(
            "/restaurant/{restaurant_id}/edit/",
            get(edit_restaurant_form).post(update_restaurant),
        )
        .route(
            "/restaurant/{restaurant_id}/delete/",
            get(delete_restaurant_form).post(delete_restaurant),
        )
}

/// Submitted by the "new restaurant" form.
#[derive(Debug, Deserialize)]
pub struct NewRestaurantForm {
    /// Name of the new restaurant
    #[serde(rename = "nameNewRestaurant")]
    pub name: String,
}

/// Submitted by the "edit restaurant" form.
#[derive(Debug, Deserialize)]
pub struct EditRestaurantForm {
    /// Replacement name
    #[serde(rename = "nameEditRestaurant")]
    pub name: String,
}

#[derive(Serialize)]
struct RestaurantListView {
    restaurants: Vec<RestaurantModel>,
}

#[derive(Serialize)]
struct RestaurantView {
    restaurant: RestaurantModel,
}

/// Lists every restaurant, with any pending flash messages.
#[instrument(skip(state, messages))]
pub async fn list_restaurants(
    State(state): State<AppState>,
    messages: Messages,
) -> Result<Html<String>> {
    let restaurants = restaurant::get_all_restaurants(&state.database).await?;
    state.templates.render_with_messages(
        "restaurant/showAllRestaurants.html",
        &RestaurantListView { restaurants },
        &take_messages(messages),
    )
}

/// Shows the empty "new restaurant" form.
pub async fn new_restaurant_form(State(state): State<AppState>) -> Result<Html<String>> {
    state
        .templates
        .render("restaurant/createRestaurant.html", &serde_json::json!({}))
}

/// Creates a restaurant from the submitted form.
#[instrument(skip(state, messages))]
pub async fn create_restaurant(
    State(state): State<AppState>,
    messages: Messages,
    Form(form): Form<NewRestaurantForm>,
) -> Result<Redirect> {
    restaurant::create_restaurant(&state.database, form.name).await?;
    flash(messages, "New restaurant created!");
    Ok(Redirect::to(LIST_PATH))
}

/// Shows the rename form for a restaurant.
#[instrument(skip(state))]
pub async fn edit_restaurant_form(
    State(state): State<AppState>,
    Ids(restaurant_id): Ids<i64>,
) -> Result<Html<String>> {
    let restaurant = restaurant::get_restaurant_by_id(&state.database, restaurant_id).await?;
    state
        .templates
        .render("restaurant/editRestaurant.html", &RestaurantView { restaurant })
}

/// Renames a restaurant.
#[instrument(skip(state, messages))]
pub async fn update_restaurant(
    State(state): State<AppState>,
    Ids(restaurant_id): Ids<i64>,
    messages: Messages,
    Form(form): Form<EditRestaurantForm>,
) -> Result<Redirect> {
    restaurant::update_restaurant(&state.database, restaurant_id, form.name).await?;
    flash(messages, "Changes in restaurant saved.");
    Ok(Redirect::to(LIST_PATH))
}

/// Asks for confirmation before deleting a restaurant.
#[instrument(skip(state))]
pub async fn delete_restaurant_form(
    State(state): State<AppState>,
    Ids(restaurant_id): Ids<i64>,
) -> Result<Html<String>> {
    let restaurant = restaurant::get_restaurant_by_id(&state.database, restaurant_id).await?;
    state
        .templates
        .render("restaurant/deleteRestaurant.html", &RestaurantView { restaurant })
}

/// Deletes a restaurant and its menu.
#[instrument(skip(state, messages))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Ids(restaurant_id): Ids<i64>,
    messages: Messages,
) -> Result<Redirect> {
    restaurant::delete_restaurant(&state.database, restaurant_id).await?;
    flash(messages, "Restaurant deleted.");
    Ok(Redirect::to(LIST_PATH))
}
