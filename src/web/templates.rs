//! HTML rendering.
//!
//! Templates are compiled into the binary with `include_str!` and registered
//! once at startup. Every page receives `current_year` for the footer and a
//! (usually empty) `messages` list for the flash banner, in addition to its own
//! view-model fields.

use crate::errors::Result;
use axum::response::Html;
use chrono::Datelike;
use serde::Serialize;
use std::sync::Arc;
use tera::{Context, Tera};
use tracing::debug;

macro_rules! static_template {
    ($name:literal) => {
        ($name, include_str!(concat!("../../templates/", $name)))
    };
}

/// The compiled template set, cheap to clone.
#[derive(Clone)]
pub struct Templates {
    tera: Arc<Tera>,
}

#[derive(Serialize)]
struct Page<'a, T> {
    current_year: i32,
    messages: &'a [String],
    #[serde(flatten)]
    view: &'a T,
}

impl Templates {
    /// Compiles every page template.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::Template`] if a template fails to parse.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            static_template!("base.html"),
            static_template!("404.html"),
            static_template!("500.html"),
            static_template!("test.html"),
            static_template!("restaurant/showAllRestaurants.html"),
            static_template!("restaurant/createRestaurant.html"),
            static_template!("restaurant/editRestaurant.html"),
            static_template!("restaurant/deleteRestaurant.html"),
            static_template!("menu/showMenu.html"),
            static_template!("menu/newMenuItem.html"),
            static_template!("menu/editMenuItem.html"),
            static_template!("menu/deleteMenuItem.html"),
        ])?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Renders `name` with the given view-model.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::Template`] if the view cannot be
    /// serialized or the template fails to render.
    pub fn render<T: Serialize>(&self, name: &str, view: &T) -> Result<Html<String>> {
        self.render_with_messages(name, view, &[])
    }

    /// Renders `name` with flash messages shown above the page content.
    ///
    /// # Errors
    /// Same as [`Templates::render`].
    pub fn render_with_messages<T: Serialize>(
        &self,
        name: &str,
        view: &T,
        messages: &[String],
    ) -> Result<Html<String>> {
        let page = Page {
            current_year: chrono::Local::now().year(),
            messages,
            view,
        };
        let context = Context::from_serialize(&page)?;
        let html = self.tera.render(name, &context)?;
        debug!(template = name, bytes = html.len(), "Rendered page");
        Ok(Html(html))
    }
}
