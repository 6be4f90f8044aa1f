// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Server-rendered pages.
//!
//! Each page is an askama template under `templates/`. View structs hold
//! display-ready strings so the templates stay free of formatting logic.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use bike_inventory_api::Flash;
use bike_inventory_domain::Bike;
use tracing::error;

/// A flash message ready for display.
pub struct FlashView {
    /// CSS class suffix: `success` or `error`.
    pub level: &'static str,
    pub message: String,
}

impl From<Flash> for FlashView {
    fn from(flash: Flash) -> Self {
        Self {
            level: flash.level.as_str(),
            message: flash.message,
        }
    }
}

/// One row of the inventory table.
pub struct BikeView {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub category: String,
    pub quantity: i64,
    /// Stored price, unrounded, so resubmitting the row keeps it intact.
    pub price: String,
}

impl From<Bike> for BikeView {
    fn from(bike: Bike) -> Self {
        Self {
            id: bike.id,
            brand: bike.brand,
            model: bike.model,
            category: bike.category,
            quantity: bike.quantity,
            price: bike.price.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "inventory.html")]
pub struct InventoryPage {
    pub username: String,
    pub flash: Option<FlashView>,
    pub bikes: Vec<BikeView>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub flash: Option<FlashView>,
    /// Username to prefill after a failed attempt.
    pub username: String,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupPage {
    pub flash: Option<FlashView>,
}

#[derive(Template)]
#[template(path = "errors/404.html")]
pub struct NotFoundPage {
    pub path: String,
}

#[derive(Template)]
#[template(path = "errors/500.html")]
pub struct InternalErrorPage;

/// Renders a page with the given status.
///
/// A template failure is logged and answered with a bare 500.
pub fn render<T: Template>(status: StatusCode, page: &T) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            error!(error = %err, "Template rendering error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Template rendering failed",
            )
                .into_response()
        }
    }
}

/// Renders a page with status 200.
pub fn render_ok<T: Template>(page: &T) -> Response {
    render(StatusCode::OK, page)
}
