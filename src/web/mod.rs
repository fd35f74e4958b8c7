// Shelfside - Personal Library Web Application
// Copyright (C) 2025 Shelfside contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! HTTP surface
//!
//! Every route is a direct pass-through: request in, one or two queries,
//! server-rendered HTML out. Errors are logged here and rendered as a small
//! error page with the status code the variant maps to.

pub mod handlers;
pub mod pages;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::error::ShelfError;
use crate::storage::Database;

/// Rows shown per browse page
pub const PAGE_SIZE: i64 = 25;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/search", get(handlers::search))
        .route("/browse/{shelf}/{table}", get(handlers::browse))
        .route(
            "/add/{shelf}/{table}",
            get(handlers::add_form).post(handlers::add_submit),
        )
        .with_state(state)
}

impl IntoResponse for ShelfError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_client_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        } else {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        }

        (status, Html(pages::error_page(status.as_u16(), &self.user_message()))).into_response()
    }
}
