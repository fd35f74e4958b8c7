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


//! Route handlers
//!
//! Each handler parses its path/query input against the static registry,
//! runs the corresponding queries, and renders a page. Nothing holds state
//! between requests.

use std::collections::HashMap;

use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;

use crate::error::{Result, ShelfError};
use crate::shelf::{Shelf, ShelfTable, TableKind};
use crate::storage::models::{NewAuthor, NewBook};
use crate::storage::queries;
use crate::web::{pages, AppState, PAGE_SIZE};

/// Per-shelf record counts for the picker page
pub struct ShelfSummary {
    pub shelf: Shelf,
    pub author_count: i64,
    pub book_count: i64,
}

/// GET / - shelf/table picker
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let mut summaries = Vec::with_capacity(Shelf::ALL.len());
    for shelf in Shelf::ALL {
        let author_count = queries::count_rows(
            state.db.pool(),
            ShelfTable::new(shelf, TableKind::Authors),
        )
        .await?;
        let book_count =
            queries::count_rows(state.db.pool(), ShelfTable::new(shelf, TableKind::Books)).await?;

        summaries.push(ShelfSummary {
            shelf,
            author_count,
            book_count,
        });
    }

    Ok(Html(pages::index_page(&summaries)))
}

/// GET /health - liveness probe
pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
}

/// GET /browse/{shelf}/{table} - paginated record view
pub async fn browse(
    State(state): State<AppState>,
    Path((shelf, table)): Path<(String, String)>,
    Query(params): Query<PageParams>,
) -> Result<Html<String>> {
    let pair = ShelfTable::parse(&shelf, &table)?;
    let page = params.page.unwrap_or(1).max(1);
    // page comes straight off the query string, so the arithmetic must not
    // overflow for absurd values
    let offset = page.saturating_sub(1).saturating_mul(PAGE_SIZE);

    let total = queries::count_rows(state.db.pool(), pair).await?;

    let body = match pair.kind {
        TableKind::Authors => {
            let rows = queries::list_authors(state.db.pool(), pair.shelf, PAGE_SIZE, offset).await?;
            pages::authors_page(pair, &rows, page, total)
        }
        TableKind::Books => {
            let rows = queries::list_books(state.db.pool(), pair.shelf, PAGE_SIZE, offset).await?;
            pages::books_page(pair, &rows, page, total)
        }
    };

    Ok(Html(body))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// GET /search - author/title search across every shelf
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>> {
    let query = params.q.unwrap_or_default();
    let query = query.trim();

    if query.is_empty() {
        // Bare search page, just the form
        return Ok(Html(pages::search_page(None)));
    }

    let results = queries::search_shelves(state.db.pool(), query).await?;
    Ok(Html(pages::search_page(Some(&results))))
}

/// GET /add/{shelf}/{table} - generated insert form
pub async fn add_form(
    State(state): State<AppState>,
    Path((shelf, table)): Path<(String, String)>,
) -> Result<Html<String>> {
    let pair = ShelfTable::parse(&shelf, &table)?;

    let author_options = match pair.kind {
        TableKind::Books => queries::author_options(state.db.pool(), pair.shelf).await?,
        TableKind::Authors => Vec::new(),
    };

    Ok(Html(pages::add_form_page(pair, &author_options)))
}

/// POST /add/{shelf}/{table} - insert one record, redirect to its browse page
///
/// The body is taken as a generic field map because the field set depends on
/// which generated form was submitted; the payload types validate it.
pub async fn add_submit(
    State(state): State<AppState>,
    Path((shelf, table)): Path<(String, String)>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect> {
    let pair = ShelfTable::parse(&shelf, &table)?;

    match pair.kind {
        TableKind::Authors => {
            let author = NewAuthor::from_form(&fields)?;
            if queries::author_name_exists(state.db.pool(), pair.shelf, &author.name).await? {
                return Err(ShelfError::invalid_input(format!(
                    "An author named '{}' is already on the {} shelf.",
                    author.name,
                    pair.shelf.display_name()
                )));
            }
            let author_id = queries::insert_author(state.db.pool(), pair.shelf, &author).await?;
            tracing::info!(shelf = %pair.shelf, author_id, "author added");
        }
        TableKind::Books => {
            let book = NewBook::from_form(&fields)?;
            if !queries::author_exists(state.db.pool(), pair.shelf, book.author_id).await? {
                return Err(ShelfError::not_found(format!(
                    "author {} on the {} shelf",
                    book.author_id,
                    pair.shelf.display_name()
                )));
            }
            let book_id = queries::insert_book(state.db.pool(), pair.shelf, &book).await?;
            tracing::info!(shelf = %pair.shelf, book_id, "book added");
        }
    }

    Ok(Redirect::to(&format!(
        "/browse/{}/{}",
        pair.shelf.slug(),
        pair.kind.slug()
    )))
}
