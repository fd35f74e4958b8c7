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


//! Database storage and models
//!
//! This module handles all database operations using SQLite via sqlx.
//!
//! # Database Schema
//! The library is hand-partitioned by genre: each shelf in the static
//! registry owns two tables, `<shelf>_authors` (parent) and `<shelf>_books`
//! (child, FK to the parent). All ten tables share the same column layout,
//! which is what lets the query layer take a [`crate::shelf::Shelf`] and
//! interpolate only registry-owned identifiers.
//!
//! # Usage Example
//! ```no_run
//! use shelfside::shelf::Shelf;
//! use shelfside::storage::{queries, Database};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("./library.db").await?;
//! let authors = queries::list_authors(db.pool(), Shelf::Fiction, 25, 0).await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use database::Database;
pub use models::{AuthorOption, AuthorRow, BookRow, BookWithAuthor, NewAuthor, NewBook};
pub use queries::{AuthorMatch, BookMatch, SearchResults};
