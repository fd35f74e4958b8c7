//! Shelfside - a small personal-library web application
//!
//! The library is hand-partitioned into genre shelves, each owning a parent
//! authors table and a child books table in SQLite. The web layer lets a
//! user pick a shelf/table pair, view its records, search authors and titles
//! across every shelf, and insert new records through a generated form.
//!
//! Module map:
//! - [`shelf`] - the static registry mapping shelves to their table pair
//! - [`storage`] - SQLite pool, migrations, models and queries
//! - [`web`] - axum router, handlers and HTML rendering
//! - [`config`] / [`error`] - ambient plumbing

pub mod config;
pub mod error;
pub mod shelf;
pub mod storage;
pub mod web;

pub use config::ServerConfig;
pub use error::{Result, ShelfError};
pub use shelf::{Shelf, ShelfTable, TableKind};
pub use storage::Database;
