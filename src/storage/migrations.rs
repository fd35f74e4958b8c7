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


//! Database migrations
//!
//! Schema creation for the genre-partitioned shelf tables plus seed data.
//! Migrations are implemented as runtime SQL execution and tracked in the
//! `_migrations` table, so they run exactly once per database file.
//!
//! Every shelf gets the same pair of tables; the DDL is generated per shelf
//! from the static registry rather than written out ten times.

use crate::error::Result;
use crate::shelf::Shelf;
use sqlx::{Executor, SqlitePool};

/// Run all database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    create_migrations_table(pool).await?;

    run_migration(pool, 1, "shelf_tables", create_shelf_tables(pool)).await?;
    run_migration(pool, 2, "seed_library", seed_library(pool)).await?;

    Ok(())
}

/// Create migrations tracking table
async fn create_migrations_table(pool: &SqlitePool) -> Result<()> {
    pool.execute(
        r#"
        CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .await?;

    Ok(())
}

/// Run a single migration if it hasn't been applied yet
async fn run_migration(
    pool: &SqlitePool,
    id: i32,
    name: &str,
    migration_fn: impl std::future::Future<Output = Result<()>>,
) -> Result<()> {
    let applied: Option<i32> = sqlx::query_scalar("SELECT id FROM _migrations WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    if applied.is_some() {
        return Ok(());
    }

    migration_fn.await?;

    sqlx::query("INSERT INTO _migrations (id, name) VALUES (?, ?)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the authors/books table pair for every shelf in the registry
async fn create_shelf_tables(pool: &SqlitePool) -> Result<()> {
    for shelf in Shelf::ALL {
        let authors = shelf.authors_table();
        let books = shelf.books_table();

        let ddl = format!(
            r#"
-- Parent table: authors on the {slug} shelf
CREATE TABLE IF NOT EXISTS {authors} (
    author_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    birth_year INTEGER,
    country TEXT,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

-- Child table: books on the {slug} shelf
CREATE TABLE IF NOT EXISTS {books} (
    book_id INTEGER PRIMARY KEY AUTOINCREMENT,
    author_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    year_published INTEGER,
    isbn TEXT,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (author_id) REFERENCES {authors}(author_id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_{authors}_name ON {authors}(name);
CREATE INDEX IF NOT EXISTS idx_{books}_author ON {books}(author_id);
CREATE INDEX IF NOT EXISTS idx_{books}_title ON {books}(title);
            "#,
            slug = shelf.slug(),
            authors = authors,
            books = books,
        );

        pool.execute(ddl.as_str()).await?;
    }

    Ok(())
}

/// Seed a handful of rows per shelf so a fresh library renders non-empty pages
///
/// Author names are unique per table and books carry explicit ids, so the
/// `INSERT OR IGNORE` statements are idempotent across restarts.
async fn seed_library(pool: &SqlitePool) -> Result<()> {
    for &(shelf, authors, books) in SEED_ROWS {
        for &(author_id, name, birth_year, country) in authors {
            let sql = format!(
                "INSERT OR IGNORE INTO {} (author_id, name, birth_year, country) VALUES (?, ?, ?, ?)",
                shelf.authors_table()
            );
            sqlx::query(&sql)
                .bind(author_id)
                .bind(name)
                .bind(birth_year)
                .bind(country)
                .execute(pool)
                .await?;
        }

        for &(book_id, author_id, title, year_published) in books {
            let sql = format!(
                "INSERT OR IGNORE INTO {} (book_id, author_id, title, year_published) VALUES (?, ?, ?, ?)",
                shelf.books_table()
            );
            sqlx::query(&sql)
                .bind(book_id)
                .bind(author_id)
                .bind(title)
                .bind(year_published)
                .execute(pool)
                .await?;
        }
    }

    Ok(())
}

type SeedAuthor = (i64, &'static str, i64, &'static str);
type SeedBook = (i64, i64, &'static str, i64);

/// Starter catalog, two authors and a few books per shelf
const SEED_ROWS: &[(Shelf, &[SeedAuthor], &[SeedBook])] = &[
    (
        Shelf::Fiction,
        &[
            (1, "Leo Tolstoy", 1828, "Russia"),
            (2, "Virginia Woolf", 1882, "United Kingdom"),
        ],
        &[
            (1, 1, "War and Peace", 1869),
            (2, 1, "Anna Karenina", 1878),
            (3, 2, "Mrs Dalloway", 1925),
            (4, 2, "To the Lighthouse", 1927),
        ],
    ),
    (
        Shelf::Mystery,
        &[
            (1, "Agatha Christie", 1890, "United Kingdom"),
            (2, "Raymond Chandler", 1888, "United States"),
        ],
        &[
            (1, 1, "Murder on the Orient Express", 1934),
            (2, 1, "And Then There Were None", 1939),
            (3, 2, "The Big Sleep", 1939),
        ],
    ),
    (
        Shelf::SciFi,
        &[
            (1, "Ursula K. Le Guin", 1929, "United States"),
            (2, "Stanislaw Lem", 1921, "Poland"),
        ],
        &[
            (1, 1, "The Left Hand of Darkness", 1969),
            (2, 1, "The Dispossessed", 1974),
            (3, 2, "Solaris", 1961),
        ],
    ),
    (
        Shelf::Biography,
        &[
            (1, "Robert Caro", 1935, "United States"),
            (2, "Hermione Lee", 1948, "United Kingdom"),
        ],
        &[
            (1, 1, "The Power Broker", 1974),
            (2, 2, "Virginia Woolf", 1996),
        ],
    ),
    (
        Shelf::Poetry,
        &[
            (1, "Emily Dickinson", 1830, "United States"),
            (2, "Pablo Neruda", 1904, "Chile"),
        ],
        &[
            (1, 1, "The Complete Poems", 1955),
            (2, 2, "Twenty Love Poems and a Song of Despair", 1924),
        ],
    ),
];
