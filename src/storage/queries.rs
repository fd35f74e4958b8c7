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


//! Database query functions
//!
//! Repository-style free functions over the shelf tables. Table names are
//! interpolated into SQL, but only from the `&'static str` identifiers the
//! static registry owns; everything request-derived travels as a bound
//! parameter.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::Result;
use crate::shelf::{Shelf, ShelfTable};
use crate::storage::models::{
    AuthorOption, AuthorRow, BookRow, BookWithAuthor, NewAuthor, NewBook,
};

// ============================================================================
// RECORD VIEWS
// ============================================================================

/// List authors on one shelf, ordered by name
pub async fn list_authors(
    pool: &SqlitePool,
    shelf: Shelf,
    limit: i64,
    offset: i64,
) -> Result<Vec<AuthorRow>> {
    let sql = format!(
        "SELECT author_id, name, birth_year, country, created_at \
         FROM {} ORDER BY name LIMIT ? OFFSET ?",
        shelf.authors_table()
    );

    let authors = sqlx::query_as::<_, AuthorRow>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(authors)
}

/// List books on one shelf with their author names, ordered by title
pub async fn list_books(
    pool: &SqlitePool,
    shelf: Shelf,
    limit: i64,
    offset: i64,
) -> Result<Vec<BookWithAuthor>> {
    let sql = format!(
        "SELECT b.book_id, b.author_id, b.title, b.year_published, b.isbn, b.created_at, \
                a.name AS author_name \
         FROM {books} b \
         INNER JOIN {authors} a ON a.author_id = b.author_id \
         ORDER BY b.title LIMIT ? OFFSET ?",
        books = shelf.books_table(),
        authors = shelf.authors_table(),
    );

    let books = sqlx::query_as::<_, BookWithAuthor>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(books)
}

/// Count rows in one shelf/table pair (for pagination)
pub async fn count_rows(pool: &SqlitePool, pair: ShelfTable) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", pair.table_name());
    let count: i64 = sqlx::query_scalar(&sql).fetch_one(pool).await?;

    Ok(count)
}

// ============================================================================
// SEARCH
// ============================================================================

/// An author whose name matched the search, with their books from the
/// shelf's child table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorMatch {
    pub shelf: Shelf,
    pub author: AuthorRow,
    pub books: Vec<BookRow>,
}

/// A book whose title matched the search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookMatch {
    pub shelf: Shelf,
    pub book: BookWithAuthor,
}

/// Combined author/title matches across every shelf
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub authors: Vec<AuthorMatch>,
    pub books: Vec<BookMatch>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty() && self.books.is_empty()
    }

    pub fn total(&self) -> usize {
        self.authors.len() + self.books.len()
    }
}

/// Cap on matches collected per table, per shelf
const SEARCH_LIMIT_PER_TABLE: i64 = 50;

/// Search author names on one shelf
pub async fn search_authors(pool: &SqlitePool, shelf: Shelf, query: &str) -> Result<Vec<AuthorRow>> {
    let sql = format!(
        "SELECT author_id, name, birth_year, country, created_at \
         FROM {} WHERE name LIKE ? ESCAPE '\\' ORDER BY name LIMIT ?",
        shelf.authors_table()
    );

    let authors = sqlx::query_as::<_, AuthorRow>(&sql)
        .bind(like_pattern(query))
        .bind(SEARCH_LIMIT_PER_TABLE)
        .fetch_all(pool)
        .await?;

    Ok(authors)
}

/// Search book titles on one shelf
pub async fn search_books(
    pool: &SqlitePool,
    shelf: Shelf,
    query: &str,
) -> Result<Vec<BookWithAuthor>> {
    let sql = format!(
        "SELECT b.book_id, b.author_id, b.title, b.year_published, b.isbn, b.created_at, \
                a.name AS author_name \
         FROM {books} b \
         INNER JOIN {authors} a ON a.author_id = b.author_id \
         WHERE b.title LIKE ? ESCAPE '\\' ORDER BY b.title LIMIT ?",
        books = shelf.books_table(),
        authors = shelf.authors_table(),
    );

    let books = sqlx::query_as::<_, BookWithAuthor>(&sql)
        .bind(like_pattern(query))
        .bind(SEARCH_LIMIT_PER_TABLE)
        .fetch_all(pool)
        .await?;

    Ok(books)
}

/// Books belonging to one author, via the shelf's parent-to-child mapping
pub async fn books_by_author(
    pool: &SqlitePool,
    shelf: Shelf,
    author_id: i64,
) -> Result<Vec<BookRow>> {
    let sql = format!(
        "SELECT book_id, author_id, title, year_published, isbn, created_at \
         FROM {} WHERE author_id = ? ORDER BY year_published, title",
        shelf.books_table()
    );

    let books = sqlx::query_as::<_, BookRow>(&sql)
        .bind(author_id)
        .fetch_all(pool)
        .await?;

    Ok(books)
}

/// Search authors and titles across every shelf in the registry
///
/// Author matches carry the author's books, resolved through the static
/// authors-to-books table mapping. An author with no books is still a match.
pub async fn search_shelves(pool: &SqlitePool, query: &str) -> Result<SearchResults> {
    let mut results = SearchResults {
        query: query.to_string(),
        authors: Vec::new(),
        books: Vec::new(),
    };

    for shelf in Shelf::ALL {
        for author in search_authors(pool, shelf, query).await? {
            let books = books_by_author(pool, shelf, author.author_id).await?;
            results.authors.push(AuthorMatch {
                shelf,
                author,
                books,
            });
        }

        for book in search_books(pool, shelf, query).await? {
            results.books.push(BookMatch { shelf, book });
        }
    }

    Ok(results)
}

/// Build a LIKE pattern from a raw user query
///
/// `%`, `_` and the escape character itself are escaped so user input only
/// ever matches literally.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

// ============================================================================
// INSERTS
// ============================================================================

/// Insert a new author on one shelf
///
/// Returns the author_id of the inserted row.
pub async fn insert_author(pool: &SqlitePool, shelf: Shelf, author: &NewAuthor) -> Result<i64> {
    let sql = format!(
        "INSERT INTO {} (name, birth_year, country) VALUES (?, ?, ?)",
        shelf.authors_table()
    );

    let result = sqlx::query(&sql)
        .bind(&author.name)
        .bind(author.birth_year)
        .bind(&author.country)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Insert a new book on one shelf
///
/// Returns the book_id of the inserted row. The referenced author must exist
/// on the same shelf; callers should check with [`author_exists`] first for a
/// clean client error instead of a foreign key failure.
pub async fn insert_book(pool: &SqlitePool, shelf: Shelf, book: &NewBook) -> Result<i64> {
    let sql = format!(
        "INSERT INTO {} (author_id, title, year_published, isbn) VALUES (?, ?, ?, ?)",
        shelf.books_table()
    );

    let result = sqlx::query(&sql)
        .bind(book.author_id)
        .bind(&book.title)
        .bind(book.year_published)
        .bind(&book.isbn)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Check whether an author with this exact name is already on one shelf
///
/// The authors tables carry a UNIQUE constraint on name; callers insert only
/// after this check so a duplicate submission reads as a validation problem,
/// not a constraint failure.
pub async fn author_name_exists(pool: &SqlitePool, shelf: Shelf, name: &str) -> Result<bool> {
    let sql = format!(
        "SELECT author_id FROM {} WHERE name = ?",
        shelf.authors_table()
    );

    let found: Option<i64> = sqlx::query_scalar(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

/// Check whether an author exists on one shelf
pub async fn author_exists(pool: &SqlitePool, shelf: Shelf, author_id: i64) -> Result<bool> {
    let sql = format!(
        "SELECT author_id FROM {} WHERE author_id = ?",
        shelf.authors_table()
    );

    let found: Option<i64> = sqlx::query_scalar(&sql)
        .bind(author_id)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

/// List id/name pairs for the book form's author select, ordered by name
pub async fn author_options(pool: &SqlitePool, shelf: Shelf) -> Result<Vec<AuthorOption>> {
    let sql = format!(
        "SELECT author_id, name FROM {} ORDER BY name",
        shelf.authors_table()
    );

    let options = sqlx::query_as::<_, AuthorOption>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(options)
}
