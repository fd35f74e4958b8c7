//! Database models for Shelfside
//!
//! Row structs for the genre-partitioned shelf tables plus the insert
//! payloads built from submitted forms. Every shelf shares the same column
//! layout, so one set of models serves all ten tables.
//!
//! # SQLite Adaptations
//! - DateTime stored as TEXT (CURRENT_TIMESTAMP default)
//! - Optional columns map to `Option<T>`

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{Result, ShelfError};

/// One row of a `<shelf>_authors` table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AuthorRow {
    pub author_id: i64,
    pub name: String,
    #[sqlx(default)]
    pub birth_year: Option<i64>,
    #[sqlx(default)]
    pub country: Option<String>,
    pub created_at: String,
}

/// One row of a `<shelf>_books` table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BookRow {
    pub book_id: i64,
    pub author_id: i64,
    pub title: String,
    #[sqlx(default)]
    pub year_published: Option<i64>,
    #[sqlx(default)]
    pub isbn: Option<String>,
    pub created_at: String,
}

/// Book row joined with its author's name, for record views
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BookWithAuthor {
    pub book_id: i64,
    pub author_id: i64,
    pub title: String,
    #[sqlx(default)]
    pub year_published: Option<i64>,
    #[sqlx(default)]
    pub isbn: Option<String>,
    pub created_at: String,
    pub author_name: String,
}

/// An id/name pair used to populate the book form's author select
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AuthorOption {
    pub author_id: i64,
    pub name: String,
}

/// Insert payload for an authors table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    pub birth_year: Option<i64>,
    pub country: Option<String>,
}

impl NewAuthor {
    pub fn new(name: String) -> Self {
        Self {
            name,
            birth_year: None,
            country: None,
        }
    }

    /// Build from a submitted form body, validating against the generated
    /// form's field set
    pub fn from_form(fields: &HashMap<String, String>) -> Result<Self> {
        Ok(Self {
            name: required_field(fields, "name")?,
            birth_year: optional_year(fields, "birth_year")?,
            country: optional_field(fields, "country"),
        })
    }
}

/// Insert payload for a books table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub author_id: i64,
    pub title: String,
    pub year_published: Option<i64>,
    pub isbn: Option<String>,
}

impl NewBook {
    pub fn new(author_id: i64, title: String) -> Self {
        Self {
            author_id,
            title,
            year_published: None,
            isbn: None,
        }
    }

    /// Build from a submitted form body
    pub fn from_form(fields: &HashMap<String, String>) -> Result<Self> {
        let author_id = required_field(fields, "author_id")?
            .parse::<i64>()
            .map_err(|_| ShelfError::invalid_input("The 'author' field must be a valid id."))?;

        Ok(Self {
            author_id,
            title: required_field(fields, "title")?,
            year_published: optional_year(fields, "year_published")?,
            isbn: optional_field(fields, "isbn"),
        })
    }
}

fn required_field(fields: &HashMap<String, String>, name: &str) -> Result<String> {
    match fields.get(name).map(|v| v.trim()) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ShelfError::MissingRequiredField(name.to_string())),
    }
}

fn optional_field(fields: &HashMap<String, String>, name: &str) -> Option<String> {
    fields
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

fn optional_year(fields: &HashMap<String, String>, name: &str) -> Result<Option<i64>> {
    match optional_field(fields, name) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ShelfError::invalid_input(format!("'{}' must be a whole number.", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_new_author_from_form() {
        let author = NewAuthor::from_form(&form(&[
            ("name", "  Octavia Butler "),
            ("birth_year", "1947"),
            ("country", "United States"),
        ]))
        .expect("valid form rejected");

        assert_eq!(author.name, "Octavia Butler");
        assert_eq!(author.birth_year, Some(1947));
    }

    #[test]
    fn test_missing_name_rejected() {
        let err = NewAuthor::from_form(&form(&[("name", "   ")])).unwrap_err();
        assert!(matches!(err, ShelfError::MissingRequiredField(ref f) if f == "name"));
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let author =
            NewAuthor::from_form(&form(&[("name", "Anon"), ("birth_year", ""), ("country", "")]))
                .expect("valid form rejected");
        assert_eq!(author.birth_year, None);
        assert_eq!(author.country, None);
    }

    #[test]
    fn test_new_book_requires_numeric_author_id() {
        let err = NewBook::from_form(&form(&[("author_id", "one"), ("title", "T")])).unwrap_err();
        assert!(err.is_client_error());

        let book = NewBook::from_form(&form(&[
            ("author_id", "3"),
            ("title", "Kindred"),
            ("year_published", "1979"),
        ]))
        .expect("valid form rejected");
        assert_eq!(book.author_id, 3);
        assert_eq!(book.year_published, Some(1979));
    }

    #[test]
    fn test_non_numeric_year_rejected() {
        let err = NewBook::from_form(&form(&[
            ("author_id", "1"),
            ("title", "T"),
            ("year_published", "sometime"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ShelfError::InvalidInput(_)));
    }
}
