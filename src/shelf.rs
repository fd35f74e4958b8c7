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


//! Static shelf registry
//!
//! The library is hand-partitioned into genre shelves. Each shelf owns a
//! parent authors table and a child books table, and this module is the only
//! source of those SQL identifiers: every table name used anywhere in the
//! crate is a `&'static str` constant resolved here. Request input (shelf
//! slugs, table kinds) is parsed against the registry and rejected before it
//! can reach a query string.
//!
//! The registry also carries the static column metadata the web layer uses
//! to generate insert forms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShelfError};

/// A genre shelf - one hand-partitioned slice of the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shelf {
    Fiction,
    Mystery,
    SciFi,
    Biography,
    Poetry,
}

impl Shelf {
    /// All shelves, in display order
    pub const ALL: [Shelf; 5] = [
        Shelf::Fiction,
        Shelf::Mystery,
        Shelf::SciFi,
        Shelf::Biography,
        Shelf::Poetry,
    ];

    /// URL slug for this shelf
    pub fn slug(&self) -> &'static str {
        match self {
            Shelf::Fiction => "fiction",
            Shelf::Mystery => "mystery",
            Shelf::SciFi => "scifi",
            Shelf::Biography => "biography",
            Shelf::Poetry => "poetry",
        }
    }

    /// Human-readable shelf name
    pub fn display_name(&self) -> &'static str {
        match self {
            Shelf::Fiction => "Fiction",
            Shelf::Mystery => "Mystery",
            Shelf::SciFi => "Science Fiction",
            Shelf::Biography => "Biography",
            Shelf::Poetry => "Poetry",
        }
    }

    /// SQL identifier of this shelf's parent authors table
    pub fn authors_table(&self) -> &'static str {
        match self {
            Shelf::Fiction => "fiction_authors",
            Shelf::Mystery => "mystery_authors",
            Shelf::SciFi => "scifi_authors",
            Shelf::Biography => "biography_authors",
            Shelf::Poetry => "poetry_authors",
        }
    }

    /// SQL identifier of this shelf's child books table
    ///
    /// This is the parent-to-child mapping: an author hit on
    /// [`Shelf::authors_table`] finds its books here.
    pub fn books_table(&self) -> &'static str {
        match self {
            Shelf::Fiction => "fiction_books",
            Shelf::Mystery => "mystery_books",
            Shelf::SciFi => "scifi_books",
            Shelf::Biography => "biography_books",
            Shelf::Poetry => "poetry_books",
        }
    }
}

impl FromStr for Shelf {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self> {
        Shelf::ALL
            .into_iter()
            .find(|shelf| shelf.slug() == s)
            .ok_or_else(|| ShelfError::UnknownShelf(s.to_string()))
    }
}

impl fmt::Display for Shelf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Which member of a shelf's table pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableKind {
    Authors,
    Books,
}

impl TableKind {
    /// URL slug for this table kind
    pub fn slug(&self) -> &'static str {
        match self {
            TableKind::Authors => "authors",
            TableKind::Books => "books",
        }
    }
}

impl FromStr for TableKind {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "authors" => Ok(TableKind::Authors),
            "books" => Ok(TableKind::Books),
            other => Err(ShelfError::UnknownTable(other.to_string())),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A validated shelf/table pair
///
/// The only way to turn request bytes into a concrete table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfTable {
    pub shelf: Shelf,
    pub kind: TableKind,
}

impl ShelfTable {
    pub fn new(shelf: Shelf, kind: TableKind) -> Self {
        Self { shelf, kind }
    }

    /// Parse a shelf slug and table kind slug from a request path
    pub fn parse(shelf: &str, kind: &str) -> Result<Self> {
        Ok(Self {
            shelf: shelf.parse()?,
            kind: kind.parse()?,
        })
    }

    /// Concrete SQL identifier for this pair
    pub fn table_name(&self) -> &'static str {
        match self.kind {
            TableKind::Authors => self.shelf.authors_table(),
            TableKind::Books => self.shelf.books_table(),
        }
    }

    /// Static column metadata used to generate this pair's insert form
    pub fn columns(&self) -> &'static [ColumnSpec] {
        match self.kind {
            TableKind::Authors => AUTHOR_COLUMNS,
            TableKind::Books => BOOK_COLUMNS,
        }
    }

    /// Human-readable name, e.g. "Science Fiction authors"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.shelf.display_name(), self.kind.slug())
    }
}

/// How a form field should be rendered and parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Free text input
    Text,
    /// Integer input
    Number,
    /// Select populated from the shelf's parent authors table
    AuthorSelect,
}

/// One column of a shelf table, as seen by the generated insert form
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    /// Column / form field name
    pub name: &'static str,
    /// Label shown next to the form input
    pub label: &'static str,
    pub input: InputKind,
    pub required: bool,
}

/// Insertable columns of every `<shelf>_authors` table
pub const AUTHOR_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        name: "name",
        label: "Name",
        input: InputKind::Text,
        required: true,
    },
    ColumnSpec {
        name: "birth_year",
        label: "Birth year",
        input: InputKind::Number,
        required: false,
    },
    ColumnSpec {
        name: "country",
        label: "Country",
        input: InputKind::Text,
        required: false,
    },
];

/// Insertable columns of every `<shelf>_books` table
pub const BOOK_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        name: "author_id",
        label: "Author",
        input: InputKind::AuthorSelect,
        required: true,
    },
    ColumnSpec {
        name: "title",
        label: "Title",
        input: InputKind::Text,
        required: true,
    },
    ColumnSpec {
        name: "year_published",
        label: "Year published",
        input: InputKind::Number,
        required: false,
    },
    ColumnSpec {
        name: "isbn",
        label: "ISBN",
        input: InputKind::Text,
        required: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shelf_has_distinct_table_pair() {
        let mut seen = std::collections::HashSet::new();
        for shelf in Shelf::ALL {
            assert!(seen.insert(shelf.authors_table()));
            assert!(seen.insert(shelf.books_table()));
        }
        assert_eq!(seen.len(), Shelf::ALL.len() * 2);
    }

    #[test]
    fn test_slug_round_trip() {
        for shelf in Shelf::ALL {
            assert_eq!(shelf.slug().parse::<Shelf>().unwrap(), shelf);
        }
        assert_eq!("authors".parse::<TableKind>().unwrap(), TableKind::Authors);
        assert_eq!("books".parse::<TableKind>().unwrap(), TableKind::Books);
    }

    #[test]
    fn test_unknown_slugs_rejected() {
        assert!(matches!(
            "western".parse::<Shelf>(),
            Err(ShelfError::UnknownShelf(_))
        ));
        assert!(matches!(
            ShelfTable::parse("fiction", "movies"),
            Err(ShelfError::UnknownTable(_))
        ));
        // Interpolation attempts never resolve to an identifier
        assert!(ShelfTable::parse("fiction; DROP TABLE fiction_books", "authors").is_err());
    }

    #[test]
    fn test_table_name_resolution() {
        let pair = ShelfTable::parse("scifi", "books").unwrap();
        assert_eq!(pair.table_name(), "scifi_books");
        assert_eq!(pair.shelf.authors_table(), "scifi_authors");
    }

    #[test]
    fn test_form_columns_match_kind() {
        let authors = ShelfTable::new(Shelf::Poetry, TableKind::Authors);
        assert!(authors.columns().iter().any(|c| c.name == "name"));
        let books = ShelfTable::new(Shelf::Poetry, TableKind::Books);
        assert!(books
            .columns()
            .iter()
            .any(|c| c.input == InputKind::AuthorSelect));
    }
}
