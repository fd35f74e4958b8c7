//! Server-rendered HTML pages
//!
//! Pages are assembled with `format!` over a shared layout. Everything that
//! originates in the database or a request is passed through [`escape`]
//! before it reaches markup.

use chrono::Utc;

use crate::shelf::{InputKind, ShelfTable, TableKind};
use crate::storage::models::{AuthorOption, AuthorRow, BookWithAuthor};
use crate::storage::queries::SearchResults;
use crate::web::handlers::ShelfSummary;
use crate::web::PAGE_SIZE;

/// HTML-escape a text fragment
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Shared page chrome: header, nav, footer
fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Shelfside</title>
<style>
body {{ font-family: Georgia, serif; max-width: 56rem; margin: 1rem auto; padding: 0 1rem; color: #222; }}
nav a {{ margin-right: 1rem; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: left; }}
th {{ background: #f4f1ea; }}
form.insert label {{ display: block; margin-top: 0.6rem; }}
footer {{ margin-top: 2rem; font-size: 0.8rem; color: #888; }}
.muted {{ color: #888; }}
</style>
</head>
<body>
<nav><a href="/">Shelves</a><a href="/search">Search</a></nav>
<h1>{title}</h1>
{body}
<footer>Shelfside &middot; rendered {stamp}</footer>
</body>
</html>
"#,
        title = escape(title),
        body = body,
        stamp = Utc::now().format("%Y-%m-%d %H:%M UTC"),
    )
}

/// The shelf/table picker
pub fn index_page(summaries: &[ShelfSummary]) -> String {
    let mut rows = String::new();
    for summary in summaries {
        let slug = summary.shelf.slug();
        rows.push_str(&format!(
            "<tr><td>{name}</td>\
             <td><a href=\"/browse/{slug}/authors\">authors</a> ({authors})</td>\
             <td><a href=\"/browse/{slug}/books\">books</a> ({books})</td></tr>\n",
            name = escape(summary.shelf.display_name()),
            slug = slug,
            authors = summary.author_count,
            books = summary.book_count,
        ));
    }

    let body = format!(
        "<p>Pick a shelf and a table to browse, or <a href=\"/search\">search</a> \
         authors and titles across every shelf.</p>\n\
         <table><tr><th>Shelf</th><th>Authors</th><th>Books</th></tr>\n{}</table>",
        rows
    );

    layout("Library shelves", &body)
}

fn opt_num(value: Option<i64>) -> String {
    value.map_or_else(|| "&ndash;".to_string(), |v| v.to_string())
}

fn opt_text(value: Option<&str>) -> String {
    value.map_or_else(|| "&ndash;".to_string(), escape)
}

/// Previous/next links plus the add-record link for a browse page
fn browse_footer(pair: ShelfTable, page: i64, total: i64) -> String {
    let mut nav = String::from("<p>");
    if page > 1 {
        nav.push_str(&format!(
            "<a href=\"/browse/{}/{}?page={}\">&laquo; previous</a> ",
            pair.shelf.slug(),
            pair.kind.slug(),
            page - 1
        ));
    }
    if page.saturating_mul(PAGE_SIZE) < total {
        nav.push_str(&format!(
            "<a href=\"/browse/{}/{}?page={}\">next &raquo;</a> ",
            pair.shelf.slug(),
            pair.kind.slug(),
            page + 1
        ));
    }
    nav.push_str(&format!(
        "<span class=\"muted\">page {} &middot; {} records</span></p>\n\
         <p><a href=\"/add/{}/{}\">Add a record</a></p>",
        page,
        total,
        pair.shelf.slug(),
        pair.kind.slug(),
    ));
    nav
}

/// Record view for an authors table
pub fn authors_page(pair: ShelfTable, rows: &[AuthorRow], page: i64, total: i64) -> String {
    let mut table = String::from(
        "<table><tr><th>Name</th><th>Born</th><th>Country</th><th>Added</th></tr>\n",
    );
    for row in rows {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&row.name),
            opt_num(row.birth_year),
            opt_text(row.country.as_deref()),
            escape(&row.created_at),
        ));
    }
    table.push_str("</table>\n");

    if rows.is_empty() {
        table.push_str("<p class=\"muted\">This shelf has no authors yet.</p>\n");
    }
    table.push_str(&browse_footer(pair, page, total));

    layout(&pair.display_name(), &table)
}

/// Record view for a books table
pub fn books_page(pair: ShelfTable, rows: &[BookWithAuthor], page: i64, total: i64) -> String {
    let mut table = String::from(
        "<table><tr><th>Title</th><th>Author</th><th>Year</th><th>ISBN</th></tr>\n",
    );
    for row in rows {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&row.title),
            escape(&row.author_name),
            opt_num(row.year_published),
            opt_text(row.isbn.as_deref()),
        ));
    }
    table.push_str("</table>\n");

    if rows.is_empty() {
        table.push_str("<p class=\"muted\">This shelf has no books yet.</p>\n");
    }
    table.push_str(&browse_footer(pair, page, total));

    layout(&pair.display_name(), &table)
}

/// Search form plus, when a query ran, grouped author and title matches
pub fn search_page(results: Option<&SearchResults>) -> String {
    let query = results.map(|r| r.query.as_str()).unwrap_or("");
    let mut body = format!(
        "<form action=\"/search\" method=\"get\">\
         <input type=\"text\" name=\"q\" value=\"{}\" placeholder=\"Author or title\">\
         <button type=\"submit\">Search</button></form>\n",
        escape(query)
    );

    let Some(results) = results else {
        return layout("Search the library", &body);
    };

    if results.is_empty() {
        body.push_str(&format!(
            "<p>No authors or titles match '{}' on any shelf.</p>",
            escape(&results.query)
        ));
        return layout("Search the library", &body);
    }

    body.push_str(&format!("<p>{} matches.</p>\n", results.total()));

    if !results.authors.is_empty() {
        body.push_str("<h2>Authors</h2>\n");
        for m in &results.authors {
            body.push_str(&format!(
                "<h3>{} <span class=\"muted\">({} shelf)</span></h3>\n",
                escape(&m.author.name),
                escape(m.shelf.display_name()),
            ));
            if m.books.is_empty() {
                body.push_str("<p class=\"muted\">No books on this shelf yet.</p>\n");
            } else {
                body.push_str("<ul>\n");
                for book in &m.books {
                    body.push_str(&format!(
                        "<li>{} ({})</li>\n",
                        escape(&book.title),
                        opt_num(book.year_published),
                    ));
                }
                body.push_str("</ul>\n");
            }
        }
    }

    if !results.books.is_empty() {
        body.push_str("<h2>Titles</h2>\n<ul>\n");
        for m in &results.books {
            body.push_str(&format!(
                "<li>{} &mdash; {} <span class=\"muted\">({} shelf)</span></li>\n",
                escape(&m.book.title),
                escape(&m.book.author_name),
                escape(m.shelf.display_name()),
            ));
        }
        body.push_str("</ul>\n");
    }

    layout("Search the library", &body)
}

/// Insert form generated from the pair's static column metadata
pub fn add_form_page(pair: ShelfTable, author_options: &[AuthorOption]) -> String {
    let mut fields = String::new();
    for column in pair.columns() {
        let required = if column.required { " required" } else { "" };
        match column.input {
            InputKind::Text => fields.push_str(&format!(
                "<label>{label}\
                 <input type=\"text\" name=\"{name}\"{required}></label>\n",
                label = escape(column.label),
                name = column.name,
                required = required,
            )),
            InputKind::Number => fields.push_str(&format!(
                "<label>{label}\
                 <input type=\"number\" name=\"{name}\"{required}></label>\n",
                label = escape(column.label),
                name = column.name,
                required = required,
            )),
            InputKind::AuthorSelect => {
                fields.push_str(&format!(
                    "<label>{label}<select name=\"{name}\"{required}>\n",
                    label = escape(column.label),
                    name = column.name,
                    required = required,
                ));
                for option in author_options {
                    fields.push_str(&format!(
                        "<option value=\"{}\">{}</option>\n",
                        option.author_id,
                        escape(&option.name),
                    ));
                }
                fields.push_str("</select></label>\n");
            }
        }
    }

    let mut body = format!(
        "<form class=\"insert\" action=\"/add/{}/{}\" method=\"post\">\n\
         {}\n<p><button type=\"submit\">Add record</button></p></form>",
        pair.shelf.slug(),
        pair.kind.slug(),
        fields,
    );

    if pair.kind == TableKind::Books && author_options.is_empty() {
        body = format!(
            "<p>This shelf has no authors yet; <a href=\"/add/{}/authors\">add one</a> \
             before adding books.</p>\n{}",
            pair.shelf.slug(),
            body
        );
    }

    layout(&format!("Add to {}", pair.display_name()), &body)
}

/// Error page shown for any failed request
pub fn error_page(status: u16, message: &str) -> String {
    let body = format!(
        "<p>{}</p>\n<p><a href=\"/\">Back to the shelves</a></p>",
        escape(message)
    );
    layout(&format!("Error {}", status), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shelf::Shelf;

    #[test]
    fn test_escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<b>"war" & 'peace'</b>"#),
            "&lt;b&gt;&quot;war&quot; &amp; &#39;peace&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_author_rows_are_escaped() {
        let pair = ShelfTable::new(Shelf::Fiction, TableKind::Authors);
        let rows = vec![AuthorRow {
            author_id: 1,
            name: "<script>alert(1)</script>".to_string(),
            birth_year: None,
            country: None,
            created_at: "2025-01-01".to_string(),
        }];
        let page = authors_page(pair, &rows, 1, 1);
        assert!(!page.contains("<script>alert"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_pagination_links() {
        let pair = ShelfTable::new(Shelf::Mystery, TableKind::Books);
        // Middle page: both directions
        let page = books_page(pair, &[], 2, 100);
        assert!(page.contains("/browse/mystery/books?page=1"));
        assert!(page.contains("/browse/mystery/books?page=3"));
        // First page of a short table: neither
        let page = books_page(pair, &[], 1, 3);
        assert!(!page.contains("?page=0"));
        assert!(!page.contains("?page=2"));
    }

    #[test]
    fn test_footer_handles_extreme_page_numbers() {
        let pair = ShelfTable::new(Shelf::Mystery, TableKind::Books);
        let page = books_page(pair, &[], i64::MAX, 100);
        // No next link and no overflow computing the comparison
        assert!(!page.contains("next &raquo;"));
        assert!(page.contains("&laquo; previous"));
    }

    #[test]
    fn test_generated_author_form_fields() {
        let pair = ShelfTable::new(Shelf::Poetry, TableKind::Authors);
        let page = add_form_page(pair, &[]);
        assert!(page.contains("name=\"name\""));
        assert!(page.contains("name=\"birth_year\""));
        assert!(page.contains("name=\"country\""));
        assert!(page.contains("action=\"/add/poetry/authors\""));
    }

    #[test]
    fn test_book_form_renders_author_select() {
        let pair = ShelfTable::new(Shelf::SciFi, TableKind::Books);
        let options = vec![AuthorOption {
            author_id: 7,
            name: "Ursula K. Le Guin".to_string(),
        }];
        let page = add_form_page(pair, &options);
        assert!(page.contains("<select name=\"author_id\""));
        assert!(page.contains("value=\"7\""));
        assert!(page.contains("Ursula K. Le Guin"));
    }

    #[test]
    fn test_empty_shelf_book_form_points_at_authors() {
        let pair = ShelfTable::new(Shelf::SciFi, TableKind::Books);
        let page = add_form_page(pair, &[]);
        assert!(page.contains("/add/scifi/authors"));
    }
}
