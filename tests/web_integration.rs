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


//! End-to-end tests driving the router the way a browser would:
//! request in, rendered HTML out.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use shelfside::storage::Database;
use shelfside::web::{build_router, AppState};

async fn test_app() -> Router {
    let db = Database::new_in_memory()
        .await
        .expect("Failed to create in-memory database");
    build_router(AppState::new(db))
}

async fn get_body(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("request failed");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    (status, String::from_utf8(bytes.to_vec()).expect("non-utf8 body"))
}

async fn post_form(app: &Router, uri: &str, body: &str) -> StatusCode {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .expect("request failed");
    response.status()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let app = test_app().await;
    let (status, body) = get_body(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn picker_links_every_shelf_table_pair() {
    let app = test_app().await;
    let (status, body) = get_body(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    for slug in ["fiction", "mystery", "scifi", "biography", "poetry"] {
        assert!(body.contains(&format!("/browse/{}/authors", slug)));
        assert!(body.contains(&format!("/browse/{}/books", slug)));
    }
}

#[tokio::test]
async fn browse_renders_book_records_with_authors() {
    let app = test_app().await;
    let (status, body) = get_body(&app, "/browse/scifi/books").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Solaris"));
    assert!(body.contains("Stanislaw Lem"));
}

#[tokio::test]
async fn browse_unknown_shelf_renders_404_page() {
    let app = test_app().await;
    let (status, body) = get_body(&app, "/browse/cookbooks/authors").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("cookbooks"));
}

#[tokio::test]
async fn browse_survives_extreme_page_numbers() {
    let app = test_app().await;
    let (status, body) = get_body(
        &app,
        "/browse/fiction/authors?page=9223372036854775807",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("Leo Tolstoy"));
}

#[tokio::test]
async fn search_crosses_shelves_and_expands_author_hits() {
    let app = test_app().await;
    let (status, body) = get_body(&app, "/search?q=Virginia%20Woolf").await;
    assert_eq!(status, StatusCode::OK);
    // Author hit on the fiction shelf brings her books along
    assert!(body.contains("To the Lighthouse"));
    // Title hit on the biography shelf
    assert!(body.contains("Hermione Lee"));
}

#[tokio::test]
async fn search_without_query_renders_bare_form() {
    let app = test_app().await;
    let (status, body) = get_body(&app, "/search").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("name=\"q\""));
}

#[tokio::test]
async fn insert_form_roundtrip_for_authors_and_books() {
    let app = test_app().await;

    // The generated author form renders its static columns
    let (status, form) = get_body(&app, "/add/poetry/authors").await;
    assert_eq!(status, StatusCode::OK);
    assert!(form.contains("name=\"name\""));

    // Submit an author; POST redirects to the browse page
    let status = post_form(
        &app,
        "/add/poetry/authors",
        "name=Wislawa+Szymborska&birth_year=1923&country=Poland",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, body) = get_body(&app, "/browse/poetry/authors").await;
    assert!(body.contains("Wislawa Szymborska"));

    // The book form's author select now offers the new author
    let (_, form) = get_body(&app, "/add/poetry/books").await;
    assert!(form.contains("Wislawa Szymborska"));
}

#[tokio::test]
async fn insert_with_missing_required_field_is_rejected() {
    let app = test_app().await;
    let status = post_form(&app, "/add/fiction/authors", "birth_year=1900").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn inserted_records_are_escaped_when_rendered() {
    let app = test_app().await;
    let status = post_form(
        &app,
        "/add/fiction/authors",
        "name=%3Cscript%3Ealert(1)%3C%2Fscript%3E",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, body) = get_body(&app, "/browse/fiction/authors").await;
    assert!(!body.contains("<script>alert"));
    assert!(body.contains("&lt;script&gt;"));
}
