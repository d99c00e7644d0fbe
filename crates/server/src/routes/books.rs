use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use models::book::{Book, IsbnKey, Reviews};
use service::catalog::by_isbn;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

/// Full catalog keyed by ISBN
#[utoipa::path(get, path = "/", tag = "books", responses((status = 200, description = "Catalog keyed by ISBN"), (status = 500, description = "Catalog unavailable")))]
pub async fn list_books(State(state): State<ServerState>) -> Result<Json<BTreeMap<IsbnKey, Book>>, JsonApiError> {
    let books = state.catalog.list_all().await?;
    info!(count = books.len(), "list books");
    Ok(Json(by_isbn(books)))
}

#[utoipa::path(get, path = "/isbn/{isbn}", tag = "books", params(("isbn" = String, Path, description = "Book ISBN")), responses((status = 200, description = "Book", body = crate::openapi::BookDoc), (status = 404, description = "Unknown ISBN")))]
pub async fn get_by_isbn(
    State(state): State<ServerState>,
    Path(isbn): Path<String>,
) -> Result<Json<Book>, JsonApiError> {
    Ok(Json(state.catalog.get_by_isbn(&isbn).await?))
}

#[utoipa::path(get, path = "/author/{author}", tag = "books", params(("author" = String, Path, description = "Author, matched ignoring case")), responses((status = 200, description = "Matches keyed by ISBN"), (status = 404, description = "No match")))]
pub async fn find_by_author(
    State(state): State<ServerState>,
    Path(author): Path<String>,
) -> Result<Json<BTreeMap<IsbnKey, Book>>, JsonApiError> {
    Ok(Json(by_isbn(state.catalog.find_by_author(&author).await?)))
}

#[utoipa::path(get, path = "/title/{title}", tag = "books", params(("title" = String, Path, description = "Title, matched ignoring case")), responses((status = 200, description = "Matches keyed by ISBN"), (status = 404, description = "No match")))]
pub async fn find_by_title(
    State(state): State<ServerState>,
    Path(title): Path<String>,
) -> Result<Json<BTreeMap<IsbnKey, Book>>, JsonApiError> {
    Ok(Json(by_isbn(state.catalog.find_by_title(&title).await?)))
}

#[utoipa::path(get, path = "/review/{isbn}", tag = "books", params(("isbn" = String, Path, description = "Book ISBN")), responses((status = 200, description = "Reviews keyed by username"), (status = 404, description = "Unknown ISBN")))]
pub async fn get_reviews(
    State(state): State<ServerState>,
    Path(isbn): Path<String>,
) -> Result<Json<Reviews>, JsonApiError> {
    Ok(Json(state.catalog.get_reviews(&isbn).await?))
}
