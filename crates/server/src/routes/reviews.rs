use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use service::auth::domain::Claims;
use service::catalog::UpsertOutcome;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct ReviewInput {
    #[serde(default)]
    pub review: Option<String>,
}

#[derive(Serialize)]
pub struct UpsertOutput {
    pub message: &'static str,
    pub outcome: UpsertOutcome,
    pub isbn: String,
    pub username: String,
    pub review: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutput {
    pub message: &'static str,
    pub isbn: String,
    pub username: String,
    pub deleted_review: String,
}

/// Add or replace the caller's review; the reviewer is the verified token subject.
#[utoipa::path(put, path = "/auth/review/{isbn}", tag = "reviews", security(("bearer" = [])), params(("isbn" = String, Path, description = "Book ISBN")), request_body = crate::openapi::ReviewRequest, responses((status = 200, description = "Created or updated"), (status = 400, description = "Missing review text"), (status = 401, description = "Not logged in"), (status = 403, description = "Invalid or expired token"), (status = 404, description = "Unknown ISBN")))]
pub async fn upsert_review(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Path(isbn): Path<String>,
    body: Result<Json<ReviewInput>, JsonRejection>,
) -> Result<Json<UpsertOutput>, JsonApiError> {
    let Json(input) = body?;
    let review = input.review.unwrap_or_default();
    let outcome = state.catalog.upsert_review(&isbn, &claims.sub, &review).await?;
    Ok(Json(UpsertOutput { message: outcome.message(), outcome, isbn, username: claims.sub, review }))
}

#[utoipa::path(delete, path = "/auth/review/{isbn}", tag = "reviews", security(("bearer" = [])), params(("isbn" = String, Path, description = "Book ISBN")), responses((status = 200, description = "Deleted"), (status = 401, description = "Not logged in"), (status = 403, description = "Invalid or expired token"), (status = 404, description = "Unknown ISBN or no review by caller")))]
pub async fn delete_review(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Path(isbn): Path<String>,
) -> Result<Json<DeleteOutput>, JsonApiError> {
    let deleted = state.catalog.delete_review(&isbn, &claims.sub).await?;
    Ok(Json(DeleteOutput {
        message: "Review deleted successfully",
        isbn,
        username: claims.sub,
        deleted_review: deleted,
    }))
}
