use std::collections::BTreeMap;

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CredentialsRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct LoginResponse { pub message: String, pub username: String, pub accessToken: String, pub expiresAt: String }

#[derive(ToSchema)]
pub struct ReviewRequest { pub review: String }

#[derive(ToSchema)]
pub struct BookDoc {
    pub isbn: String,
    pub author: String,
    pub title: String,
    pub reviews: BTreeMap<String, String>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
        crate::routes::books::list_books,
        crate::routes::books::get_by_isbn,
        crate::routes::books::find_by_author,
        crate::routes::books::find_by_title,
        crate::routes::books::get_reviews,
        crate::routes::reviews::upsert_review,
        crate::routes::reviews::delete_review,
    ),
    components(
        schemas(
            HealthResponse,
            CredentialsRequest,
            LoginResponse,
            ReviewRequest,
            BookDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "books"),
        (name = "reviews")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_catalog_and_review_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for p in ["/", "/isbn/{isbn}", "/author/{author}", "/title/{title}", "/review/{isbn}", "/register", "/login", "/auth/review/{isbn}"] {
            assert!(paths.contains_key(p), "missing {p}");
        }
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
    }
}
