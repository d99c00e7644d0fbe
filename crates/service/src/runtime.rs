//! Runtime environment helpers
//!
//! Builds the catalog at startup from the configured seed file or the built-in list.

use models::seed::{builtin_books, parse_seed};
use tracing::{error, info};

use crate::catalog::CatalogStore;

/// Load the catalog seed. A configured but unreadable or malformed seed leaves the
/// catalog uninitialized so catalog routes answer 500 instead of the process exiting.
pub async fn load_catalog(seed_path: Option<&str>) -> CatalogStore {
    let use_file = match common::env::ensure_seed_file(seed_path).await {
        Ok(found) => found,
        Err(e) => {
            error!(error = %e, "catalog seed path unusable");
            return CatalogStore::uninitialized();
        }
    };
    if !use_file {
        let books = builtin_books();
        info!(count = books.len(), source = "builtin", "catalog seeded");
        return CatalogStore::seeded(books);
    }

    let path = seed_path.unwrap_or_default();
    let content = match tokio::fs::read_to_string(path).await {
        Ok(c) => c,
        Err(e) => {
            error!(%path, error = %e, "cannot read catalog seed");
            return CatalogStore::uninitialized();
        }
    };
    match parse_seed(&content) {
        Ok(books) => {
            info!(count = books.len(), source = %path, "catalog seeded");
            CatalogStore::seeded(books)
        }
        Err(e) => {
            error!(%path, error = %e, "invalid catalog seed");
            CatalogStore::uninitialized()
        }
    }
}
