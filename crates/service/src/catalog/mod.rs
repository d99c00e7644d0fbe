//! Catalog store: books keyed by ISBN, each carrying its per-user reviews.
//!
//! Books are fixed once seeded. Only the review sub-map mutates.

use std::collections::BTreeMap;

use models::book::{Book, IsbnKey, Reviews};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::errors::ServiceError;
use crate::storage::map_store::MapStore;

/// Whether an upsert wrote a new review or replaced an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl UpsertOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            UpsertOutcome::Created => "Review added successfully",
            UpsertOutcome::Updated => "Review modified successfully",
        }
    }
}

#[derive(Clone)]
pub struct CatalogStore {
    books: Option<MapStore<IsbnKey, Book>>,
}

impl CatalogStore {
    pub fn seeded<I: IntoIterator<Item = Book>>(books: I) -> Self {
        let store = MapStore::from_entries(books.into_iter().map(|b| (b.key(), b)));
        Self { books: Some(store) }
    }

    /// Catalog whose seed failed to load; every operation reports `Unavailable`.
    pub fn uninitialized() -> Self {
        Self { books: None }
    }

    pub fn is_available(&self) -> bool {
        self.books.is_some()
    }

    fn books(&self) -> Result<&MapStore<IsbnKey, Book>, ServiceError> {
        self.books.as_ref().ok_or_else(|| {
            warn!("catalog accessed before it was seeded");
            ServiceError::Unavailable("Books data not available".into())
        })
    }

    /// Every book, numeric ISBNs in numeric order.
    pub async fn list_all(&self) -> Result<Vec<Book>, ServiceError> {
        Ok(self.books()?.values().await)
    }

    pub async fn get_by_isbn(&self, isbn: &str) -> Result<Book, ServiceError> {
        self.books()?
            .get(&IsbnKey::from(isbn))
            .await
            .ok_or_else(|| ServiceError::not_found(format!("Book not found for ISBN: {isbn}")))
    }

    /// Books whose author equals `author`, ignoring case. No match is `NotFound`.
    #[instrument(skip(self))]
    pub async fn find_by_author(&self, author: &str) -> Result<Vec<Book>, ServiceError> {
        let found = self.books()?.filter_values(|b| b.author_matches(author)).await;
        debug!(count = found.len(), "author search");
        if found.is_empty() {
            return Err(ServiceError::not_found(format!("No books found for author: {author}")));
        }
        Ok(found)
    }

    /// Books whose title equals `title`, ignoring case. No match is `NotFound`.
    #[instrument(skip(self))]
    pub async fn find_by_title(&self, title: &str) -> Result<Vec<Book>, ServiceError> {
        let found = self.books()?.filter_values(|b| b.title_matches(title)).await;
        debug!(count = found.len(), "title search");
        if found.is_empty() {
            return Err(ServiceError::not_found(format!("No books found with title: {title}")));
        }
        Ok(found)
    }

    pub async fn get_reviews(&self, isbn: &str) -> Result<Reviews, ServiceError> {
        Ok(self.get_by_isbn(isbn).await?.reviews)
    }

    #[instrument(skip(self, text))]
    pub async fn upsert_review(&self, isbn: &str, username: &str, text: &str) -> Result<UpsertOutcome, ServiceError> {
        if text.is_empty() {
            return Err(ServiceError::invalid("Review content is required"));
        }
        let key = IsbnKey::from(isbn);
        let outcome = self
            .books()?
            .update_map(|m| {
                let book = m
                    .get_mut(&key)
                    .ok_or_else(|| ServiceError::not_found(format!("Book with ISBN {isbn} not found")))?;
                let previous = book.reviews.insert(username.to_string(), text.to_string());
                Ok(if previous.is_some() { UpsertOutcome::Updated } else { UpsertOutcome::Created })
            })
            .await?;
        info!(?outcome, "review_upserted");
        Ok(outcome)
    }

    /// Remove `username`'s review on `isbn` and return its text.
    #[instrument(skip(self))]
    pub async fn delete_review(&self, isbn: &str, username: &str) -> Result<String, ServiceError> {
        let key = IsbnKey::from(isbn);
        let removed = self
            .books()?
            .update_map(|m| {
                let book = m
                    .get_mut(&key)
                    .ok_or_else(|| ServiceError::not_found(format!("Book with ISBN {isbn} not found")))?;
                book.reviews
                    .remove(username)
                    .ok_or_else(|| ServiceError::not_found(format!("You have not reviewed the book with ISBN {isbn}")))
            })
            .await?;
        info!("review_deleted");
        Ok(removed)
    }
}

/// Key a result set by ISBN, the shape the catalog endpoints return.
pub fn by_isbn(books: Vec<Book>) -> BTreeMap<IsbnKey, Book> {
    books.into_iter().map(|b| (b.key(), b)).collect()
}
