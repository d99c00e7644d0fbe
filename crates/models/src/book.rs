use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Reviews on one book, keyed by the reviewing username.
pub type Reviews = BTreeMap<String, String>;

/// Catalog map key. All-digit ISBNs sort numerically ("8" < "11" < "123") and ahead of
/// any other key; the rest sort as plain strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IsbnKey(String);

impl IsbnKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn digits(&self) -> Option<&str> {
        let s = self.0.as_str();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = s.trim_start_matches('0');
        Some(if trimmed.is_empty() { "0" } else { trimmed })
    }
}

impl Ord for IsbnKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.digits(), other.digits()) {
            // "08" and "8" are distinct keys: equal value falls back to the raw text
            (Some(a), Some(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for IsbnKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for IsbnKey {
    fn from(isbn: &str) -> Self {
        Self(isbn.to_string())
    }
}

impl From<String> for IsbnKey {
    fn from(isbn: String) -> Self {
        Self(isbn)
    }
}

impl fmt::Display for IsbnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog entry. Only `reviews` changes after the catalog is seeded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub author: String,
    pub title: String,
    #[serde(default)]
    pub reviews: Reviews,
}

impl Book {
    pub fn new(isbn: &str, author: &str, title: &str) -> Result<Self, ModelError> {
        validate_isbn(isbn)?;
        if title.trim().is_empty() { return Err(ModelError::Validation(format!("title required for ISBN {isbn}"))); }
        if author.trim().is_empty() { return Err(ModelError::Validation(format!("author required for ISBN {isbn}"))); }
        Ok(Self {
            isbn: isbn.to_string(),
            author: author.to_string(),
            title: title.to_string(),
            reviews: Reviews::new(),
        })
    }

    pub fn key(&self) -> IsbnKey {
        IsbnKey::from(self.isbn.as_str())
    }

    /// Case-insensitive full-string comparison against the author field.
    pub fn author_matches(&self, author: &str) -> bool {
        eq_ignore_case(&self.author, author)
    }

    /// Case-insensitive full-string comparison against the title field.
    pub fn title_matches(&self, title: &str) -> bool {
        eq_ignore_case(&self.title, title)
    }
}

pub fn validate_isbn(isbn: &str) -> Result<(), ModelError> {
    if isbn.trim().is_empty() {
        return Err(ModelError::Validation("isbn required".into()));
    }
    Ok(())
}

// Unicode-aware: "Honoré" must match "HONORÉ".
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
