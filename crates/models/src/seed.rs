//! Catalog seed data: the built-in book list and JSON seed parsing.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::book::{Book, Reviews};
use crate::errors::ModelError;

const BUILTIN: &[(&str, &str, &str)] = &[
    ("1", "Chinua Achebe", "Things Fall Apart"),
    ("2", "Hans Christian Andersen", "Fairy tales"),
    ("3", "Dante Alighieri", "The Divine Comedy"),
    ("4", "Unknown", "The Epic Of Gilgamesh"),
    ("5", "Unknown", "The Book Of Job"),
    ("6", "Unknown", "One Thousand and One Nights"),
    ("7", "Unknown", "Njál's Saga"),
    ("8", "Jane Austen", "Pride and Prejudice"),
    ("9", "Honoré de Balzac", "Le Père Goriot"),
    ("10", "Samuel Beckett", "Molloy, Malone Dies, The Unnamable, the trilogy"),
];

/// The books the service starts with when no seed file is configured.
pub fn builtin_books() -> Vec<Book> {
    BUILTIN
        .iter()
        .map(|(isbn, author, title)| Book {
            isbn: isbn.to_string(),
            author: author.to_string(),
            title: title.to_string(),
            reviews: Reviews::new(),
        })
        .collect()
}

#[derive(Deserialize)]
struct SeedEntry {
    author: String,
    title: String,
    #[serde(default)]
    reviews: Reviews,
}

/// Parse a seed document shaped as `{"<isbn>": {"author": .., "title": .., "reviews": {..}}}`.
pub fn parse_seed(json: &str) -> Result<Vec<Book>, ModelError> {
    let raw: BTreeMap<String, SeedEntry> =
        serde_json::from_str(json).map_err(|e| ModelError::Seed(e.to_string()))?;
    let mut books = Vec::with_capacity(raw.len());
    for (isbn, entry) in raw {
        let mut book = Book::new(&isbn, &entry.author, &entry.title)?;
        book.reviews = entry.reviews;
        books.push(book);
    }
    debug!(count = books.len(), "parsed catalog seed");
    Ok(books)
}
