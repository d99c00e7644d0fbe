//! Plain data model shared by the stores and the HTTP layer.

pub mod errors;
pub mod book;
pub mod user;
pub mod seed;
