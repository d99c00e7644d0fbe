//! Storage abstractions for service layer
//!
//! In-process keyed maps shared by the account and catalog stores.

pub mod map_store;
