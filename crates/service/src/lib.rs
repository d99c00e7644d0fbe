//! Service layer: in-memory stores and auth workflows behind the HTTP surface.
//! - `accounts` and `catalog` own their maps; callers hold them by `Arc`.
//! - `auth` issues and verifies bearer credentials.
//! - Errors are `ServiceError`, mapped to statuses by the server crate.

pub mod errors;
pub mod storage;
pub mod accounts;
pub mod catalog;
pub mod auth;
pub mod runtime;
