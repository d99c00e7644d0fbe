//! Auth module: bearer credential issuing/verification and the login workflow.
//!
//! Tokens are HS256 JWTs; nothing about them is stored server-side.

pub mod domain;
pub mod errors;
pub mod service;
pub mod token;

pub use service::AuthService;
pub use token::TokenIssuer;
