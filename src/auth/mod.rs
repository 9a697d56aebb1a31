//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Token codec (reversible encoding of identity claims)
//! - Login and registration endpoints
//! - AuthedUser extractor for protected handlers

pub mod codec;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;

#[cfg(test)]
mod tests;

pub use extractors::AuthedUser;
pub use models::{Claim, User};
pub use routes::auth_routes;
