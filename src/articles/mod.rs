//! # Articles Module
//!
//! Server-side HTML retrieval for user-supplied article URLs, working
//! around browser CORS and bot blocking. A fixed ladder of header profiles
//! is tried in order until one succeeds.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;


pub use routes::articles_routes;
