//! # Links Module
//!
//! URL references attached to an insight. Reads are public; creating and
//! deleting require the author's token.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;


pub use routes::links_routes;
