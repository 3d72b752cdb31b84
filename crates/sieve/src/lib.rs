pub mod auth;
pub mod errors;
pub mod models;
pub mod sanitize;
pub mod traces;

pub use sanitize::{sanitize, Sanitizer, SanitizerConfig};
