//! # Unit Components
//!
//! Tests grouped by the library module they exercise.





/// Configuration defaults and JSON loading tests.
pub mod config;
