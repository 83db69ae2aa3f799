//! gradebook-core: Grading engine, validation, and data model.
//!
//! This crate defines the data model, the pure grading and validation rules,
//! and the `Gateway` trait that the rest of gradebook builds on.

pub mod error;
pub mod grading;
pub mod model;
pub mod session;
pub mod statistics;
pub mod traits;
pub mod validation;
