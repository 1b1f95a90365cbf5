//! Shared test data for the integration tests.
//!
//! All generators are seeded so every run sees the same vectors.

pub mod fixtures;

pub use fixtures::{blob_dataset, blob_of, random_rows};
