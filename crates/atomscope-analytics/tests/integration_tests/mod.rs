//! Integration tests for the analytics engine, grouped by subsystem.

pub mod clustering_tests;
pub mod metric_property_tests;
pub mod reduction_tests;
pub mod workflow_tests;
