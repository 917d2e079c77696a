//! Outbound adapters for external services.

pub mod summary;
