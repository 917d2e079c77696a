//! REST API modules.

pub mod books;
pub mod envelope;
pub mod error;
pub mod health;

pub use envelope::Envelope;
pub use error::{ApiError, ApiResult};
