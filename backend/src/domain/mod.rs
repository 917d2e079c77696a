//! Domain primitives and the catalogue aggregate.
//!
//! Purpose: strongly typed entities and the transport-agnostic failure
//! taxonomy. The API layer translates [`DomainError`] into HTTP envelopes;
//! nothing in this module knows about status codes or serde wire shapes
//! beyond the entities' own serialisation contracts.

pub mod book;
pub mod catalogue;
pub mod error;

pub use self::book::{Book, BookDraft};
pub use self::catalogue::Catalogue;
pub use self::error::{DomainError, FieldErrors};
