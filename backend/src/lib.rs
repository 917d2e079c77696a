//! Book catalogue service modules.

pub mod api;
pub mod domain;
pub mod outbound;
pub mod server;
