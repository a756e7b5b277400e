//! astrarag: chat frontend for the AstraRAG answer service
//!
//! This library provides:
//! - Append-only chat sessions with change notification
//! - The chat exchange controller and its failure taxonomy
//! - An HTTP client and health probe for the answer service
//! - A web UI server and a terminal client

pub mod backend;
pub mod chat;
pub mod config;
pub mod transport;

pub use chat::{ChatExchange, Session};
pub use config::Config;

/// Version string including the development build suffix
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    env!("ASTRARAG_VERSION_SUFFIX")
);

pub fn version() -> String {
    VERSION.to_string()
}
