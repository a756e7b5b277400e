//! Presentation layers: web UI server and terminal client

pub mod cli;
pub mod http;
pub mod page;
pub mod render;

pub use http::{build_router, run_http_server, AppState};
