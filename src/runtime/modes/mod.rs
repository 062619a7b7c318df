//! Execution modes
//!
//! - Server mode (HTTP server, default)
//! - Inspect mode (print what the store holds and exit)

pub mod inspect;
pub mod server;

pub use inspect::run_inspect;
pub use server::run_server;
