//! Liver Risk CLI
//!
//! Subprocess adapter around the liver disease risk model. The calling
//! application writes one JSON payload to stdin and reads one JSON line
//! back from stdout; the exit code tells success (0) from failure (1).

pub mod app;
pub mod cli;
pub mod config;

pub use app::{parse_payload, report, run, Outcome};
pub use cli::Cli;
pub use config::{install_root, AdapterConfig};
