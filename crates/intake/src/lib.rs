//! `pharmademand-intake`
//!
//! **Responsibility:** a line-oriented shell over the record store.
//!
//! This crate is a thin driver of the presentation boundary: it turns typed
//! lines into store mutations and submissions and prints the resulting list,
//! alerts and status messages. All decisions live in the library crates.

pub mod command;
pub mod config;
pub mod session;

pub use command::{IntakeCommand, ParseError};
pub use config::{ConfigError, IntakeConfig};
pub use session::{IntakeSession, Reply};
