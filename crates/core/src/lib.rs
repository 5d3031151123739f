//! `pharmademand-core`: shared building blocks for the intake tool.
//!
//! This crate contains **pure** primitives (no IO, no async): the field
//! vocabulary of a medicine record, the error taxonomy, and identifiers.

pub mod error;
pub mod field;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use field::Field;
pub use id::SubmissionId;
