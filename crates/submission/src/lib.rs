//! `pharmademand-submission`
//!
//! **Responsibility:** hand the validated record list to the backend.
//!
//! - `SubmissionClient`: the transport boundary (one POST per call)
//! - `HttpSubmissionClient`: `reqwest` implementation against `/submit-data`
//! - `SubmissionCoordinator`: re-validates, sends once, and turns the result
//!   into a user-facing `SubmissionOutcome`
//!
//! Nothing here mutates the record store.

pub mod client;
pub mod coordinator;
pub mod error;

pub use client::{HttpSubmissionClient, SUBMIT_PATH, SubmissionClient};
pub use coordinator::{SubmissionCoordinator, SubmissionOutcome, SubmissionReceipt};
pub use error::TransportError;
