//! Shared types used across all modules.
//!
//! The inbound request payload and the outbound envelope live here so the
//! pipeline, the API client and the dispatcher agree on one definition.

pub mod envelope;
pub mod request;

pub use envelope::{EnvelopeMessage, SignedEnvelope};
pub use request::ReportRequest;
