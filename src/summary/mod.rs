//! Summarizer Gateway
//!
//! Best-effort natural-language diagnosis of scan conflicts via an external
//! text-completion service, with a deterministic fallback that keeps the
//! scan workflow independent of the service's availability.

pub mod api;
pub mod error;
pub mod gateway;
pub mod provider;
pub mod types;
