//! Remote submission boundary
//!
//! The controller only sees the [`CandidateApi`] trait. The HTTP
//! implementation lives in [`client`]; anything else that can answer a
//! submission (an offline stub, a test double) plugs in the same way.

pub mod client;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{CandidateResponse, SubmissionRequest};

pub use client::CandidateClient;

/// Body text used when a failing response carries none
pub const GENERIC_REMOTE_ERROR: &str = "Failed to create candidate";

/// Why a submission did not produce a server response
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Server answered with a non-success status
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// Transport failed before a usable response arrived
    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),
}

/// Creates one candidate on the remote service
#[async_trait]
pub trait CandidateApi {
    async fn create_candidate(
        &self,
        request: &SubmissionRequest,
    ) -> Result<CandidateResponse, SubmitError>;
}
