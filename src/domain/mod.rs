//! Domain logic and core data structures
//!
//! This module contains the plain data the form works with. It knows
//! nothing about HTTP, terminals or pixels.

pub mod candidate;
pub mod form;
pub mod identity;

pub use candidate::{CandidateCard, CandidateResponse, SubmissionRequest};
pub use form::{Field, FormState};
