//! Application orchestration layer
//!
//! Coordinates form state, the submission API and the card list. The
//! phase machine lives in [`state`], the owner of all mutable state in
//! [`controller`].

pub mod controller;
pub mod state;

pub use controller::{CandidateSession, FormController, LOCAL_FALLBACK_MESSAGE, PendingSubmission, SubmitOutcome};
pub use state::{PhaseEvent, StateMachine, SubmitPhase};
