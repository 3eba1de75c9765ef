//! Form controller and session driver
//!
//! `FormController` owns the form, the card list and the error banner and
//! performs every transition synchronously. `CandidateSession` pairs it
//! with a [`CandidateApi`] and runs the one suspension point (the network
//! call) without holding a borrow of the controller across it.

use std::cell::{Ref, RefCell};
use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::api::{CandidateApi, SubmitError};
use crate::app::state::{PhaseEvent, StateMachine, SubmitPhase};
use crate::domain::identity::generate_local_id;
use crate::domain::{CandidateCard, CandidateResponse, Field, FormState, SubmissionRequest};

/// Banner shown after a submission fell back to the local list
pub const LOCAL_FALLBACK_MESSAGE: &str = "API unavailable. Added locally for demo.";

/// Result of one submit action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Gate was closed: blank fields or a submission already in flight
    Ignored,
    /// Server accepted the candidate
    Created(CandidateCard),
    /// Remote call failed, card exists only in memory
    CreatedLocally(CandidateCard),
}

impl SubmitOutcome {
    pub fn card(&self) -> Option<&CandidateCard> {
        match self {
            SubmitOutcome::Ignored => None,
            SubmitOutcome::Created(card) | SubmitOutcome::CreatedLocally(card) => Some(card),
        }
    }
}

/// Snapshot taken when a submission starts
///
/// Only [`FormController::begin_submit`] creates one, and
/// [`FormController::finish_submit`] consumes it, so every started
/// submission settles exactly once.
#[derive(Debug)]
pub struct PendingSubmission {
    request: SubmissionRequest,
    local_id: String,
}

impl PendingSubmission {
    pub fn request(&self) -> &SubmissionRequest {
        &self.request
    }

    pub fn local_id(&self) -> &str {
        &self.local_id
    }
}

/// Owns all form state; the only thing that mutates it
#[derive(Debug, Default)]
pub struct FormController {
    form: FormState,
    phase: SubmitPhase,
    /// Newest first
    cards: VecDeque<CandidateCard>,
    error: Option<String>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    pub fn cards(&self) -> &VecDeque<CandidateCard> {
        &self.cards
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Eligibility predicate, recomputed on every call
    pub fn can_submit(&self) -> bool {
        StateMachine::can_submit(self.phase, self.form.is_complete())
    }

    /// Replaces one field; the other is untouched
    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Idle -> Submitting, if the gate is open
    ///
    /// Clears the banner and generates the fallback id up front. Returns
    /// None without touching anything when the gate is closed.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        let fields_complete = self.form.is_complete();
        let next = StateMachine::process_event(self.phase, PhaseEvent::SubmitRequested, fields_complete);
        if next == self.phase {
            debug!(phase = ?self.phase, fields_complete, "Submit ignored");
            return None;
        }

        let request = self.form.to_request()?;
        self.phase = next;
        self.error = None;

        Some(PendingSubmission {
            request,
            local_id: generate_local_id(),
        })
    }

    /// Submitting -> Idle, folding the remote result into the card list
    pub fn finish_submit(
        &mut self,
        pending: PendingSubmission,
        result: Result<CandidateResponse, SubmitError>,
    ) -> SubmitOutcome {
        let PendingSubmission { request, local_id } = pending;

        let outcome = match result {
            Ok(response) => {
                let card = CandidateCard::resolve(response, &request, &local_id);
                info!(id = %card.id, leader = %card.leader_name, "Candidate created");
                SubmitOutcome::Created(card)
            }
            Err(e) => {
                warn!("Submission failed, keeping candidate locally: {e}");
                self.error = Some(LOCAL_FALLBACK_MESSAGE.to_string());
                SubmitOutcome::CreatedLocally(CandidateCard::local(&request, &local_id))
            }
        };

        if let Some(card) = outcome.card() {
            self.cards.push_front(card.clone());
        }
        self.form.clear();
        self.phase = StateMachine::process_event(self.phase, PhaseEvent::SubmissionSettled, false);

        outcome
    }
}

/// Single-threaded driver pairing a controller with a submission API
pub struct CandidateSession<A> {
    controller: RefCell<FormController>,
    api: A,
}

impl<A: CandidateApi> CandidateSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            controller: RefCell::new(FormController::new()),
            api,
        }
    }

    /// Read access for rendering
    pub fn controller(&self) -> Ref<'_, FormController> {
        self.controller.borrow()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn edit(&self, field: Field, value: impl Into<String>) {
        self.controller.borrow_mut().edit(field, value);
    }

    /// Runs one submit action to completion
    ///
    /// A call made while another is still awaiting the network sees the
    /// Submitting phase and returns [`SubmitOutcome::Ignored`].
    pub async fn submit(&self) -> SubmitOutcome {
        let pending = self.controller.borrow_mut().begin_submit();
        let Some(pending) = pending else {
            return SubmitOutcome::Ignored;
        };

        let result = self.api.create_candidate(pending.request()).await;

        self.controller.borrow_mut().finish_submit(pending, result)
    }
}
