//! Submission state machine
//!
//! Two phases only. Field edits never change the phase; the eligibility
//! of a submit request is computed by the controller and passed in.

/// Whether a submission is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    /// Waiting for the user to submit
    #[default]
    Idle,
    /// One request is out and has not settled yet
    Submitting,
}

/// Events that can move the phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// User asked to submit
    SubmitRequested,
    /// The in-flight request finished, successfully or not
    SubmissionSettled,
}

/// State machine for phase transitions
pub struct StateMachine;

impl StateMachine {
    /// Processes an event and returns the new phase
    ///
    /// # Arguments
    /// * `current` - Current phase
    /// * `event` - Event to process
    /// * `fields_complete` - Both trimmed fields are non-empty
    pub fn process_event(current: SubmitPhase, event: PhaseEvent, fields_complete: bool) -> SubmitPhase {
        match (current, event) {
            (SubmitPhase::Idle, PhaseEvent::SubmitRequested) if fields_complete => SubmitPhase::Submitting,
            (SubmitPhase::Submitting, PhaseEvent::SubmissionSettled) => SubmitPhase::Idle,
            // Blank fields, double submits and stray settles are ignored
            (phase, _) => phase,
        }
    }

    /// The eligibility predicate behind the submit affordance
    pub fn can_submit(current: SubmitPhase, fields_complete: bool) -> bool {
        fields_complete && current == SubmitPhase::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_phase_is_idle() {
        assert_eq!(SubmitPhase::default(), SubmitPhase::Idle);
    }

    #[test]
    fn complete_fields_start_submission() {
        let phase = StateMachine::process_event(SubmitPhase::Idle, PhaseEvent::SubmitRequested, true);
        assert_eq!(phase, SubmitPhase::Submitting);
    }

    #[test]
    fn incomplete_fields_stay_idle() {
        let phase = StateMachine::process_event(SubmitPhase::Idle, PhaseEvent::SubmitRequested, false);
        assert_eq!(phase, SubmitPhase::Idle);
    }

    #[test]
    fn second_request_while_submitting_is_ignored() {
        let phase = StateMachine::process_event(SubmitPhase::Submitting, PhaseEvent::SubmitRequested, true);
        assert_eq!(phase, SubmitPhase::Submitting);
    }

    #[test]
    fn settle_returns_to_idle() {
        let phase = StateMachine::process_event(SubmitPhase::Submitting, PhaseEvent::SubmissionSettled, false);
        assert_eq!(phase, SubmitPhase::Idle);
    }

    #[test]
    fn stray_settle_in_idle_is_ignored() {
        let phase = StateMachine::process_event(SubmitPhase::Idle, PhaseEvent::SubmissionSettled, true);
        assert_eq!(phase, SubmitPhase::Idle);
    }

    #[test]
    fn predicate_needs_both_conditions() {
        assert!(StateMachine::can_submit(SubmitPhase::Idle, true));
        assert!(!StateMachine::can_submit(SubmitPhase::Idle, false));
        assert!(!StateMachine::can_submit(SubmitPhase::Submitting, true));
    }
}
