//! Editable form fields
//!
//! Holds the raw text the user typed. Trimming only happens when a
//! submission snapshot is taken, so the user keeps seeing what they typed.

use crate::domain::candidate::SubmissionRequest;

/// Names one editable field of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    LeaderName,
    PartyName,
}

impl Field {
    /// Label shown next to the input
    pub fn label(self) -> &'static str {
        match self {
            Field::LeaderName => "Leader name",
            Field::PartyName => "Party name",
        }
    }

    /// Example value shown while the input is empty
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::LeaderName => "e.g. Amina Patel",
            Field::PartyName => "e.g. Sunrise Alliance",
        }
    }
}

/// Raw field contents, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub leader_name: String,
    pub party_name: String,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces one field, leaving the other untouched
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::LeaderName => self.leader_name = value.into(),
            Field::PartyName => self.party_name = value.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::LeaderName => &self.leader_name,
            Field::PartyName => &self.party_name,
        }
    }

    /// True when both fields still hold something after trimming
    pub fn is_complete(&self) -> bool {
        !self.leader_name.trim().is_empty() && !self.party_name.trim().is_empty()
    }

    /// Trimmed snapshot used for a submission attempt
    ///
    /// Returns None if either field is blank.
    pub fn to_request(&self) -> Option<SubmissionRequest> {
        if !self.is_complete() {
            return None;
        }

        Some(SubmissionRequest {
            leader_name: self.leader_name.trim().to_string(),
            party_name: self.party_name.trim().to_string(),
        })
    }

    pub fn clear(&mut self) {
        self.leader_name.clear();
        self.party_name.clear();
    }
}
