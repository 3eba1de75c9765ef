//! Plain-text rendition of the page
//!
//! Mirrors the single-page layout: header, the two inputs, the submit
//! button with its affordance, the error banner, then the card list.

use std::fmt;

use crate::app::FormController;
use crate::domain::{CandidateCard, Field};

pub const EYEBROW: &str = "Candidate demo";
pub const TITLE: &str = "Create your candidate";
pub const SUBTITLE: &str = "Add a leader and party name. Each submission creates a new card.";
pub const EMPTY_LIST: &str = "No candidates yet. Add the first one above.";

/// Button text for the current phase
pub fn button_label(controller: &FormController) -> &'static str {
    if controller.is_submitting() {
        "Adding..."
    } else {
        "Add candidate"
    }
}

/// Borrowing view over a controller, rendered through `Display`
pub struct PageView<'a> {
    controller: &'a FormController,
}

impl<'a> PageView<'a> {
    pub fn new(controller: &'a FormController) -> Self {
        Self { controller }
    }
}

impl fmt::Display for PageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let controller = self.controller;

        writeln!(f, "{EYEBROW}")?;
        writeln!(f, "{TITLE}")?;
        writeln!(f, "{SUBTITLE}")?;
        writeln!(f)?;

        for field in [Field::LeaderName, Field::PartyName] {
            let value = controller.form().get(field);
            if value.is_empty() {
                writeln!(f, "  {}: ({})", field.label(), field.placeholder())?;
            } else {
                writeln!(f, "  {}: {}", field.label(), value)?;
            }
        }

        let disabled = if controller.can_submit() { "" } else { " (disabled)" };
        writeln!(f, "  [ {} ]{disabled}", button_label(controller))?;

        if let Some(error) = controller.error() {
            writeln!(f, "  ! {error}")?;
        }
        writeln!(f)?;

        if controller.cards().is_empty() {
            return writeln!(f, "{EMPTY_LIST}");
        }

        for card in controller.cards() {
            writeln!(f, "{}", CardLine(card))?;
        }

        Ok(())
    }
}

/// One card as a single line: avatar initial, leader, party
pub struct CardLine<'a>(pub &'a CandidateCard);

impl fmt::Display for CardLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let card = self.0;
        match card.initial() {
            Some(initial) => write!(f, "({initial}) ")?,
            None => write!(f, "( ) ")?,
        }
        write!(f, "{} | {}", card.leader_name, card.party_name)
    }
}
