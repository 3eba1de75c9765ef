//! Candidate cards: a single-page form that collects a leader and a party
//! name, submits them to a remote endpoint and keeps the created
//! candidates as an in-memory list of cards.
//!
//! Layers:
//! - [`domain`] plain data (form fields, requests, responses, cards)
//! - [`api`] the submission client and its error taxonomy
//! - [`config`] explicit configuration values
//! - [`app`] the Idle/Submitting state machine and form controller
//! - [`ui`] text and pixel renditions of the page

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod ui;
