//! Candidate records
//!
//! `CandidateResponse` is whatever the remote service chose to send back.
//! `CandidateCard` is what the page shows. The fallback precedence
//! between the two is resolved once, in [`CandidateCard::resolve`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Trimmed input for one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub leader_name: String,
    pub party_name: String,
}

impl SubmissionRequest {
    /// Form body pairs using the wire keys `name` and `party`
    pub fn form_pairs(&self) -> [(&'static str, &str); 2] {
        [("name", self.leader_name.as_str()), ("party", self.party_name.as_str())]
    }
}

/// Successful reply from the remote service, every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CandidateResponse {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub party: Option<String>,
}

impl CandidateResponse {
    /// Reply used when a 2xx body cannot be read as an object
    pub fn echo(request: &SubmissionRequest) -> Self {
        Self {
            id: None,
            name: Some(request.leader_name.clone()),
            party: Some(request.party_name.clone()),
        }
    }
}

/// Accepts string or integer ids; anything else counts as absent
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(id) => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    })
}

/// Accepts strings only; other types count as absent so sibling fields survive
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// One rendered candidate, immutable once created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateCard {
    pub id: String,
    pub leader_name: String,
    pub party_name: String,
}

impl CandidateCard {
    /// Builds a card preferring server values, then local input, then the local id
    pub fn resolve(response: CandidateResponse, request: &SubmissionRequest, local_id: &str) -> Self {
        Self {
            id: response.id.unwrap_or_else(|| local_id.to_string()),
            leader_name: response.name.unwrap_or_else(|| request.leader_name.clone()),
            party_name: response.party.unwrap_or_else(|| request.party_name.clone()),
        }
    }

    /// Card made from local input alone, used when the remote call failed
    pub fn local(request: &SubmissionRequest, local_id: &str) -> Self {
        Self {
            id: local_id.to_string(),
            leader_name: request.leader_name.clone(),
            party_name: request.party_name.clone(),
        }
    }

    /// First character of the leader name, shown in the avatar
    pub fn initial(&self) -> Option<char> {
        self.leader_name.chars().next()
    }
}
