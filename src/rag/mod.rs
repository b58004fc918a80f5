//! RAG (Retrieval-Augmented Generation) for question answering.
//!
//! Questions are classified first. Database and general questions go through
//! retrieval and the generation backend; everything else is handed to an
//! auxiliary responder.

mod answer;
pub mod context;
mod response;

pub use answer::{AnswerEngine, NO_INFORMATION_ANSWER};
pub use context::ContextBuilder;
pub use response::{RagEngine, RagResponse};

use crate::vector_store::QueryMatch;
use serde::Serialize;

/// A retrieved record as shown to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub id: String,
    pub score: f32,
    pub name: Option<String>,
    pub dob: Option<String>,
    pub address: Option<String>,
    pub hobby: Option<String>,
    pub interest: Option<String>,
    pub skill: Option<String>,
}

impl From<&QueryMatch> for MatchSummary {
    fn from(m: &QueryMatch) -> Self {
        Self {
            id: m.id.clone(),
            score: m.score,
            name: m.metadata.name.clone(),
            dob: m.metadata.dob.clone(),
            address: m.metadata.address.clone(),
            hobby: m.metadata.hobby.clone(),
            interest: m.metadata.interest.clone(),
            skill: m.metadata.skill.clone(),
        }
    }
}
