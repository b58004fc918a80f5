//! Student records and their canonical text form.
//!
//! The canonical text is what gets embedded, and it is also kept in the
//! index metadata so operators can see exactly what was matched. Its field
//! order and labels must stay stable: changing them shifts every vector
//! already stored in the index.

use serde::{Deserialize, Serialize};

/// A student record as uploaded by clients. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hobby: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
}

impl Record {
    /// The record's id as given, or `student_NNNN` built from its 1-based
    /// position when the id is missing or empty.
    pub fn resolved_id(&self, position: usize) -> String {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("student_{:04}", position),
        }
    }

    /// Labelled fields in canonical order.
    fn labelled_fields(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("Name", self.name.as_deref()),
            ("DOB", self.dob.as_deref()),
            ("Address", self.address.as_deref()),
            ("Hobby", self.hobby.as_deref()),
            ("Interest", self.interest.as_deref()),
            ("Skill", self.skill.as_deref()),
        ]
    }

    /// Metadata stored next to the vector.
    pub fn metadata(&self) -> RecordMetadata {
        RecordMetadata {
            name: self.name.clone(),
            dob: self.dob.clone(),
            address: self.address.clone(),
            hobby: self.hobby.clone(),
            interest: self.interest.clone(),
            skill: self.skill.clone(),
            text: normalize(self),
        }
    }
}

/// Render a record as canonical text.
///
/// Only non-empty fields appear, each as `Label: value`, joined by `". "`
/// and closed with a period. A record with no fields renders as `"."`.
pub fn normalize(record: &Record) -> String {
    let parts: Vec<String> = record
        .labelled_fields()
        .into_iter()
        .filter_map(|(label, value)| {
            let value = value?.trim();
            (!value.is_empty()).then(|| format!("{}: {}", label, value))
        })
        .collect();

    format!("{}.", parts.join(". "))
}

/// Display fields persisted with each indexed vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hobby: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    /// Canonical text the vector was computed from.
    #[serde(default)]
    pub text: String,
}
