use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;

pub const INVALID_COMPLETION_DATE: &str = "completionDate must be YYYY-MM-DD or null";

// Shape only; calendar validity is not checked.
static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern"));

pub fn is_iso_date(value: &str) -> bool {
    ISO_DATE_RE.is_match(value)
}

/// A tracked sub-task of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: i64,
    pub job_id: String,
    pub name: String,
    pub responsible_code: String,
    pub is_complete: bool,
    pub completion_date: Option<String>,
    pub note: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl Milestone {
    /// Shallow merge: fields present in the patch overwrite, absent ones stay.
    /// `updated_at` is always bumped.
    pub fn apply(&mut self, patch: &MilestonePatch, now: DateTime<Utc>) {
        if let Some(code) = &patch.responsible_code {
            self.responsible_code = code.clone();
        }
        if let Some(done) = patch.is_complete {
            self.is_complete = done;
        }
        if let Some(date) = &patch.completion_date {
            self.completion_date = date.clone();
        }
        if let Some(note) = &patch.note {
            self.note = note.clone();
        }
        self.updated_at = now;
    }

    /// True when completion flag and date agree.
    pub fn is_consistent(&self) -> bool {
        match (&self.is_complete, &self.completion_date) {
            (true, Some(date)) => is_iso_date(date),
            (false, None) => true,
            _ => false,
        }
    }
}

/// Partial update of the mutable milestone fields.
///
/// `completion_date` distinguishes an absent key (`None`) from an explicit
/// `null` (`Some(None)`). Any other keys in the request body are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestonePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub completion_date: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// Non-string values are kept as their JSON text so `validate` rejects them
// with the date message instead of a deserialization error.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    }))
}

impl MilestonePatch {
    pub fn validate(&self) -> Result<(), ServiceError> {
        match &self.completion_date {
            Some(Some(date)) if !is_iso_date(date) => Err(ServiceError::InvalidArgument(
                INVALID_COMPLETION_DATE.to_string(),
            )),
            _ => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Brings a patch in line with the completion invariant, given the record it
/// will be merged onto.
///
/// Marking complete without a date stamps `today`; marking incomplete clears
/// the date. Shared by the client (always) and the server (when configured).
pub fn reconcile_completion(
    current: &Milestone,
    mut patch: MilestonePatch,
    today: NaiveDate,
) -> MilestonePatch {
    let complete = patch.is_complete.unwrap_or(current.is_complete);
    let date = match &patch.completion_date {
        Some(date) => date.clone(),
        None => current.completion_date.clone(),
    }
    .filter(|d| !d.is_empty());

    if complete {
        if date.is_none() {
            patch.completion_date = Some(Some(today.format("%Y-%m-%d").to_string()));
        }
    } else if date.is_some() || patch.completion_date.is_some() {
        patch.completion_date = Some(None);
    }

    patch
}
