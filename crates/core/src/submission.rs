//! Contact submission models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Email, SubmissionId, SubmissionStatus};

/// A stored contact submission.
///
/// `id` and `submitted_at` are assigned by the store on insert and never
/// change. `status` starts at [`SubmissionStatus::New`] and only moves
/// forward from there.
#[derive(Debug, Clone, Serialize)]
pub struct ContactSubmission {
    pub id: SubmissionId,
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub message: String,
    /// Creation time, stamped by the store at write time.
    pub submitted_at: DateTime<Utc>,
    pub status: SubmissionStatus,
    /// Present only when captured at submission time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Raw contact form input, before validation and sanitization.
///
/// Deserializes straight from the posted form body; every field arrives
/// as the user typed it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionInput {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Optional provenance captured from the submitting request.
///
/// Never required; absent fields are stored as absent, not as empty
/// strings.
#[derive(Debug, Clone, Default)]
pub struct Provenance {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
