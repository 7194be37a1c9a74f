//! Repository for contact submission database operations.
//!
//! Raw CRUD against the `contact_submission` table. Status writes here are
//! transition-agnostic field writes; the forward-only lifecycle rules live
//! in [`crate::submissions::Submissions`], which is the only caller of
//! this type.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::submission::{ContactSubmission, Provenance, SubmissionInput};
use crate::types::{Email, SubmissionId, SubmissionStatus};

use super::RepositoryError;

const SUBMISSION_COLUMNS: &str =
    "id, name, email, subject, message, submitted_at, status, ip_address, user_agent";

/// Row shape for `contact_submission`.
///
/// Mapped to the domain model via `TryFrom` so invalid stored values
/// surface as `RepositoryError::DataCorruption` instead of a panic.
#[derive(sqlx::FromRow)]
struct SubmissionRow {
    id: SubmissionId,
    name: String,
    email: String,
    subject: String,
    message: String,
    submitted_at: DateTime<Utc>,
    status: SubmissionStatus,
    ip_address: Option<String>,
    user_agent: Option<String>,
}

impl TryFrom<SubmissionRow> for ContactSubmission {
    type Error = RepositoryError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email,
            subject: row.subject,
            message: row.message,
            submitted_at: row.submitted_at,
            status: row.status,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
        })
    }
}

/// Repository for contact submission database operations.
pub struct SubmissionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubmissionRepository<'a> {
    /// Create a new submission repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new submission and return its store-assigned id.
    ///
    /// `id`, `submitted_at` and the initial `new` status come from column
    /// defaults. Absent provenance binds as NULL - never as an empty
    /// string.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        input: &SubmissionInput,
        provenance: &Provenance,
    ) -> Result<SubmissionId, RepositoryError> {
        let id: SubmissionId = sqlx::query_scalar(
            r"
            INSERT INTO contact_submission (name, email, subject, message, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            ",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.subject)
        .bind(&input.message)
        .bind(provenance.ip_address.as_deref())
        .bind(provenance.user_agent.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Get a submission by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get(&self, id: SubmissionId) -> Result<Option<ContactSubmission>, RepositoryError> {
        let row: Option<SubmissionRow> = sqlx::query_as(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM contact_submission WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(ContactSubmission::try_from).transpose()
    }

    /// All submissions, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list(&self) -> Result<Vec<ContactSubmission>, RepositoryError> {
        let rows: Vec<SubmissionRow> = sqlx::query_as(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM contact_submission ORDER BY submitted_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ContactSubmission::try_from).collect()
    }

    /// Submissions with the given status, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_by_status(
        &self,
        status: SubmissionStatus,
    ) -> Result<Vec<ContactSubmission>, RepositoryError> {
        let rows: Vec<SubmissionRow> = sqlx::query_as(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM contact_submission
             WHERE status = $1 ORDER BY submitted_at DESC"
        ))
        .bind(status)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ContactSubmission::try_from).collect()
    }

    /// Count submissions with the given status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_status(
        &self,
        status: SubmissionStatus,
    ) -> Result<i64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM contact_submission WHERE status = $1")
                .bind(status)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }

    /// Write `next` to the submission's status field, but only while its
    /// current status is one of `allowed_from`.
    ///
    /// The guard rides inside the UPDATE itself, so two operators racing on
    /// the same row cannot move its status backward - the losing write
    /// simply affects zero rows.
    ///
    /// # Returns
    ///
    /// `true` if a row was updated, `false` if the id does not exist or its
    /// status was not in `allowed_from`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_status(
        &self,
        id: SubmissionId,
        next: SubmissionStatus,
        allowed_from: &[SubmissionStatus],
    ) -> Result<bool, RepositoryError> {
        let allowed: Vec<&str> = allowed_from.iter().map(|s| s.as_str()).collect();

        let result = sqlx::query(
            "UPDATE contact_submission SET status = $2 WHERE id = $1 AND status = ANY($3)",
        )
        .bind(id)
        .bind(next)
        .bind(allowed)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a submission. Terminal and unconditional.
    ///
    /// # Returns
    ///
    /// `true` if the submission was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: SubmissionId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM contact_submission WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
