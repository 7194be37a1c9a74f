//! Submission lifecycle controller.
//!
//! The one gateway between presentation and the store. It guards the
//! forward-only status machine and converts store failures into the
//! degraded shapes the UI renders - an empty list, a zero count, a
//! `false`, or a single retry-me message. Callers cannot distinguish
//! "no data" from "store unreachable", and are not expected to.

use std::time::Duration;

use sqlx::PgPool;
use thiserror::Error;

use crate::db::{RepositoryError, SubmissionRepository};
use crate::submission::{ContactSubmission, Provenance, SubmissionInput};
use crate::types::{SubmissionId, SubmissionStatus};
use crate::validate;

/// Insert attempts for [`Submissions::submit`], including the first.
const SUBMIT_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubles on each subsequent one.
const SUBMIT_BACKOFF: Duration = Duration::from_millis(200);

/// A submission could not be created.
///
/// The `Display` text is the banner shown to the visitor.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The store rejected or never acknowledged the write.
    #[error("Failed to submit contact form. Please try again.")]
    Unavailable,
}

/// A status transition was refused.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("submission not found")]
    NotFound,

    /// The requested edge is not part of the forward-only lifecycle.
    #[error("cannot move a '{from}' submission to '{to}'")]
    Invalid {
        from: SubmissionStatus,
        to: SubmissionStatus,
    },

    #[error("submission store unavailable")]
    Unavailable,
}

/// The contact submission pipeline.
///
/// Both binaries construct this per-request from the shared pool; it is
/// the only caller of [`SubmissionRepository`], so every status write in
/// the system passes through the transition guard.
pub struct Submissions<'a> {
    repo: SubmissionRepository<'a>,
}

impl<'a> Submissions<'a> {
    /// Create the pipeline over a connection pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            repo: SubmissionRepository::new(pool),
        }
    }

    /// Sanitize and persist a validated submission.
    ///
    /// Callers run [`validate::validate`] first; sanitization happens here
    /// so nothing reaches the store unstripped. The insert is retried with
    /// doubling backoff - a dropped submission is the one failure this
    /// system cannot shrug off.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Unavailable`] after the final failed attempt.
    pub async fn submit(
        &self,
        input: &SubmissionInput,
        provenance: &Provenance,
    ) -> Result<SubmissionId, SubmitError> {
        let clean = validate::sanitize(input);

        let mut delay = SUBMIT_BACKOFF;
        for attempt in 1..=SUBMIT_ATTEMPTS {
            match self.repo.insert(&clean, provenance).await {
                Ok(id) => {
                    tracing::info!(id = %id, "contact submission stored");
                    return Ok(id);
                }
                Err(e) if attempt < SUBMIT_ATTEMPTS => {
                    tracing::warn!(error = %e, attempt, "contact submission insert failed, retrying");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        attempts = SUBMIT_ATTEMPTS,
                        "contact submission dropped"
                    );
                }
            }
        }

        Err(SubmitError::Unavailable)
    }

    /// All submissions, newest first. Degrades to empty on store failure.
    pub async fn list(&self) -> Vec<ContactSubmission> {
        match self.repo.list().await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "failed to list submissions");
                Vec::new()
            }
        }
    }

    /// Submissions with the given status, newest first. Degrades to empty.
    pub async fn list_by_status(&self, status: SubmissionStatus) -> Vec<ContactSubmission> {
        match self.repo.list_by_status(status).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, %status, "failed to list submissions by status");
                Vec::new()
            }
        }
    }

    /// Number of submissions still in `new`. Degrades to zero.
    pub async fn unread_count(&self) -> i64 {
        match self.repo.count_by_status(SubmissionStatus::New).await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!(error = %e, "failed to count unread submissions");
                0
            }
        }
    }

    /// Advance a submission to `read`.
    ///
    /// # Errors
    ///
    /// See [`Self::advance`].
    pub async fn mark_read(&self, id: SubmissionId) -> Result<(), TransitionError> {
        self.advance(id, SubmissionStatus::Read).await
    }

    /// Advance a submission to `replied`.
    ///
    /// # Errors
    ///
    /// See [`Self::advance`].
    pub async fn mark_replied(&self, id: SubmissionId) -> Result<(), TransitionError> {
        self.advance(id, SubmissionStatus::Replied).await
    }

    /// Advance `id` to `next`, refusing any edge outside the forward-only
    /// machine before a store write is attempted. The write itself is also
    /// guarded on the allowed prior statuses, so a transition raced by
    /// another operator affects zero rows instead of regressing the field.
    async fn advance(
        &self,
        id: SubmissionId,
        next: SubmissionStatus,
    ) -> Result<(), TransitionError> {
        let current = self
            .repo
            .get(id)
            .await
            .map_err(|e| store_failure(&e, "load submission for transition"))?
            .ok_or(TransitionError::NotFound)?;

        if !current.status.can_advance_to(next) {
            return Err(TransitionError::Invalid {
                from: current.status,
                to: next,
            });
        }

        let updated = self
            .repo
            .update_status(id, next, SubmissionStatus::advance_sources(next))
            .await
            .map_err(|e| store_failure(&e, "update submission status"))?;

        if updated {
            Ok(())
        } else {
            // Lost a race with a concurrent transition or delete; re-read
            // so the report names the status that actually blocked us.
            match self.repo.get(id).await {
                Ok(Some(now)) => Err(TransitionError::Invalid {
                    from: now.status,
                    to: next,
                }),
                Ok(None) => Err(TransitionError::NotFound),
                Err(e) => Err(store_failure(&e, "re-read submission after stale write")),
            }
        }
    }

    /// Remove a submission outright. Allowed from any status; degrades to
    /// `false` when the store is unreachable or the id does not exist.
    pub async fn delete(&self, id: SubmissionId) -> bool {
        match self.repo.delete(id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                tracing::error!(error = %e, "failed to delete submission");
                false
            }
        }
    }
}

fn store_failure(error: &RepositoryError, action: &'static str) -> TransitionError {
    tracing::error!(error = %error, action, "submission store operation failed");
    TransitionError::Unavailable
}
