//! Submissions inbox route handlers.
//!
//! The page shell loads the list as an HTMX fragment; every mutating
//! action performs its store call and then responds with a freshly
//! fetched fragment. Rows are never patched in place - what the operator
//! sees is always a re-read of the store.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use folio_core::{ContactSubmission, SubmissionId, SubmissionStatus};

use crate::state::AppState;

/// Notice shown when no submission store is configured.
const STORE_UNAVAILABLE: &str = "Submission store is unavailable; showing nothing.";

/// Query parameters for the inbox list.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListParams {
    /// Restrict the list to one status; `None` shows everything.
    pub status: Option<SubmissionStatus>,
}

/// One row of the inbox, pre-formatted for the template.
pub struct SubmissionView {
    pub id: SubmissionId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub submitted_at: String,
    pub status: SubmissionStatus,
    pub can_mark_read: bool,
    pub can_mark_replied: bool,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl From<ContactSubmission> for SubmissionView {
    fn from(submission: ContactSubmission) -> Self {
        Self {
            can_mark_read: submission.status.can_advance_to(SubmissionStatus::Read),
            can_mark_replied: submission.status.can_advance_to(SubmissionStatus::Replied),
            submitted_at: format_timestamp(&submission),
            id: submission.id,
            name: submission.name,
            email: submission.email.into_inner(),
            subject: submission.subject,
            message: submission.message,
            status: submission.status,
            ip_address: submission.ip_address,
            user_agent: submission.user_agent,
        }
    }
}

/// Display form of the submission time, e.g. `Aug 6, 2026, 02:30 PM`.
fn format_timestamp(submission: &ContactSubmission) -> String {
    submission
        .submitted_at
        .format("%b %-d, %Y, %I:%M %p")
        .to_string()
}

/// Inbox page shell. The list itself loads as a fragment.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub filter_query: String,
}

/// Inbox list fragment: rows, unread badge, filter links and any flash.
#[derive(Template, WebTemplate)]
#[template(path = "submissions/list.html")]
pub struct ListTemplate {
    pub views: Vec<SubmissionView>,
    pub unread_count: i64,
    pub filter: Option<SubmissionStatus>,
    pub filter_query: String,
    pub flash: Option<String>,
}

/// Render the inbox page.
///
/// GET /
pub async fn index(Query(params): Query<ListParams>) -> impl IntoResponse {
    IndexTemplate {
        filter_query: filter_query(params.status),
    }
}

/// Render the inbox list fragment.
///
/// GET /submissions
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    render_list(&state, params.status, None).await
}

/// Mark a submission as read, then re-render the list.
///
/// POST /submissions/{id}/read
#[instrument(skip(state))]
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let flash = match state.submissions() {
        None => Some(STORE_UNAVAILABLE.to_owned()),
        Some(submissions) => submissions
            .mark_read(SubmissionId::new(id))
            .await
            .err()
            .map(|e| e.to_string()),
    };
    render_list(&state, params.status, flash).await
}

/// Mark a submission as replied, then re-render the list.
///
/// POST /submissions/{id}/replied
#[instrument(skip(state))]
pub async fn mark_replied(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let flash = match state.submissions() {
        None => Some(STORE_UNAVAILABLE.to_owned()),
        Some(submissions) => submissions
            .mark_replied(SubmissionId::new(id))
            .await
            .err()
            .map(|e| e.to_string()),
    };
    render_list(&state, params.status, flash).await
}

/// Delete a submission, then re-render the list.
///
/// POST /submissions/{id}/delete
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let flash = match state.submissions() {
        None => Some(STORE_UNAVAILABLE.to_owned()),
        Some(submissions) => {
            if submissions.delete(SubmissionId::new(id)).await {
                None
            } else {
                Some("Failed to delete submission.".to_owned())
            }
        }
    };
    render_list(&state, params.status, flash).await
}

/// Fetch the list and unread count concurrently and render the fragment.
async fn render_list(
    state: &AppState,
    filter: Option<SubmissionStatus>,
    flash: Option<String>,
) -> ListTemplate {
    let (submissions, unread_count, flash) = match state.submissions() {
        None => (
            Vec::new(),
            0,
            flash.or_else(|| Some(STORE_UNAVAILABLE.to_owned())),
        ),
        Some(pipeline) => {
            let (submissions, unread_count) = match filter {
                Some(status) => {
                    tokio::join!(pipeline.list_by_status(status), pipeline.unread_count())
                }
                None => tokio::join!(pipeline.list(), pipeline.unread_count()),
            };
            (submissions, unread_count, flash)
        }
    };

    ListTemplate {
        views: submissions.into_iter().map(SubmissionView::from).collect(),
        unread_count,
        filter,
        filter_query: filter_query(filter),
        flash,
    }
}

/// Query-string suffix that keeps the active filter across actions.
fn filter_query(filter: Option<SubmissionStatus>) -> String {
    filter.map_or_else(String::new, |status| format!("?status={status}"))
}
