//! HTTP route handlers for the submissions inbox.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Inbox page
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (store ping)
//!
//! # Submissions (HTMX fragments)
//! GET  /submissions               - Inbox list fragment (?status= filter)
//! POST /submissions/{id}/read     - Mark as read, re-render the list
//! POST /submissions/{id}/replied  - Mark as replied, re-render the list
//! POST /submissions/{id}/delete   - Delete, re-render the list
//! ```

pub mod submissions;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(submissions::index))
        .route("/submissions", get(submissions::list))
        .route("/submissions/{id}/read", post(submissions::mark_read))
        .route("/submissions/{id}/replied", post(submissions::mark_replied))
        .route("/submissions/{id}/delete", post(submissions::delete))
}
