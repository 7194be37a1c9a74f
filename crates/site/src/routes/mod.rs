//! HTTP route handlers for the public site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Portfolio page (hero, about, projects, services, contact)
//! GET  /health          - Liveness check
//! GET  /health/ready    - Readiness check (store ping)
//!
//! # Contact (HTMX fragments)
//! GET  /contact/form    - Empty contact form fragment
//! POST /contact         - Submit the contact form
//! ```

pub mod contact;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the site router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/contact", post(contact::submit))
        .route("/contact/form", get(contact::form))
}
