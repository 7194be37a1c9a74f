//! Application state shared across handlers.

use folio_core::submissions::Submissions;
use sqlx::PgPool;

/// Application state shared across all handlers.
///
/// `PgPool` is internally reference-counted, so cloning the state per
/// request is cheap. The pool is `None` when no store was configured at
/// startup; handlers degrade through [`AppState::submissions`].
#[derive(Clone)]
pub struct AppState {
    pool: Option<PgPool>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(pool: Option<PgPool>) -> Self {
        Self { pool }
    }

    /// The connection pool, when a store was configured.
    #[must_use]
    pub const fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// The submission pipeline, when a store was configured.
    #[must_use]
    pub fn submissions(&self) -> Option<Submissions<'_>> {
        self.pool().map(Submissions::new)
    }
}
