//! Folio Core - Shared types and the contact submission pipeline.
//!
//! This crate provides the pieces used by both Folio binaries:
//! - `site` - Public portfolio and contact form
//! - `admin` - Internal submissions inbox
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for submission ids, emails, and statuses
//! - [`submission`] - The `ContactSubmission` model and its input shapes
//! - [`validate`] - Pure form validation and input sanitization
//! - [`db`] - The submission store repository (`postgres` feature)
//! - [`submissions`] - The lifecycle controller the binaries talk to
//!   (`postgres` feature)
//!
//! The type and validation modules are I/O-free so they can be used (and
//! tested) anywhere; everything that touches the store is feature-gated.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod submission;
pub mod types;
pub mod validate;

#[cfg(feature = "postgres")]
pub mod db;
#[cfg(feature = "postgres")]
pub mod submissions;

pub use submission::{ContactSubmission, Provenance, SubmissionInput};
pub use types::*;
