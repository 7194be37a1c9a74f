//! Contact form route handlers.
//!
//! The form posts via HTMX and every response is a fragment that replaces
//! the form block. Validation failures re-render the form inline with the
//! visitor's values and never touch the store; a store failure shows a
//! dismissible banner above the preserved form; success shows a
//! confirmation that swaps back to an empty form after a short window.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, header::USER_AGENT},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use folio_core::submissions::SubmitError;
use folio_core::validate::{self, ValidationErrors};
use folio_core::{Provenance, SubmissionInput};

use crate::state::AppState;

/// Seconds the confirmation stays up before the empty form returns.
const CONFIRMATION_SECS: u32 = 3;

/// Contact form fragment: empty, re-rendered with field errors, or with a
/// failure banner above the preserved values.
#[derive(Template, WebTemplate, Default)]
#[template(path = "contact/form.html")]
pub struct ContactFormTemplate {
    pub values: SubmissionInput,
    pub errors: ValidationErrors,
    pub banner: Option<String>,
}

/// Confirmation fragment shown after a successful submission.
#[derive(Template, WebTemplate)]
#[template(path = "contact/success.html")]
pub struct ContactSuccessTemplate {
    pub confirmation_secs: u32,
}

/// Render the empty contact form (initial load and post-confirmation swap).
pub async fn form() -> impl IntoResponse {
    ContactFormTemplate::default()
}

/// Handle a contact form submission.
///
/// POST /contact
#[instrument(skip(state, headers, input), fields(email = %input.email))]
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(input): Form<SubmissionInput>,
) -> Response {
    let errors = validate::validate(&input);
    if !errors.is_empty() {
        // Invalid input never reaches the store.
        return ContactFormTemplate {
            values: input,
            errors,
            banner: None,
        }
        .into_response();
    }

    let Some(submissions) = state.submissions() else {
        tracing::error!("contact submission rejected: no store configured");
        return failure_response(input, &SubmitError::Unavailable);
    };

    let provenance = provenance_from_headers(&headers);

    match submissions.submit(&input, &provenance).await {
        Ok(_id) => ContactSuccessTemplate {
            confirmation_secs: CONFIRMATION_SECS,
        }
        .into_response(),
        Err(e) => failure_response(input, &e),
    }
}

/// Re-render the form with the visitor's values and a failure banner.
fn failure_response(values: SubmissionInput, error: &SubmitError) -> Response {
    ContactFormTemplate {
        values,
        errors: ValidationErrors::default(),
        banner: Some(error.to_string()),
    }
    .into_response()
}

/// Capture whatever provenance the request carries.
fn provenance_from_headers(headers: &HeaderMap) -> Provenance {
    Provenance {
        ip_address: client_ip(headers),
        user_agent: headers
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
    }
}

/// First hop of `X-Forwarded-For`, when present and non-empty.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get("x-forwarded-for")?.to_str().ok()?;
    let first = raw.split(',').next()?.trim();
    (!first.is_empty()).then(|| first.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_absent() {
        assert_eq!(client_ip(&HeaderMap::new()), None);
    }

    #[test]
    fn test_client_ip_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers), Some("203.0.113.7".to_owned()));
    }

    #[test]
    fn test_client_ip_empty_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        assert_eq!(client_ip(&headers), None);
    }

    #[test]
    fn test_provenance_captures_user_agent() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("curl/8.5"));
        let provenance = provenance_from_headers(&headers);
        assert_eq!(provenance.user_agent, Some("curl/8.5".to_owned()));
        assert_eq!(provenance.ip_address, None);
    }

    #[test]
    fn test_form_renders_field_errors() {
        let input = SubmissionInput {
            name: String::new(),
            email: "a@b.com".to_owned(),
            subject: "Hi".to_owned(),
            message: "short".to_owned(),
        };
        let errors = validate::validate(&input);
        let html = ContactFormTemplate {
            values: input,
            errors,
            banner: None,
        }
        .render()
        .unwrap();

        assert!(html.contains("This field is required."));
        assert!(html.contains("Message must be at least 10 characters."));
        // Entered values are preserved.
        assert!(html.contains("a@b.com"));
        assert!(html.contains("short"));
    }

    #[test]
    fn test_form_renders_banner() {
        let html = ContactFormTemplate {
            values: SubmissionInput::default(),
            errors: ValidationErrors::default(),
            banner: Some(SubmitError::Unavailable.to_string()),
        }
        .render()
        .unwrap();

        assert!(html.contains("Failed to submit contact form. Please try again."));
    }

    #[test]
    fn test_success_fragment_restores_form() {
        let html = ContactSuccessTemplate {
            confirmation_secs: CONFIRMATION_SECS,
        }
        .render()
        .unwrap();

        assert!(html.contains("Message Sent!"));
        assert!(html.contains("/contact/form"));
        assert!(html.contains("delay:3s"));
    }
}
