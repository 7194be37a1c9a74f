//! Portfolio page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;

/// A portfolio project card.
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub url: &'static str,
}

/// A service offering shown in the services section.
pub struct Service {
    pub name: &'static str,
    pub description: &'static str,
}

/// Static portfolio content. This is presentation, not state: editing the
/// portfolio means editing these tables and redeploying.
const PROJECTS: &[Project] = &[
    Project {
        title: "Ledgerline",
        description: "Self-hosted budgeting dashboard with multi-currency \
                      accounts and CSV import pipelines.",
        tags: &["Rust", "Axum", "PostgreSQL"],
        url: "https://github.com/folio-dev/ledgerline",
    },
    Project {
        title: "Wavecap",
        description: "Real-time audio capture tool that streams annotated \
                      waveforms to the browser.",
        tags: &["Rust", "WebSockets", "DSP"],
        url: "https://github.com/folio-dev/wavecap",
    },
    Project {
        title: "Shelfware",
        description: "Hackathon-winning inventory scanner for community \
                      libraries, built in a weekend.",
        tags: &["TypeScript", "SQLite"],
        url: "https://github.com/folio-dev/shelfware",
    },
    Project {
        title: "Gridnote",
        description: "Keyboard-driven plain-text spreadsheet for people who \
                      live in the terminal.",
        tags: &["Rust", "TUI"],
        url: "https://github.com/folio-dev/gridnote",
    },
];

const SERVICES: &[Service] = &[
    Service {
        name: "Web Development",
        description: "Fast, server-rendered sites and applications built to \
                      stay maintainable.",
    },
    Service {
        name: "Backend & APIs",
        description: "Reliable services with sensible data models, from \
                      prototype to production.",
    },
    Service {
        name: "Performance Work",
        description: "Profiling, tuning and load testing for systems that \
                      have outgrown their first draft.",
    },
    Service {
        name: "Technical Consulting",
        description: "Architecture reviews and pragmatic advice for teams \
                      picking their next stack.",
    },
];

/// Portfolio page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub projects: &'static [Project],
    pub services: &'static [Service],
}

/// Render the portfolio page.
pub async fn index() -> impl IntoResponse {
    HomeTemplate {
        projects: PROJECTS,
        services: SERVICES,
    }
}
