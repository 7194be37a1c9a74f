//! Seed data command.

use folio_core::submissions::Submissions;
use folio_core::{Provenance, SubmissionInput};

use super::{CommandError, connect};

const SAMPLES: &[(&str, &str, &str, &str)] = &[
    (
        "Ada Fernandez",
        "ada@example.com",
        "Freelance project inquiry",
        "We're looking for help rebuilding our booking flow over the next quarter.",
    ),
    (
        "Sam Okafor",
        "sam.okafor@example.org",
        "Conference talk",
        "Would you be interested in speaking about server-rendered Rust at our meetup?",
    ),
    (
        "Priya Nair",
        "priya@example.net",
        "Performance audit",
        "Our API p99 latency doubled last month and we could use a second pair of eyes.",
    ),
    (
        "Jonas Keller",
        "jonas.k@example.com",
        "Collaboration",
        "Saw your hackathon scanner project - keen to chat about a similar idea.",
    ),
];

/// Insert `count` sample submissions through the regular pipeline.
///
/// Going through [`Submissions::submit`] rather than raw SQL means seeded
/// rows get the same sanitization and defaults as real ones.
///
/// # Errors
///
/// Returns `CommandError` if the store is unreachable or an insert fails.
pub async fn run(count: usize) -> Result<(), CommandError> {
    let pool = connect().await?;
    let submissions = Submissions::new(&pool);

    for (name, email, subject, message) in SAMPLES.iter().cycle().take(count) {
        let input = SubmissionInput {
            name: (*name).to_owned(),
            email: (*email).to_owned(),
            subject: (*subject).to_owned(),
            message: (*message).to_owned(),
        };
        let id = submissions.submit(&input, &Provenance::default()).await?;
        tracing::info!(%id, name, "seeded submission");
    }

    tracing::info!("Seeded {count} submissions");
    Ok(())
}
