//! Submission status and its forward-only lifecycle.

use serde::{Deserialize, Serialize};

/// Status of a contact submission.
///
/// Statuses only move forward: `new -> read -> replied`, with `new ->
/// replied` allowed when replying without a separate read step. `replied`
/// is terminal. Deletion is not a status; it removes the record entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Just submitted, not yet looked at.
    #[default]
    New,
    /// Seen by an operator.
    Read,
    /// Answered. Terminal.
    Replied,
}

impl SubmissionStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::New, Self::Read, Self::Replied];

    /// The status as its stored string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }

    /// Whether the forward-only lifecycle permits moving to `next`.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::New, Self::Read | Self::Replied) | (Self::Read, Self::Replied)
        )
    }

    /// Statuses this one may still advance to.
    ///
    /// Drives which action controls the inbox renders for a row.
    #[must_use]
    pub const fn forward_targets(self) -> &'static [Self] {
        match self {
            Self::New => &[Self::Read, Self::Replied],
            Self::Read => &[Self::Replied],
            Self::Replied => &[],
        }
    }

    /// Statuses a submission may hold immediately before advancing to
    /// `next`. Used as the store-side guard on status writes.
    #[must_use]
    pub const fn advance_sources(next: Self) -> &'static [Self] {
        match next {
            Self::New => &[],
            Self::Read => &[Self::New],
            Self::Replied => &[Self::New, Self::Read],
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            _ => Err(format!("invalid submission status: {s}")),
        }
    }
}

// SQLx support (with postgres feature): stored as TEXT, parsed on decode.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for SubmissionStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for SubmissionStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        s.parse().map_err(Into::into)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for SubmissionStatus {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}
