//! User roles.

use serde::{Deserialize, Serialize};

/// Error returned when a role name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);

/// The role a signed-in user acts under.
///
/// Each role has its own pages and landing page; operators administer the
/// platform and may view every role's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Buys and holds tickets.
    Attendee,
    /// Creates events and ticket tiers, receives payouts.
    Organizer,
    /// Sells tickets on commission through referral codes.
    Promoter,
    /// Platform staff.
    Operator,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Self; 4] = [
        Self::Attendee,
        Self::Organizer,
        Self::Promoter,
        Self::Operator,
    ];

    /// Landing page for this role.
    #[must_use]
    pub const fn home_path(self) -> &'static str {
        match self {
            Self::Attendee => "/tickets",
            Self::Organizer => "/organizer/dashboard",
            Self::Promoter => "/promoter/dashboard",
            Self::Operator => "/operator",
        }
    }

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attendee => "attendee",
            Self::Organizer => "organizer",
            Self::Promoter => "promoter",
            Self::Operator => "operator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attendee" => Ok(Self::Attendee),
            "organizer" => Ok(Self::Organizer),
            "promoter" => Ok(Self::Promoter),
            // the backend still emits "admin" for operator accounts
            "operator" | "admin" => Ok(Self::Operator),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}
