//! Account records for the three self-service roles.
//!
//! Each role has a full record (what the account endpoints return) and a
//! partial-update record where every field is optional and omitted from the
//! request body when `None`, so a `PUT` only touches what the form changed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CurrencyCode, Email, Role, UserId};

/// Read-only profile facts shared by every account record.
///
/// Used to build the session's [`CurrentUser`](super::CurrentUser) after a
/// profile refresh.
pub trait AccountProfile {
    /// Account owner's user ID.
    fn user_id(&self) -> UserId;
    /// Login email.
    fn email(&self) -> &Email;
    /// Name shown in the navigation bar.
    fn display_name(&self) -> String;
    /// Role this account belongs to.
    fn role(&self) -> Role;
    /// Whether the email address has been verified.
    fn email_verified(&self) -> bool;
    /// Whether the role's onboarding flow has been completed.
    fn onboarded(&self) -> bool;
}

fn full_name(first: &str, last: &str) -> String {
    format!("{first} {last}").trim().to_string()
}

/// An attendee account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeAccount {
    pub id: UserId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl AccountProfile for AttendeeAccount {
    fn user_id(&self) -> UserId {
        self.id
    }

    fn email(&self) -> &Email {
        &self.email
    }

    fn display_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    fn role(&self) -> Role {
        Role::Attendee
    }

    fn email_verified(&self) -> bool {
        self.email_verified
    }

    // Attendees have no onboarding flow.
    fn onboarded(&self) -> bool {
        true
    }
}

/// Partial update for an attendee account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeAccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl AttendeeAccountUpdate {
    /// Returns `true` if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.phone.is_none()
    }
}

/// An organizer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizerAccount {
    pub id: UserId,
    pub email: Email,
    pub organization_name: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub payout_currency: CurrencyCode,
    #[serde(default)]
    pub onboarding_complete: bool,
    #[serde(default)]
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl AccountProfile for OrganizerAccount {
    fn user_id(&self) -> UserId {
        self.id
    }

    fn email(&self) -> &Email {
        &self.email
    }

    fn display_name(&self) -> String {
        if self.organization_name.trim().is_empty() {
            full_name(&self.first_name, &self.last_name)
        } else {
            self.organization_name.clone()
        }
    }

    fn role(&self) -> Role {
        Role::Organizer
    }

    fn email_verified(&self) -> bool {
        self.email_verified
    }

    fn onboarded(&self) -> bool {
        self.onboarding_complete
    }
}

/// Partial update for an organizer account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizerAccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_currency: Option<CurrencyCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_complete: Option<bool>,
}

impl OrganizerAccountUpdate {
    /// Returns `true` if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.organization_name.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.website.is_none()
            && self.bio.is_none()
            && self.payout_currency.is_none()
            && self.onboarding_complete.is_none()
    }
}

/// A promoter account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoterAccount {
    pub id: UserId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Code buyers enter at checkout to credit this promoter.
    pub referral_code: String,
    /// Commission percentage, e.g. `7.5`.
    pub commission_rate: Decimal,
    #[serde(default)]
    pub onboarding_complete: bool,
    #[serde(default)]
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl AccountProfile for PromoterAccount {
    fn user_id(&self) -> UserId {
        self.id
    }

    fn email(&self) -> &Email {
        &self.email
    }

    fn display_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    fn role(&self) -> Role {
        Role::Promoter
    }

    fn email_verified(&self) -> bool {
        self.email_verified
    }

    fn onboarded(&self) -> bool {
        self.onboarding_complete
    }
}

/// Partial update for a promoter account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoterAccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_complete: Option<bool>,
}

impl PromoterAccountUpdate {
    /// Returns `true` if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.onboarding_complete.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_update_omits_unset_fields() {
        let update = OrganizerAccountUpdate {
            bio: Some("Warehouse parties since 2009".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "bio": "Warehouse parties since 2009" }));
        assert!(!update.is_empty());
        assert!(OrganizerAccountUpdate::default().is_empty());
    }

    #[test]
    fn test_organizer_display_name_falls_back_to_person() {
        let account: OrganizerAccount = serde_json::from_value(serde_json::json!({
            "id": 3,
            "email": "ops@lowlight.events",
            "organization_name": " ",
            "first_name": "Ada",
            "last_name": "Obi",
            "created_at": "2026-01-05T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(account.display_name(), "Ada Obi");
        assert!(!account.onboarded());
        assert_eq!(account.payout_currency, CurrencyCode::USD);
    }
}
