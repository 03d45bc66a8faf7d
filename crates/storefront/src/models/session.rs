//! Session-related types.
//!
//! Authentication is an external collaborator: something else signs the
//! visitor in and writes their profile snapshot into the session. The
//! storefront only reads it.

use serde::{Deserialize, Serialize};

/// Session-stored visitor identity.
///
/// The profile fields feed checkout validation and the payment widget
/// prefill; all of them may be absent except the name and email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Contact phone number, if the profile has one.
    #[serde(default)]
    pub phone: Option<String>,
    /// Shipping address; checkout requires it.
    #[serde(default)]
    pub address: Option<String>,
}

impl CurrentUser {
    /// Whether the profile is complete enough to check out.
    #[must_use]
    pub fn has_address(&self) -> bool {
        self.address.as_deref().is_some_and(|a| !a.trim().is_empty())
    }
}

/// Session keys for visitor state.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the persisted cart snapshot.
    pub const CART: &str = "cart";

    /// Key for the accumulated browse state.
    pub const BROWSE: &str = "browse";

    /// Key for the pending checkout awaiting the widget callback.
    pub const PENDING_PAYMENT: &str = "pending_payment";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_address_does_not_count() {
        let user = CurrentUser {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: None,
            address: Some("   ".to_string()),
        };
        assert!(!user.has_address());
    }

    #[test]
    fn test_present_address_counts() {
        let user = CurrentUser {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: Some("9876543210".to_string()),
            address: Some("12 MG Road, Pune".to_string()),
        };
        assert!(user.has_address());
    }
}
