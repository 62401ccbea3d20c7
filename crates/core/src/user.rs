//! User records as the client sees them.

use serde::{Deserialize, Serialize};

use ledgerdesk_shared::types::UserId;

use crate::role::{UnknownRoleError, UserRole};

/// A user of any role.
///
/// `user_type` is kept as the raw backend string so that a stored session with a
/// role this client does not know still loads; callers resolve it with
/// [`User::role`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    /// Backend key.
    pub id: UserId,
    /// Display name.
    pub user_name: String,
    /// Role string, e.g. `"Collector"`.
    pub user_type: String,
    /// The user this one reports to (a retailer's collector, a collector's cashier).
    #[serde(default)]
    pub parent_id: Option<UserId>,
}

impl User {
    /// Creates a user with a known role.
    #[must_use]
    pub fn new(id: UserId, user_name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            user_name: user_name.into(),
            user_type: role.as_str().to_string(),
            parent_id: None,
        }
    }

    /// Sets the parent user.
    #[must_use]
    pub fn with_parent(mut self, parent_id: UserId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Resolves the role string against the roles this client knows.
    pub fn role(&self) -> Result<UserRole, UnknownRoleError> {
        self.user_type.parse()
    }
}

/// Request to create a user (admin "add user" action).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewUser {
    /// Display name.
    pub user_name: String,
    /// Role to assign.
    pub user_type: UserRole,
    /// Initial password.
    pub password: String,
    /// Optional parent assignment.
    #[serde(default)]
    pub parent_id: Option<UserId>,
}
