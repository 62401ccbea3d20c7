//! Request and response bodies exchanged with the backend.

use serde::{Deserialize, Serialize};

use ledgerdesk_core::workflow::WorkFlow;
use ledgerdesk_shared::types::{DocId, UserId};

/// Body of `POST /auth/signin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignInRequest {
    /// User id typed on the sign-in screen.
    pub user_id: UserId,
    /// Password.
    pub password: String,
}

/// An approve / reject / stuck-in-bank decision on one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Decision {
    /// Stage the entry moves to.
    pub work_flow: WorkFlow,
    /// Reason, required for rejections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Body of `PUT /users/{id}/parent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParentAssignment {
    /// New parent; `None` unassigns.
    pub parent_id: Option<UserId>,
}

/// Body of `POST /account/{id}/password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PasswordChange {
    /// Current password.
    pub current_password: String,
    /// Replacement password.
    pub new_password: String,
}

/// Body of `POST /account/{id}/two-factor/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TwoFactorCode {
    /// One-time code.
    pub code: String,
}

/// Answer to a two-factor verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TwoFactorResult {
    /// Whether the code was accepted.
    pub verified: bool,
}

/// A web-push subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PushSubscription {
    /// Subscribing user.
    pub user_id: UserId,
    /// Push service endpoint.
    pub endpoint: String,
    /// Client public key.
    pub p256dh: String,
    /// Auth secret.
    pub auth: String,
}

/// Answer to an attachment upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UploadResult {
    /// Key of the stored document.
    pub doc_id: DocId,
}
