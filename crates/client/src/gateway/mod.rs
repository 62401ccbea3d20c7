//! Backend gateway.
//!
//! Every call the client makes to the backend goes through [`LedgerApi`].
//! [`HttpGateway`] is the real implementation; tests plug in a mock.

mod http;
mod types;

use async_trait::async_trait;

use ledgerdesk_core::User;
use ledgerdesk_core::attachment::{Attachment, NewAttachment};
use ledgerdesk_core::ledger::{LedgerEntry, LedgerPayload};
use ledgerdesk_core::liability::{LiabilityKind, LiabilitySummary};
use ledgerdesk_core::master_data::RawMasterData;
use ledgerdesk_core::user::NewUser;
use ledgerdesk_shared::AppResult;
use ledgerdesk_shared::types::{DocId, LedgerEntryId, UserId};

pub use http::HttpGateway;
pub use types::{
    Decision, ParentAssignment, PasswordChange, PushSubscription, SignInRequest, TwoFactorCode,
    TwoFactorResult, UploadResult,
};

/// The backend REST API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Checks credentials and returns the user.
    async fn sign_in(&self, user_id: UserId, password: &str) -> AppResult<User>;

    /// Transaction type and workflow lookup tables.
    async fn master_data(&self) -> AppResult<RawMasterData>;

    /// Ledger entries visible to `user_id`.
    async fn list_ledger(&self, user_id: UserId) -> AppResult<Vec<LedgerEntry>>;

    /// Records a new entry.
    async fn create_ledger(&self, payload: &LedgerPayload) -> AppResult<LedgerEntry>;

    /// Replaces an existing entry.
    async fn update_ledger(
        &self,
        id: LedgerEntryId,
        payload: &LedgerPayload,
    ) -> AppResult<LedgerEntry>;

    /// Deletes an entry.
    async fn delete_ledger(&self, id: LedgerEntryId) -> AppResult<()>;

    /// Entries waiting for `user_id`'s decision.
    async fn pending_approvals(&self, user_id: UserId) -> AppResult<Vec<LedgerEntry>>;

    /// Moves an entry to another stage.
    async fn decide(&self, id: LedgerEntryId, decision: &Decision) -> AppResult<()>;

    /// Liability report.
    async fn liabilities(&self, kind: LiabilityKind) -> AppResult<Vec<LiabilitySummary>>;

    /// All users.
    async fn users(&self) -> AppResult<Vec<User>>;

    /// Creates a user.
    async fn create_user(&self, user: &NewUser) -> AppResult<User>;

    /// Sets or clears a user's parent.
    async fn assign_parent(&self, user_id: UserId, parent_id: Option<UserId>) -> AppResult<User>;

    /// Changes the signed-in user's password.
    async fn change_password(&self, user_id: UserId, change: &PasswordChange) -> AppResult<()>;

    /// Verifies a two-factor code.
    async fn verify_two_factor(&self, user_id: UserId, code: &str) -> AppResult<bool>;

    /// Registers a biometric credential. The payload is passed through untouched.
    async fn register_biometric(
        &self,
        user_id: UserId,
        credential: &serde_json::Value,
    ) -> AppResult<()>;

    /// Downloads a document.
    async fn download_attachment(&self, doc_id: DocId) -> AppResult<Attachment>;

    /// Uploads a document.
    async fn upload_attachment(&self, attachment: &NewAttachment) -> AppResult<DocId>;

    /// Subscribes to push notifications.
    async fn subscribe_push(&self, subscription: &PushSubscription) -> AppResult<()>;
}
