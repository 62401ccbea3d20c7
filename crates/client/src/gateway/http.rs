//! `reqwest` implementation of [`LedgerApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use ledgerdesk_core::User;
use ledgerdesk_core::attachment::{Attachment, NewAttachment};
use ledgerdesk_core::ledger::{LedgerEntry, LedgerPayload};
use ledgerdesk_core::liability::{LiabilityKind, LiabilitySummary};
use ledgerdesk_core::master_data::RawMasterData;
use ledgerdesk_core::user::NewUser;
use ledgerdesk_shared::config::ApiConfig;
use ledgerdesk_shared::types::{DocId, LedgerEntryId, UserId};
use ledgerdesk_shared::{AppError, AppResult};

use super::LedgerApi;
use super::types::{
    Decision, ParentAssignment, PasswordChange, PushSubscription, SignInRequest, TwoFactorCode,
    TwoFactorResult, UploadResult,
};

/// JSON-over-HTTP gateway to the backend.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Builds a gateway with the configured base URL and timeout.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("HTTP client: {e}")))?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Builds a gateway around an existing client.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "backend request");
        self.client.request(method, format!("{}{path}", self.base_url))
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            body
        };
        warn!(status = status.as_u16(), %message, "backend returned an error");
        Err(AppError::from_status(status.as_u16(), message))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let body = self
            .send(request)
            .await?
            .bytes()
            .await
            .map_err(transport_error)?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn execute(&self, request: RequestBuilder) -> AppResult<()> {
        self.send(request).await.map(|_| ())
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Network(format!("request timed out: {err}"))
    } else if err.is_decode() {
        AppError::Decode(err.to_string())
    } else {
        AppError::Network(err.to_string())
    }
}

#[async_trait]
impl LedgerApi for HttpGateway {
    async fn sign_in(&self, user_id: UserId, password: &str) -> AppResult<User> {
        let body = SignInRequest {
            user_id,
            password: password.to_string(),
        };
        self.fetch(self.request(Method::POST, "/auth/signin").json(&body))
            .await
    }

    async fn master_data(&self) -> AppResult<RawMasterData> {
        self.fetch(self.request(Method::GET, "/master-data")).await
    }

    async fn list_ledger(&self, user_id: UserId) -> AppResult<Vec<LedgerEntry>> {
        self.fetch(
            self.request(Method::GET, "/ledgers")
                .query(&[("userId", user_id.into_inner())]),
        )
        .await
    }

    async fn create_ledger(&self, payload: &LedgerPayload) -> AppResult<LedgerEntry> {
        self.fetch(self.request(Method::POST, "/ledgers").json(payload))
            .await
    }

    async fn update_ledger(
        &self,
        id: LedgerEntryId,
        payload: &LedgerPayload,
    ) -> AppResult<LedgerEntry> {
        self.fetch(
            self.request(Method::PUT, &format!("/ledgers/{id}"))
                .json(payload),
        )
        .await
    }

    async fn delete_ledger(&self, id: LedgerEntryId) -> AppResult<()> {
        self.execute(self.request(Method::DELETE, &format!("/ledgers/{id}")))
            .await
    }

    async fn pending_approvals(&self, user_id: UserId) -> AppResult<Vec<LedgerEntry>> {
        self.fetch(
            self.request(Method::GET, "/approvals")
                .query(&[("userId", user_id.into_inner())]),
        )
        .await
    }

    async fn decide(&self, id: LedgerEntryId, decision: &Decision) -> AppResult<()> {
        self.execute(
            self.request(Method::POST, &format!("/approvals/{id}"))
                .json(decision),
        )
        .await
    }

    async fn liabilities(&self, kind: LiabilityKind) -> AppResult<Vec<LiabilitySummary>> {
        self.fetch(self.request(Method::GET, &format!("/liabilities/{kind}")))
            .await
    }

    async fn users(&self) -> AppResult<Vec<User>> {
        self.fetch(self.request(Method::GET, "/users")).await
    }

    async fn create_user(&self, user: &NewUser) -> AppResult<User> {
        self.fetch(self.request(Method::POST, "/users").json(user))
            .await
    }

    async fn assign_parent(&self, user_id: UserId, parent_id: Option<UserId>) -> AppResult<User> {
        self.fetch(
            self.request(Method::PUT, &format!("/users/{user_id}/parent"))
                .json(&ParentAssignment { parent_id }),
        )
        .await
    }

    async fn change_password(&self, user_id: UserId, change: &PasswordChange) -> AppResult<()> {
        self.execute(
            self.request(Method::POST, &format!("/account/{user_id}/password"))
                .json(change),
        )
        .await
    }

    async fn verify_two_factor(&self, user_id: UserId, code: &str) -> AppResult<bool> {
        let result: TwoFactorResult = self
            .fetch(
                self.request(
                    Method::POST,
                    &format!("/account/{user_id}/two-factor/verify"),
                )
                .json(&TwoFactorCode {
                    code: code.to_string(),
                }),
            )
            .await?;
        Ok(result.verified)
    }

    async fn register_biometric(
        &self,
        user_id: UserId,
        credential: &serde_json::Value,
    ) -> AppResult<()> {
        self.execute(
            self.request(Method::POST, &format!("/account/{user_id}/biometric"))
                .json(credential),
        )
        .await
    }

    async fn download_attachment(&self, doc_id: DocId) -> AppResult<Attachment> {
        self.fetch(self.request(Method::GET, &format!("/attachments/{doc_id}")))
            .await
    }

    async fn upload_attachment(&self, attachment: &NewAttachment) -> AppResult<DocId> {
        let result: UploadResult = self
            .fetch(self.request(Method::POST, "/attachments").json(attachment))
            .await?;
        Ok(result.doc_id)
    }

    async fn subscribe_push(&self, subscription: &PushSubscription) -> AppResult<()> {
        self.execute(self.request(Method::POST, "/push/subscribe").json(subscription))
            .await
    }
}
