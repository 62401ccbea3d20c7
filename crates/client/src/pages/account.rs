//! Account settings: password, two-factor, biometric and push.
//!
//! Each action validates locally first, so a malformed request never reaches
//! the backend. Successful actions append a notice to the page rows.

use tracing::info;

use ledgerdesk_shared::types::UserId;
use ledgerdesk_shared::{AppError, AppResult};

use super::PageState;
use crate::gateway::{PasswordChange, PushSubscription};
use crate::session::SessionContext;

const MIN_PASSWORD_LEN: usize = 8;
const TWO_FACTOR_DIGITS: usize = 6;

/// Account screen. Rows are the confirmation notices shown to the user.
#[derive(Debug, Clone, Default)]
pub struct AccountPage {
    state: PageState<String>,
}

impl AccountPage {
    /// Empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices, loading flag and inline error.
    pub fn state(&self) -> &PageState<String> {
        &self.state
    }

    /// Changes the signed-in user's password.
    pub async fn change_password(
        &mut self,
        ctx: &SessionContext,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> bool {
        let prepared = check_password_change(current, new, confirm)
            .and_then(|change| Ok((ctx.require_user()?.0, change)));
        let (user, change) = match prepared {
            Ok(prepared) => prepared,
            Err(err) => {
                self.state.fail("change password", &err);
                return false;
            }
        };
        self.state.begin();
        let result = ctx.gateway().change_password(user.id, &change).await;
        if self.state.finish("change password", result).is_none() {
            return false;
        }
        info!(user_id = %user.id, "password changed");
        self.notice("Password changed")
    }

    /// Checks a one-time code. A refused code is shown like a validation error.
    pub async fn verify_two_factor(&mut self, ctx: &SessionContext, code: &str) -> bool {
        let code = code.trim();
        let prepared = check_two_factor_code(code).and_then(|()| ctx.require_user());
        let (user, _) = match prepared {
            Ok(prepared) => prepared,
            Err(err) => {
                self.state.fail("verify two-factor code", &err);
                return false;
            }
        };
        self.state.begin();
        let result = ctx
            .gateway()
            .verify_two_factor(user.id, code)
            .await
            .and_then(|verified| {
                if verified {
                    Ok(())
                } else {
                    Err(AppError::Validation("The code is not valid".to_string()))
                }
            });
        if self.state.finish("verify two-factor code", result).is_none() {
            return false;
        }
        self.notice("Two-factor code verified")
    }

    /// Registers a biometric credential produced by the platform authenticator.
    pub async fn register_biometric(
        &mut self,
        ctx: &SessionContext,
        credential: &serde_json::Value,
    ) -> bool {
        let prepared = if credential.is_object() {
            ctx.require_user()
        } else {
            Err(AppError::Validation(
                "Biometric credential is malformed".to_string(),
            ))
        };
        let (user, _) = match prepared {
            Ok(prepared) => prepared,
            Err(err) => {
                self.state.fail("register biometric", &err);
                return false;
            }
        };
        self.state.begin();
        let result = ctx.gateway().register_biometric(user.id, credential).await;
        if self.state.finish("register biometric", result).is_none() {
            return false;
        }
        info!(user_id = %user.id, "biometric credential registered");
        self.notice("Biometric sign-in enabled")
    }

    /// Subscribes this device to push notifications.
    pub async fn subscribe_push(
        &mut self,
        ctx: &SessionContext,
        endpoint: &str,
        p256dh: &str,
        auth: &str,
    ) -> bool {
        let prepared = ctx.require_user().and_then(|(user, _)| {
            build_subscription(user.id, endpoint.trim(), p256dh.trim(), auth.trim())
        });
        let subscription = match prepared {
            Ok(subscription) => subscription,
            Err(err) => {
                self.state.fail("subscribe push", &err);
                return false;
            }
        };
        self.state.begin();
        let result = ctx.gateway().subscribe_push(&subscription).await;
        if self.state.finish("subscribe push", result).is_none() {
            return false;
        }
        info!(user_id = %subscription.user_id, "push subscription registered");
        self.notice("Notifications enabled")
    }

    fn notice(&mut self, text: &str) -> bool {
        self.state.rows.push(text.to_string());
        true
    }
}

fn check_password_change(current: &str, new: &str, confirm: &str) -> AppResult<PasswordChange> {
    if current.is_empty() {
        return Err(AppError::Validation(
            "Current password is required".to_string(),
        ));
    }
    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if new != confirm {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }
    if new == current {
        return Err(AppError::Validation(
            "New password must differ from the current one".to_string(),
        ));
    }
    Ok(PasswordChange {
        current_password: current.to_string(),
        new_password: new.to_string(),
    })
}

fn check_two_factor_code(code: &str) -> AppResult<()> {
    if code.len() == TWO_FACTOR_DIGITS && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Enter the {TWO_FACTOR_DIGITS}-digit code"
        )))
    }
}

fn build_subscription(
    user_id: UserId,
    endpoint: &str,
    p256dh: &str,
    auth: &str,
) -> AppResult<PushSubscription> {
    if !endpoint.starts_with("https://") {
        return Err(AppError::Validation(
            "Push endpoint must use https".to_string(),
        ));
    }
    if p256dh.is_empty() || auth.is_empty() {
        return Err(AppError::Validation(
            "Push subscription keys are missing".to_string(),
        ));
    }
    Ok(PushSubscription {
        user_id,
        endpoint: endpoint.to_string(),
        p256dh: p256dh.to_string(),
        auth: auth.to_string(),
    })
}
