//! Session store and the per-session context.
//!
//! The signed-in user lives in memory and is mirrored into a
//! [`SessionStorage`]. A memory miss rehydrates from storage, so a restarted
//! process picks the user up again without signing in. Nothing expires: the
//! stored user stays valid until sign-out.

mod storage;

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use ledgerdesk_core::guard::{CurrentUserSource, GuardOutcome, RedirectReason, RouteGuard};
use ledgerdesk_core::master_data::MasterData;
use ledgerdesk_core::{User, UserRole};
use ledgerdesk_shared::types::UserId;
use ledgerdesk_shared::{AppConfig, AppError, AppResult};

use crate::gateway::{HttpGateway, LedgerApi};

pub use storage::{FileStorage, MemoryStorage, SessionStorage};

/// Inline error for a screen the signed-in role may not open.
pub const NO_ACCESS: &str = "You do not have access to this screen";

/// The signed-in user, in memory and in durable storage.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    current: RwLock<Option<User>>,
}

impl SessionStore {
    /// Creates an empty store over `storage`. Nothing is read yet.
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            current: RwLock::new(None),
        }
    }

    /// The signed-in user, rehydrating from storage on a memory miss.
    ///
    /// A stored value that cannot be read is logged and treated as signed out.
    pub fn current_user(&self) -> Option<User> {
        if let Some(user) = self
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Some(user);
        }

        let restored = match self.storage.load() {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(error = %err, "stored session is unreadable, ignoring it");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, code = err.error_code(), "cannot read stored session");
                None
            }
        };
        if let Some(user) = &restored {
            debug!(user_id = %user.id, "session rehydrated from storage");
            *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
        }
        restored
    }

    /// Stores `user` in memory and storage.
    pub fn set_user(&self, user: User) -> AppResult<()> {
        let raw = serde_json::to_string(&user)?;
        self.storage.save(&raw)?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
        Ok(())
    }

    /// Forgets the user in storage, then in memory. If storage cannot be
    /// cleared the user stays signed in.
    pub fn clear(&self) -> AppResult<()> {
        self.storage.clear()?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

impl CurrentUserSource for SessionStore {
    fn current_user(&self) -> Option<User> {
        Self::current_user(self)
    }
}

/// Everything a page or command needs for one session: the backend gateway,
/// the session store and the master data cache.
pub struct SessionContext {
    gateway: Arc<dyn LedgerApi>,
    session: SessionStore,
    master_data: OnceCell<MasterData>,
}

impl SessionContext {
    /// Builds the context and rehydrates any stored session.
    pub fn init(gateway: Arc<dyn LedgerApi>, storage: impl SessionStorage + 'static) -> Self {
        let context = Self {
            gateway,
            session: SessionStore::new(storage),
            master_data: OnceCell::new(),
        };
        if let Some(user) = context.session.current_user() {
            info!(user_id = %user.id, role = %user.user_type, "restored session");
        }
        context
    }

    /// Builds the context from configuration: HTTP gateway plus file storage.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let gateway = HttpGateway::new(&config.api)?;
        Ok(Self::init(
            Arc::new(gateway),
            FileStorage::new(&config.session.storage_path),
        ))
    }

    /// Backend gateway.
    pub fn gateway(&self) -> &dyn LedgerApi {
        self.gateway.as_ref()
    }

    /// Session store.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    /// The signed-in user and their role, or an error a page can show.
    pub fn require_user(&self) -> AppResult<(User, UserRole)> {
        let user = self
            .current_user()
            .ok_or_else(|| AppError::Auth("not signed in".to_string()))?;
        let role = user.role()?;
        Ok((user, role))
    }

    /// Checks credentials with the backend and stores the user.
    ///
    /// A user whose role this client does not know is refused and not stored.
    pub async fn sign_in(&self, user_id: UserId, password: &str) -> AppResult<User> {
        let user = self.gateway.sign_in(user_id, password).await?;
        let role = user.role()?;
        self.session.set_user(user.clone())?;
        info!(user_id = %user.id, %role, "signed in");
        Ok(user)
    }

    /// Clears the cached master data and the session.
    pub fn sign_out(&mut self) -> AppResult<()> {
        let user = self.session.current_user();
        self.master_data.take();
        self.session.clear()?;
        if let Some(user) = user {
            info!(user_id = %user.id, "signed out");
        }
        Ok(())
    }

    /// Master data, fetched and validated once per session.
    pub async fn master_data(&self) -> AppResult<&MasterData> {
        self.master_data
            .get_or_try_init(|| async {
                let raw = self.gateway.master_data().await?;
                let data = MasterData::from_raw(raw).inspect_err(|err| {
                    warn!(error = %err, code = err.error_code(), "master data rejected");
                })?;
                debug!("master data loaded");
                Ok::<_, AppError>(data)
            })
            .await
    }

    /// Runs `guard` for a navigation to `path` against the current session.
    pub fn navigate(&self, guard: &mut RouteGuard, path: &str) -> GuardOutcome {
        let outcome = guard.navigate(path, &self.session);
        match &outcome {
            GuardOutcome::Render { path, role } => {
                debug!(%path, %role, state = ?guard.state(), "navigation allowed");
            }
            GuardOutcome::Redirect { to, reason } => {
                info!(requested = path, to, ?reason, state = ?guard.state(), "navigation redirected");
            }
        }
        outcome
    }

    /// Guards a page load: runs a protected navigation to `path` and returns
    /// the user it admitted. A redirect becomes the error the page shows.
    pub fn enter(&self, path: &str) -> AppResult<(User, UserRole)> {
        let mut guard = RouteGuard::protected();
        match self.navigate(&mut guard, path) {
            GuardOutcome::Render { .. } => self.require_user(),
            GuardOutcome::Redirect { reason, .. } => Err(match reason {
                RedirectReason::NotSignedIn => AppError::Auth("not signed in".to_string()),
                RedirectReason::UnknownRole(role) => AppError::UnknownRole(role),
                RedirectReason::PathNotAllowed | RedirectReason::AdminRequired => {
                    AppError::Validation(NO_ACCESS.to_string())
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockLedgerApi;
    use ledgerdesk_core::guard::{GuardState, RedirectReason};
    use ledgerdesk_core::master_data::{LookupRow, RawMasterData};
    use ledgerdesk_core::policy::SIGN_IN_PATH;

    fn collector() -> User {
        User::new(UserId::new(12), "Ravi", UserRole::Collector).with_parent(UserId::new(3))
    }

    fn raw_master_data() -> RawMasterData {
        let row = |id: u8, description: &str| LookupRow {
            id,
            description: description.to_string(),
        };
        RawMasterData {
            transaction_types: vec![row(1, "Cash"), row(2, "Bank/UPI"), row(3, "Other")],
            work_flows: (1..=6).map(|id| row(id, "stage")).collect(),
        }
    }

    fn signing_in_gateway(user: User) -> MockLedgerApi {
        let mut gateway = MockLedgerApi::new();
        gateway
            .expect_sign_in()
            .withf(|id, password| *id == UserId::new(12) && password.to_string() == "secret")
            .times(1)
            .returning(move |_, _| Ok(user.clone()));
        gateway
    }

    #[tokio::test]
    async fn test_sign_in_survives_reload() {
        let storage = MemoryStorage::new();
        let context = SessionContext::init(Arc::new(signing_in_gateway(collector())), storage.clone());
        assert_eq!(context.current_user(), None);
        context.sign_in(UserId::new(12), "secret").await.unwrap();
        assert_eq!(context.current_user(), Some(collector()));

        // A fresh context over the same storage, with a gateway that would fail
        // any call: the user comes back without re-authenticating.
        let reloaded = SessionContext::init(Arc::new(MockLedgerApi::new()), storage);
        assert_eq!(reloaded.current_user(), Some(collector()));
    }

    #[tokio::test]
    async fn test_failed_sign_in_stores_nothing() {
        let mut gateway = MockLedgerApi::new();
        gateway
            .expect_sign_in()
            .returning(|_, _| Err(AppError::Auth("bad password".into())));
        let storage = MemoryStorage::new();
        let context = SessionContext::init(Arc::new(gateway), storage.clone());
        let err = context.sign_in(UserId::new(12), "wrong").await.unwrap_err();
        assert_eq!(err.error_code(), "AUTH_ERROR");
        assert_eq!(storage.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_role_is_refused() {
        let stranger = User {
            user_type: "Auditor".into(),
            ..collector()
        };
        let storage = MemoryStorage::new();
        let context = SessionContext::init(Arc::new(signing_in_gateway(stranger)), storage.clone());
        let err = context.sign_in(UserId::new(12), "secret").await.unwrap_err();
        assert!(matches!(err, AppError::UnknownRole(role) if role == "Auditor"));
        assert_eq!(context.current_user(), None);
    }

    #[tokio::test]
    async fn test_sign_out_clears_everything() {
        let mut gateway = signing_in_gateway(collector());
        gateway
            .expect_master_data()
            .times(2)
            .returning(|| Ok(raw_master_data()));
        let storage = MemoryStorage::new();
        let mut context = SessionContext::init(Arc::new(gateway), storage.clone());
        context.sign_in(UserId::new(12), "secret").await.unwrap();
        context.master_data().await.unwrap();
        context.master_data().await.unwrap();

        context.sign_out().unwrap();
        assert_eq!(context.current_user(), None);
        assert_eq!(storage.load().unwrap(), None);
        // Cache was dropped: the next read fetches again.
        context.master_data().await.unwrap();
    }

    /// Storage whose clear always fails.
    #[derive(Clone)]
    struct StuckStorage(MemoryStorage);

    impl SessionStorage for StuckStorage {
        fn load(&self) -> AppResult<Option<String>> {
            self.0.load()
        }

        fn save(&self, value: &str) -> AppResult<()> {
            self.0.save(value)
        }

        fn clear(&self) -> AppResult<()> {
            Err(AppError::Storage("read-only file system".to_string()))
        }
    }

    #[tokio::test]
    async fn test_failed_sign_out_keeps_session_consistent() {
        let mut gateway = signing_in_gateway(collector());
        gateway
            .expect_master_data()
            .times(2)
            .returning(|| Ok(raw_master_data()));
        let storage = StuckStorage(MemoryStorage::new());
        let mut context = SessionContext::init(Arc::new(gateway), storage.clone());
        context.sign_in(UserId::new(12), "secret").await.unwrap();
        context.master_data().await.unwrap();

        let err = context.sign_out().unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        // Memory still matches storage, and the cache was dropped anyway.
        assert_eq!(context.current_user(), Some(collector()));
        assert!(storage.load().unwrap().is_some());
        context.master_data().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_master_data_fails_fast() {
        let mut gateway = MockLedgerApi::new();
        gateway.expect_master_data().returning(|| {
            let mut raw = raw_master_data();
            raw.work_flows.pop();
            Ok(raw)
        });
        let context = SessionContext::init(Arc::new(gateway), MemoryStorage::new());
        let err = context.master_data().await.unwrap_err();
        assert_eq!(err.error_code(), "DECODE_ERROR");
    }

    #[test]
    fn test_corrupt_storage_reads_as_signed_out() {
        let storage = MemoryStorage::new();
        storage.save("not json").unwrap();
        let store = SessionStore::new(storage);
        assert_eq!(store.current_user(), None);
    }

    #[test]
    fn test_enter_refuses_screens_outside_the_role() {
        let context = SessionContext::init(Arc::new(MockLedgerApi::new()), MemoryStorage::new());
        assert_eq!(
            context.enter("/approvals").unwrap_err().error_code(),
            "AUTH_ERROR"
        );

        context.session().set_user(collector()).unwrap();
        let (user, role) = context.enter("/approvals").unwrap();
        assert_eq!(user, collector());
        assert_eq!(role, UserRole::Collector);

        let zone = User::new(UserId::new(9), "Meena", UserRole::ZoneManager);
        context.session().set_user(zone).unwrap();
        let err = context.enter("/approvals").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.inline_message(), NO_ACCESS);

        let stranger = User {
            user_type: "Auditor".into(),
            ..collector()
        };
        context.session().set_user(stranger).unwrap();
        assert!(matches!(
            context.enter("/"),
            Err(AppError::UnknownRole(role)) if role == "Auditor"
        ));
    }

    #[test]
    fn test_navigate_uses_current_session() {
        let storage = MemoryStorage::new();
        let context = SessionContext::init(Arc::new(MockLedgerApi::new()), storage.clone());
        let mut guard = RouteGuard::protected();

        let outcome = context.navigate(&mut guard, "/approvals");
        assert_eq!(outcome.redirect_target(), Some(SIGN_IN_PATH));

        context.session().set_user(collector()).unwrap();
        assert!(context.navigate(&mut guard, "/approvals").is_render());
        assert_eq!(guard.state(), GuardState::Authorized);

        let retailer = User::new(UserId::new(4), "Kiran", UserRole::Retailer);
        context.session().set_user(retailer).unwrap();
        assert_eq!(
            context.navigate(&mut guard, "/users/add"),
            GuardOutcome::Redirect {
                to: "/",
                reason: RedirectReason::PathNotAllowed
            }
        );
    }
}
