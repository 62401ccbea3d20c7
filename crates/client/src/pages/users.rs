//! User administration: list, add, assign to a parent.

use futures::future::try_join_all;
use tracing::info;

use ledgerdesk_core::policy::is_path_allowed;
use ledgerdesk_core::table::{TableState, render, user_columns};
use ledgerdesk_core::user::NewUser;
use ledgerdesk_core::{User, UserRole};
use ledgerdesk_shared::types::UserId;
use ledgerdesk_shared::{AppError, AppResult};

use super::PageState;
use crate::session::SessionContext;

const USERS_PATH: &str = "/users";
const ADD_USER_PATH: &str = "/users/add";
const ASSIGN_USERS_PATH: &str = "/users/assign";

const MIN_PASSWORD_LEN: usize = 8;

/// Role a user of `role` reports to, if any.
#[must_use]
pub fn expected_parent_role(role: UserRole) -> Option<UserRole> {
    match role {
        UserRole::Retailer => Some(UserRole::Collector),
        UserRole::Collector => Some(UserRole::Cashier),
        UserRole::Cashier => Some(UserRole::MasterCashier),
        UserRole::Admin | UserRole::MasterCashier | UserRole::ZoneManager => None,
    }
}

/// User list screen with the add and assign actions.
#[derive(Debug, Clone, Default)]
pub struct UsersPage {
    state: PageState<User>,
    table: TableState,
}

impl UsersPage {
    /// Empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows, loading flag and inline error.
    pub fn state(&self) -> &PageState<User> {
        &self.state
    }

    /// Filter and sort state.
    pub fn table_mut(&mut self) -> &mut TableState {
        &mut self.table
    }

    /// Visible rows as display text.
    pub fn rendered(&self) -> Vec<Vec<String>> {
        render(&user_columns(), &self.table.apply(&self.state.rows))
    }

    /// Users whose role may be the parent of `user_id`.
    pub fn parent_candidates(&self, user_id: UserId) -> Vec<&User> {
        let Some(wanted) = self
            .find(user_id)
            .and_then(|u| u.role().ok())
            .and_then(expected_parent_role)
        else {
            return Vec::new();
        };
        self.state
            .rows
            .iter()
            .filter(|u| u.role().is_ok_and(|role| role == wanted))
            .collect()
    }

    /// Fetches every user.
    pub async fn load(&mut self, ctx: &SessionContext) -> bool {
        self.state.begin();
        let result = match require_path(ctx, USERS_PATH) {
            Ok(()) => ctx.gateway().users().await,
            Err(err) => Err(err),
        };
        self.state.load("list users", result)
    }

    /// Creates a user and appends it to the list.
    pub async fn add_user(&mut self, ctx: &SessionContext, user: NewUser) -> bool {
        if let Err(err) = require_path(ctx, ADD_USER_PATH).and_then(|()| self.check_new_user(&user)) {
            self.state.fail("add user", &err);
            return false;
        }
        self.state.begin();
        let result = ctx.gateway().create_user(&user).await;
        match self.state.finish("add user", result) {
            Some(created) => {
                info!(user_id = %created.id, role = %created.user_type, "user created");
                self.state.rows.push(created);
                true
            }
            None => false,
        }
    }

    /// Sets or clears the parent of one user.
    pub async fn assign(
        &mut self,
        ctx: &SessionContext,
        user_id: UserId,
        parent_id: Option<UserId>,
    ) -> bool {
        self.assign_many(ctx, &[user_id], parent_id).await
    }

    /// Clears the parent of one user.
    pub async fn unassign(&mut self, ctx: &SessionContext, user_id: UserId) -> bool {
        self.assign(ctx, user_id, None).await
    }

    /// Sets or clears the parent of several users at once. Either every
    /// update lands in the list or none does.
    pub async fn assign_many(
        &mut self,
        ctx: &SessionContext,
        user_ids: &[UserId],
        parent_id: Option<UserId>,
    ) -> bool {
        let checked = require_path(ctx, ASSIGN_USERS_PATH).and_then(|()| {
            user_ids
                .iter()
                .try_for_each(|id| self.check_assignment(*id, parent_id))
        });
        if let Err(err) = checked {
            self.state.fail("assign users", &err);
            return false;
        }

        self.state.begin();
        let gateway = ctx.gateway();
        let result = try_join_all(
            user_ids
                .iter()
                .map(|id| gateway.assign_parent(*id, parent_id)),
        )
        .await;
        let Some(updated) = self.state.finish("assign users", result) else {
            return false;
        };
        info!(count = updated.len(), parent_id = ?parent_id, "users reassigned");
        for user in updated {
            if let Some(row) = self.state.rows.iter_mut().find(|row| row.id == user.id) {
                *row = user;
            }
        }
        true
    }

    fn find(&self, id: UserId) -> Option<&User> {
        self.state.rows.iter().find(|u| u.id == id)
    }

    fn check_new_user(&self, user: &NewUser) -> AppResult<()> {
        if user.user_name.trim().is_empty() {
            return Err(AppError::Validation("User name is required".to_string()));
        }
        if user.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if let Some(parent_id) = user.parent_id {
            self.check_parent(user.user_type, parent_id)?;
        }
        Ok(())
    }

    fn check_assignment(&self, user_id: UserId, parent_id: Option<UserId>) -> AppResult<()> {
        let user = self
            .find(user_id)
            .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))?;
        let role = user.role()?;
        match parent_id {
            Some(parent_id) => self.check_parent(role, parent_id),
            None => Ok(()),
        }
    }

    fn check_parent(&self, role: UserRole, parent_id: UserId) -> AppResult<()> {
        let Some(wanted) = expected_parent_role(role) else {
            return Err(AppError::Validation(format!(
                "A {role} does not report to anyone"
            )));
        };
        let parent = self
            .find(parent_id)
            .ok_or_else(|| AppError::NotFound(format!("user {parent_id}")))?;
        if parent.role()? == wanted {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "A {role} must report to a {wanted}"
            )))
        }
    }
}

fn require_path(ctx: &SessionContext, path: &str) -> AppResult<()> {
    let (_, role) = ctx.require_user()?;
    if is_path_allowed(role, path) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "You do not have access to user administration".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rstest::rstest;

    use crate::gateway::MockLedgerApi;
    use crate::session::MemoryStorage;

    fn roster() -> Vec<User> {
        vec![
            User::new(UserId::new(1), "Meera", UserRole::MasterCashier),
            User::new(UserId::new(2), "Sunil", UserRole::Cashier),
            User::new(UserId::new(3), "Ravi", UserRole::Collector),
            User::new(UserId::new(4), "Kiran", UserRole::Retailer),
            User::new(UserId::new(5), "Asha", UserRole::Retailer),
        ]
    }

    fn context(role: UserRole, gateway: MockLedgerApi) -> SessionContext {
        let context = SessionContext::init(Arc::new(gateway), MemoryStorage::new());
        context
            .session()
            .set_user(User::new(UserId::new(99), "operator", role))
            .unwrap();
        context
    }

    fn roster_gateway() -> MockLedgerApi {
        let mut gateway = MockLedgerApi::new();
        gateway.expect_users().returning(|| Ok(roster()));
        gateway
    }

    fn new_user(role: UserRole, parent_id: Option<UserId>) -> NewUser {
        NewUser {
            user_name: "Deepa".to_string(),
            user_type: role,
            password: "s3cure-pass".to_string(),
            parent_id,
        }
    }

    #[rstest]
    #[case(UserRole::Retailer, Some(UserRole::Collector))]
    #[case(UserRole::Collector, Some(UserRole::Cashier))]
    #[case(UserRole::Cashier, Some(UserRole::MasterCashier))]
    #[case(UserRole::MasterCashier, None)]
    #[case(UserRole::Admin, None)]
    fn test_expected_parent_role(#[case] role: UserRole, #[case] expected: Option<UserRole>) {
        assert_eq!(expected_parent_role(role), expected);
    }

    #[tokio::test]
    async fn test_zone_manager_lists_but_cannot_add() {
        let ctx = context(UserRole::ZoneManager, roster_gateway());
        let mut page = UsersPage::new();
        assert!(page.load(&ctx).await);
        assert_eq!(page.rendered().len(), 5);

        assert!(!page.add_user(&ctx, new_user(UserRole::Retailer, None)).await);
        assert_eq!(
            page.state().error.as_deref(),
            Some("You do not have access to user administration")
        );
    }

    #[tokio::test]
    async fn test_add_user_checks_parent_role() {
        let mut gateway = roster_gateway();
        gateway
            .expect_create_user()
            .times(1)
            .returning(|user| {
                let mut created = User::new(UserId::new(6), user.user_name.clone(), user.user_type);
                created.parent_id = user.parent_id;
                Ok(created)
            });
        let ctx = context(UserRole::Admin, gateway);
        let mut page = UsersPage::new();
        page.load(&ctx).await;

        let wrong = new_user(UserRole::Retailer, Some(UserId::new(2)));
        assert!(!page.add_user(&ctx, wrong).await);
        assert_eq!(
            page.state().error.as_deref(),
            Some("A Retailer must report to a Collector")
        );

        let short = NewUser {
            password: "short".to_string(),
            ..new_user(UserRole::Retailer, None)
        };
        assert!(!page.add_user(&ctx, short).await);

        assert!(page.add_user(&ctx, new_user(UserRole::Retailer, Some(UserId::new(3)))).await);
        assert_eq!(page.state().rows.len(), 6);
        assert_eq!(page.state().error, None);
    }

    #[tokio::test]
    async fn test_assign_many_updates_rows() {
        let mut gateway = roster_gateway();
        gateway
            .expect_assign_parent()
            .times(2)
            .returning(|id, parent_id| {
                let mut user = roster().into_iter().find(|u| u.id == id).unwrap();
                user.parent_id = parent_id;
                Ok(user)
            });
        let ctx = context(UserRole::Admin, gateway);
        let mut page = UsersPage::new();
        page.load(&ctx).await;

        let candidates: Vec<UserId> = page
            .parent_candidates(UserId::new(4))
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(candidates, vec![UserId::new(3)]);

        assert!(
            page.assign_many(&ctx, &[UserId::new(4), UserId::new(5)], Some(UserId::new(3)))
                .await
        );
        assert!(
            page.state().rows[3..]
                .iter()
                .all(|u| u.parent_id == Some(UserId::new(3)))
        );
    }

    #[tokio::test]
    async fn test_assign_to_wrong_role_sends_nothing() {
        let ctx = context(UserRole::Admin, roster_gateway());
        let mut page = UsersPage::new();
        page.load(&ctx).await;
        assert!(!page.assign(&ctx, UserId::new(3), Some(UserId::new(1))).await);
        assert_eq!(
            page.state().error.as_deref(),
            Some("A Collector must report to a Cashier")
        );
    }

    #[tokio::test]
    async fn test_unassign_clears_parent() {
        let mut gateway = roster_gateway();
        gateway
            .expect_assign_parent()
            .withf(|id, parent_id| *id == UserId::new(3) && parent_id.is_none())
            .times(1)
            .returning(|_, _| Ok(User::new(UserId::new(3), "Ravi", UserRole::Collector)));
        let ctx = context(UserRole::Admin, gateway);
        let mut page = UsersPage::new();
        page.load(&ctx).await;
        assert!(page.unassign(&ctx, UserId::new(3)).await);
        assert_eq!(page.state().rows[2].parent_id, None);
    }
}
