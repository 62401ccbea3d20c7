//! Route guard.
//!
//! Every navigation runs the same small state machine:
//!
//! ```text
//! Loading ──(no user)──────────────▶ Unauthorized → /signin
//!    │
//!    ├──(role not in table)────────▶ Unauthorized → /signin
//!    ├──(path not allowed)─────────▶ Unauthorized → landing path
//!    └──(path allowed)─────────────▶ Authorized   → render
//! ```
//!
//! The decision is never cached: a user who loses a privilege mid-session is
//! refused on the next navigation. Content already rendered is not revoked.

use crate::policy::{SIGN_IN_PATH, is_path_allowed, landing_path, normalize_path};
use crate::role::UserRole;
use crate::user::User;

/// Anything that can answer "who is signed in right now".
pub trait CurrentUserSource {
    /// Returns the signed-in user, if any.
    fn current_user(&self) -> Option<User>;
}

impl CurrentUserSource for Option<User> {
    fn current_user(&self) -> Option<User> {
        self.clone()
    }
}

/// Guard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Resolving the current user.
    Loading,
    /// The last navigation may render.
    Authorized,
    /// The last navigation was refused.
    Unauthorized,
}

/// Which check a guarded route applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteKind {
    /// Allowed when the path is in the role's policy entries.
    #[default]
    Protected,
    /// Allowed only for Admin, regardless of path.
    AdminOnly,
}

/// Why a navigation was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectReason {
    /// Nobody is signed in.
    NotSignedIn,
    /// The stored role is not one the client knows.
    UnknownRole(String),
    /// The role's policy entries do not include the path.
    PathNotAllowed,
    /// The route requires Admin.
    AdminRequired,
}

/// Result of a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the requested path.
    Render {
        /// Normalized path being rendered.
        path: String,
        /// Role of the signed-in user.
        role: UserRole,
    },
    /// Send the user elsewhere.
    Redirect {
        /// Redirect target.
        to: &'static str,
        /// Why the navigation was refused.
        reason: RedirectReason,
    },
}

impl GuardOutcome {
    /// Returns true when the requested path may render.
    #[must_use]
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render { .. })
    }

    /// Redirect target, if the navigation was refused.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Self::Redirect { to, .. } => Some(to),
            Self::Render { .. } => None,
        }
    }
}

/// Guard for one routed area of the application.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    kind: RouteKind,
    state: GuardState,
    history: Vec<GuardState>,
}

impl RouteGuard {
    /// Creates a guard in the `Loading` state.
    #[must_use]
    pub fn new(kind: RouteKind) -> Self {
        Self {
            kind,
            state: GuardState::Loading,
            history: vec![GuardState::Loading],
        }
    }

    /// Guard for policy-checked routes.
    #[must_use]
    pub fn protected() -> Self {
        Self::new(RouteKind::Protected)
    }

    /// Guard for Admin-only routes.
    #[must_use]
    pub fn admin_only() -> Self {
        Self::new(RouteKind::AdminOnly)
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Route kind this guard checks.
    #[must_use]
    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    /// Every state the guard has been in, oldest first.
    #[must_use]
    pub fn history(&self) -> &[GuardState] {
        &self.history
    }

    /// Evaluates a navigation to `path`.
    ///
    /// Always re-reads the current user from `session`.
    pub fn navigate(&mut self, path: &str, session: &impl CurrentUserSource) -> GuardOutcome {
        self.transition(GuardState::Loading);
        let outcome = evaluate(self.kind, path, session.current_user().as_ref());
        self.transition(if outcome.is_render() {
            GuardState::Authorized
        } else {
            GuardState::Unauthorized
        });
        outcome
    }

    fn transition(&mut self, next: GuardState) {
        self.state = next;
        self.history.push(next);
    }
}

/// Stateless guard decision for one navigation.
#[must_use]
pub fn evaluate(kind: RouteKind, path: &str, user: Option<&User>) -> GuardOutcome {
    let Some(user) = user else {
        return GuardOutcome::Redirect {
            to: SIGN_IN_PATH,
            reason: RedirectReason::NotSignedIn,
        };
    };
    let Ok(role) = user.role() else {
        return GuardOutcome::Redirect {
            to: SIGN_IN_PATH,
            reason: RedirectReason::UnknownRole(user.user_type.clone()),
        };
    };

    let path = normalize_path(path);
    match kind {
        RouteKind::AdminOnly if role != UserRole::Admin => GuardOutcome::Redirect {
            to: landing_path(role),
            reason: RedirectReason::AdminRequired,
        },
        RouteKind::Protected if !is_path_allowed(role, &path) => GuardOutcome::Redirect {
            to: landing_path(role),
            reason: RedirectReason::PathNotAllowed,
        },
        _ => GuardOutcome::Render { path, role },
    }
}
