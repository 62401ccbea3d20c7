//! Role policy table.
//!
//! Static mapping from each role to the navigation destinations it may use.
//! Pure data: every check is a membership test against the table.

mod table;

use std::fmt;

use crate::role::UserRole;

pub use table::{ACCOUNT_ENTRIES, entries_for};

/// Path every role lands on after sign-in or a refused navigation.
pub const HOME_PATH: &str = "/";

/// Path of the sign-in screen.
pub const SIGN_IN_PATH: &str = "/signin";

/// Menu group a destination is shown under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NavGroup {
    /// Dashboard.
    Home,
    /// Ledger screens.
    Ledgers,
    /// Approval queue.
    Approvals,
    /// Liability reports.
    Reports,
    /// User administration.
    Administration,
    /// The signed-in user's own account.
    Account,
}

impl NavGroup {
    /// Heading shown above the group.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Ledgers => "Ledgers",
            Self::Approvals => "Approvals",
            Self::Reports => "Reports",
            Self::Administration => "Administration",
            Self::Account => "Account",
        }
    }
}

impl fmt::Display for NavGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A navigation destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavEntry {
    /// Route path.
    pub path: &'static str,
    /// Menu label.
    pub label: &'static str,
    /// Menu group.
    pub group: NavGroup,
}

impl NavEntry {
    /// Creates an entry.
    #[must_use]
    pub const fn new(path: &'static str, label: &'static str, group: NavGroup) -> Self {
        Self { path, label, group }
    }
}

/// Destinations visible to `role`, in menu order.
#[must_use]
pub fn visible_entries(role: UserRole) -> Vec<NavEntry> {
    entries_for(role)
        .iter()
        .chain(ACCOUNT_ENTRIES.iter())
        .copied()
        .collect()
}

/// Returns true iff `path` is one of `role`'s destinations.
#[must_use]
pub fn is_path_allowed(role: UserRole, path: &str) -> bool {
    entries_for(role)
        .iter()
        .chain(ACCOUNT_ENTRIES.iter())
        .any(|entry| entry.path == path)
}

/// Where `role` is sent when a navigation is refused.
#[must_use]
pub fn landing_path(_role: UserRole) -> &'static str {
    HOME_PATH
}

/// The role's own ledger screen: its first destination in the Ledgers group.
#[must_use]
pub fn ledger_path(role: UserRole) -> Option<&'static str> {
    entries_for(role)
        .iter()
        .find(|entry| entry.group == NavGroup::Ledgers)
        .map(|entry| entry.path)
}

/// Destinations grouped for menu rendering, groups in first-appearance order.
#[must_use]
pub fn grouped_entries(role: UserRole) -> Vec<(NavGroup, Vec<NavEntry>)> {
    let mut groups: Vec<(NavGroup, Vec<NavEntry>)> = Vec::new();
    for entry in visible_entries(role) {
        match groups.iter_mut().find(|(group, _)| *group == entry.group) {
            Some((_, entries)) => entries.push(entry),
            None => groups.push((entry.group, vec![entry])),
        }
    }
    groups
}

/// Normalizes a navigation target before it is checked.
///
/// Drops any query string or fragment and a trailing slash (except on `/`).
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    if path.is_empty() {
        return HOME_PATH.to_string();
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        HOME_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
