//! The static per-role navigation table.

use super::{NavEntry, NavGroup};
use crate::role::UserRole;

const HOME: NavEntry = NavEntry::new("/", "Dashboard", NavGroup::Home);

const RETAILER_LEDGER: NavEntry =
    NavEntry::new("/ledgers/retailer", "Retailer Ledger", NavGroup::Ledgers);
const COLLECTOR_LEDGER: NavEntry =
    NavEntry::new("/ledgers/collector", "Collector Ledger", NavGroup::Ledgers);
const CASHIER_LEDGER: NavEntry =
    NavEntry::new("/ledgers/cashier", "Cashier Ledger", NavGroup::Ledgers);
const MASTER_CASHIER_LEDGER: NavEntry = NavEntry::new(
    "/ledgers/master-cashier",
    "Master Cashier Ledger",
    NavGroup::Ledgers,
);

const APPROVALS: NavEntry = NavEntry::new("/approvals", "Pending Approvals", NavGroup::Approvals);

const RETAILER_LIABILITIES: NavEntry = NavEntry::new(
    "/liabilities/retailers",
    "Retailer Liabilities",
    NavGroup::Reports,
);
const COLLECTOR_LIABILITIES: NavEntry = NavEntry::new(
    "/liabilities/collectors",
    "Collector Liabilities",
    NavGroup::Reports,
);
const CASHIER_LIABILITIES: NavEntry = NavEntry::new(
    "/liabilities/cashiers",
    "Cashier Liabilities",
    NavGroup::Reports,
);

const USERS: NavEntry = NavEntry::new("/users", "Users", NavGroup::Administration);
const ADD_USER: NavEntry = NavEntry::new("/users/add", "Add User", NavGroup::Administration);
const ASSIGN_USERS: NavEntry =
    NavEntry::new("/users/assign", "Assign Users", NavGroup::Administration);

/// Destinations every signed-in role has.
pub const ACCOUNT_ENTRIES: [NavEntry; 3] = [
    NavEntry::new("/account/password", "Change Password", NavGroup::Account),
    NavEntry::new("/account/security", "Security", NavGroup::Account),
    NavEntry::new("/account/notifications", "Notifications", NavGroup::Account),
];

const ADMIN: &[NavEntry] = &[
    HOME,
    RETAILER_LEDGER,
    COLLECTOR_LEDGER,
    CASHIER_LEDGER,
    MASTER_CASHIER_LEDGER,
    APPROVALS,
    RETAILER_LIABILITIES,
    COLLECTOR_LIABILITIES,
    CASHIER_LIABILITIES,
    USERS,
    ADD_USER,
    ASSIGN_USERS,
];

const MASTER_CASHIER: &[NavEntry] = &[
    HOME,
    MASTER_CASHIER_LEDGER,
    CASHIER_LEDGER,
    APPROVALS,
    CASHIER_LIABILITIES,
    COLLECTOR_LIABILITIES,
];

const CASHIER: &[NavEntry] = &[HOME, CASHIER_LEDGER, APPROVALS, COLLECTOR_LIABILITIES];

const COLLECTOR: &[NavEntry] = &[HOME, COLLECTOR_LEDGER, APPROVALS, RETAILER_LIABILITIES];

const RETAILER: &[NavEntry] = &[HOME, RETAILER_LEDGER];

const ZONE_MANAGER: &[NavEntry] = &[
    HOME,
    RETAILER_LIABILITIES,
    COLLECTOR_LIABILITIES,
    CASHIER_LIABILITIES,
    USERS,
];

/// Role-specific destinations (account entries excluded).
#[must_use]
pub fn entries_for(role: UserRole) -> &'static [NavEntry] {
    match role {
        UserRole::Admin => ADMIN,
        UserRole::MasterCashier => MASTER_CASHIER,
        UserRole::Cashier => CASHIER,
        UserRole::Collector => COLLECTOR,
        UserRole::Retailer => RETAILER,
        UserRole::ZoneManager => ZONE_MANAGER,
    }
}
