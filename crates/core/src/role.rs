//! User roles known to the client.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ledgerdesk_shared::AppError;

/// Role a user signs in with.
///
/// The backend sends the role as the `UserType` string of a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Manages users and approves cashier-level entries.
    Admin,
    /// Receives handovers from collectors.
    Cashier,
    /// Receives handovers from cashiers.
    MasterCashier,
    /// Collects cash from retailers and hands it to a cashier.
    Collector,
    /// Hands cash (or a bank/UPI transfer) to a collector.
    Retailer,
    /// Read-only view over liabilities in a zone.
    ZoneManager,
}

/// A role string that is not in the policy table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role {0:?}")]
pub struct UnknownRoleError(pub String);

impl From<UnknownRoleError> for AppError {
    fn from(err: UnknownRoleError) -> Self {
        Self::UnknownRole(err.0)
    }
}

impl UserRole {
    /// Every role, in policy-table order.
    pub const ALL: [Self; 6] = [
        Self::Admin,
        Self::Cashier,
        Self::MasterCashier,
        Self::Collector,
        Self::Retailer,
        Self::ZoneManager,
    ];

    /// Parse a role from the backend's `UserType` string.
    ///
    /// Matching ignores case, spaces, underscores and hyphens, so
    /// `"Master Cashier"` and `"master_cashier"` both parse.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "admin" => Some(Self::Admin),
            "cashier" => Some(Self::Cashier),
            "mastercashier" => Some(Self::MasterCashier),
            "collector" => Some(Self::Collector),
            "retailer" => Some(Self::Retailer),
            "zonemanager" => Some(Self::ZoneManager),
            _ => None,
        }
    }

    /// Returns the string the backend uses for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Cashier => "Cashier",
            Self::MasterCashier => "MasterCashier",
            Self::Collector => "Collector",
            Self::Retailer => "Retailer",
            Self::ZoneManager => "ZoneManager",
        }
    }

    /// Admin, Cashier and MasterCashier approve at cashier level.
    #[must_use]
    pub fn is_cashier_family(&self) -> bool {
        matches!(self, Self::Admin | Self::Cashier | Self::MasterCashier)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownRoleError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Admin", UserRole::Admin)]
    #[case("cashier", UserRole::Cashier)]
    #[case("MasterCashier", UserRole::MasterCashier)]
    #[case("Master Cashier", UserRole::MasterCashier)]
    #[case("master_cashier", UserRole::MasterCashier)]
    #[case("COLLECTOR", UserRole::Collector)]
    #[case("Retailer", UserRole::Retailer)]
    #[case("zone-manager", UserRole::ZoneManager)]
    fn test_parse(#[case] raw: &str, #[case] expected: UserRole) {
        assert_eq!(UserRole::parse(raw), Some(expected));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(UserRole::parse("Janitor"), None);
        assert_eq!(UserRole::parse(""), None);
        let err = "Janitor".parse::<UserRole>().unwrap_err();
        assert_eq!(err, UnknownRoleError("Janitor".to_string()));
        assert_eq!(AppError::from(err).error_code(), "UNKNOWN_ROLE");
    }

    #[test]
    fn test_as_str_roundtrip() {
        for role in UserRole::ALL {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_cashier_family() {
        assert!(UserRole::Admin.is_cashier_family());
        assert!(UserRole::Cashier.is_cashier_family());
        assert!(UserRole::MasterCashier.is_cashier_family());
        assert!(!UserRole::Collector.is_cashier_family());
        assert!(!UserRole::Retailer.is_cashier_family());
        assert!(!UserRole::ZoneManager.is_cashier_family());
    }
}
