//! Liability reports: how much cash each user still owes upstream.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ledgerdesk_shared::AppError;
use ledgerdesk_shared::types::{Amount, UserId};

/// Which population a liability report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LiabilityKind {
    /// Cash retailers owe their collectors.
    Retailers,
    /// Cash collectors owe their cashiers.
    Collectors,
    /// Cash cashiers owe upstream.
    Cashiers,
}

impl LiabilityKind {
    /// All kinds, in menu order.
    pub const ALL: [Self; 3] = [Self::Retailers, Self::Collectors, Self::Cashiers];

    /// Path segment used by both the backend and the navigation table.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Retailers => "retailers",
            Self::Collectors => "collectors",
            Self::Cashiers => "cashiers",
        }
    }

    /// Navigation path of the report screen.
    #[must_use]
    pub fn nav_path(self) -> String {
        format!("/liabilities/{}", self.as_str())
    }
}

impl fmt::Display for LiabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown liability report name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown liability report {0:?}")]
pub struct UnknownLiabilityKind(pub String);

impl From<UnknownLiabilityKind> for AppError {
    fn from(err: UnknownLiabilityKind) -> Self {
        Self::Validation(err.to_string())
    }
}

impl FromStr for LiabilityKind {
    type Err = UnknownLiabilityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().trim_end_matches('s') {
            "retailer" => Ok(Self::Retailers),
            "collector" => Ok(Self::Collectors),
            "cashier" => Ok(Self::Cashiers),
            _ => Err(UnknownLiabilityKind(s.to_string())),
        }
    }
}

/// One row of a liability report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LiabilitySummary {
    /// User the row is about.
    pub user_id: UserId,
    /// Display name.
    pub user_name: String,
    /// Name of the user the cash is owed to.
    #[serde(default)]
    pub parent_name: Option<String>,
    /// Everything handed over.
    #[serde(default)]
    pub total_given: Amount,
    /// Handed over and approved.
    #[serde(default)]
    pub total_approved: Amount,
    /// Handed over, awaiting a decision.
    #[serde(default)]
    pub total_pending: Amount,
    /// Still owed.
    pub outstanding: Amount,
    /// Most recent handover.
    #[serde(default)]
    pub last_given_on: Option<NaiveDate>,
}

/// Sums the outstanding column of a report.
#[must_use]
pub fn total_outstanding(rows: &[LiabilitySummary]) -> Amount {
    Amount::new(rows.iter().map(|row| row.outstanding.value()).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("retailers", LiabilityKind::Retailers)]
    #[case("Collector", LiabilityKind::Collectors)]
    #[case(" CASHIERS ", LiabilityKind::Cashiers)]
    fn test_parse_kind(#[case] raw: &str, #[case] expected: LiabilityKind) {
        assert_eq!(raw.parse::<LiabilityKind>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = "zones".parse::<LiabilityKind>().unwrap_err();
        assert_eq!(err, UnknownLiabilityKind("zones".into()));
    }

    #[test]
    fn test_nav_path_matches_policy_table() {
        for kind in LiabilityKind::ALL {
            assert!(crate::policy::is_path_allowed(
                crate::role::UserRole::Admin,
                &kind.nav_path()
            ));
        }
    }

    #[test]
    fn test_summary_wire_format_and_total() {
        let json = r#"[
            {"UserId":4,"UserName":"Kiran Stores","ParentName":"Ravi","Outstanding":"1500.50"},
            {"UserId":5,"UserName":"Balaji Mart","TotalGiven":"250","TotalApproved":200,"TotalPending":"50","Outstanding":99.5}
        ]"#;
        let rows: Vec<LiabilitySummary> = serde_json::from_str(json).unwrap();
        assert_eq!(rows[0].total_approved, Amount::ZERO);
        assert_eq!(rows[1].total_given, Amount::new(dec!(250)));
        assert_eq!(rows[1].total_pending, Amount::new(dec!(50)));
        assert_eq!(total_outstanding(&rows), Amount::new(dec!(1600.00)));
    }
}
