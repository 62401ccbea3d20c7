//! Workflow stages of a ledger entry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a ledger entry.
///
/// Entries start as `Pending`. A collector decides on retailer handovers
/// (`RejectedByCollector` / `ApprovedByCollector`); the cashier family decides on
/// collector handovers (`RejectedByCashier` / `ApprovedByCashier`). A bank/UPI
/// payment that has not yet cleared is parked as `StuckInBank`.
///
/// Serialized as the backend's numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WorkFlow {
    /// Submitted, awaiting a decision.
    Pending = 1,
    /// Rejected by the collector.
    RejectedByCollector = 2,
    /// Approved by the collector.
    ApprovedByCollector = 3,
    /// Rejected by a cashier.
    RejectedByCashier = 4,
    /// Approved by a cashier.
    ApprovedByCashier = 5,
    /// Bank/UPI payment not yet credited.
    StuckInBank = 6,
}

impl WorkFlow {
    /// Every stage, in id order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::RejectedByCollector,
        Self::ApprovedByCollector,
        Self::RejectedByCashier,
        Self::ApprovedByCashier,
        Self::StuckInBank,
    ];

    /// Returns the backend id.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Looks up a backend id.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Pending),
            2 => Some(Self::RejectedByCollector),
            3 => Some(Self::ApprovedByCollector),
            4 => Some(Self::RejectedByCashier),
            5 => Some(Self::ApprovedByCashier),
            6 => Some(Self::StuckInBank),
            _ => None,
        }
    }

    /// Returns true for either rejection stage.
    #[must_use]
    pub const fn is_rejected(self) -> bool {
        matches!(self, Self::RejectedByCollector | Self::RejectedByCashier)
    }

    /// Returns true for either approval stage.
    #[must_use]
    pub const fn is_approved(self) -> bool {
        matches!(self, Self::ApprovedByCollector | Self::ApprovedByCashier)
    }

    /// Returns true while the submitter may still edit the entry.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::StuckInBank)
    }

    /// Fallback label used before master data is loaded.
    #[must_use]
    pub fn default_label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::RejectedByCollector => "Rejected by collector",
            Self::ApprovedByCollector => "Approved by collector",
            Self::RejectedByCashier => "Rejected by cashier",
            Self::ApprovedByCashier => "Approved by cashier",
            Self::StuckInBank => "Stuck in bank",
        }
    }
}

impl TryFrom<u8> for WorkFlow {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or_else(|| format!("unknown workflow id {id}"))
    }
}

impl From<WorkFlow> for u8 {
    fn from(value: WorkFlow) -> Self {
        value.id()
    }
}

impl fmt::Display for WorkFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_label())
    }
}
