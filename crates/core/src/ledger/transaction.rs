//! Transaction type of a handover.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the cash changed hands.
///
/// Serialized as the backend's numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TransactionType {
    /// Physical cash.
    Cash = 1,
    /// Bank transfer or UPI payment.
    BankUpi = 2,
    /// Anything else (cheque, adjustment).
    Other = 3,
}

impl TransactionType {
    /// Every transaction type the client knows.
    pub const ALL: [Self; 3] = [Self::Cash, Self::BankUpi, Self::Other];

    /// Returns the backend id.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Looks up a backend id.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Cash),
            2 => Some(Self::BankUpi),
            3 => Some(Self::Other),
            _ => None,
        }
    }

    /// Fallback label used before master data is loaded.
    #[must_use]
    pub fn default_label(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::BankUpi => "Bank/UPI",
            Self::Other => "Other",
        }
    }
}

impl TryFrom<u8> for TransactionType {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or_else(|| format!("unknown transaction type id {id}"))
    }
}

impl From<TransactionType> for u8 {
    fn from(value: TransactionType) -> Self {
        value.id()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_label())
    }
}
