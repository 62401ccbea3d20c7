//! Master data: id → description lookups for transaction types and workflow stages.
//!
//! The backend serves both tables once per session. They are validated against
//! the ids this client knows when loaded; a mismatch fails fast instead of
//! rendering raw ids later.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ledgerdesk_shared::AppError;

use crate::ledger::TransactionType;
use crate::workflow::WorkFlow;

/// One row of a lookup table as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LookupRow {
    /// Numeric id.
    pub id: u8,
    /// Human-readable label.
    pub description: String,
}

/// Master data exactly as served.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawMasterData {
    /// Transaction type lookup.
    #[serde(default)]
    pub transaction_types: Vec<LookupRow>,
    /// Workflow stage lookup.
    #[serde(default)]
    pub work_flows: Vec<LookupRow>,
}

/// Which lookup table an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTable {
    /// `TransactionTypes`
    TransactionTypes,
    /// `WorkFlows`
    WorkFlows,
}

impl std::fmt::Display for LookupTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransactionTypes => f.write_str("TransactionTypes"),
            Self::WorkFlows => f.write_str("WorkFlows"),
        }
    }
}

/// Master data did not match the expected key set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MasterDataError {
    /// The backend sent an id the client does not know.
    #[error("{table} contains unknown id {id}")]
    UnknownKey {
        /// Table with the bad row.
        table: LookupTable,
        /// Offending id.
        id: u8,
    },
    /// The backend omitted an id the client needs.
    #[error("{table} is missing id {id}")]
    MissingKey {
        /// Table with the gap.
        table: LookupTable,
        /// Missing id.
        id: u8,
    },
    /// The same id appears twice.
    #[error("{table} lists id {id} more than once")]
    DuplicateKey {
        /// Table with the duplicate.
        table: LookupTable,
        /// Duplicated id.
        id: u8,
    },
}

impl MasterDataError {
    /// Returns the error code for logs and UI hooks.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownKey { .. } => "MASTER_DATA_UNKNOWN_KEY",
            Self::MissingKey { .. } => "MASTER_DATA_MISSING_KEY",
            Self::DuplicateKey { .. } => "MASTER_DATA_DUPLICATE_KEY",
        }
    }
}

impl From<MasterDataError> for AppError {
    fn from(err: MasterDataError) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Validated master data, immutable for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterData {
    transaction_types: BTreeMap<TransactionType, String>,
    work_flows: BTreeMap<WorkFlow, String>,
}

impl MasterData {
    /// Validates raw master data against the known key sets.
    pub fn from_raw(raw: RawMasterData) -> Result<Self, MasterDataError> {
        let transaction_types = validate_table(
            LookupTable::TransactionTypes,
            raw.transaction_types,
            &TransactionType::ALL,
            |t| t.id(),
            TransactionType::from_id,
        )?;
        let work_flows = validate_table(
            LookupTable::WorkFlows,
            raw.work_flows,
            &WorkFlow::ALL,
            |w| w.id(),
            WorkFlow::from_id,
        )?;
        Ok(Self {
            transaction_types,
            work_flows,
        })
    }

    /// Label for a transaction type.
    #[must_use]
    pub fn transaction_type_label(&self, value: TransactionType) -> &str {
        self.transaction_types
            .get(&value)
            .map_or(value.default_label(), String::as_str)
    }

    /// Label for a workflow stage.
    #[must_use]
    pub fn work_flow_label(&self, value: WorkFlow) -> &str {
        self.work_flows
            .get(&value)
            .map_or(value.default_label(), String::as_str)
    }

    /// Transaction types with labels, in id order.
    pub fn transaction_types(&self) -> impl Iterator<Item = (TransactionType, &str)> {
        self.transaction_types.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Workflow stages with labels, in id order.
    pub fn work_flows(&self) -> impl Iterator<Item = (WorkFlow, &str)> {
        self.work_flows.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

fn validate_table<K: Ord + Copy>(
    table: LookupTable,
    rows: Vec<LookupRow>,
    expected: &[K],
    id_of: impl Fn(K) -> u8,
    parse: impl Fn(u8) -> Option<K>,
) -> Result<BTreeMap<K, String>, MasterDataError> {
    let mut seen = BTreeSet::new();
    let mut map = BTreeMap::new();
    for row in rows {
        let key = parse(row.id).ok_or(MasterDataError::UnknownKey { table, id: row.id })?;
        if !seen.insert(row.id) {
            return Err(MasterDataError::DuplicateKey { table, id: row.id });
        }
        map.insert(key, row.description);
    }
    if let Some(missing) = expected.iter().find(|k| !map.contains_key(*k)) {
        return Err(MasterDataError::MissingKey {
            table,
            id: id_of(*missing),
        });
    }
    Ok(map)
}
