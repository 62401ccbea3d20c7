//! Per-role workflow rules.
//!
//! The client enforces these for UX only. The backend re-validates every
//! submission and decision.

use std::collections::BTreeSet;

use crate::ledger::{LedgerField, LedgerPayload, TransactionType};
use crate::role::UserRole;
use crate::workflow::error::WorkflowError;
use crate::workflow::types::WorkFlow;

/// Workflow stages a role may set.
#[must_use]
pub fn allowed_workflows(role: UserRole) -> BTreeSet<WorkFlow> {
    let stages: &[WorkFlow] = match role {
        UserRole::Admin | UserRole::Cashier | UserRole::MasterCashier => &[
            WorkFlow::Pending,
            WorkFlow::RejectedByCashier,
            WorkFlow::ApprovedByCashier,
        ],
        UserRole::Collector => &[
            WorkFlow::Pending,
            WorkFlow::RejectedByCollector,
            WorkFlow::ApprovedByCollector,
        ],
        UserRole::Retailer => &[WorkFlow::Pending],
        UserRole::ZoneManager => &[],
    };
    stages.iter().copied().collect()
}

/// Returns true if `role` may put an entry of `transaction_type` into `stage`.
///
/// On top of [`allowed_workflows`], a collector may park a bank/UPI handover as
/// `StuckInBank` until the payment clears.
#[must_use]
pub fn workflow_permitted(
    role: UserRole,
    stage: WorkFlow,
    transaction_type: Option<TransactionType>,
) -> bool {
    if allowed_workflows(role).contains(&stage) {
        return true;
    }
    stage == WorkFlow::StuckInBank
        && role == UserRole::Collector
        && transaction_type == Some(TransactionType::BankUpi)
}

/// Identity fields a role may fill in.
#[must_use]
pub fn identity_fields(role: UserRole) -> &'static [LedgerField] {
    match role {
        UserRole::Admin => &[
            LedgerField::CollectorId,
            LedgerField::CashierId,
            LedgerField::RetailerId,
        ],
        UserRole::Retailer => &[LedgerField::RetailerId, LedgerField::CollectorId],
        UserRole::Collector => &[LedgerField::CollectorId, LedgerField::CashierId],
        UserRole::Cashier | UserRole::MasterCashier => &[LedgerField::CashierId],
        UserRole::ZoneManager => &[],
    }
}

/// Every non-workflow field a role may set.
///
/// `WorkFlow` is checked by value through [`workflow_permitted`].
#[must_use]
pub fn permitted_fields(role: UserRole) -> BTreeSet<LedgerField> {
    if role == UserRole::ZoneManager {
        return BTreeSet::new();
    }
    LedgerField::COMMON
        .iter()
        .chain(identity_fields(role))
        .copied()
        .collect()
}

/// A field the sanitizer removed, and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeFlag {
    /// The role may not set this field at all.
    FieldNotPermitted(LedgerField),
    /// The role may not set this workflow stage.
    WorkFlowNotPermitted(WorkFlow),
}

impl SanitizeFlag {
    /// The field that was nulled.
    #[must_use]
    pub fn field(self) -> LedgerField {
        match self {
            Self::FieldNotPermitted(field) => field,
            Self::WorkFlowNotPermitted(_) => LedgerField::WorkFlow,
        }
    }
}

/// Result of [`sanitize_ledger_payload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    /// Payload with every non-permitted field nulled.
    pub payload: LedgerPayload,
    /// One flag per nulled field.
    pub flags: Vec<SanitizeFlag>,
}

impl Sanitized {
    /// Returns true if nothing had to be removed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Nulls every field `role` may not set and reports each one.
///
/// Permitted fields pass through unchanged.
#[must_use]
pub fn sanitize_ledger_payload(role: UserRole, payload: LedgerPayload) -> Sanitized {
    let mut payload = payload;
    let mut flags = Vec::new();
    let permitted = permitted_fields(role);

    for field in LedgerField::ALL {
        if field == LedgerField::WorkFlow || permitted.contains(&field) {
            continue;
        }
        if payload.clear(field) {
            flags.push(SanitizeFlag::FieldNotPermitted(field));
        }
    }

    if let Some(stage) = payload.work_flow
        && !workflow_permitted(role, stage, payload.transaction_type)
    {
        payload.work_flow = None;
        flags.push(SanitizeFlag::WorkFlowNotPermitted(stage));
    }

    Sanitized { payload, flags }
}

/// Stages an approving role may move an entry to from `current`.
#[must_use]
pub fn transition_targets(
    role: UserRole,
    current: WorkFlow,
    transaction_type: TransactionType,
) -> Vec<WorkFlow> {
    match (role, current) {
        (UserRole::Collector, WorkFlow::Pending) => {
            let mut targets = vec![WorkFlow::ApprovedByCollector, WorkFlow::RejectedByCollector];
            if transaction_type == TransactionType::BankUpi {
                targets.push(WorkFlow::StuckInBank);
            }
            targets
        }
        (UserRole::Collector, WorkFlow::StuckInBank) => {
            vec![WorkFlow::ApprovedByCollector, WorkFlow::RejectedByCollector]
        }
        (role, WorkFlow::Pending | WorkFlow::ApprovedByCollector) if role.is_cashier_family() => {
            vec![WorkFlow::ApprovedByCashier, WorkFlow::RejectedByCashier]
        }
        _ => Vec::new(),
    }
}

/// Checks a decision before it is sent to the backend.
pub fn check_transition(
    role: UserRole,
    current: WorkFlow,
    target: WorkFlow,
    transaction_type: TransactionType,
    comment: Option<&str>,
) -> Result<(), WorkflowError> {
    if !transition_targets(role, current, transaction_type).contains(&target) {
        return Err(WorkflowError::TransitionNotAllowed {
            role,
            from: current,
            to: target,
        });
    }
    if target.is_rejected() && comment.is_none_or(|c| c.trim().is_empty()) {
        return Err(WorkflowError::RejectionReasonRequired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerdesk_shared::types::{Amount, UserId};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn ids(role: UserRole) -> Vec<u8> {
        allowed_workflows(role).into_iter().map(WorkFlow::id).collect()
    }

    #[rstest]
    #[case(UserRole::Admin, vec![1, 4, 5])]
    #[case(UserRole::Cashier, vec![1, 4, 5])]
    #[case(UserRole::MasterCashier, vec![1, 4, 5])]
    #[case(UserRole::Collector, vec![1, 2, 3])]
    #[case(UserRole::Retailer, vec![1])]
    #[case(UserRole::ZoneManager, vec![])]
    fn test_allowed_workflows(#[case] role: UserRole, #[case] expected: Vec<u8>) {
        assert_eq!(ids(role), expected);
    }

    fn full_payload() -> LedgerPayload {
        LedgerPayload {
            id: None,
            amount: Some(Amount::new(dec!(500))),
            transaction_type: Some(TransactionType::Cash),
            work_flow: Some(WorkFlow::Pending),
            date: NaiveDate::from_ymd_opt(2024, 4, 1),
            given_on: NaiveDate::from_ymd_opt(2024, 4, 1),
            comment: Some("handover".into()),
            collector_id: Some(UserId::new(2)),
            cashier_id: Some(UserId::new(3)),
            retailer_id: Some(UserId::new(4)),
            doc_id: None,
        }
    }

    #[test]
    fn test_collector_cannot_set_cashier_approval() {
        let payload = LedgerPayload {
            work_flow: Some(WorkFlow::ApprovedByCashier),
            ..full_payload()
        };
        let result = sanitize_ledger_payload(UserRole::Collector, payload);
        assert_eq!(result.payload.work_flow, None);
        assert!(
            result
                .flags
                .contains(&SanitizeFlag::WorkFlowNotPermitted(WorkFlow::ApprovedByCashier))
        );
    }

    #[test]
    fn test_cashier_clears_collector_and_retailer() {
        let result = sanitize_ledger_payload(UserRole::Cashier, full_payload());
        assert_eq!(result.payload.collector_id, None);
        assert_eq!(result.payload.retailer_id, None);
        assert_eq!(result.payload.cashier_id, Some(UserId::new(3)));
        assert_eq!(result.payload.amount, Some(Amount::new(dec!(500))));
        assert_eq!(
            result.flags,
            vec![
                SanitizeFlag::FieldNotPermitted(LedgerField::CollectorId),
                SanitizeFlag::FieldNotPermitted(LedgerField::RetailerId),
            ]
        );
    }

    #[test]
    fn test_retailer_keeps_own_fields() {
        let result = sanitize_ledger_payload(UserRole::Retailer, full_payload());
        assert_eq!(result.payload.retailer_id, Some(UserId::new(4)));
        assert_eq!(result.payload.collector_id, Some(UserId::new(2)));
        assert_eq!(result.payload.cashier_id, None);
        assert_eq!(result.payload.work_flow, Some(WorkFlow::Pending));
    }

    #[test]
    fn test_admin_payload_is_clean() {
        let result = sanitize_ledger_payload(UserRole::Admin, full_payload());
        assert!(result.is_clean());
        assert_eq!(result.payload, full_payload());
    }

    #[test]
    fn test_zone_manager_everything_nulled() {
        let result = sanitize_ledger_payload(UserRole::ZoneManager, full_payload());
        assert_eq!(result.payload, LedgerPayload::default());
        assert_eq!(result.flags.len(), 9);
    }

    #[test]
    fn test_stuck_in_bank_only_for_collector_bank_upi() {
        assert!(workflow_permitted(
            UserRole::Collector,
            WorkFlow::StuckInBank,
            Some(TransactionType::BankUpi)
        ));
        assert!(!workflow_permitted(
            UserRole::Collector,
            WorkFlow::StuckInBank,
            Some(TransactionType::Cash)
        ));
        assert!(!workflow_permitted(
            UserRole::Cashier,
            WorkFlow::StuckInBank,
            Some(TransactionType::BankUpi)
        ));
    }

    #[test]
    fn test_transition_targets() {
        assert_eq!(
            transition_targets(UserRole::Collector, WorkFlow::Pending, TransactionType::Cash),
            vec![WorkFlow::ApprovedByCollector, WorkFlow::RejectedByCollector]
        );
        assert_eq!(
            transition_targets(UserRole::Collector, WorkFlow::Pending, TransactionType::BankUpi),
            vec![
                WorkFlow::ApprovedByCollector,
                WorkFlow::RejectedByCollector,
                WorkFlow::StuckInBank
            ]
        );
        assert_eq!(
            transition_targets(UserRole::MasterCashier, WorkFlow::Pending, TransactionType::Cash),
            vec![WorkFlow::ApprovedByCashier, WorkFlow::RejectedByCashier]
        );
        assert_eq!(
            transition_targets(
                UserRole::Cashier,
                WorkFlow::ApprovedByCollector,
                TransactionType::BankUpi
            ),
            vec![WorkFlow::ApprovedByCashier, WorkFlow::RejectedByCashier]
        );
        assert!(
            transition_targets(UserRole::Retailer, WorkFlow::Pending, TransactionType::Cash)
                .is_empty()
        );
        assert!(
            transition_targets(
                UserRole::Cashier,
                WorkFlow::ApprovedByCashier,
                TransactionType::Cash
            )
            .is_empty()
        );
    }

    #[test]
    fn test_every_target_is_permitted() {
        for role in UserRole::ALL {
            for current in WorkFlow::ALL {
                for txn in TransactionType::ALL {
                    for target in transition_targets(role, current, txn) {
                        assert!(workflow_permitted(role, target, Some(txn)));
                    }
                }
            }
        }
    }

    #[test]
    fn test_check_transition() {
        assert!(
            check_transition(
                UserRole::Cashier,
                WorkFlow::Pending,
                WorkFlow::ApprovedByCashier,
                TransactionType::Cash,
                None
            )
            .is_ok()
        );
        assert_eq!(
            check_transition(
                UserRole::Cashier,
                WorkFlow::Pending,
                WorkFlow::RejectedByCashier,
                TransactionType::Cash,
                Some("  ")
            ),
            Err(WorkflowError::RejectionReasonRequired)
        );
        assert!(matches!(
            check_transition(
                UserRole::Collector,
                WorkFlow::Pending,
                WorkFlow::ApprovedByCashier,
                TransactionType::Cash,
                None
            ),
            Err(WorkflowError::TransitionNotAllowed { .. })
        ));
    }
}
