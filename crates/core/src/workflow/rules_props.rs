//! Property-based tests for the payload sanitizer.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use ledgerdesk_shared::types::{Amount, DocId, UserId};

use crate::ledger::{LedgerField, LedgerPayload, TransactionType};
use crate::role::UserRole;
use crate::workflow::rules::{permitted_fields, sanitize_ledger_payload, workflow_permitted};
use crate::workflow::types::WorkFlow;

/// Strategy for generating random UserRole values.
fn arb_role() -> impl Strategy<Value = UserRole> {
    prop::sample::select(UserRole::ALL.to_vec())
}

fn arb_user_id() -> impl Strategy<Value = Option<UserId>> {
    prop::option::of((1i64..10_000).prop_map(UserId::new))
}

fn arb_date() -> impl Strategy<Value = Option<NaiveDate>> {
    prop::option::of((0u32..365).prop_map(|d| {
        NaiveDate::from_yo_opt(2024, d + 1).unwrap_or(NaiveDate::MIN)
    }))
}

/// Strategy for generating arbitrary form payloads.
fn arb_payload() -> impl Strategy<Value = LedgerPayload> {
    (
        prop::option::of((1i64..10_000_000).prop_map(|n| Amount::new(Decimal::new(n, 2)))),
        prop::option::of(prop::sample::select(TransactionType::ALL.to_vec())),
        prop::option::of(prop::sample::select(WorkFlow::ALL.to_vec())),
        arb_date(),
        arb_date(),
        prop::option::of("[a-z ]{0,20}"),
        arb_user_id(),
        arb_user_id(),
        arb_user_id(),
        prop::option::of((1i64..500).prop_map(DocId::new)),
    )
        .prop_map(
            |(
                amount,
                transaction_type,
                work_flow,
                date,
                given_on,
                comment,
                collector_id,
                cashier_id,
                retailer_id,
                doc_id,
            )| LedgerPayload {
                id: None,
                amount,
                transaction_type,
                work_flow,
                date,
                given_on,
                comment,
                collector_id,
                cashier_id,
                retailer_id,
                doc_id,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Fields outside the role's set are nulled; fields inside pass through unchanged.
    #[test]
    fn prop_sanitize_nulls_exactly_non_permitted_fields(
        role in arb_role(),
        payload in arb_payload(),
    ) {
        let permitted = permitted_fields(role);
        let result = sanitize_ledger_payload(role, payload.clone());

        for field in LedgerField::ALL {
            if field == LedgerField::WorkFlow {
                continue;
            }
            if permitted.contains(&field) {
                prop_assert_eq!(result.payload.is_set(field), payload.is_set(field));
            } else {
                prop_assert!(!result.payload.is_set(field));
            }
        }
        prop_assert_eq!(result.payload.amount, if permitted.contains(&LedgerField::Amount) { payload.amount } else { None });
        prop_assert_eq!(&result.payload.comment, &if permitted.contains(&LedgerField::Comment) { payload.comment.clone() } else { None });
        prop_assert_eq!(result.payload.cashier_id, if permitted.contains(&LedgerField::CashierId) { payload.cashier_id } else { None });
    }

    /// A workflow stage survives iff the role may set it.
    #[test]
    fn prop_sanitize_workflow_by_permission(
        role in arb_role(),
        payload in arb_payload(),
    ) {
        let result = sanitize_ledger_payload(role, payload.clone());
        match payload.work_flow {
            Some(stage) if workflow_permitted(role, stage, payload.transaction_type) => {
                prop_assert_eq!(result.payload.work_flow, Some(stage));
            }
            _ => prop_assert_eq!(result.payload.work_flow, None),
        }
    }

    /// One flag per nulled field.
    #[test]
    fn prop_flags_match_nulled_fields(
        role in arb_role(),
        payload in arb_payload(),
    ) {
        let result = sanitize_ledger_payload(role, payload.clone());
        let nulled: Vec<LedgerField> = LedgerField::ALL
            .into_iter()
            .filter(|f| payload.is_set(*f) && !result.payload.is_set(*f))
            .collect();
        let mut flagged: Vec<LedgerField> = result.flags.iter().map(|f| f.field()).collect();
        flagged.sort();
        prop_assert_eq!(flagged, nulled);
    }

    /// Sanitizing twice changes nothing further.
    #[test]
    fn prop_sanitize_is_idempotent(
        role in arb_role(),
        payload in arb_payload(),
    ) {
        let once = sanitize_ledger_payload(role, payload);
        let twice = sanitize_ledger_payload(role, once.payload.clone());
        prop_assert!(twice.is_clean());
        prop_assert_eq!(twice.payload, once.payload);
    }
}
