//! Entries waiting for the signed-in user's decision.

use std::fmt;

use tracing::info;

use ledgerdesk_core::UserRole;
use ledgerdesk_core::ledger::LedgerEntry;
use ledgerdesk_core::table::{TableState, ledger_columns, render};
use ledgerdesk_core::workflow::{WorkFlow, check_transition, transition_targets};
use ledgerdesk_shared::types::LedgerEntryId;
use ledgerdesk_shared::{AppError, AppResult};

use super::PageState;
use crate::gateway::Decision;
use crate::session::SessionContext;

const APPROVALS_PATH: &str = "/approvals";

/// What the approver chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    /// Accept the handover.
    Approve,
    /// Refuse it; a reason is required.
    Reject,
    /// A bank/UPI transfer that has not arrived yet.
    StuckInBank,
}

impl DecisionKind {
    fn accepts(self, target: WorkFlow) -> bool {
        match self {
            Self::Approve => target.is_approved(),
            Self::Reject => target.is_rejected(),
            Self::StuckInBank => target == WorkFlow::StuckInBank,
        }
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Approve => "approved",
            Self::Reject => "rejected",
            Self::StuckInBank => "marked as stuck in bank",
        })
    }
}

/// Approval queue screen.
#[derive(Debug, Clone, Default)]
pub struct ApprovalsPage {
    state: PageState<LedgerEntry>,
    table: TableState,
}

impl ApprovalsPage {
    /// Empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows, loading flag and inline error.
    pub fn state(&self) -> &PageState<LedgerEntry> {
        &self.state
    }

    /// Filter and sort state.
    pub fn table_mut(&mut self) -> &mut TableState {
        &mut self.table
    }

    /// Visible rows as display text.
    pub fn rendered(&self) -> Vec<Vec<String>> {
        render(&ledger_columns(), &self.table.apply(&self.state.rows))
    }

    /// Fetches the queue.
    pub async fn load(&mut self, ctx: &SessionContext) -> bool {
        self.state.begin();
        let result = match ctx.enter(APPROVALS_PATH) {
            Ok((user, _)) => ctx.gateway().pending_approvals(user.id).await,
            Err(err) => Err(err),
        };
        self.state.load("list approvals", result)
    }

    /// Stages `role` may move a queued entry to.
    pub fn targets(&self, role: UserRole, id: LedgerEntryId) -> Vec<WorkFlow> {
        self.state
            .rows
            .iter()
            .find(|e| e.id == id)
            .map(|e| transition_targets(role, e.work_flow, e.transaction_type))
            .unwrap_or_default()
    }

    /// Approves an entry.
    pub async fn approve(&mut self, ctx: &SessionContext, id: LedgerEntryId) -> bool {
        self.decide(ctx, id, DecisionKind::Approve, None).await
    }

    /// Rejects an entry with a reason.
    pub async fn reject(&mut self, ctx: &SessionContext, id: LedgerEntryId, reason: &str) -> bool {
        self.decide(ctx, id, DecisionKind::Reject, Some(reason)).await
    }

    /// Marks a bank/UPI entry as stuck in the bank.
    pub async fn mark_stuck(&mut self, ctx: &SessionContext, id: LedgerEntryId) -> bool {
        self.decide(ctx, id, DecisionKind::StuckInBank, None).await
    }

    /// Checks and sends a decision. A decided entry leaves the queue unless it
    /// is still open.
    pub async fn decide(
        &mut self,
        ctx: &SessionContext,
        id: LedgerEntryId,
        kind: DecisionKind,
        comment: Option<&str>,
    ) -> bool {
        let decision = match self.prepare(ctx, id, kind, comment) {
            Ok(decision) => decision,
            Err(err) => {
                self.state.fail("decide entry", &err);
                return false;
            }
        };
        self.state.begin();
        let result = ctx.gateway().decide(id, &decision).await;
        if self.state.finish("decide entry", result).is_none() {
            return false;
        }
        info!(entry_id = %id, work_flow = %decision.work_flow, "decision recorded");
        if decision.work_flow.is_open() {
            if let Some(row) = self.state.rows.iter_mut().find(|row| row.id == id) {
                row.work_flow = decision.work_flow;
            }
        } else {
            self.state.rows.retain(|row| row.id != id);
        }
        true
    }

    fn prepare(
        &self,
        ctx: &SessionContext,
        id: LedgerEntryId,
        kind: DecisionKind,
        comment: Option<&str>,
    ) -> AppResult<Decision> {
        let (_, role) = ctx.enter(APPROVALS_PATH)?;
        let entry = self
            .state
            .rows
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("ledger entry {id}")))?;
        let target = transition_targets(role, entry.work_flow, entry.transaction_type)
            .into_iter()
            .find(|target| kind.accepts(*target))
            .ok_or_else(|| AppError::Validation(format!("This entry cannot be {kind} by you")))?;
        check_transition(role, entry.work_flow, target, entry.transaction_type, comment)?;
        Ok(Decision {
            work_flow: target,
            comment: comment
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        })
    }
}
