//! Liability reports.

use ledgerdesk_core::liability::{LiabilityKind, LiabilitySummary, total_outstanding};
use ledgerdesk_core::master_data::MasterData;
use ledgerdesk_core::policy::is_path_allowed;
use ledgerdesk_core::table::{Column, TableState, liability_columns, render};
use ledgerdesk_core::workflow::WorkFlow;
use ledgerdesk_shared::types::Amount;
use ledgerdesk_shared::{AppError, AppResult};

use super::PageState;
use crate::session::SessionContext;

/// One liability report screen.
#[derive(Debug, Clone)]
pub struct LiabilitiesPage {
    kind: LiabilityKind,
    state: PageState<LiabilitySummary>,
    table: TableState,
    columns: Vec<Column>,
}

impl LiabilitiesPage {
    /// Empty report of `kind`.
    #[must_use]
    pub fn new(kind: LiabilityKind) -> Self {
        Self {
            kind,
            state: PageState::default(),
            table: TableState::new(),
            columns: liability_columns(),
        }
    }

    /// Report shown.
    pub fn kind(&self) -> LiabilityKind {
        self.kind
    }

    /// Rows, loading flag and inline error.
    pub fn state(&self) -> &PageState<LiabilitySummary> {
        &self.state
    }

    /// Filter and sort state.
    pub fn table_mut(&mut self) -> &mut TableState {
        &mut self.table
    }

    /// Column headings, relabelled from master data once loaded.
    pub fn headings(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.heading.as_str()).collect()
    }

    /// Visible rows as display text.
    pub fn rendered(&self) -> Vec<Vec<String>> {
        render(&self.columns, &self.table.apply(&self.state.rows))
    }

    /// Outstanding total over every loaded row, filters ignored.
    pub fn total(&self) -> Amount {
        total_outstanding(&self.state.rows)
    }

    /// Fetches the report together with the master data that labels it.
    pub async fn load(&mut self, ctx: &SessionContext) -> bool {
        self.state.begin();
        match self.fetch(ctx).await {
            Ok((labels, rows)) => {
                self.columns = labels;
                self.state.load("list liabilities", Ok(rows))
            }
            Err(err) => {
                self.state.fail("list liabilities", &err);
                false
            }
        }
    }

    async fn fetch(&self, ctx: &SessionContext) -> AppResult<(Vec<Column>, Vec<LiabilitySummary>)> {
        let (_, role) = ctx.require_user()?;
        if !is_path_allowed(role, &self.kind.nav_path()) {
            return Err(AppError::Validation(
                "You do not have access to this report".to_string(),
            ));
        }
        let (master_data, rows) =
            tokio::try_join!(ctx.master_data(), ctx.gateway().liabilities(self.kind))?;
        Ok((self.labelled_columns(master_data), rows))
    }

    fn labelled_columns(&self, master_data: &MasterData) -> Vec<Column> {
        let approved = match self.kind {
            LiabilityKind::Retailers => WorkFlow::ApprovedByCollector,
            LiabilityKind::Collectors | LiabilityKind::Cashiers => WorkFlow::ApprovedByCashier,
        };
        liability_columns()
            .into_iter()
            .map(|mut column| {
                match column.key.as_str() {
                    "TotalApproved" => {
                        column.heading = master_data.work_flow_label(approved).to_string();
                    }
                    "TotalPending" => {
                        column.heading = master_data.work_flow_label(WorkFlow::Pending).to_string();
                    }
                    _ => {}
                }
                column
            })
            .collect()
    }
}
