//! The signed-in user's ledger: list, add, edit and delete entries.

use tracing::info;

use ledgerdesk_core::attachment::NewAttachment;
use ledgerdesk_core::form::{FormOutput, LedgerForm};
use ledgerdesk_core::User;
use ledgerdesk_core::ledger::LedgerEntry;
use ledgerdesk_core::policy::ledger_path;
use ledgerdesk_core::table::{TableState, ledger_columns, render};
use ledgerdesk_shared::types::LedgerEntryId;
use ledgerdesk_shared::{AppError, AppResult};

use super::PageState;
use crate::gateway::Decision;
use crate::session::{NO_ACCESS, SessionContext};

/// Ledger screen.
#[derive(Debug, Clone, Default)]
pub struct LedgerPage {
    state: PageState<LedgerEntry>,
    table: TableState,
    form: Option<LedgerForm>,
}

impl LedgerPage {
    /// Empty page; call [`LedgerPage::load`] to fill it.
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

    /// Rows after filtering and sorting.
    pub fn view(&self) -> Vec<&LedgerEntry> {
        self.table.apply(&self.state.rows)
    }

    /// Visible rows as display text.
    pub fn rendered(&self) -> Vec<Vec<String>> {
        render(&ledger_columns(), &self.view())
    }

    /// The open form, if any.
    pub fn form(&self) -> Option<&LedgerForm> {
        self.form.as_ref()
    }

    /// The open form, for editing.
    pub fn form_mut(&mut self) -> Option<&mut LedgerForm> {
        self.form.as_mut()
    }

    /// Fetches the signed-in user's entries.
    pub async fn load(&mut self, ctx: &SessionContext) -> bool {
        self.state.begin();
        let result = match enter_ledger(ctx) {
            Ok(user) => ctx.gateway().list_ledger(user.id).await,
            Err(err) => Err(err),
        };
        self.state.load("list ledger", result)
    }

    /// Opens an empty form.
    pub fn open_add(&mut self, ctx: &SessionContext) -> Option<&mut LedgerForm> {
        self.open_form(ctx, None)
    }

    /// Opens the form on an existing entry.
    pub fn open_edit(&mut self, ctx: &SessionContext, id: LedgerEntryId) -> Option<&mut LedgerForm> {
        let Some(entry) = self.state.rows.iter().find(|e| e.id == id).cloned() else {
            self.state
                .fail("open entry", &AppError::NotFound(format!("ledger entry {id}")));
            return None;
        };
        self.open_form(ctx, Some(&entry))
    }

    fn open_form(
        &mut self,
        ctx: &SessionContext,
        initial: Option<&LedgerEntry>,
    ) -> Option<&mut LedgerForm> {
        let user = match enter_ledger(ctx) {
            Ok(user) => user,
            Err(err) => {
                self.state.fail("open form", &err);
                return None;
            }
        };
        match LedgerForm::for_user(&user, initial) {
            Ok(form) => {
                self.state.error = None;
                Some(self.form.insert(form))
            }
            Err(err) => {
                self.state.fail("open form", &err.into());
                None
            }
        }
    }

    /// Closes the form without saving.
    pub fn cancel_form(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.cancel();
        }
        self.form = None;
    }

    /// Uploads a document and attaches it to the open form.
    pub async fn attach(
        &mut self,
        ctx: &SessionContext,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> bool {
        if self.form.is_none() {
            return false;
        }
        let upload = match NewAttachment::from_bytes(file_name, content_type, data) {
            Ok(upload) => upload,
            Err(err) => {
                self.state.fail("attach document", &err.into());
                return false;
            }
        };
        self.state.begin();
        let result = ctx.gateway().upload_attachment(&upload).await;
        let Some(doc_id) = self.state.finish("upload document", result) else {
            return false;
        };
        let attached = self
            .form
            .as_mut()
            .map(|form| form.set_document(Some(doc_id)));
        match attached {
            Some(Ok(())) => true,
            Some(Err(err)) => {
                self.state.fail("attach document", &err.into());
                false
            }
            None => false,
        }
    }

    /// Validates the open form and sends it.
    ///
    /// A validation failure keeps the form open. Once validation passes the form
    /// closes; a failed request afterwards only sets the inline error.
    pub async fn save_form(&mut self, ctx: &SessionContext) -> bool {
        let Some(form) = self.form.as_mut() else {
            return false;
        };
        let output = match form.save(|output| output) {
            Ok(output) => output,
            Err(err) => {
                self.state.fail("save entry", &AppError::from(err));
                return false;
            }
        };
        self.form = None;

        self.state.begin();
        match output {
            FormOutput::Submit(submission) => {
                let payload = submission.to_payload();
                let result = match submission.details().id {
                    Some(id) => ctx.gateway().update_ledger(id, &payload).await,
                    None => ctx.gateway().create_ledger(&payload).await,
                };
                let Some(entry) = self.state.finish("save entry", result) else {
                    return false;
                };
                info!(entry_id = %entry.id, work_flow = %entry.work_flow, "ledger entry saved");
                match self.state.rows.iter_mut().find(|row| row.id == entry.id) {
                    Some(row) => *row = entry,
                    None => self.state.rows.push(entry),
                }
                true
            }
            FormOutput::Decision { id, work_flow } => {
                let decision = Decision {
                    work_flow,
                    comment: None,
                };
                let result = ctx.gateway().decide(id, &decision).await;
                if self.state.finish("update entry status", result).is_none() {
                    return false;
                }
                info!(entry_id = %id, %work_flow, "ledger entry status changed");
                if let Some(row) = self.state.rows.iter_mut().find(|row| row.id == id) {
                    row.work_flow = work_flow;
                }
                true
            }
        }
    }

    /// Deletes one of the user's entries. Only entries still awaiting a
    /// decision can be deleted.
    pub async fn delete(&mut self, ctx: &SessionContext, id: LedgerEntryId) -> bool {
        let Some(entry) = self.state.rows.iter().find(|e| e.id == id) else {
            self.state
                .fail("delete entry", &AppError::NotFound(format!("ledger entry {id}")));
            return false;
        };
        if !entry.work_flow.is_open() {
            self.state.fail(
                "delete entry",
                &AppError::Validation("Only pending entries can be deleted".to_string()),
            );
            return false;
        }
        self.state.begin();
        let result = ctx.gateway().delete_ledger(id).await;
        if self.state.finish("delete entry", result).is_none() {
            return false;
        }
        info!(entry_id = %id, "ledger entry deleted");
        self.state.rows.retain(|row| row.id != id);
        true
    }
}

/// Guards the signed-in role's own ledger screen.
fn enter_ledger(ctx: &SessionContext) -> AppResult<User> {
    let (_, role) = ctx.require_user()?;
    let path = ledger_path(role).ok_or_else(|| AppError::Validation(NO_ACCESS.to_string()))?;
    ctx.enter(path).map(|(user, _)| user)
}
