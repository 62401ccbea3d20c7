//! Ledger entry modal.
//!
//! A [`LedgerForm`] is opened for a role, edited field by field and then either
//! saved or cancelled. Which fields are shown and editable depends on the role,
//! the transaction type and the entry's workflow stage. Save validates locally,
//! hands the result to the caller's callback and closes the form; a failed
//! validation leaves it open.

mod error;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use ledgerdesk_shared::types::{Amount, DocId, LedgerEntryId, UserId};

use crate::ledger::{LedgerEntry, LedgerField, LedgerPayload, TransactionType};
use crate::role::{UnknownRoleError, UserRole};
use crate::user::User;
use crate::workflow::{
    LedgerSubmission, WorkFlow, check_transition, permitted_fields, workflow_permitted,
};

pub use error::FormError;

/// A control of the ledger form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Amount input.
    Amount,
    /// Transaction type selector.
    TransactionType,
    /// Read-only workflow stage.
    WorkFlow,
    /// Entry date.
    Date,
    /// Handover date.
    GivenOn,
    /// Comment box.
    Comment,
    /// Collector selector.
    Collector,
    /// Cashier selector.
    Cashier,
    /// Retailer selector.
    Retailer,
    /// Document attachment.
    Document,
    /// "Stuck in bank" toggle.
    StuckInBank,
}

impl FormField {
    /// Every control, in display order.
    pub const ALL: [Self; 11] = [
        Self::Amount,
        Self::TransactionType,
        Self::WorkFlow,
        Self::Date,
        Self::GivenOn,
        Self::Comment,
        Self::Collector,
        Self::Cashier,
        Self::Retailer,
        Self::Document,
        Self::StuckInBank,
    ];

    fn ledger_field(self) -> Option<LedgerField> {
        match self {
            Self::Amount => Some(LedgerField::Amount),
            Self::TransactionType => Some(LedgerField::TransactionType),
            Self::Date => Some(LedgerField::Date),
            Self::GivenOn => Some(LedgerField::GivenOn),
            Self::Comment => Some(LedgerField::Comment),
            Self::Collector => Some(LedgerField::CollectorId),
            Self::Cashier => Some(LedgerField::CashierId),
            Self::Retailer => Some(LedgerField::RetailerId),
            Self::Document => Some(LedgerField::DocId),
            Self::WorkFlow | Self::StuckInBank => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Amount => "Amount",
            Self::TransactionType => "Transaction type",
            Self::WorkFlow => "Status",
            Self::Date => "Date",
            Self::GivenOn => "Given on",
            Self::Comment => "Comment",
            Self::Collector => "Collector",
            Self::Cashier => "Cashier",
            Self::Retailer => "Retailer",
            Self::Document => "Document",
            Self::StuckInBank => "Stuck in bank",
        };
        f.write_str(label)
    }
}

/// Whether a control is shown and whether it accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldState {
    /// Shown at all.
    pub visible: bool,
    /// Accepts input. Never true for a hidden control.
    pub editable: bool,
}

impl FieldState {
    const HIDDEN: Self = Self {
        visible: false,
        editable: false,
    };

    fn shown(editable: bool) -> Self {
        Self {
            visible: true,
            editable,
        }
    }
}

/// What the form was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// A new entry.
    Add,
    /// One of the user's own entries.
    Edit {
        /// Entry being edited.
        id: LedgerEntryId,
        /// Stage when the form opened.
        original: WorkFlow,
    },
    /// A collector looking at a retailer's entry. Only the stuck-in-bank
    /// toggle can change.
    Review {
        /// Entry under review.
        id: LedgerEntryId,
        /// Stage when the form opened.
        original: WorkFlow,
    },
}

/// What Save hands to the callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutput {
    /// A new or edited entry.
    Submit(LedgerSubmission),
    /// A workflow decision taken from the review form.
    Decision {
        /// Entry the decision applies to.
        id: LedgerEntryId,
        /// Stage it moves to.
        work_flow: WorkFlow,
    },
}

/// The ledger entry modal.
#[derive(Debug, Clone)]
pub struct LedgerForm {
    role: UserRole,
    author: UserId,
    mode: FormMode,
    payload: LedgerPayload,
    open: bool,
}

impl LedgerForm {
    /// Opens the form for `role`, empty or pre-filled from `initial`.
    #[must_use]
    pub fn open(role: UserRole, author: UserId, initial: Option<&LedgerEntry>) -> Self {
        let (mode, payload) = match initial {
            None => (FormMode::Add, new_payload(role, author)),
            Some(entry) if role == UserRole::Collector && entry.is_retailer_entry() => (
                FormMode::Review {
                    id: entry.id,
                    original: entry.work_flow,
                },
                entry.to_payload(),
            ),
            Some(entry) => (
                FormMode::Edit {
                    id: entry.id,
                    original: entry.work_flow,
                },
                entry.to_payload(),
            ),
        };
        Self {
            role,
            author,
            mode,
            payload,
            open: true,
        }
    }

    /// Opens the form for a signed-in user. A retailer's new entry starts with
    /// the retailer's own collector selected.
    pub fn for_user(user: &User, initial: Option<&LedgerEntry>) -> Result<Self, UnknownRoleError> {
        let role = user.role()?;
        let mut form = Self::open(role, user.id, initial);
        if form.mode == FormMode::Add && role == UserRole::Retailer {
            form.payload.collector_id = user.parent_id;
        }
        Ok(form)
    }

    /// Returns true until Save succeeds or Cancel is pressed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Mode the form was opened in.
    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Current field values.
    #[must_use]
    pub fn payload(&self) -> &LedgerPayload {
        &self.payload
    }

    /// Visibility and editability of a control.
    #[must_use]
    pub fn field_state(&self, field: FormField) -> FieldState {
        let reviewing = matches!(self.mode, FormMode::Review { .. });
        let locked = match self.mode {
            FormMode::Add => false,
            FormMode::Edit { original, .. } => !original.is_open(),
            FormMode::Review { .. } => true,
        };
        let permitted = permitted_fields(self.role);

        match field {
            FormField::WorkFlow => {
                if self.mode == FormMode::Add {
                    FieldState::HIDDEN
                } else {
                    FieldState::shown(false)
                }
            }
            FormField::StuckInBank => self.stuck_in_bank_state(),
            FormField::Collector if self.role == UserRole::Collector && !reviewing => {
                FieldState::HIDDEN
            }
            FormField::Cashier
                if matches!(self.role, UserRole::Cashier | UserRole::MasterCashier) =>
            {
                FieldState::HIDDEN
            }
            FormField::Retailer if self.role != UserRole::Admin && !reviewing => FieldState::HIDDEN,
            _ if reviewing => FieldState::shown(false),
            other => match other.ledger_field() {
                Some(ledger_field) if permitted.contains(&ledger_field) => {
                    FieldState::shown(!locked)
                }
                _ => FieldState::HIDDEN,
            },
        }
    }

    fn stuck_in_bank_state(&self) -> FieldState {
        let bank_transfer = self.payload.transaction_type == Some(TransactionType::BankUpi);
        let retailer_transaction =
            self.role == UserRole::Retailer || self.payload.retailer_id.is_some();
        if !(bank_transfer && retailer_transaction) {
            return FieldState::HIDDEN;
        }
        let editable = match self.mode {
            FormMode::Review { original, .. } => {
                original == WorkFlow::Pending
                    && workflow_permitted(
                        self.role,
                        WorkFlow::StuckInBank,
                        Some(TransactionType::BankUpi),
                    )
            }
            FormMode::Add | FormMode::Edit { .. } => false,
        };
        FieldState::shown(editable)
    }

    /// Returns true when the stuck-in-bank toggle is on.
    #[must_use]
    pub fn is_stuck_in_bank(&self) -> bool {
        self.payload.work_flow == Some(WorkFlow::StuckInBank)
    }

    fn ensure_editable(&self, field: FormField) -> Result<(), FormError> {
        if !self.open {
            return Err(FormError::Closed);
        }
        if self.field_state(field).editable {
            Ok(())
        } else {
            Err(FormError::FieldLocked(field))
        }
    }

    /// Sets the amount.
    pub fn set_amount(&mut self, amount: Amount) -> Result<(), FormError> {
        self.ensure_editable(FormField::Amount)?;
        self.payload.amount = Some(amount);
        Ok(())
    }

    /// Parses and sets the amount as typed, e.g. `"1,500.50"`.
    pub fn set_amount_text(&mut self, text: &str) -> Result<(), FormError> {
        let amount = Amount::from_str(text).map_err(|_| FormError::InvalidAmount(text.to_string()))?;
        self.set_amount(amount)
    }

    /// Sets the transaction type.
    ///
    /// Leaving Bank/UPI also turns the stuck-in-bank toggle off.
    pub fn set_transaction_type(&mut self, value: TransactionType) -> Result<(), FormError> {
        self.ensure_editable(FormField::TransactionType)?;
        self.payload.transaction_type = Some(value);
        if value != TransactionType::BankUpi && self.is_stuck_in_bank() {
            self.payload.work_flow = Some(WorkFlow::Pending);
        }
        Ok(())
    }

    /// Sets the entry date.
    pub fn set_date(&mut self, date: NaiveDate) -> Result<(), FormError> {
        self.ensure_editable(FormField::Date)?;
        self.payload.date = Some(date);
        Ok(())
    }

    /// Sets the handover date.
    pub fn set_given_on(&mut self, date: Option<NaiveDate>) -> Result<(), FormError> {
        self.ensure_editable(FormField::GivenOn)?;
        self.payload.given_on = date;
        Ok(())
    }

    /// Sets the comment. Blank text clears it.
    pub fn set_comment(&mut self, comment: &str) -> Result<(), FormError> {
        self.ensure_editable(FormField::Comment)?;
        let comment = comment.trim();
        self.payload.comment = (!comment.is_empty()).then(|| comment.to_string());
        Ok(())
    }

    /// Selects the collector.
    pub fn set_collector(&mut self, id: Option<UserId>) -> Result<(), FormError> {
        self.ensure_editable(FormField::Collector)?;
        self.payload.collector_id = id;
        Ok(())
    }

    /// Selects the cashier.
    pub fn set_cashier(&mut self, id: Option<UserId>) -> Result<(), FormError> {
        self.ensure_editable(FormField::Cashier)?;
        self.payload.cashier_id = id;
        Ok(())
    }

    /// Selects the retailer.
    pub fn set_retailer(&mut self, id: Option<UserId>) -> Result<(), FormError> {
        self.ensure_editable(FormField::Retailer)?;
        self.payload.retailer_id = id;
        Ok(())
    }

    /// Attaches an uploaded document.
    pub fn set_document(&mut self, id: Option<DocId>) -> Result<(), FormError> {
        self.ensure_editable(FormField::Document)?;
        self.payload.doc_id = id;
        Ok(())
    }

    /// Flips the stuck-in-bank toggle.
    pub fn set_stuck_in_bank(&mut self, stuck: bool) -> Result<(), FormError> {
        self.ensure_editable(FormField::StuckInBank)?;
        let original = match self.mode {
            FormMode::Edit { original, .. } | FormMode::Review { original, .. } => original,
            FormMode::Add => WorkFlow::Pending,
        };
        self.payload.work_flow = Some(if stuck { WorkFlow::StuckInBank } else { original });
        Ok(())
    }

    /// Runs the local checks. The first failure is returned.
    pub fn validate(&self) -> Result<(), FormError> {
        if matches!(self.mode, FormMode::Review { .. }) {
            return Ok(());
        }
        let amount = self.payload.amount.ok_or(FormError::AmountRequired)?;
        if !amount.is_positive() {
            return Err(FormError::AmountNotPositive);
        }
        let transaction_type = self
            .payload
            .transaction_type
            .ok_or(FormError::TransactionTypeRequired)?;
        if self.payload.date.is_none() {
            return Err(FormError::DateRequired);
        }
        match self.role {
            UserRole::Retailer
                if transaction_type == TransactionType::Cash
                    && self.payload.collector_id.is_none() =>
            {
                Err(FormError::CollectorRequired)
            }
            UserRole::Collector if self.payload.cashier_id.is_none() => {
                Err(FormError::CashierRequired)
            }
            _ => Ok(()),
        }
    }

    /// Validates, passes the result to `on_submit` and closes the form.
    ///
    /// On any error the callback is not called and the form stays open.
    pub fn save<T>(&mut self, on_submit: impl FnOnce(FormOutput) -> T) -> Result<T, FormError> {
        if !self.open {
            return Err(FormError::Closed);
        }
        self.validate()?;
        let output = match self.mode {
            FormMode::Review { id, original } => {
                let Some(target) = self.payload.work_flow.filter(|w| *w != original) else {
                    return Err(FormError::NoChanges);
                };
                check_transition(
                    self.role,
                    original,
                    target,
                    self.payload
                        .transaction_type
                        .unwrap_or(TransactionType::Cash),
                    self.payload.comment.as_deref(),
                )?;
                FormOutput::Decision {
                    id,
                    work_flow: target,
                }
            }
            FormMode::Add => FormOutput::Submit(LedgerSubmission::from_payload(
                self.role,
                self.author,
                self.payload.clone(),
            )?),
            FormMode::Edit { original, .. } => FormOutput::Submit(LedgerSubmission::for_edit(
                self.role,
                self.author,
                original,
                self.payload.clone(),
            )?),
        };
        self.open = false;
        Ok(on_submit(output))
    }

    /// Closes the form without calling anything.
    pub fn cancel(&mut self) {
        self.open = false;
    }
}

fn new_payload(role: UserRole, author: UserId) -> LedgerPayload {
    let mut payload = LedgerPayload {
        work_flow: Some(WorkFlow::Pending),
        ..LedgerPayload::default()
    };
    match role {
        UserRole::Retailer => payload.retailer_id = Some(author),
        UserRole::Collector => payload.collector_id = Some(author),
        UserRole::Cashier | UserRole::MasterCashier => payload.cashier_id = Some(author),
        UserRole::Admin | UserRole::ZoneManager => {}
    }
    payload
}
