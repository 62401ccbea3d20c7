//! Ledger and approval commands.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use ledgerdesk_client::SessionContext;
use ledgerdesk_client::pages::{ApprovalsPage, LedgerPage};
use ledgerdesk_core::form::LedgerForm;
use ledgerdesk_core::ledger::TransactionType;
use ledgerdesk_core::table::{Column, TableState, ledger_columns};
use ledgerdesk_shared::types::{Amount, LedgerEntryId, UserId};

use super::page_outcome;
use crate::output::print_table;

/// Fields of a new entry as given on the command line.
pub struct Draft {
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub date: Option<NaiveDate>,
    pub given_on: Option<NaiveDate>,
    pub collector: Option<i64>,
    pub cashier: Option<i64>,
    pub retailer: Option<i64>,
    pub comment: Option<String>,
    pub attach: Option<PathBuf>,
}

impl Draft {
    fn fill(&self, form: &mut LedgerForm) -> Result<()> {
        form.set_amount(Amount::new(self.amount))?;
        form.set_transaction_type(self.transaction_type)?;
        form.set_date(self.date.unwrap_or_else(|| Local::now().date_naive()))?;
        if self.given_on.is_some() {
            form.set_given_on(self.given_on)?;
        }
        if let Some(id) = self.collector {
            form.set_collector(Some(UserId::new(id)))?;
        }
        if let Some(id) = self.cashier {
            form.set_cashier(Some(UserId::new(id)))?;
        }
        if let Some(id) = self.retailer {
            form.set_retailer(Some(UserId::new(id)))?;
        }
        if let Some(comment) = &self.comment {
            form.set_comment(comment)?;
        }
        Ok(())
    }
}

fn headings(columns: &[Column]) -> Vec<&str> {
    columns.iter().map(|c| c.heading.as_str()).collect()
}

/// Applies `--filter` and `--sort` flags. Each repeat of a sort key flips
/// its direction, the same as clicking a header again.
fn apply_flags(table: &mut TableState, filters: Vec<(String, String)>, sort: &[String]) {
    for (key, text) in filters {
        table.set_filter(key, text);
    }
    for key in sort {
        table.click_header(key);
    }
}

pub async fn list(
    ctx: &SessionContext,
    filters: Vec<(String, String)>,
    sort: &[String],
) -> Result<()> {
    let mut page = LedgerPage::new();
    apply_flags(page.table_mut(), filters, sort);
    let ok = page.load(ctx).await;
    page_outcome(ok, page.state().error.as_deref())?;
    print_table(&headings(&ledger_columns()), &page.rendered());
    Ok(())
}

pub async fn add(ctx: &SessionContext, draft: Draft) -> Result<()> {
    let mut page = LedgerPage::new();
    let Some(form) = page.open_add(ctx) else {
        return page_outcome(false, page.state().error.as_deref());
    };
    draft.fill(form)?;

    if let Some(path) = &draft.attach {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("{} has no usable file name", path.display()))?;
        let ok = page
            .attach(ctx, file_name, content_type_for(file_name), &data)
            .await;
        page_outcome(ok, page.state().error.as_deref())?;
    }

    let ok = page.save_form(ctx).await;
    page_outcome(ok, page.state().error.as_deref())?;
    if let Some(entry) = page.state().rows.last() {
        println!("Recorded entry #{} ({})", entry.id, entry.work_flow);
    }
    Ok(())
}

pub async fn delete(ctx: &SessionContext, id: i64) -> Result<()> {
    let mut page = LedgerPage::new();
    let ok = page.load(ctx).await;
    page_outcome(ok, page.state().error.as_deref())?;
    let ok = page.delete(ctx, LedgerEntryId::new(id)).await;
    page_outcome(ok, page.state().error.as_deref())?;
    println!("Deleted entry #{id}");
    Ok(())
}

async fn load_queue(ctx: &SessionContext) -> Result<ApprovalsPage> {
    let mut page = ApprovalsPage::new();
    let ok = page.load(ctx).await;
    page_outcome(ok, page.state().error.as_deref())?;
    Ok(page)
}

pub async fn approvals(ctx: &SessionContext) -> Result<()> {
    let page = load_queue(ctx).await?;
    print_table(&headings(&ledger_columns()), &page.rendered());
    Ok(())
}

pub async fn approve(ctx: &SessionContext, id: i64) -> Result<()> {
    let mut page = load_queue(ctx).await?;
    let ok = page.approve(ctx, LedgerEntryId::new(id)).await;
    page_outcome(ok, page.state().error.as_deref())?;
    println!("Approved entry #{id}");
    Ok(())
}

pub async fn reject(ctx: &SessionContext, id: i64, reason: &str) -> Result<()> {
    let mut page = load_queue(ctx).await?;
    let ok = page.reject(ctx, LedgerEntryId::new(id), reason).await;
    page_outcome(ok, page.state().error.as_deref())?;
    println!("Rejected entry #{id}");
    Ok(())
}

pub async fn mark_stuck(ctx: &SessionContext, id: i64) -> Result<()> {
    let mut page = load_queue(ctx).await?;
    let ok = page.mark_stuck(ctx, LedgerEntryId::new(id)).await;
    page_outcome(ok, page.state().error.as_deref())?;
    println!("Entry #{id} marked as stuck in bank");
    Ok(())
}

/// MIME type guessed from the file extension.
fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerdesk_core::table::SortDirection;
    use rstest::rstest;

    #[rstest]
    #[case("slip.PDF", "application/pdf")]
    #[case("photo.jpeg", "image/jpeg")]
    #[case("notes.txt", "application/octet-stream")]
    #[case("README", "application/octet-stream")]
    fn test_content_type_for(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(content_type_for(name), expected);
    }

    #[test]
    fn test_repeated_sort_flag_sorts_descending() {
        let mut table = TableState::new();
        apply_flags(
            &mut table,
            vec![("Comment".to_string(), "june".to_string())],
            &["Amount".to_string(), "Amount".to_string()],
        );
        assert_eq!(table.filter("Comment"), Some("june"));
        let sort = table.sort().unwrap();
        assert_eq!(sort.key, "Amount");
        assert_eq!(sort.direction, SortDirection::Descending);
    }
}
