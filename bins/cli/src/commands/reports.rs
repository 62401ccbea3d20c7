//! Reports, lookups and downloads.

use std::path::Path;

use anyhow::Result;

use ledgerdesk_client::SessionContext;
use ledgerdesk_client::pages::{LiabilitiesPage, UsersPage};
use ledgerdesk_core::liability::LiabilityKind;
use ledgerdesk_core::table::user_columns;
use ledgerdesk_shared::types::{DocId, format_amount};

use super::page_outcome;
use crate::output::print_table;

pub async fn liabilities(ctx: &SessionContext, kind: &str) -> Result<()> {
    let kind: LiabilityKind = kind.parse()?;
    let mut page = LiabilitiesPage::new(kind);
    let ok = page.load(ctx).await;
    page_outcome(ok, page.state().error.as_deref())?;
    print_table(&page.headings(), &page.rendered());
    println!("Total outstanding: {}", format_amount(page.total().value()));
    Ok(())
}

pub async fn users(ctx: &SessionContext) -> Result<()> {
    let mut page = UsersPage::new();
    let ok = page.load(ctx).await;
    page_outcome(ok, page.state().error.as_deref())?;
    let columns = user_columns();
    let headings: Vec<&str> = columns.iter().map(|c| c.heading.as_str()).collect();
    print_table(&headings, &page.rendered());
    Ok(())
}

pub async fn master_data(ctx: &SessionContext) -> Result<()> {
    ctx.require_user()?;
    let data = ctx.master_data().await?;
    println!("Transaction types");
    for (value, label) in data.transaction_types() {
        println!("  {:>2}  {label}", value.id());
    }
    println!("Workflow stages");
    for (value, label) in data.work_flows() {
        println!("  {:>2}  {label}", value.id());
    }
    Ok(())
}

pub async fn download(ctx: &SessionContext, doc_id: i64, dir: &Path) -> Result<()> {
    let path = ledgerdesk_client::download(ctx, DocId::new(doc_id), dir).await?;
    println!("Saved {}", path.display());
    Ok(())
}
