//! Sign-in, navigation and account commands.

use anyhow::{Context, Result};

use ledgerdesk_client::SessionContext;
use ledgerdesk_client::pages::AccountPage;
use ledgerdesk_core::guard::{GuardOutcome, RouteGuard};
use ledgerdesk_core::policy::{grouped_entries, normalize_path};
use ledgerdesk_shared::types::UserId;

use super::page_outcome;

const ADMIN_ONLY_PATHS: [&str; 2] = ["/users/add", "/users/assign"];

pub async fn sign_in(ctx: &SessionContext, user_id: i64, password: &str) -> Result<()> {
    let user = ctx
        .sign_in(UserId::new(user_id), password)
        .await
        .map_err(|err| anyhow::anyhow!(err.inline_message()))?;
    println!("Signed in as {} ({})", user.user_name, user.user_type);
    Ok(())
}

pub fn sign_out(ctx: &mut SessionContext) -> Result<()> {
    ctx.sign_out().context("Failed to clear the session")?;
    println!("Signed out");
    Ok(())
}

pub fn whoami(ctx: &SessionContext) -> Result<()> {
    match ctx.current_user() {
        Some(user) => {
            println!("{} #{} ({})", user.user_name, user.id, user.user_type);
            if let Some(parent_id) = user.parent_id {
                println!("Reports to #{parent_id}");
            }
        }
        None => println!("Not signed in"),
    }
    Ok(())
}

pub fn menu(ctx: &SessionContext) -> Result<()> {
    let (_, role) = ctx.require_user()?;
    for (group, entries) in grouped_entries(role) {
        println!("{group}");
        for entry in entries {
            println!("  {:<24} {}", entry.label, entry.path);
        }
    }
    Ok(())
}

pub fn visit(ctx: &SessionContext, path: &str) -> Result<()> {
    let path = normalize_path(path);
    let mut guard = if ADMIN_ONLY_PATHS.contains(&path.as_str()) {
        RouteGuard::admin_only()
    } else {
        RouteGuard::protected()
    };
    match ctx.navigate(&mut guard, &path) {
        GuardOutcome::Render { path, role } => println!("{path}: open ({role})"),
        GuardOutcome::Redirect { to, reason } => {
            println!("{path}: redirected to {to} ({reason:?})");
        }
    }
    Ok(())
}

pub async fn change_password(
    ctx: &SessionContext,
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<()> {
    let mut page = AccountPage::new();
    let ok = page.change_password(ctx, current, new, confirm).await;
    page_outcome(ok, page.state().error.as_deref())?;
    for notice in &page.state().rows {
        println!("{notice}");
    }
    Ok(())
}
