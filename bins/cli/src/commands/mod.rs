//! Command handlers.

mod ledger;
mod reports;
mod session;

use anyhow::{Result, bail};

use ledgerdesk_client::SessionContext;

use crate::Commands;

/// Dispatches one parsed command.
pub async fn run(ctx: &mut SessionContext, command: Commands) -> Result<()> {
    match command {
        Commands::Signin { user_id, password } => session::sign_in(ctx, user_id, &password).await,
        Commands::Signout => session::sign_out(ctx),
        Commands::Whoami => session::whoami(ctx),
        Commands::Menu => session::menu(ctx),
        Commands::Visit { path } => session::visit(ctx, &path),
        Commands::Password {
            current,
            new,
            confirm,
        } => session::change_password(ctx, &current, &new, &confirm).await,
        Commands::Ledgers { filter, sort } => ledger::list(ctx, filter, &sort).await,
        Commands::Add {
            amount,
            transaction_type,
            date,
            given_on,
            collector,
            cashier,
            retailer,
            comment,
            attach,
        } => {
            let draft = ledger::Draft {
                amount,
                transaction_type: transaction_type.into(),
                date,
                given_on,
                collector,
                cashier,
                retailer,
                comment,
                attach,
            };
            ledger::add(ctx, draft).await
        }
        Commands::Delete { id } => ledger::delete(ctx, id).await,
        Commands::Approvals => ledger::approvals(ctx).await,
        Commands::Approve { id } => ledger::approve(ctx, id).await,
        Commands::Reject { id, reason } => ledger::reject(ctx, id, &reason).await,
        Commands::Stuck { id } => ledger::mark_stuck(ctx, id).await,
        Commands::Liabilities { kind } => reports::liabilities(ctx, &kind).await,
        Commands::Users => reports::users(ctx).await,
        Commands::MasterData => reports::master_data(ctx).await,
        Commands::Download { doc_id, dir } => reports::download(ctx, doc_id, &dir).await,
    }
}

/// Turns a page action's outcome into a command result.
fn page_outcome(ok: bool, error: Option<&str>) -> Result<()> {
    if ok {
        return Ok(());
    }
    match error {
        Some(message) => bail!("{message}"),
        None => bail!("The action did not complete"),
    }
}
