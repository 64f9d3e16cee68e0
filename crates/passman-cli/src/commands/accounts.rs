//! `new`, `get` and `ls`.

use std::io::Write;

use secrecy::ExposeSecret;

use passman_core::{Account, RecordStore};

use crate::app::AppContext;
use crate::cli::{AccountArgs, ListArgs};
use crate::errors::CliError;
use crate::helpers::{prompt_master, prompt_new_password};
use crate::ui::{receipt, table, Column, UiContext};

/// Store the password for a new account.
///
/// The duplicate check runs before any prompt so the user is not asked
/// for secrets that would be thrown away.
pub fn handle_new(ctx: &AppContext, args: &AccountArgs) -> anyhow::Result<()> {
    let account = Account::new(args.username.as_str(), args.site.as_str())?;
    let mut vault = ctx.open_vault()?;

    if vault.store().get(&account.fingerprint())?.is_some() {
        return Err(CliError::duplicate(&account.username, &account.site).into());
    }

    let password = prompt_new_password(args.no_input)?;
    let master = prompt_master(true, args.no_input)?;

    let id = vault.add(
        &account,
        password.expose_secret().as_bytes(),
        master.expose_secret().as_bytes(),
    )?;

    if !ctx.quiet() {
        let ui_ctx = UiContext::from_env(false);
        println!(
            "{}",
            receipt(
                &ui_ctx,
                "Entry stored",
                &[
                    ("User", account.username.as_str()),
                    ("Site", account.site.as_str()),
                    ("Id", id.as_str()),
                ],
            )
        );
    }
    Ok(())
}

/// Print the decrypted password of an account to stdout.
pub fn handle_get(ctx: &AppContext, args: &AccountArgs) -> anyhow::Result<()> {
    let account = Account::new(args.username.as_str(), args.site.as_str())?;
    let vault = ctx.open_vault()?;

    if vault.store().get(&account.fingerprint())?.is_none() {
        return Err(CliError::account_not_found(&account.username, &account.site).into());
    }

    let master = prompt_master(false, args.no_input)?;
    let password = vault.reveal(&account, master.expose_secret().as_bytes())?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&password)?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}

/// List stored accounts without decrypting anything.
pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let accounts = store.list()?;
    tracing::debug!(count = accounts.len(), "listing accounts");

    let ui_ctx = UiContext::from_env(args.json);
    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&accounts)?);
        return Ok(());
    }

    if accounts.is_empty() {
        if !ctx.quiet() {
            println!("No accounts stored.");
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = accounts
        .iter()
        .map(|summary| {
            vec![
                summary.site.clone(),
                summary.username.clone(),
                summary.created_at.format("%Y-%m-%d %H:%M").to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        table(
            &ui_ctx,
            &[
                Column::new("Site"),
                Column::new("Username"),
                Column::new("Created"),
            ],
            &rows,
        )
    );
    Ok(())
}
