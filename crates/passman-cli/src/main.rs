//! passman CLI - a local, encrypted credential vault
//!
//! This is the command-line interface for passman. It wires argument
//! parsing, configuration, and prompting to the core library.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod ui;

use clap::Parser;

use passman_core::PassmanError;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let ctx = AppContext::new(&cli);
    if let Err(err) = run(&ctx, &cli.command) {
        exit_with(err);
    }
}

fn run(ctx: &AppContext, command: &Commands) -> anyhow::Result<()> {
    match command {
        Commands::Init(args) => commands::handle_init(ctx, args),
        Commands::New(args) => commands::handle_new(ctx, args),
        Commands::Get(args) => commands::handle_get(ctx, args),
        Commands::Ls(args) => commands::handle_list(ctx, args),
        Commands::Completions(args) => commands::handle_completions(args.shell),
    }
}

fn exit_with(err: anyhow::Error) -> ! {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        cli_err.exit();
    }
    if let Some(core_err) = err.downcast_ref::<PassmanError>() {
        tracing::debug!(error = ?core_err, "command failed");
        if let Some(cli_err) = CliError::from_core(core_err) {
            cli_err.exit();
        }
    }
    ui::print_error(&format!("{:#}", err));
    std::process::exit(1)
}
