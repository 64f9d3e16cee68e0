use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use passman_core::VERSION;

use crate::config::StoreBackend;

/// passman - a local, encrypted credential vault
#[derive(Parser)]
#[command(name = "passman")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Vault home directory (key file and record store)
    #[arg(long, global = true, env = "PASSMAN_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Record store backend to configure
    #[arg(long, value_enum)]
    pub store: Option<StoreBackend>,
}

/// Arguments identifying a stored account
#[derive(Args)]
pub struct AccountArgs {
    /// Username of the account
    #[arg(value_name = "USERNAME")]
    pub username: String,

    /// Site associated with the account
    #[arg(value_name = "SITE")]
    pub site: String,

    /// Disable interactive prompts (secrets must come from the environment)
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `ls` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the vault home, config file, and vault key
    Init(InitArgs),

    /// Store the password for a new account
    #[command(alias = "add")]
    New(AccountArgs),

    /// Print the password of a stored account
    Get(AccountArgs),

    /// List stored accounts
    #[command(alias = "list")]
    Ls(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
