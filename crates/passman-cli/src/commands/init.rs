use passman_core::VERSION;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{write_config, PassmanConfig};
use crate::errors::CliError;
use crate::ui::{hint, receipt, UiContext};

/// Write the config file, create the vault home, and load or create the key.
pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    if config_path.exists() {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nRemove it first to re-initialize.",
            config_path.display()
        ))
        .into());
    }

    let backend = args.store.unwrap_or_default();
    let config = PassmanConfig::new(ctx.cli_home().map(|p| p.to_path_buf()), backend);
    write_config(&config_path, &config)?;
    tracing::info!(path = %config_path.display(), ?backend, "config written");

    let keys = ctx.key_store()?;
    // Create the store file up front so `ls` works on an empty vault.
    ctx.open_store()?;

    if !ctx.quiet() {
        let ui_ctx = UiContext::from_env(false);
        let home = ctx.home()?.display().to_string();
        let config_display = config_path.display().to_string();
        let key_display = keys.path().display().to_string();
        let backend_name = format!("{:?}", backend).to_lowercase();
        println!(
            "{}",
            receipt(
                &ui_ctx,
                &format!("passman v{} initialized", VERSION),
                &[
                    ("Home", home.as_str()),
                    ("Config", config_display.as_str()),
                    ("Key", key_display.as_str()),
                    ("Store", backend_name.as_str()),
                ],
            )
        );
        if ui_ctx.mode.is_pretty() {
            println!(
                "{}",
                hint(&ui_ctx, "Back up the key file. Entries cannot be recovered without it.")
            );
        }
    }
    Ok(())
}
