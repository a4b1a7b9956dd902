//! `validate` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::ValidateArgs;

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let config = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    info!(
        transport = %config.transport.name,
        transport_type = ?config.transport.transport_type,
        flush_threshold_bytes = config.writer.flush_threshold_bytes,
        "Configuration is valid"
    );

    println!("OK: {}", args.config.display());
    Ok(())
}
