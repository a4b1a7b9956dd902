//! `info` command implementation.

use anyhow::{Context, Result};

use crate::cli::InfoArgs;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let config = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let rendered = if args.json {
        config_loader::ConfigLoader::to_json(&config)?
    } else {
        config_loader::ConfigLoader::to_toml(&config)?
    };

    println!("{rendered}");
    Ok(())
}
