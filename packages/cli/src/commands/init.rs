use super::Context;
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use profile_editor::Storage;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for the stored profile record
    #[arg(short, long, default_value = ".profile")]
    pub storage_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, ctx: &Context) -> Result<()> {
    let config_path = PathBuf::from(&ctx.cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing profile workspace...".bright_blue().bold());

    let config = Config {
        storage_dir: args.storage_dir.clone(),
        ..Config::default()
    };

    let storage_dir = config.get_storage_dir(&ctx.cwd);
    if !storage_dir.exists() {
        fs::create_dir_all(&storage_dir)?;
        println!("  {} Created {}/", "✓".green(), args.storage_dir);
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let storage = config.storage(&ctx.cwd)?;
    if storage.read()?.is_none() {
        println!(
            "  {} No saved profile yet; the default content will be used",
            "·".dimmed()
        );
    }

    println!();
    println!("{}", "✨ Profile workspace ready!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit fields: {}", "profile set hero.brandName \"Tivro\"".bright_white());
    println!("  2. Preview:     {}", "profile render --view -o profile.html".bright_white());
    println!("  3. Export:      {}", "profile export".bright_white());

    Ok(())
}
