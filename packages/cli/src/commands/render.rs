use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use profile_compiler_html::{compile_to_html, CompileOptions};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Render the read-only markup (outbound links, no edit controls)
    #[arg(long)]
    pub view: bool,

    /// Output file; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit compact HTML
    #[arg(long)]
    pub compact: bool,
}

pub fn render(args: RenderArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    let options = CompileOptions {
        view_mode: args.view || store.mode().is_view(),
        pretty: !args.compact,
        ..CompileOptions::default()
    };
    let html = compile_to_html(store.document(), options)?;

    match args.output {
        Some(path) => {
            let path = PathBuf::from(&ctx.cwd).join(path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, html)?;
            println!("  {} {}", "✓".green(), path.display());
        }
        None => print!("{}", html),
    }

    Ok(())
}
