use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use profile_editor::EditSession;
use profile_workspace::{
    BrowserPrintFallback, ChromiumConverter, ExportOutcome, ExportPipeline, SessionSurface,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output directory (overrides export.outDir)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// PDF file name (overrides export.filename)
    #[arg(short, long)]
    pub filename: Option<String>,

    /// Chromium binary (overrides export.chromiumPath)
    #[arg(long)]
    pub chromium: Option<PathBuf>,

    /// Do not open the print page when falling back
    #[arg(long)]
    pub no_open: bool,

    /// Skip the settle pause before capture
    #[arg(long)]
    pub no_wait: bool,
}

pub async fn export(args: ExportArgs, ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    let mut options = config.export_options(&ctx.cwd);
    if let Some(out_dir) = args.out_dir {
        options.out_dir = PathBuf::from(&ctx.cwd).join(out_dir);
    }
    if let Some(filename) = args.filename {
        options.filename = filename;
    }
    if args.no_wait {
        options.settle_delay = Duration::ZERO;
    }

    let converter = match args
        .chromium
        .or_else(|| config.export.chromium_path.as_ref().map(PathBuf::from))
    {
        Some(binary) => ChromiumConverter::new(binary),
        // The converter error below routes to the print fallback
        None => ChromiumConverter::detect().unwrap_or_else(|_| ChromiumConverter::new("chromium")),
    };
    debug!(binary = %converter.binary().display(), "Using converter");

    println!("{}", "📄 Exporting profile...".bright_blue().bold());

    let pipeline = ExportPipeline::new(
        converter,
        BrowserPrintFallback::new(!args.no_open),
        options,
    );
    let mut session = EditSession::new(ctx.open_store()?);
    let mut surface = SessionSurface::new(&mut session);

    match pipeline.export(&mut surface).await? {
        ExportOutcome::Pdf(path) => {
            println!("  {} {}", "✓".green(), path.display());
        }
        ExportOutcome::PrintFallback(path) => {
            println!(
                "  {} PDF conversion failed; print page written to {}",
                "⚠️".yellow(),
                path.display()
            );
        }
    }

    Ok(())
}
