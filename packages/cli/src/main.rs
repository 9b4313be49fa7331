mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, add_point, delete, delete_point, edit, export, footer, icon, image, init, render, reset,
    set, show, watch, AddArgs, AddPointArgs, Context, DeleteArgs, DeletePointArgs, EditArgs,
    ExportArgs, FooterArgs, IconArgs, ImageArgs, InitArgs, RenderArgs, ResetArgs, SetArgs,
    ShowArgs,
};
use tracing_subscriber::EnvFilter;

/// Tivro profile - edit, preview and export the company profile
#[derive(Parser, Debug)]
#[command(name = "profile")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Open the profile read-only
    #[arg(long, global = true)]
    view: bool,

    /// Address the profile was opened with (e.g. `index.html?mode=view`)
    #[arg(long, global = true)]
    address: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a profile workspace
    Init(InitArgs),

    /// Print the stored profile
    Show(ShowArgs),

    /// Set a field
    Set(SetArgs),

    /// Append an item to a collection
    Add(AddArgs),

    /// Remove an item from a collection
    Delete(DeleteArgs),

    /// Append a point to a service or process step
    AddPoint(AddPointArgs),

    /// Remove a point from a service or process step
    DeletePoint(DeletePointArgs),

    /// Embed or clear an image
    Image(ImageArgs),

    /// Show, hide or toggle the contact footer
    Footer(FooterArgs),

    /// Cycle a floating icon on the about page
    Icon(IconArgs),

    /// Restore the default profile
    Reset(ResetArgs),

    /// Edit fields interactively
    Edit(EditArgs),

    /// Render the profile to HTML
    Render(RenderArgs),

    /// Export the profile to PDF
    Export(ExportArgs),

    /// Follow changes made by other editors
    Watch,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };
    let ctx = Context {
        cwd,
        address: cli.address,
        view: cli.view,
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &ctx),
        Command::Show(args) => show(args, &ctx),
        Command::Set(args) => set(args, &ctx),
        Command::Add(args) => add(args, &ctx),
        Command::Delete(args) => delete(args, &ctx),
        Command::AddPoint(args) => add_point(args, &ctx),
        Command::DeletePoint(args) => delete_point(args, &ctx),
        Command::Image(args) => image(args, &ctx).await,
        Command::Footer(args) => footer(args, &ctx),
        Command::Icon(args) => icon(args, &ctx),
        Command::Reset(args) => reset(args, &ctx),
        Command::Edit(args) => edit(args, &ctx),
        Command::Render(args) => render(args, &ctx),
        Command::Export(args) => export(args, &ctx).await,
        Command::Watch => watch(&ctx).await,
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
