use super::Context;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use profile_editor::schema::{serialize_document, FieldPath, Section};
use profile_editor::ProfileData;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Dotted path to print instead of the summary
    #[arg(short, long)]
    pub path: Option<String>,

    /// Print the whole stored document as JSON
    #[arg(long, conflicts_with = "path")]
    pub json: bool,
}

pub fn show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let doc = store.document();

    if args.json {
        println!("{}", serialize_document(doc)?);
        return Ok(());
    }

    if let Some(path) = args.path {
        println!("{}", lookup(doc, &path)?);
        return Ok(());
    }

    print_summary(doc, ctx);
    Ok(())
}

/// Resolve a dotted path to its value, printed as JSON unless it is plain text
pub fn lookup(doc: &ProfileData, dotted: &str) -> Result<String> {
    let path = FieldPath::parse_dotted(dotted)?;
    if let Some(text) = doc.text_at(&path) {
        return Ok(text.to_string());
    }
    if path == FieldPath::ShowFooter {
        return Ok(doc.contact.footer_visible().to_string());
    }

    let value = serde_json::to_value(doc)?;
    let pointer = format!("/{}", dotted.replace('.', "/"));
    let found = value
        .pointer(&pointer)
        .ok_or_else(|| anyhow!("Nothing stored at {}", path))?;
    Ok(serde_json::to_string_pretty(found)?)
}

fn print_summary(doc: &ProfileData, ctx: &Context) {
    println!(
        "{} {} ({} mode)",
        "📄".bright_blue(),
        doc.hero.brand_name.bright_white().bold(),
        ctx.mode()
    );
    for section in Section::ALL {
        match section.collection() {
            Some(collection) => println!(
                "  {:<16} {} items",
                section.key(),
                doc.item_count(collection)
            ),
            None => println!("  {}", section.key()),
        }
    }
    let footer = if doc.contact.footer_visible() {
        "shown".green()
    } else {
        "hidden".yellow()
    };
    println!("  footer           {}", footer);
}
