use super::{parse_collection, saved, Context};
use anyhow::{anyhow, Context as _, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use profile_editor::schema::{FieldPath, IconSlot};
use profile_editor::{FieldValue, ImageEditor};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Dotted field path, e.g. services.items.1.title
    pub path: String,

    /// New value (text, true/false, or JSON for whole items and lists)
    pub value: String,
}

pub fn set(args: SetArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    store.set_raw(&args.path, &args.value)?;
    saved(&format!("Set {}", args.path.bright_white()));
    Ok(())
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Collection: values, services, or workProcess
    pub collection: String,
}

pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let collection = parse_collection(&args.collection)?;
    let mut store = ctx.open_store()?;
    let doc = store.add_new_item(collection)?;
    let index = doc.item_count(collection) - 1;
    saved(&format!("Added {}.{}", collection, index));
    Ok(())
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Collection: values, services, or workProcess
    pub collection: String,

    /// Item index
    #[arg(required_unless_present = "id")]
    pub index: Option<usize>,

    /// Delete a service by its id instead of its index
    #[arg(long, conflicts_with = "index")]
    pub id: Option<String>,
}

pub fn delete(args: DeleteArgs, ctx: &Context) -> Result<()> {
    let collection = parse_collection(&args.collection)?;
    let mut store = ctx.open_store()?;

    match (args.index, args.id) {
        (_, Some(id)) => {
            if collection != profile_editor::schema::Collection::Services {
                return Err(anyhow!("--id only applies to services"));
            }
            store.delete_service_by_id(&id)?;
            saved(&format!("Deleted service {}", id));
        }
        (Some(index), None) => {
            store.delete_item(collection, index)?;
            saved(&format!("Deleted {}.{}", collection, index));
        }
        (None, None) => return Err(anyhow!("Give an index or --id")),
    }
    Ok(())
}

#[derive(Debug, Args)]
pub struct AddPointArgs {
    /// Collection: services or workProcess
    pub collection: String,

    /// Item index
    pub index: usize,
}

pub fn add_point(args: AddPointArgs, ctx: &Context) -> Result<()> {
    let collection = parse_collection(&args.collection)?;
    let mut store = ctx.open_store()?;
    store.add_point(collection, args.index)?;
    saved(&format!("Added point to {}.{}", collection, args.index));
    Ok(())
}

#[derive(Debug, Args)]
pub struct DeletePointArgs {
    /// Collection: services or workProcess
    pub collection: String,

    /// Item index
    pub index: usize,

    /// Point index
    pub point: usize,
}

pub fn delete_point(args: DeletePointArgs, ctx: &Context) -> Result<()> {
    let collection = parse_collection(&args.collection)?;
    let mut store = ctx.open_store()?;
    store.delete_point(collection, args.index, args.point)?;
    saved(&format!(
        "Deleted {}.{}.points.{}",
        collection, args.index, args.point
    ));
    Ok(())
}

#[derive(Debug, Args)]
pub struct ImageArgs {
    /// Image field path, e.g. hero.logo
    pub path: String,

    /// Image file to embed
    #[arg(required_unless_present = "remove")]
    pub file: Option<PathBuf>,

    /// Clear the image
    #[arg(long, conflicts_with = "file")]
    pub remove: bool,
}

pub async fn image(args: ImageArgs, ctx: &Context) -> Result<()> {
    let path = FieldPath::parse_dotted(&args.path)?;
    if !path.is_image() {
        return Err(anyhow!("{} is not an image field", args.path));
    }

    let mut store = ctx.open_store()?;
    let current = store.document().text_at(&path).map(str::to_string);
    let mut editor = ImageEditor::new(path.clone(), current).read_only(store.mode().is_view());

    let value = match args.file {
        Some(file) if !args.remove => editor
            .choose_file(&file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))?,
        _ => editor.remove()?,
    };

    let message = if value.is_empty() {
        format!("Removed image at {}", args.path)
    } else {
        format!("Embedded {} bytes at {}", value.len(), args.path)
    };
    store.set(path, FieldValue::Text(value))?;
    saved(&message);
    Ok(())
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FooterAction {
    Show,
    Hide,
    Toggle,
}

#[derive(Debug, Args)]
pub struct FooterArgs {
    #[arg(value_enum)]
    pub action: FooterAction,
}

pub fn footer(args: FooterArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let doc = match args.action {
        FooterAction::Show => store.set_footer_visible(true)?,
        FooterAction::Hide => store.set_footer_visible(false)?,
        FooterAction::Toggle => store.toggle_footer()?,
    };
    let state = if doc.contact.footer_visible() {
        "shown"
    } else {
        "hidden"
    };
    saved(&format!("Footer {}", state));
    Ok(())
}

#[derive(Debug, Args)]
pub struct IconArgs {
    /// Floating icon slot on the about page (1 or 2)
    pub slot: u8,
}

pub fn icon(args: IconArgs, ctx: &Context) -> Result<()> {
    let slot = IconSlot::from_number(args.slot)
        .ok_or_else(|| anyhow!("Invalid icon slot: {}. Use 1 or 2", args.slot))?;
    let mut store = ctx.open_store()?;
    let doc = store.cycle_floating_icon(slot)?;
    saved(&format!("Icon {} is now {}", args.slot, slot.current(&doc.about)));
    Ok(())
}

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub fn reset(args: ResetArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let confirmed = store.reset(|| args.yes || confirm("Reset the profile to its defaults?"))?;
    if confirmed {
        saved("Profile reset");
    } else {
        println!("{}", "Reset cancelled".yellow());
    }
    Ok(())
}

fn confirm(question: &str) -> bool {
    print!("{} [y/N] ", question);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}
