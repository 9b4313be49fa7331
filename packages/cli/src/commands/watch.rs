use super::Context;
use anyhow::Result;
use colored::Colorize;
use profile_editor::Storage;
use profile_workspace::StorageWatcher;

/// Follow the stored record and report changes made by other writers
pub async fn watch(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let mut watcher = StorageWatcher::new(store.storage())?;

    println!(
        "{} {} (Ctrl+C to stop)",
        "👀 Watching".bright_blue().bold(),
        store.storage().path().display()
    );

    loop {
        let (returned, event) = tokio::task::spawn_blocking(move || {
            let event = watcher.next_event();
            (watcher, event)
        })
        .await?;
        watcher = returned;

        let Some(event) = event else {
            println!("{}", "Watcher stopped".yellow());
            return Ok(());
        };

        if store.apply_external(&event) {
            println!(
                "  {} {} updated: {}",
                "↻".green(),
                event.key,
                store.document().hero.brand_name.bright_white()
            );
        } else {
            println!("  {} ignored change to {}", "·".dimmed(), store.storage().key());
        }
    }
}
