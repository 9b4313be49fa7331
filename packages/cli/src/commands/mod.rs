pub mod edit;
pub mod export;
pub mod init;
pub mod mutate;
pub mod render;
pub mod show;
pub mod watch;

pub use edit::{edit, EditArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use mutate::{
    add, add_point, delete, delete_point, footer, icon, image, reset, set, AddArgs,
    AddPointArgs, DeleteArgs, DeletePointArgs, FooterArgs, IconArgs, ImageArgs, ResetArgs,
    SetArgs,
};
pub use render::{render, RenderArgs};
pub use show::{show, ShowArgs};
pub use watch::watch;

use crate::config::Config;
use anyhow::{anyhow, Result};
use colored::Colorize;
use profile_editor::schema::Collection;
use profile_editor::{EditMode, Store};
use profile_workspace::FileStorage;

/// Shared addressing options
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub cwd: String,
    /// Address the profile was opened with; selects edit or view mode
    pub address: Option<String>,
    pub view: bool,
}

impl Context {
    pub fn mode(&self) -> EditMode {
        if self.view {
            return EditMode::View;
        }
        self.address
            .as_deref()
            .map(EditMode::from_address)
            .unwrap_or_default()
    }

    pub fn config(&self) -> Result<Config> {
        Config::load(&self.cwd)
    }

    pub fn open_store(&self) -> Result<Store<FileStorage>> {
        let storage = self.config()?.storage(&self.cwd)?;
        Ok(Store::load(storage, self.mode()))
    }
}

pub fn parse_collection(key: &str) -> Result<Collection> {
    Collection::from_key(key).ok_or_else(|| {
        anyhow!(
            "Unknown collection: {}. Use: values, services, or workProcess",
            key
        )
    })
}

pub fn saved(message: &str) {
    println!("{} {}", "✓".green(), message);
}
