//! # Profile Workspace
//!
//! Everything that touches the outside world: the file-backed storage record,
//! change notifications from other processes, and PDF export.

pub mod export;
pub mod storage;
pub mod watcher;

pub use export::{
    BrowserPrintFallback, ChromiumConverter, ExportError, ExportOptions, ExportOutcome,
    ExportPipeline, ExportSurface, PdfConverter, PrintFallback, SessionSurface, DEFAULT_FILENAME,
    DEFAULT_SETTLE_DELAY_MS,
};
pub use profile_compiler_html::{Orientation, PageSetup};
pub use storage::FileStorage;
pub use watcher::{StorageWatcher, WatcherError, WatcherResult};
