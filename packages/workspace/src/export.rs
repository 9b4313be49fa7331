//! # PDF Export
//!
//! Drives an external HTML-to-PDF converter over the rendered profile.
//!
//! ```text
//! export ─► busy ─► clear focus ─► settle ─► render ─► convert ──► Pdf
//!                                                         │
//!                                                         └─ error ─► print fallback
//! ```
//!
//! Busy is cleared on every exit path, including errors and panics.

use async_trait::async_trait;
use profile_compiler_html::{compile_to_html, CompileError, CompileOptions, PageSetup};
use profile_editor::{EditSession, Storage};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

pub const DEFAULT_FILENAME: &str = "Tivro_Full_Profile_2025.pdf";
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 600;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("An export is already in progress")]
    Busy,

    #[error("Render error: {0}")]
    Render(#[from] CompileError),

    #[error("Converter failed: {0}")]
    Converter(String),

    #[error("No Chromium binary found; set export.chromiumPath")]
    ConverterNotFound,

    #[error("Print fallback failed: {0}")]
    Fallback(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fixed A4 rendering parameters
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub filename: String,
    pub out_dir: PathBuf,
    /// Orientation, margins and page breaks of the rendered document
    pub page: PageSetup,
    /// Device scale factor used while printing
    pub scale: f32,
    /// Pause between clearing focus and capturing the document
    pub settle_delay: Duration,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_string(),
            out_dir: PathBuf::from("."),
            page: PageSetup::default(),
            scale: 2.0,
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
        }
    }
}

impl ExportOptions {
    pub fn output_path(&self) -> PathBuf {
        self.out_dir.join(&self.filename)
    }

    fn file_stem(&self) -> &str {
        Path::new(&self.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("profile")
    }
}

/// The live document the export captures
pub trait ExportSurface {
    fn set_busy(&mut self, busy: bool);

    /// Drop any in-progress edit so the capture shows committed values
    fn clear_focus(&mut self);

    fn render(&self, page: &PageSetup) -> Result<String, ExportError>;
}

#[async_trait]
pub trait PdfConverter: Send + Sync {
    async fn convert(
        &self,
        html: &str,
        options: &ExportOptions,
        output: &Path,
    ) -> Result<(), ExportError>;
}

/// Hands the rendered document to the platform print flow
#[async_trait]
pub trait PrintFallback: Send + Sync {
    async fn print(&self, html: &str, options: &ExportOptions) -> Result<PathBuf, ExportError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Pdf(PathBuf),
    /// Conversion failed; the document was handed to the print flow
    PrintFallback(PathBuf),
}

pub struct ExportPipeline<C, F> {
    converter: C,
    fallback: F,
    options: ExportOptions,
    busy: AtomicBool,
}

struct BusyGuard<'a, S: ExportSurface + ?Sized> {
    flag: &'a AtomicBool,
    surface: &'a mut S,
}

impl<S: ExportSurface + ?Sized> Drop for BusyGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.set_busy(false);
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl<C: PdfConverter, F: PrintFallback> ExportPipeline<C, F> {
    pub fn new(converter: C, fallback: F, options: ExportOptions) -> Self {
        Self {
            converter,
            fallback,
            options,
            busy: AtomicBool::new(false),
        }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub async fn export<S: ExportSurface + ?Sized>(
        &self,
        surface: &mut S,
    ) -> Result<ExportOutcome, ExportError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ExportError::Busy);
        }

        surface.set_busy(true);
        let guard = BusyGuard {
            flag: &self.busy,
            surface,
        };

        guard.surface.clear_focus();
        tokio::time::sleep(self.options.settle_delay).await;

        let html = guard.surface.render(&self.options.page)?;
        let output = self.options.output_path();
        tokio::fs::create_dir_all(&self.options.out_dir).await?;

        match self.converter.convert(&html, &self.options, &output).await {
            Ok(()) => {
                info!(path = %output.display(), "Exported PDF");
                Ok(ExportOutcome::Pdf(output))
            }
            Err(e) => {
                error!(error = %e, "PDF generation failed, falling back to print");
                let printed = self.fallback.print(&html, &self.options).await?;
                Ok(ExportOutcome::PrintFallback(printed))
            }
        }
    }
}

/// Prints through a headless Chromium (`--print-to-pdf`)
#[derive(Debug, Clone)]
pub struct ChromiumConverter {
    binary: PathBuf,
}

const CHROMIUM_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
];

impl ChromiumConverter {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Find a Chromium on `PATH`
    pub fn detect() -> Result<Self, ExportError> {
        let path = std::env::var_os("PATH").ok_or(ExportError::ConverterNotFound)?;
        std::env::split_paths(&path)
            .flat_map(|dir| CHROMIUM_CANDIDATES.iter().map(move |name| dir.join(name)))
            .find(|candidate| candidate.is_file())
            .map(Self::new)
            .ok_or(ExportError::ConverterNotFound)
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

#[async_trait]
impl PdfConverter for ChromiumConverter {
    async fn convert(
        &self,
        html: &str,
        options: &ExportOptions,
        output: &Path,
    ) -> Result<(), ExportError> {
        let source = options
            .out_dir
            .join(format!(".{}.export.html", options.file_stem()));
        tokio::fs::write(&source, html).await?;
        let source = tokio::fs::canonicalize(&source).await?;

        let (width, height) = options.page.size_px();
        debug!(binary = %self.binary.display(), source = %source.display(), "Starting Chromium");
        let result = Command::new(&self.binary)
            .arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-pdf-header-footer")
            .arg(format!("--force-device-scale-factor={}", options.scale))
            .arg(format!("--window-size={},{}", width, height))
            .arg(format!("--print-to-pdf={}", output.display()))
            .arg(format!("file://{}", source.display()))
            .stdin(Stdio::null())
            .output()
            .await;

        if let Err(e) = tokio::fs::remove_file(&source).await {
            warn!(error = %e, "Failed to remove export source");
        }

        let result = result.map_err(|e| ExportError::Converter(e.to_string()))?;
        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(ExportError::Converter(format!(
                "{}: {}",
                result.status,
                stderr.trim()
            )));
        }
        if !output.exists() {
            return Err(ExportError::Converter("no PDF was written".to_string()));
        }
        Ok(())
    }
}

/// Writes a self-printing HTML file and optionally opens it
#[derive(Debug, Clone)]
pub struct BrowserPrintFallback {
    open: bool,
}

impl BrowserPrintFallback {
    pub fn new(open: bool) -> Self {
        Self { open }
    }
}

impl Default for BrowserPrintFallback {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl PrintFallback for BrowserPrintFallback {
    async fn print(&self, html: &str, options: &ExportOptions) -> Result<PathBuf, ExportError> {
        let path = options
            .out_dir
            .join(format!("{}.print.html", options.file_stem()));

        let script = "<script>window.addEventListener('load', function () { window.print(); });</script>";
        let printable = match html.rfind("</body>") {
            Some(at) => format!("{}{}\n{}", &html[..at], script, &html[at..]),
            None => format!("{}{}", html, script),
        };
        tokio::fs::write(&path, printable)
            .await
            .map_err(|e| ExportError::Fallback(e.to_string()))?;

        if self.open {
            if let Err(e) = open_in_browser(&path).await {
                warn!(path = %path.display(), error = %e, "Could not open print page");
            }
        }
        Ok(path)
    }
}

async fn open_in_browser(path: &Path) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };
    command.arg(path).stdin(Stdio::null()).spawn()?;
    Ok(())
}

/// Export surface over an edit session
pub struct SessionSurface<'a, S: Storage> {
    session: &'a mut EditSession<S>,
    busy: bool,
}

impl<'a, S: Storage> SessionSurface<'a, S> {
    pub fn new(session: &'a mut EditSession<S>) -> Self {
        Self {
            session,
            busy: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

impl<S: Storage> ExportSurface for SessionSurface<'_, S> {
    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        debug!(busy, "Export busy state");
    }

    fn clear_focus(&mut self) {
        if let Err(e) = self.session.clear_focus() {
            warn!(error = %e, "Failed to commit focused field before export");
        }
    }

    /// Exports always use the read-only markup
    fn render(&self, page: &PageSetup) -> Result<String, ExportError> {
        let options = CompileOptions {
            page: page.clone(),
            ..CompileOptions::view()
        };
        Ok(compile_to_html(self.session.document(), options)?)
    }
}
