//! # Image Editor
//!
//! Click-to-upload state for one image field. Chosen files are inlined as
//! `data:<mime>;base64,...` URLs so the document stays self-contained.

use crate::errors::EditorError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use profile_schema::FieldPath;
use std::path::Path;
use tracing::debug;

/// Ask the host to open a file picker for `path`
#[derive(Debug, Clone, PartialEq)]
pub struct PickerRequest {
    pub path: FieldPath,
    pub accept: &'static str,
}

/// What the image slot shows
#[derive(Debug, Clone, PartialEq)]
pub enum ImageView<'a> {
    /// Current image, with the replace/remove affordances when editable
    Image { src: &'a str, editable: bool },
    /// Upload placeholder for an empty editable slot
    Placeholder,
    /// Empty read-only slot
    Nothing,
}

#[derive(Debug, Clone)]
pub struct ImageEditor {
    path: FieldPath,
    value: Option<String>,
    read_only: bool,
}

impl ImageEditor {
    pub fn new(path: FieldPath, value: Option<String>) -> Self {
        Self {
            path,
            value: value.filter(|v| !v.is_empty()),
            read_only: false,
        }
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn current(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn view(&self) -> ImageView<'_> {
        match (self.value.as_deref(), self.read_only) {
            (Some(src), read_only) => ImageView::Image {
                src,
                editable: !read_only,
            },
            (None, false) => ImageView::Placeholder,
            (None, true) => ImageView::Nothing,
        }
    }

    /// Placeholder or replace affordance clicked
    pub fn activate(&self) -> Option<PickerRequest> {
        if self.read_only {
            return None;
        }
        Some(PickerRequest {
            path: self.path.clone(),
            accept: "image/*",
        })
    }

    /// Read the chosen file and return the `data:` URL to commit
    pub async fn choose_file(&mut self, file: impl AsRef<Path>) -> Result<String, EditorError> {
        if self.read_only {
            return Err(EditorError::ReadOnly);
        }

        let file = file.as_ref();
        let bytes = tokio::fs::read(file).await?;
        if !sniff_mime(&bytes, file).starts_with("image/") {
            return Err(EditorError::NotAnImage(file.display().to_string()));
        }
        let url = encode_data_url(&bytes, file);
        debug!(path = %self.path, bytes = bytes.len(), "Encoded image");

        self.value = Some(url.clone());
        Ok(url)
    }

    /// Commit an empty value
    pub fn remove(&mut self) -> Result<String, EditorError> {
        if self.read_only {
            return Err(EditorError::ReadOnly);
        }
        self.value = None;
        Ok(String::new())
    }

    pub fn sync_external(&mut self, value: Option<&str>) {
        self.value = value.filter(|v| !v.is_empty()).map(str::to_string);
    }
}

/// Encode bytes as a `data:` URL, typed by content and then by file name
pub fn encode_data_url(bytes: &[u8], file_name: &Path) -> String {
    format!("data:{};base64,{}", sniff_mime(bytes, file_name), BASE64.encode(bytes))
}

fn sniff_mime(bytes: &[u8], file_name: &Path) -> &'static str {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        return "image/png";
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return "image/jpeg";
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return "image/gif";
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return "image/webp";
    }
    if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        match &bytes[8..12] {
            b"avif" | b"avis" => return "image/avif",
            b"heic" | b"heix" | b"mif1" => return "image/heic",
            _ => {}
        }
    }

    let extension = file_name
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("bmp") => "image/bmp",
        Some("avif") => "image/avif",
        Some("heic" | "heif") => "image/heic",
        Some("tif" | "tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn logo_path() -> FieldPath {
        FieldPath::parse_dotted("hero.logo").unwrap()
    }

    #[test]
    fn test_sniff_by_magic_then_extension() {
        let png = b"\x89PNG\r\n\x1a\nrest";
        assert_eq!(sniff_mime(png, Path::new("logo.jpg")), "image/png");
        assert_eq!(sniff_mime(b"<svg/>", Path::new("logo.SVG")), "image/svg+xml");
        assert_eq!(sniff_mime(b"??", Path::new("blob")), "application/octet-stream");
        assert_eq!(sniff_mime(b"????", Path::new("photo.avif")), "image/avif");
        assert_eq!(sniff_mime(b"\0\0\0\x1cftypheic", Path::new("IMG_1")), "image/heic");
        assert_eq!(sniff_mime(b"II*\0", Path::new("scan.TIFF")), "image/tiff");
    }

    #[test]
    fn test_encode_data_url() {
        let url = encode_data_url(&[0xFF, 0xD8, 0xFF, 0x00], Path::new("a.bin"));
        assert_eq!(url, "data:image/jpeg;base64,/9j/AA==");
    }

    #[test]
    fn test_views() {
        let editor = ImageEditor::new(logo_path(), None);
        assert_eq!(editor.view(), ImageView::Placeholder);
        assert!(editor.activate().is_some());

        let editor = ImageEditor::new(logo_path(), Some(String::new())).read_only(true);
        assert_eq!(editor.view(), ImageView::Nothing);
        assert!(editor.activate().is_none());

        let editor = ImageEditor::new(logo_path(), Some("data:x".to_string())).read_only(true);
        assert_eq!(
            editor.view(),
            ImageView::Image {
                src: "data:x",
                editable: false
            }
        );
    }

    #[test]
    fn test_remove() {
        let mut editor = ImageEditor::new(logo_path(), Some("data:x".to_string()));
        assert_eq!(editor.remove().unwrap(), "");
        assert_eq!(editor.current(), None);
    }

    #[tokio::test]
    async fn test_choose_file_reads_and_encodes() {
        let mut file = tempfile::Builder::new().suffix(".gif").tempfile().unwrap();
        file.write_all(b"GIF89a....").unwrap();

        let mut editor = ImageEditor::new(logo_path(), None);
        let url = editor.choose_file(file.path()).await.unwrap();
        assert!(url.starts_with("data:image/gif;base64,"));
        assert_eq!(editor.current(), Some(url.as_str()));
    }

    #[tokio::test]
    async fn test_choose_file_refuses_non_images() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"plain text").unwrap();

        let mut editor = ImageEditor::new(logo_path(), None);
        let err = editor.choose_file(file.path()).await.unwrap_err();
        assert!(matches!(err, EditorError::NotAnImage(_)));
        assert_eq!(editor.current(), None);
    }

    #[tokio::test]
    async fn test_choose_missing_file_is_io_error() {
        let mut editor = ImageEditor::new(logo_path(), None);
        let err = editor.choose_file("/definitely/not/here.png").await.unwrap_err();
        assert!(matches!(err, EditorError::Io(_)));
    }
}
