use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Read a markdown document into memory.
pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Resolve a reference relative to the document that contains it.
/// Absolute references are returned unchanged.
pub fn resolve_path(document: &Path, reference: &str) -> PathBuf {
    let reference = Path::new(reference);
    if reference.is_absolute() {
        return reference.to_path_buf();
    }
    document
        .parent()
        .unwrap_or(Path::new("."))
        .join(reference)
}

/// MIME type by extension. Unknown extensions default to PNG; the webview
/// will still refuse to decode a mislabeled payload, which is the right
/// failure mode for a bad reference.
pub fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

/// Read an image file and encode it as a `data:` URL the webview can show
/// without filesystem access.
pub fn image_data_url(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read image {}", path.display()))?;
    Ok(format!(
        "data:{};base64,{}",
        image_mime(path),
        STANDARD.encode(&bytes)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_resolve_path_is_sibling_relative() {
        let doc = Path::new("/home/me/talks/deck.md");
        assert_eq!(
            resolve_path(doc, "images/a.png"),
            PathBuf::from("/home/me/talks/images/a.png")
        );
        assert_eq!(
            resolve_path(doc, "./a.png"),
            PathBuf::from("/home/me/talks/./a.png")
        );
    }

    #[test]
    fn test_resolve_path_keeps_absolute_references() {
        let doc = Path::new("/home/me/deck.md");
        assert_eq!(resolve_path(doc, "/tmp/a.png"), PathBuf::from("/tmp/a.png"));
    }

    #[test]
    fn test_image_mime_by_extension() {
        assert_eq!(image_mime(Path::new("a.png")), "image/png");
        assert_eq!(image_mime(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(image_mime(Path::new("a.JPEG")), "image/jpeg");
        assert_eq!(image_mime(Path::new("a.gif")), "image/gif");
        assert_eq!(image_mime(Path::new("a.svg")), "image/svg+xml");
        assert_eq!(image_mime(Path::new("a.webp")), "image/webp");
        assert_eq!(image_mime(Path::new("a.bmp")), "image/png", "unknown defaults to png");
        assert_eq!(image_mime(Path::new("noext")), "image/png");
    }

    #[test]
    fn test_image_data_url_round_trip() {
        let mut file = tempfile::NamedTempFile::with_suffix(".svg").unwrap();
        file.write_all(b"<svg/>").unwrap();

        let url = image_data_url(file.path()).unwrap();
        assert!(url.starts_with("data:image/svg+xml;base64,"));
        let payload = url.rsplit(',').next().unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), b"<svg/>");
    }

    #[test]
    fn test_image_data_url_missing_file_errors() {
        assert!(image_data_url(Path::new("/nonexistent/img.png")).is_err());
    }
}
