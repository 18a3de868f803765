//! Resource URL classification: decide how a stored resource can be
//! previewed and where its download lives.
//!
//! Classification is total: every URL resolves to some [`Preview`],
//! falling back to [`PreviewKind::Unknown`] (download-only) rather than
//! erroring. No network is touched here; fetching text bodies lives in
//! [`super::fetch`].

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};
use url::Url;

/// Google Drive file-id patterns, tried in priority order.
#[allow(clippy::expect_used)]
static DRIVE_FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/file/d/([a-zA-Z0-9_-]+)").expect("drive file regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static DRIVE_ID_PARAM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?&]id=([a-zA-Z0-9_-]+)").expect("drive id-param regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static DRIVE_SHORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("drive short regex is valid") // Static pattern, safe to panic
});

/// Extensions rendered as plain text in the preview surface.
pub const TEXT_EXTENSIONS: [&str; 27] = [
    "txt", "c", "cpp", "h", "hpp", "py", "java", "js", "ts", "jsx", "tsx", "css", "html", "xml",
    "json", "yaml", "yml", "toml", "md", "sh", "sql", "rs", "go", "rb", "php", "swift", "kt",
];

/// How a resource URL can be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    /// Google Drive share link; embedded via Drive's preview endpoint.
    GoogleDrive,
    /// Direct PDF; embedded natively.
    Pdf,
    /// Direct video file; embedded natively.
    Video,
    /// Direct image file; embedded natively.
    Image,
    /// Plain-text or source file; body fetched and rendered as text.
    Text,
    /// Office document; embedded through an external viewer.
    Office,
    /// Anything else; download-only.
    Unknown,
}

/// A classified resource URL: how to embed it (if possible) and where
/// to download it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Presentation category.
    pub kind: PreviewKind,
    /// URL suitable for inline embedding, when the kind supports one.
    pub embed_url: Option<String>,
    /// URL suitable for a direct download.
    pub download_url: String,
}

/// Extracts the Google Drive file id from a share URL, if present.
///
/// Patterns are tried in priority order: `/file/d/{id}`, `?id={id}`,
/// then the bare `/d/{id}` form.
#[must_use]
pub fn drive_file_id(url: &str) -> Option<&str> {
    for pattern in [&DRIVE_FILE_PATTERN, &DRIVE_ID_PARAM_PATTERN, &DRIVE_SHORT_PATTERN] {
        if let Some(captures) = pattern.captures(url)
            && let Some(id) = captures.get(1)
        {
            trace!(id = id.as_str(), "extracted drive file id");
            return Some(id.as_str());
        }
    }
    None
}

/// Returns the lower-cased extension of a URL's path, ignoring query
/// and fragment.
#[must_use]
pub fn url_extension(raw: &str) -> Option<String> {
    // Url::parse handles well-formed URLs; bare paths fall back to
    // manual query/fragment stripping so classification stays total.
    let path = match Url::parse(raw) {
        Ok(url) => url.path().to_string(),
        Err(_) => {
            let stripped = raw.split(['?', '#']).next().unwrap_or(raw);
            stripped.to_string()
        }
    };

    let file = path.rsplit('/').next()?;
    let dot = file.rfind('.')?;
    let ext = &file[dot + 1..];
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Classifies a resource URL into a [`Preview`].
///
/// Shared-drive id patterns win over extension sniffing and are matched
/// on any URL, not just the drive host: document links like
/// `docs.google.com/presentation/d/{id}/edit` carry the id in the bare
/// `/d/` form. A URL matching no pattern falls through to extension
/// classification.
#[must_use]
pub fn resolve_preview(url: &str) -> Preview {
    if let Some(id) = drive_file_id(url) {
        debug!(%id, "resolved drive preview");
        return Preview {
            kind: PreviewKind::GoogleDrive,
            embed_url: Some(format!("https://drive.google.com/file/d/{id}/preview")),
            download_url: format!("https://drive.google.com/uc?export=download&id={id}"),
        };
    }

    let kind = match url_extension(url).as_deref() {
        Some("pdf") => PreviewKind::Pdf,
        Some("mp4" | "webm" | "ogg" | "mov" | "avi") => PreviewKind::Video,
        Some("jpg" | "jpeg" | "png" | "gif" | "webp" | "svg" | "bmp") => PreviewKind::Image,
        Some("doc" | "docx" | "ppt" | "pptx" | "xls" | "xlsx" | "odt" | "ods" | "odp") => {
            PreviewKind::Office
        }
        Some(ext) if TEXT_EXTENSIONS.contains(&ext) => PreviewKind::Text,
        _ => PreviewKind::Unknown,
    };

    let embed_url = match kind {
        PreviewKind::Pdf | PreviewKind::Video | PreviewKind::Image | PreviewKind::Text => {
            Some(url.to_string())
        }
        PreviewKind::Office => Some(format!(
            "https://docs.google.com/viewer?url={}&embedded=true",
            urlencoding::encode(url)
        )),
        PreviewKind::GoogleDrive | PreviewKind::Unknown => None,
    };

    Preview {
        kind,
        embed_url,
        download_url: url.to_string(),
    }
}
