//! File acceptance rules: configuration tables, not computed logic.
//!
//! The size cap, extension allow-list, and MIME expectations are fixed
//! policy data consumed by the validation step.

/// Maximum accepted file size: 50 MiB.
pub const MAX_FILE_SIZE_BYTES: u64 = 50 * 1024 * 1024;

/// Lower-cased extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: [&str; 17] = [
    "pdf", "doc", "docx", "ppt", "pptx", "txt", "jpg", "jpeg", "png", "mp4", "c", "cpp", "py",
    "java", "js", "ts", "h",
];

/// Source-code extensions that skip MIME validation entirely: browsers
/// report inconsistent or empty MIME types for them.
pub const CODE_EXTENSIONS: [&str; 7] = ["c", "cpp", "py", "java", "js", "ts", "h"];

/// Returns the lower-cased extension of a filename, if any.
#[must_use]
pub fn extension_of(name: &str) -> Option<String> {
    let dot = name.rfind('.')?;
    let ext = &name[dot + 1..];
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Whether the extension is in the accepted set.
#[must_use]
pub fn is_allowed_extension(ext: &str) -> bool {
    ALLOWED_EXTENSIONS.contains(&ext)
}

/// Whether the extension is MIME-exempt source code.
#[must_use]
pub fn is_code_extension(ext: &str) -> bool {
    CODE_EXTENSIONS.contains(&ext)
}

/// The MIME type expected for an accepted non-code extension.
#[must_use]
pub fn expected_mime(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "txt" => "text/plain",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "mp4" => "video/mp4",
        _ => return None,
    };
    Some(mime)
}

/// The primary type of a MIME string (the part before `/`).
#[must_use]
pub fn mime_primary(mime: &str) -> &str {
    mime.split('/').next().unwrap_or(mime)
}

/// Title label for a generated resource title, derived from the file's
/// extension.
#[must_use]
pub fn title_label(ext: &str) -> &'static str {
    match ext {
        "pdf" => "PDF",
        "doc" | "docx" => "Document",
        "ppt" | "pptx" => "Presentation",
        "txt" => "Text",
        "jpg" | "jpeg" | "png" => "Image",
        "mp4" => "Video",
        _ if is_code_extension(ext) => "Code",
        _ => "File",
    }
}
