//! Resource preview resolution.
//!
//! [`resolve_preview`] classifies a stored URL into an embed strategy
//! and a download target without touching the network; [`TextFetcher`]
//! retrieves bodies for the text-rendered kinds.

mod fetch;
mod resolver;

pub use fetch::{FetchError, TextFetcher};
pub use resolver::{
    Preview, PreviewKind, TEXT_EXTENSIONS, drive_file_id, resolve_preview, url_extension,
};
