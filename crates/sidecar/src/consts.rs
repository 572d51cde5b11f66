use regex::Regex;
use std::sync::LazyLock;

/// Appended (before `.json`) to the full media file name by current exports.
pub const SUPPLEMENTAL_SUFFIX: &str = ".supplemental-metadata";
/// Appended to the full media file name by older exports.
pub const LEGACY_SUFFIX: &str = ".json";
pub const JSON_EXTENSION: &str = ".json";
/// Album-level metadata; describes a directory, never a single file.
pub const ALBUM_METADATA_NAME: &str = "metadata.json";
/// Maximum sidecar name length (excluding `.json`) observed in Takeout exports.
pub const DEFAULT_TRUNCATION_LIMIT: usize = 46;

pub const DEFAULT_MEDIA_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "heic", "heif", "webp", "bmp", "tif", "tiff", "dng", "mp4", "mov", "m4v", "3gp",
    "avi", "mkv", "mpg", "mts", "wmv",
];

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Duplicate-index marker at the very end of a sidecar name (before `.json`).
regex!(DUPLICATE_INDEX_REGEX, r"\((\d{1,9})\)$");
