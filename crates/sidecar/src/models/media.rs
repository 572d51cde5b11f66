use crate::consts::{DEFAULT_MEDIA_EXTENSIONS, LEGACY_SUFFIX, SUPPLEMENTAL_SUFFIX};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A single exported media asset, identified by its file name.
///
/// The directory is deliberately not part of this type: pairing only ever
/// happens between files that live side-by-side.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MediaFile {
    name: String,
    // Byte offset of the extension's leading dot, if there is one.
    split: usize,
}
impl MediaFile {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        // A leading dot is a hidden file, not an extension.
        let split = match name.rfind('.') {
            Some(0) | None => name.len(),
            Some(pos) => pos,
        };
        Self { name, split }
    }

    /// Base name and extension together, exactly as found on disk.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name without the extension.
    pub fn base(&self) -> &str {
        &self.name[..self.split]
    }

    /// Extension including its leading dot, or an empty string.
    pub fn extension(&self) -> &str {
        &self.name[self.split..]
    }

    /// Sidecar name current exports produce when nothing was truncated.
    pub fn supplemental_name(&self) -> String {
        format!("{}{}.json", self.name, SUPPLEMENTAL_SUFFIX)
    }

    /// Sidecar name older exports produce when nothing was truncated.
    pub fn legacy_name(&self) -> String {
        format!("{}{}", self.name, LEGACY_SUFFIX)
    }

    /// Sidecar name without the trailing `.json`; the part Takeout truncates.
    pub(crate) fn supplemental_stem(&self) -> String {
        format!("{}{}", self.name, SUPPLEMENTAL_SUFFIX)
    }
}
impl Display for MediaFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.name)
    }
}
impl From<&str> for MediaFile {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
impl From<String> for MediaFile {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Decides which files in an export are media, by extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFilter {
    extensions: BTreeSet<String>,
}
impl MediaFilter {
    /// Extensions are matched case-insensitively, with or without a leading dot.
    pub fn new<S: AsRef<str>>(extensions: impl IntoIterator<Item = S>) -> Self {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    pub fn is_media(&self, name: &str) -> bool {
        let media = MediaFile::new(name);
        let extension = media.extension().trim_start_matches('.');
        !extension.is_empty() && self.extensions.contains(&extension.to_ascii_lowercase())
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}
impl Default for MediaFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_EXTENSIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("IMG_0001.jpg", "IMG_0001", ".jpg")]
    #[case("archive.tar.gz", "archive.tar", ".gz")]
    #[case("no_extension", "no_extension", "")]
    #[case(".hidden", ".hidden", "")]
    #[case("Photo (1).HEIC", "Photo (1)", ".HEIC")]
    fn test_split(#[case] name: &str, #[case] base: &str, #[case] extension: &str) {
        let media = MediaFile::new(name);
        assert_eq!(media.base(), base);
        assert_eq!(media.extension(), extension);
        assert_eq!(media.name(), name);
    }

    #[test]
    fn test_sidecar_names() {
        let media = MediaFile::new("IMG_0001.jpg");
        assert_eq!(media.supplemental_name(), "IMG_0001.jpg.supplemental-metadata.json");
        assert_eq!(media.legacy_name(), "IMG_0001.jpg.json");
    }

    #[rstest]
    #[case("IMG_0001.jpg", true)]
    #[case("IMG_0001.JPG", true)]
    #[case("clip.MP4", true)]
    #[case("IMG_0001.jpg.supplemental-metadata.json", false)]
    #[case("metadata.json", false)]
    #[case("notes.txt", false)]
    #[case("jpg", false)]
    fn test_default_filter(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(MediaFilter::default().is_media(name), expected);
    }

    #[test]
    fn test_filter_normalizes_extensions() {
        let filter = MediaFilter::new([".JPG", " png ", ""]);
        assert_eq!(filter.extensions().collect::<Vec<_>>(), vec!["jpg", "png"]);
        assert!(filter.is_media("a.Png"));
        assert!(!filter.is_media("a.gif"));
    }
}
