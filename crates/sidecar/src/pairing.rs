//! Pairing of media files with item sidecars, recovering from the file name
//! truncation Takeout applies to long sidecar names.
//!
//! Resolution happens one directory at a time, in three passes:
//!
//! 1. **Exact** names (current, numbered-duplicate, and legacy naming) are
//!    claimed first. An exact match always wins.
//! 2. **Numbered duplicates** (`IMG(1).jpg`) whose sidecar was truncated
//!    are looked up by the prefix of the un-numbered name, at the index the
//!    file carries.
//! 3. For every [`TruncationPoint`], the still-unresolved media are grouped by
//!    the prefix their sidecar name would have been cut to, and each group is
//!    [correlated](correlate) with the unclaimed sidecars sharing that prefix.
//! 4. Whatever is left is either [`Ambiguous`](Pairing::Ambiguous) or
//!    [`NotFound`](Pairing::NotFound).
//!
//! A sidecar is claimed at most once, so no two media files ever share one.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter, Result as FmtResult};

use tracing::instrument;

use crate::consts::{DEFAULT_TRUNCATION_LIMIT, DUPLICATE_INDEX_REGEX, JSON_EXTENSION, SUPPLEMENTAL_SUFFIX};
use crate::error::{ErrorKind, Result};
use crate::models::{MediaFile, SidecarKind};

/// Where Takeout may have cut a sidecar name to fit its length limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TruncationPoint {
    /// The complete sidecar name (before `.json`) was cut, usually somewhere
    /// inside `.supplemental-metadata`.
    Stem,
    /// The media file name was cut so that the suffix still fits.
    MediaName,
}
impl TruncationPoint {
    /// Every truncation point, in the order they are tried.
    pub const ALL: [TruncationPoint; 2] = [Self::Stem, Self::MediaName];

    /// The prefix a sidecar truncated at this point must start with, given a
    /// `limit` (in characters). Returns `None` if nothing would have been cut.
    ///
    /// A sidecar truncated at a limit *larger* than `limit` still starts with
    /// the returned prefix, so an underestimated limit degrades gracefully.
    pub fn prefix(&self, media: &MediaFile, limit: usize) -> Option<String> {
        match self {
            Self::Stem => truncate(&media.supplemental_stem(), limit),
            Self::MediaName => truncate(media.name(), limit.saturating_sub(SUPPLEMENTAL_SUFFIX.chars().count())),
        }
    }
}
impl Display for TruncationPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Stem => f.write_str("sidecar name"),
            Self::MediaName => f.write_str("media name"),
        }
    }
}

/// Cuts `s` to `max_chars` characters, or `None` if it already fits (or the
/// result would be empty).
fn truncate(s: &str, max_chars: usize) -> Option<String> {
    match s.char_indices().nth(max_chars) {
        Some((pos, _)) if pos > 0 => Some(s[..pos].to_string()),
        _ => None,
    }
}

/// The outcome of pairing a single media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pairing {
    /// The sidecar carries the media file's complete name.
    Exact(String),
    /// An older export's `<name>.json` sidecar.
    Legacy(String),
    /// Recovered from a truncated sidecar name. `position` is the media file's
    /// place among the files sharing the same truncated prefix.
    Truncated {
        sidecar: String,
        point: TruncationPoint,
        position: usize,
    },
    /// Several sidecars fit and position alone can't tell them apart.
    Ambiguous(Vec<String>),
    NotFound,
}
impl Pairing {
    /// The paired sidecar's file name, if one was found.
    pub fn sidecar(&self) -> Option<&str> {
        match self {
            Self::Exact(s) | Self::Legacy(s) | Self::Truncated { sidecar: s, .. } => Some(s),
            Self::Ambiguous(_) | Self::NotFound => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.sidecar().is_some()
    }
}

/// The result of correlating one member of a truncated-prefix group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correlation<'a> {
    Paired(&'a str),
    Ambiguous(Vec<&'a str>),
    Unmatched,
}

/// Duplicate index encoded between `prefix` and `.json`: a trailing `(N)` is
/// index `N`, anything else is index 0.
///
/// Reading the index relative to the prefix means a media name that itself
/// ends in `(N)` is never mistaken for a duplicate marker.
fn duplicate_index(prefix: &str, sidecar: &str) -> u32 {
    let remainder = sidecar.strip_prefix(prefix).and_then(|r| r.strip_suffix(JSON_EXTENSION)).unwrap_or_default();
    DUPLICATE_INDEX_REGEX
        .captures(remainder)
        .and_then(|captures| captures.get(1))
        .and_then(|index| index.as_str().parse().ok())
        .unwrap_or(0)
}

/// Splits a numbered duplicate such as `IMG_0001(1).jpg` into the name it
/// duplicates (`IMG_0001.jpg`), its index, and the literal `(N)` marker.
fn numbered(file: &MediaFile) -> Option<(MediaFile, u32, &str)> {
    let captures = DUPLICATE_INDEX_REGEX.captures(file.base())?;
    let marker = captures.get(0)?;
    let index = captures.get(1)?.as_str().parse().ok().filter(|index| *index > 0)?;
    let original = MediaFile::new(format!("{}{}", &file.base()[..marker.start()], file.extension()));
    Some((original, index, marker.as_str()))
}

/// Positional correlation of `members` media files (already in sorted order)
/// sharing a truncated `prefix`, with the sidecar `candidates` sharing it too.
///
/// This is a heuristic. Takeout numbers colliding sidecars `name.json`,
/// `name(1).json`, `name(2).json`... in the order it exported the media, and
/// nothing in the file names proves that order matches ours. The k-th member
/// takes the single candidate with duplicate index k:
///
/// - a lone member with a lone candidate pairs regardless of index;
/// - several candidates at the same index are ambiguous;
/// - a member with no candidate at its index is ambiguous if unclaimed
///   candidates remain, otherwise unmatched.
pub fn correlate<'a>(prefix: &str, members: usize, candidates: &[&'a str]) -> Vec<Correlation<'a>> {
    if candidates.is_empty() {
        return vec![Correlation::Unmatched; members];
    }
    if let ([candidate], 1) = (candidates, members) {
        return vec![Correlation::Paired(*candidate)];
    }
    let mut buckets: BTreeMap<u32, Vec<&'a str>> = BTreeMap::new();
    for &candidate in candidates {
        buckets.entry(duplicate_index(prefix, candidate)).or_default().push(candidate);
    }
    let mut correlated: Vec<Correlation<'a>> = (0..members)
        .map(|position| match u32::try_from(position).ok().and_then(|index| buckets.remove(&index)) {
            Some(bucket) if bucket.len() == 1 => Correlation::Paired(bucket[0]),
            Some(bucket) => Correlation::Ambiguous(bucket),
            None => Correlation::Unmatched,
        })
        .collect();
    // Anything left in the buckets sits at an index no member occupies.
    let leftovers: Vec<&'a str> = buckets.into_values().flatten().collect();
    if !leftovers.is_empty() {
        for correlation in correlated.iter_mut().filter(|c| matches!(c, Correlation::Unmatched)) {
            *correlation = Correlation::Ambiguous(leftovers.clone());
        }
    }
    correlated
}

/// Pairs media files with their item sidecars.
///
/// Pure: it only ever looks at the names it's given, which makes it trivial to
/// test against listings captured from real exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    limit: usize,
}
impl Resolver {
    /// `limit` is the maximum sidecar name length (in characters, excluding
    /// `.json`) that the export was produced with.
    ///
    /// # Errors
    /// [`ErrorKind::InvalidLimit`] if the limit leaves no room for the media
    /// name in front of `.supplemental-metadata`.
    pub fn new(limit: usize) -> Result<Self> {
        if limit <= SUPPLEMENTAL_SUFFIX.chars().count() {
            exn::bail!(ErrorKind::InvalidLimit(limit));
        }
        Ok(Self { limit })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Resolves every media file in one directory against the names of the
    /// JSON files in that same directory.
    ///
    /// Input order is irrelevant: media files are sorted (and deduplicated)
    /// before positions are assigned. Album metadata and non-JSON names in
    /// `sidecars` are ignored.
    #[instrument(level = "debug", skip_all, fields(media = media.len(), sidecars = sidecars.len()))]
    pub fn resolve(&self, media: &[MediaFile], sidecars: &BTreeSet<String>) -> BTreeMap<MediaFile, Pairing> {
        let ordered: BTreeSet<&MediaFile> = media.iter().collect();
        let available: BTreeSet<&str> = sidecars
            .iter()
            .map(String::as_str)
            .filter(|name| SidecarKind::classify(name) == SidecarKind::Item)
            .collect();
        let mut claimed: BTreeSet<&str> = BTreeSet::new();
        let mut resolved: BTreeMap<&MediaFile, Pairing> = BTreeMap::new();
        let mut ambiguous: BTreeMap<&MediaFile, Vec<String>> = BTreeMap::new();

        for &file in &ordered {
            if let Some((sidecar, pairing)) = Self::exact(file, &available, &claimed) {
                claimed.insert(sidecar);
                resolved.insert(file, pairing);
            }
        }

        let duplicates: Vec<(&MediaFile, MediaFile, u32)> = ordered
            .iter()
            .filter(|file| !resolved.contains_key(**file))
            .filter_map(|&file| numbered(file).map(|(original, index, _)| (file, original, index)))
            .collect();
        for (file, original, index) in duplicates {
            for point in TruncationPoint::ALL {
                let Some(prefix) = point.prefix(&original, self.limit) else { continue };
                let found: Vec<&str> = available
                    .iter()
                    .copied()
                    .filter(|name| name.starts_with(prefix.as_str()) && !claimed.contains(name))
                    .filter(|name| duplicate_index(&prefix, name) == index)
                    .collect();
                match found.as_slice() {
                    [] => continue,
                    [sidecar] => {
                        tracing::trace!(media = %file, sidecar, %point, index, "Paired numbered duplicate");
                        claimed.insert(*sidecar);
                        ambiguous.remove(file);
                        let position = usize::try_from(index).unwrap_or(usize::MAX);
                        resolved.insert(file, Pairing::Truncated { sidecar: sidecar.to_string(), point, position });
                    },
                    _ => {
                        ambiguous.insert(file, found.iter().map(|name| name.to_string()).collect());
                    },
                }
                break;
            }
        }

        for point in TruncationPoint::ALL {
            let mut groups: BTreeMap<String, Vec<&MediaFile>> = BTreeMap::new();
            for &file in ordered.iter().filter(|file| !resolved.contains_key(*file)) {
                if let Some(prefix) = point.prefix(file, self.limit) {
                    groups.entry(prefix).or_default().push(file);
                }
            }
            for (prefix, members) in groups {
                let candidates: Vec<&str> = available
                    .iter()
                    .copied()
                    .filter(|name| name.starts_with(prefix.as_str()) && !claimed.contains(name))
                    .collect();
                let correlated = correlate(&prefix, members.len(), &candidates);
                for (position, (file, correlation)) in members.into_iter().zip(correlated).enumerate() {
                    match correlation {
                        Correlation::Paired(sidecar) => {
                            tracing::trace!(media = %file, sidecar, %point, position, "Paired via truncated prefix");
                            claimed.insert(sidecar);
                            ambiguous.remove(file);
                            resolved.insert(file, Pairing::Truncated { sidecar: sidecar.to_string(), point, position });
                        },
                        Correlation::Ambiguous(found) => {
                            ambiguous.insert(file, found.into_iter().map(str::to_string).collect());
                        },
                        Correlation::Unmatched => {},
                    }
                }
            }
        }

        ordered
            .into_iter()
            .map(|file| {
                // A later pass may have claimed some of an ambiguous file's candidates.
                let unclaimed = ambiguous
                    .remove(file)
                    .map(|found| found.into_iter().filter(|name| !claimed.contains(name.as_str())).collect::<Vec<_>>())
                    .filter(|found| !found.is_empty());
                let pairing = resolved.remove(file).or(unclaimed.map(Pairing::Ambiguous)).unwrap_or(Pairing::NotFound);
                (file.clone(), pairing)
            })
            .collect()
    }

    /// Resolves a single media file as if it were alone in its directory, so
    /// positional correlation can only ever pick duplicate index 0.
    pub fn resolve_one(&self, media: &MediaFile, sidecars: &BTreeSet<String>) -> Pairing {
        self.resolve(std::slice::from_ref(media), sidecars).remove(media).unwrap_or(Pairing::NotFound)
    }

    fn exact<'a>(
        file: &MediaFile,
        available: &BTreeSet<&'a str>,
        claimed: &BTreeSet<&'a str>,
    ) -> Option<(&'a str, Pairing)> {
        let lookup = |name: String| available.get(name.as_str()).copied().filter(|found| !claimed.contains(found));
        if let Some(found) = lookup(file.supplemental_name()) {
            return Some((found, Pairing::Exact(found.to_string())));
        }
        // `IMG_0001(1).jpg` is described by `IMG_0001.jpg.supplemental-metadata(1).json`.
        if let Some((original, _, marker)) = numbered(file)
            && let Some(found) = lookup(format!("{}{marker}{JSON_EXTENSION}", original.supplemental_stem()))
        {
            return Some((found, Pairing::Exact(found.to_string())));
        }
        lookup(file.legacy_name()).map(|found| (found, Pairing::Legacy(found.to_string())))
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self { limit: DEFAULT_TRUNCATION_LIMIT }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn resolver() -> Resolver {
        Resolver::default()
    }

    fn names(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn media(names: &[&str]) -> Vec<MediaFile> {
        names.iter().map(|s| MediaFile::new(*s)).collect()
    }

    /// What Takeout would name the sidecar when cutting at the `Stem` point.
    fn cut(media: &str, limit: usize, duplicate: Option<u32>) -> String {
        let stem: String = format!("{media}{SUPPLEMENTAL_SUFFIX}").chars().take(limit).collect();
        match duplicate {
            Some(n) => format!("{stem}({n}).json"),
            None => format!("{stem}.json"),
        }
    }

    #[test]
    fn test_invalid_limit() {
        assert_eq!(Resolver::default().limit(), DEFAULT_TRUNCATION_LIMIT);
        assert!(Resolver::new(0).is_err());
        assert!(Resolver::new(22).is_err());
        assert_eq!(Resolver::new(23).unwrap().limit(), 23);
    }

    #[rstest]
    #[case("abcdef", 3, Some("abc"))]
    #[case("abc", 3, None)]
    #[case("ab", 3, None)]
    #[case("abc", 0, None)]
    #[case("ÄÖÜäöü", 2, Some("ÄÖ"))]
    fn test_truncate(#[case] s: &str, #[case] max: usize, #[case] expected: Option<&str>) {
        assert_eq!(truncate(s, max).as_deref(), expected);
    }

    #[rstest]
    #[case("IMG_0001.jpg", TruncationPoint::Stem, None)]
    #[case("IMG_0001.jpg", TruncationPoint::MediaName, None)]
    #[case("IMG_20200101_1234567.jpeg", TruncationPoint::Stem, Some("IMG_20200101_1234567.jpeg.supplemental-metadat"))]
    #[case("IMG_20200101_1234567.jpeg", TruncationPoint::MediaName, Some("IMG_20200101_1234567.jpe"))]
    #[case("IMG_20200101_123456789.jpg", TruncationPoint::Stem, Some("IMG_20200101_123456789.jpg.supplemental-metada"))]
    #[case("IMG_20200101_123456789.jpg", TruncationPoint::MediaName, Some("IMG_20200101_123456789.j"))]
    fn test_prefix(#[case] name: &str, #[case] point: TruncationPoint, #[case] expected: Option<&str>) {
        assert_eq!(point.prefix(&MediaFile::new(name), DEFAULT_TRUNCATION_LIMIT).as_deref(), expected);
    }

    #[rstest]
    #[case("prefix", "prefix.json", 0)]
    #[case("prefix", "prefix(1).json", 1)]
    #[case("prefix", "prefix(12).json", 12)]
    #[case("prefix", "prefixtail(3).json", 3)]
    #[case("prefix(1)", "prefix(1).json", 0)]
    #[case("prefix(1)", "prefix(1)(2).json", 2)]
    #[case("prefix", "prefix(x).json", 0)]
    fn test_duplicate_index(#[case] prefix: &str, #[case] sidecar: &str, #[case] expected: u32) {
        assert_eq!(duplicate_index(prefix, sidecar), expected);
    }

    #[test]
    fn test_exact_match() {
        let pairing = resolver().resolve_one(
            &MediaFile::new("IMG_0001.jpg"),
            &names(&["IMG_0001.jpg.supplemental-metadata.json", "metadata.json"]),
        );
        assert_eq!(pairing, Pairing::Exact("IMG_0001.jpg.supplemental-metadata.json".to_string()));
    }

    #[test]
    fn test_exact_match_dominates_truncated_candidates() {
        let name = "IMG_20200101_1234567.jpeg";
        let sidecars = names(&[
            "IMG_20200101_1234567.jpeg.supplemental-metadata.json",
            "IMG_20200101_1234567.jpeg.supplemental-metadat.json",
            "IMG_20200101_1234567.jpeg.supplemental-metadat(1).json",
        ]);
        let pairing = resolver().resolve_one(&MediaFile::new(name), &sidecars);
        assert_eq!(pairing, Pairing::Exact("IMG_20200101_1234567.jpeg.supplemental-metadata.json".to_string()));
    }

    #[test]
    fn test_legacy_match() {
        let sidecars = names(&["IMG_0001.jpg.json"]);
        let pairing = resolver().resolve_one(&MediaFile::new("IMG_0001.jpg"), &sidecars);
        assert_eq!(pairing, Pairing::Legacy("IMG_0001.jpg.json".to_string()));
    }

    #[test]
    fn test_numbered_duplicate_exact_match() {
        let sidecars = names(&[
            "IMG_0001.jpg.supplemental-metadata.json",
            "IMG_0001.jpg.supplemental-metadata(1).json",
        ]);
        let resolved = resolver().resolve(&media(&["IMG_0001(1).jpg", "IMG_0001.jpg"]), &sidecars);
        assert_eq!(
            resolved[&MediaFile::new("IMG_0001.jpg")],
            Pairing::Exact("IMG_0001.jpg.supplemental-metadata.json".to_string())
        );
        assert_eq!(
            resolved[&MediaFile::new("IMG_0001(1).jpg")],
            Pairing::Exact("IMG_0001.jpg.supplemental-metadata(1).json".to_string())
        );
    }

    #[test]
    fn test_numbered_duplicate_truncated_match() {
        let base = "PXL_20230102_123456789.jpg";
        let sidecars = names(&[
            "PXL_20230102_123456789.jpg.supplemental-metada.json",
            "PXL_20230102_123456789.jpg.supplemental-metada(1).json",
            "PXL_20230102_123456789.jpg.supplemental-metada(2).json",
        ]);
        let resolved = resolver().resolve(
            &media(&["PXL_20230102_123456789(2).jpg", base, "PXL_20230102_123456789(1).jpg"]),
            &sidecars,
        );
        assert_eq!(resolved[&MediaFile::new(base)], Pairing::Truncated {
            sidecar: "PXL_20230102_123456789.jpg.supplemental-metada.json".to_string(),
            point: TruncationPoint::Stem,
            position: 0,
        });
        for n in [1, 2] {
            assert_eq!(resolved[&MediaFile::new(format!("PXL_20230102_123456789({n}).jpg"))], Pairing::Truncated {
                sidecar: format!("PXL_20230102_123456789.jpg.supplemental-metada({n}).json"),
                point: TruncationPoint::Stem,
                position: n,
            });
        }
    }

    #[test]
    fn test_numbered_duplicate_alone() {
        let sidecars = names(&[
            "PXL_20230102_123456789.jpg.supplemental-metada.json",
            "PXL_20230102_123456789.jpg.supplemental-metada(1).json",
        ]);
        let pairing = resolver().resolve_one(&MediaFile::new("PXL_20230102_123456789(1).jpg"), &sidecars);
        assert_eq!(pairing.sidecar(), Some("PXL_20230102_123456789.jpg.supplemental-metada(1).json"));
    }

    #[rstest]
    #[case("IMG(1).jpg", Some(("IMG.jpg", 1, "(1)")))]
    #[case("IMG(12).jpeg", Some(("IMG.jpeg", 12, "(12)")))]
    #[case("IMG(0).jpg", None)]
    #[case("IMG.jpg", None)]
    fn test_numbered(#[case] name: &str, #[case] expected: Option<(&str, u32, &str)>) {
        let file = MediaFile::new(name);
        let found = numbered(&file).map(|(original, index, marker)| (original.name().to_string(), index, marker));
        assert_eq!(found, expected.map(|(original, index, marker)| (original.to_string(), index, marker)));
    }

    #[test]
    fn test_truncated_suffix() {
        let sidecars = names(&["IMG_20200101_1234567.jpeg.supplemental-metadat.json"]);
        let pairing = resolver().resolve_one(&MediaFile::new("IMG_20200101_1234567.jpeg"), &sidecars);
        assert_eq!(
            pairing,
            Pairing::Truncated {
                sidecar: "IMG_20200101_1234567.jpeg.supplemental-metadat.json".to_string(),
                point: TruncationPoint::Stem,
                position: 0,
            }
        );
    }

    #[test]
    fn test_truncated_long_name() {
        let name = "Very_Long_Filename_That_Exceeds_The_Limit.jpg";
        let sidecar = cut(name, DEFAULT_TRUNCATION_LIMIT, None);
        assert_eq!(sidecar, "Very_Long_Filename_That_Exceeds_The_Limit.jpg..json");
        let pairing = resolver().resolve_one(&MediaFile::new(name), &names(&[&sidecar]));
        assert_eq!(pairing.sidecar(), Some(sidecar.as_str()));
    }

    #[test]
    fn test_truncated_media_name() {
        let sidecars = names(&["IMG_20200101_123456789.j.supplemental-metadata.json"]);
        let pairing = resolver().resolve_one(&MediaFile::new("IMG_20200101_123456789.jpg"), &sidecars);
        assert_eq!(
            pairing,
            Pairing::Truncated {
                sidecar: "IMG_20200101_123456789.j.supplemental-metadata.json".to_string(),
                point: TruncationPoint::MediaName,
                position: 0,
            }
        );
    }

    #[rstest]
    #[case(46)]
    #[case(47)]
    #[case(51)]
    #[case(60)]
    fn test_underestimated_limit_still_pairs(#[case] actual_limit: usize) {
        let name = "Very_Long_Filename_That_Exceeds_The_Limit.jpg";
        let sidecar = cut(name, actual_limit, None);
        let pairing = resolver().resolve_one(&MediaFile::new(name), &names(&[&sidecar]));
        assert_eq!(pairing.sidecar(), Some(sidecar.as_str()));
    }

    #[test]
    fn test_shared_prefix_pairs_by_position() {
        let sidecars = names(&[
            "Summer_Holiday_In_Lisbon_With_The_Whole_Family.json",
            "Summer_Holiday_In_Lisbon_With_The_Whole_Family(1).json",
        ]);
        let files = media(&[
            "Summer_Holiday_In_Lisbon_With_The_Whole_Family_2019.png",
            "Summer_Holiday_In_Lisbon_With_The_Whole_Family_2019.jpg",
        ]);
        let resolved = resolver().resolve(&files, &sidecars);
        assert_eq!(
            resolved[&MediaFile::new("Summer_Holiday_In_Lisbon_With_The_Whole_Family_2019.jpg")].sidecar(),
            Some("Summer_Holiday_In_Lisbon_With_The_Whole_Family.json")
        );
        assert_eq!(
            resolved[&MediaFile::new("Summer_Holiday_In_Lisbon_With_The_Whole_Family_2019.png")].sidecar(),
            Some("Summer_Holiday_In_Lisbon_With_The_Whole_Family(1).json")
        );
    }

    #[rstest]
    #[case(&["a", "b", "c", "d"])]
    #[case(&["d", "c", "b", "a"])]
    #[case(&["c", "a", "d", "b"])]
    fn test_shared_prefix_bijection_ignores_input_order(#[case] suffixes: &[&str]) {
        let base = "Summer_Holiday_In_Lisbon_With_The_Whole_Family_2019";
        let files: Vec<MediaFile> = suffixes.iter().map(|s| MediaFile::new(format!("{base}_{s}.jpg"))).collect();
        let sidecars: BTreeSet<String> = (0..4).map(|n| cut(base, DEFAULT_TRUNCATION_LIMIT, (n > 0).then_some(n))).collect();
        let resolved = resolver().resolve(&files, &sidecars);
        let paired: Vec<_> = resolved.values().map(|p| p.sidecar().unwrap().to_string()).collect();
        assert_eq!(
            paired,
            vec![
                "Summer_Holiday_In_Lisbon_With_The_Whole_Family.json",
                "Summer_Holiday_In_Lisbon_With_The_Whole_Family(1).json",
                "Summer_Holiday_In_Lisbon_With_The_Whole_Family(2).json",
                "Summer_Holiday_In_Lisbon_With_The_Whole_Family(3).json",
            ]
        );
    }

    #[test]
    fn test_claimed_sidecar_is_not_reused() {
        // The `.jpeg` file's own sidecar also starts with the `.jpg` file's
        // truncated media-name prefix.
        let sidecars = names(&["IMG_20200101_123456789.jpeg.supplemental-metadata.json"]);
        let resolved = resolver().resolve(&media(&["IMG_20200101_123456789.jpg", "IMG_20200101_123456789.jpeg"]), &sidecars);
        assert!(matches!(resolved[&MediaFile::new("IMG_20200101_123456789.jpeg")], Pairing::Exact(_)));
        assert_eq!(resolved[&MediaFile::new("IMG_20200101_123456789.jpg")], Pairing::NotFound);
    }

    #[test]
    fn test_not_found() {
        let sidecars = names(&["metadata.json", "OTHER.jpg.supplemental-metadata.json"]);
        let pairing = resolver().resolve_one(&MediaFile::new("IMG_0001.jpg"), &sidecars);
        assert_eq!(pairing, Pairing::NotFound);
    }

    #[test]
    fn test_album_metadata_is_never_a_candidate() {
        // With a tiny limit the media-name prefix is just "meta".
        let resolver = Resolver::new(26).unwrap();
        let pairing = resolver.resolve_one(&MediaFile::new("metadata_export.jpg"), &names(&["metadata.json"]));
        assert_eq!(pairing, Pairing::NotFound);
    }

    #[test]
    fn test_ambiguous() {
        let name = "IMG_20200101_1234567.jpeg";
        let sidecars = names(&[
            "IMG_20200101_1234567.jpeg.supplemental-metadatX.json",
            "IMG_20200101_1234567.jpeg.supplemental-metadatY.json",
        ]);
        let pairing = resolver().resolve_one(&MediaFile::new(name), &sidecars);
        assert_eq!(
            pairing,
            Pairing::Ambiguous(vec![
                "IMG_20200101_1234567.jpeg.supplemental-metadatX.json".to_string(),
                "IMG_20200101_1234567.jpeg.supplemental-metadatY.json".to_string(),
            ])
        );
    }

    #[test]
    fn test_correlate_lone_member_ignores_index() {
        assert_eq!(correlate("p", 1, &["p(2).json"]), vec![Correlation::Paired("p(2).json")]);
    }

    #[test]
    fn test_correlate_missing_index() {
        assert_eq!(correlate("p", 2, &["p.json"]), vec![Correlation::Paired("p.json"), Correlation::Unmatched]);
        assert_eq!(correlate("p", 1, &["p(1).json", "p(2).json"]), vec![Correlation::Ambiguous(vec![
            "p(1).json",
            "p(2).json"
        ])]);
        assert_eq!(correlate("p", 3, &[]), vec![Correlation::Unmatched; 3]);
    }
}
