use time::OffsetDateTime;

/// The fields copied from an item sidecar into its media file.
///
/// Every field is optional. Takeout's sentinels (an empty description, a
/// `(0.0, 0.0)` location) are already folded into `None` by the time a value
/// of this type exists, so consumers never need to re-check them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataFields {
    /// Capture time (`photoTakenTime`), epoch seconds.
    pub taken: Option<i64>,
    /// Upload time (`creationTime`), epoch seconds.
    pub created: Option<i64>,
    /// Free-text description, never empty.
    pub description: Option<String>,
    /// Original file name as recorded by Google Photos.
    pub title: Option<String>,
    /// Location, never the `(0, 0)` sentinel.
    pub geo: Option<GeoPoint>,
}
impl MetadataFields {
    /// Returns `true` if there's nothing to write.
    pub fn is_empty(&self) -> bool {
        self.taken.is_none() && self.created.is_none() && self.description.is_none() && self.geo.is_none()
    }

    pub fn taken_at(&self) -> Option<OffsetDateTime> {
        self.taken.and_then(|ts| OffsetDateTime::from_unix_timestamp(ts).ok())
    }

    /// Falls back to the capture time when the upload time is missing.
    pub fn created_at(&self) -> Option<OffsetDateTime> {
        self.created.or(self.taken).and_then(|ts| OffsetDateTime::from_unix_timestamp(ts).ok())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above (positive) or below (negative) sea level.
    pub altitude: Option<f64>,
}
impl GeoPoint {
    /// Builds a point, folding Takeout's "no location" sentinel and any
    /// out-of-range coordinates into `None`.
    pub fn new(latitude: f64, longitude: f64, altitude: Option<f64>) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        if latitude == 0.0 && longitude == 0.0 {
            return None;
        }
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        let altitude = altitude.filter(|alt| alt.is_finite() && *alt != 0.0);
        Some(Self { latitude, longitude, altitude })
    }

    pub fn latitude_ref(&self) -> char {
        if self.latitude >= 0.0 { 'N' } else { 'S' }
    }

    pub fn longitude_ref(&self) -> char {
        if self.longitude >= 0.0 { 'E' } else { 'W' }
    }
}
