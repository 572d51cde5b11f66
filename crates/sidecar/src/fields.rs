//! Mapping of item sidecar documents onto [`MetadataFields`].
//!
//! Sidecars are treated as untrusted: every field is deserialized on its own,
//! and a field with an unexpected shape is simply absent. Only a document that
//! is not a JSON object at all is an error.

use exn::ResultExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::models::{GeoPoint, MetadataFields};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSidecar {
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    photo_taken_time: Option<RawTimestamp>,
    #[serde(default, deserialize_with = "lenient")]
    creation_time: Option<RawTimestamp>,
    #[serde(default, deserialize_with = "lenient")]
    geo_data: Option<RawGeo>,
    #[serde(default, deserialize_with = "lenient")]
    geo_data_exif: Option<RawGeo>,
}

#[derive(Debug, Deserialize)]
struct RawTimestamp {
    #[serde(default, deserialize_with = "lenient")]
    timestamp: Option<Epoch>,
}

/// Takeout writes epoch seconds as a string, but be generous.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Epoch {
    Integer(i64),
    Float(f64),
    Text(String),
}
impl Epoch {
    fn seconds(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Self::Float(_) => None,
            Self::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawGeo {
    #[serde(default, deserialize_with = "lenient")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    altitude: Option<f64>,
}
impl RawGeo {
    fn point(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.latitude?, self.longitude?, self.altitude)
    }
}

/// Deserializes a field, turning any type mismatch into `None` instead of
/// failing the whole document.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl MetadataFields {
    /// Parses an item sidecar document.
    ///
    /// # Errors
    /// [`ErrorKind::MalformedSidecar`] if the bytes are not a JSON object.
    /// Missing or oddly-shaped fields never cause an error.
    #[instrument(level = "trace", skip(bytes), fields(size = bytes.len()))]
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes).or_raise(|| ErrorKind::MalformedSidecar)?;
        if !value.is_object() {
            exn::bail!(ErrorKind::MalformedSidecar);
        }
        let raw: RawSidecar = serde_json::from_value(value).or_raise(|| ErrorKind::MalformedSidecar)?;
        Ok(raw.into_fields())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_slice(json.as_bytes())
    }
}
impl RawSidecar {
    fn into_fields(self) -> MetadataFields {
        let seconds = |ts: Option<RawTimestamp>| ts.and_then(|t| t.timestamp).and_then(|e| e.seconds());
        let non_blank = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
        let geo = self.geo_data.as_ref().and_then(RawGeo::point).or_else(|| self.geo_data_exif.as_ref().and_then(RawGeo::point));
        MetadataFields {
            taken: seconds(self.photo_taken_time),
            created: seconds(self.creation_time),
            description: non_blank(self.description),
            title: non_blank(self.title),
            geo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FULL: &str = r#"{
        "title": "IMG_0001.jpg",
        "description": "Sunset over the harbour",
        "imageViews": "12",
        "creationTime": { "timestamp": "1577966400", "formatted": "2 Jan 2020, 12:00:00 UTC" },
        "photoTakenTime": { "timestamp": "1577880000", "formatted": "1 Jan 2020, 12:00:00 UTC" },
        "geoData": { "latitude": 51.5007, "longitude": -0.1246, "altitude": 12.5, "latitudeSpan": 0.0, "longitudeSpan": 0.0 },
        "geoDataExif": { "latitude": 0.0, "longitude": 0.0, "altitude": 0.0 },
        "url": "https://photos.google.com/photo/abc"
    }"#;

    #[test]
    fn test_full_document() {
        let fields = MetadataFields::from_json(FULL).unwrap();
        assert_eq!(fields.title.as_deref(), Some("IMG_0001.jpg"));
        assert_eq!(fields.description.as_deref(), Some("Sunset over the harbour"));
        assert_eq!(fields.taken, Some(1_577_880_000));
        assert_eq!(fields.created, Some(1_577_966_400));
        let geo = fields.geo.unwrap();
        assert_eq!((geo.latitude, geo.longitude, geo.altitude), (51.5007, -0.1246, Some(12.5)));
    }

    #[test]
    fn test_empty_object() {
        assert_eq!(MetadataFields::from_json("{}").unwrap(), MetadataFields::default());
    }

    #[rstest]
    #[case(r#"{ "description": "" }"#)]
    #[case(r#"{ "description": "   " }"#)]
    #[case(r#"{ "description": null }"#)]
    #[case(r#"{ "description": 42 }"#)]
    fn test_blank_description_is_absent(#[case] json: &str) {
        assert_eq!(MetadataFields::from_json(json).unwrap().description, None);
    }

    #[rstest]
    #[case(r#"{ "photoTakenTime": { "timestamp": "1577880000" } }"#, Some(1_577_880_000))]
    #[case(r#"{ "photoTakenTime": { "timestamp": 1577880000 } }"#, Some(1_577_880_000))]
    #[case(r#"{ "photoTakenTime": { "timestamp": " 1577880000 " } }"#, Some(1_577_880_000))]
    #[case(r#"{ "photoTakenTime": { "timestamp": "yesterday" } }"#, None)]
    #[case(r#"{ "photoTakenTime": { "formatted": "1 Jan 2020" } }"#, None)]
    #[case(r#"{ "photoTakenTime": "1577880000" }"#, None)]
    fn test_taken_time(#[case] json: &str, #[case] expected: Option<i64>) {
        assert_eq!(MetadataFields::from_json(json).unwrap().taken, expected);
    }

    #[test]
    fn test_zero_geo_is_absent() {
        let json = r#"{ "geoData": { "latitude": 0.0, "longitude": 0.0, "altitude": 0.0 } }"#;
        assert_eq!(MetadataFields::from_json(json).unwrap().geo, None);
    }

    #[test]
    fn test_geo_falls_back_to_exif() {
        let json = r#"{
            "geoData": { "latitude": 0.0, "longitude": 0.0 },
            "geoDataExif": { "latitude": 48.8584, "longitude": 2.2945 }
        }"#;
        let geo = MetadataFields::from_json(json).unwrap().geo.unwrap();
        assert_eq!((geo.latitude, geo.longitude), (48.8584, 2.2945));
    }

    #[test]
    fn test_wrong_typed_geo_is_absent() {
        let json = r#"{ "geoData": { "latitude": "north", "longitude": 2.0 }, "description": "kept" }"#;
        let fields = MetadataFields::from_json(json).unwrap();
        assert_eq!(fields.geo, None);
        assert_eq!(fields.description.as_deref(), Some("kept"));
    }

    #[rstest]
    #[case("")]
    #[case("not json")]
    #[case(r#"{ "title": "#)]
    #[case("[]")]
    #[case(r#""IMG_0001.jpg""#)]
    fn test_malformed_document(#[case] json: &str) {
        let err = MetadataFields::from_json(json).unwrap_err();
        assert_eq!(*err, ErrorKind::MalformedSidecar);
    }
}
