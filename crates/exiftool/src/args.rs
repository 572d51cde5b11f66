//! The fixed argument contract used for every ExifTool invocation.

use std::ffi::OsString;
use std::path::Path;
use takeout_sidecar::{GeoPoint, MetadataFields};
use time::OffsetDateTime;
use time::macros::format_description;

/// Containers that keep their dates and location in QuickTime atoms.
const QUICKTIME_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "3gp"];

fn is_quicktime(media: &Path) -> bool {
    media
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| QUICKTIME_EXTENSIONS.iter().any(|qt| ext.eq_ignore_ascii_case(qt)))
}

/// EXIF date/time, always written in UTC.
fn exif_datetime(datetime: OffsetDateTime) -> Option<String> {
    datetime.format(format_description!("[year]:[month]:[day] [hour]:[minute]:[second]")).ok()
}

fn tag(name: &str, value: impl std::fmt::Display) -> OsString {
    format!("-{name}={value}").into()
}

fn gps(point: &GeoPoint, quicktime: bool) -> Vec<OsString> {
    let mut args = vec![
        tag("GPSLatitude", point.latitude.abs()),
        tag("GPSLatitudeRef", point.latitude_ref()),
        tag("GPSLongitude", point.longitude.abs()),
        tag("GPSLongitudeRef", point.longitude_ref()),
    ];
    if let Some(altitude) = point.altitude {
        args.push(tag("GPSAltitude", altitude.abs()));
        // Numeric reference: 0 = above sea level, 1 = below.
        args.push(tag("GPSAltitudeRef#", u8::from(altitude < 0.0)));
    }
    if quicktime {
        let coordinates = match point.altitude {
            Some(altitude) => format!("{}, {}, {}", point.latitude, point.longitude, altitude),
            None => format!("{}, {}", point.latitude, point.longitude),
        };
        args.push(tag("Keys:GPSCoordinates", coordinates));
    }
    args
}

/// Builds the ExifTool command line (minus the executable) that writes
/// `fields` into `media`, or `None` if there's nothing to write.
///
/// Re-running the same arguments against an already-updated file produces the
/// same tag values, so application is idempotent.
pub fn arguments(media: &Path, fields: &MetadataFields) -> Option<Vec<OsString>> {
    if fields.is_empty() {
        return None;
    }
    let quicktime = is_quicktime(media);
    let mut args: Vec<OsString> = vec!["-overwrite_original".into()];
    if quicktime {
        args.extend(["-api".into(), "QuickTimeUTC=1".into()]);
    }
    if let Some(description) = &fields.description {
        args.push(tag("Description", description));
    }
    if let Some(taken) = fields.taken_at().and_then(exif_datetime) {
        args.push(tag("DateTimeOriginal", &taken));
        args.push(tag("OffsetTimeOriginal", "+00:00"));
    }
    if let Some(created) = fields.created_at().and_then(exif_datetime) {
        args.push(tag("CreateDate", &created));
        args.push(tag("ModifyDate", &created));
    }
    if let Some(point) = &fields.geo {
        args.extend(gps(point, quicktime));
    }
    args.push(media.as_os_str().to_owned());
    Some(args)
}
