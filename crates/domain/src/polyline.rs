//! Encoded polyline codec
//!
//! Route geometry arrives as a compact string: every coordinate is scaled by
//! 1e5, stored as the signed delta from the previous point, zig-zag folded and
//! split into 5-bit groups, low group first. Each group is offset by 63 into
//! the printable range and carries `0x20` when more groups follow. Points are
//! written latitude first, then longitude.
//!
//! Decoding reads the input exactly once from left to right. A string that
//! ends inside a value, contains a byte outside the alphabet or produces an
//! impossible coordinate is rejected with the byte index at which it stopped
//! being parseable.

use crate::errors::{DomainError, GeometryFault};
use crate::value_objects::GeoPoint;

/// Fixed coordinate precision factor
pub const PRECISION: f64 = 1e5;

const CHAR_OFFSET: u8 = 63;
const MAX_CHAR: u8 = 126;
const CONTINUATION_BIT: i64 = 0x20;
const GROUP_MASK: i64 = 0x1f;
/// Twelve groups fill 60 bits; a thirteenth would spill into the sign bit.
const MAX_SHIFT: u32 = 60;

/// Decode an encoded polyline into its points, in traversal order
///
/// # Errors
///
/// Returns `DomainError::MalformedGeometry` carrying the offending byte index
/// when the input is truncated, contains an invalid character, holds a value
/// too long for the accumulator, or decodes to an out-of-range coordinate.
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, DomainError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::with_capacity(bytes.len() / 4);
    let mut index = 0;
    let mut latitude: i64 = 0;
    let mut longitude: i64 = 0;

    while index < bytes.len() {
        let point_start = index;

        let delta_lat = read_value(bytes, &mut index)?;
        if index >= bytes.len() {
            return Err(DomainError::malformed(index, GeometryFault::Truncated));
        }
        let delta_lon = read_value(bytes, &mut index)?;

        latitude = latitude
            .checked_add(delta_lat)
            .ok_or_else(|| DomainError::malformed(point_start, GeometryFault::Overflow))?;
        longitude = longitude
            .checked_add(delta_lon)
            .ok_or_else(|| DomainError::malformed(point_start, GeometryFault::Overflow))?;

        let point = GeoPoint::new(unscale(latitude), unscale(longitude))
            .map_err(|_| DomainError::malformed(point_start, GeometryFault::OutOfRange))?;
        points.push(point);
    }

    Ok(points)
}

/// Encode points into a polyline string
///
/// Coordinates are rounded to five decimal places, so any input already at
/// that precision decodes back to exactly the same values.
#[must_use]
pub fn encode(points: &[GeoPoint]) -> String {
    let mut encoded = String::with_capacity(points.len() * 8);
    let mut previous_lat: i64 = 0;
    let mut previous_lon: i64 = 0;

    for point in points {
        let lat = scale(point.latitude());
        let lon = scale(point.longitude());
        write_value(lat - previous_lat, &mut encoded);
        write_value(lon - previous_lon, &mut encoded);
        previous_lat = lat;
        previous_lon = lon;
    }

    encoded
}

/// Read one zig-zag encoded value starting at `index`, advancing past it
fn read_value(bytes: &[u8], index: &mut usize) -> Result<i64, DomainError> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(DomainError::malformed(*index, GeometryFault::Truncated));
        };
        if !(CHAR_OFFSET..=MAX_CHAR).contains(&byte) {
            return Err(DomainError::malformed(
                *index,
                GeometryFault::InvalidCharacter(byte),
            ));
        }
        if shift >= MAX_SHIFT {
            return Err(DomainError::malformed(*index, GeometryFault::Overflow));
        }

        let group = i64::from(byte - CHAR_OFFSET);
        result |= (group & GROUP_MASK) << shift;
        shift += 5;
        *index += 1;

        if group & CONTINUATION_BIT == 0 {
            break;
        }
    }

    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

fn write_value(delta: i64, out: &mut String) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };

    while value >= CONTINUATION_BIT {
        out.push(to_char((CONTINUATION_BIT | (value & GROUP_MASK)) + i64::from(CHAR_OFFSET)));
        value >>= 5;
    }
    out.push(to_char(value + i64::from(CHAR_OFFSET)));
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_char(code: i64) -> char {
    // Always within 63..=126 here.
    char::from(code as u8)
}

#[allow(clippy::cast_possible_truncation)]
fn scale(value: f64) -> i64 {
    (value * PRECISION).round() as i64
}

#[allow(clippy::cast_precision_loss)]
fn unscale(value: i64) -> f64 {
    value as f64 / PRECISION
}
