//! Ground-distance conversions between meters and raster pixels.

/// Approximate length of one degree of latitude, in meters.
pub const METERS_PER_DEGREE_LATITUDE: f64 = 110_540.0;

/// Pixel edge length in meters for a raster whose north–south pixel size is
/// given in degrees of latitude (the `e` term of a north-up affine transform,
/// which is negative for top-down rows).
pub fn pixel_size_from_latitude_deg(transform_e: f64) -> f64 {
    METERS_PER_DEGREE_LATITUDE * transform_e.abs()
}

/// Convert a physical distance into pixels for the given ground sampling distance.
#[inline]
pub fn meters_to_pixels(distance_m: f64, pixel_size_m: f64) -> f64 {
    distance_m / pixel_size_m
}
