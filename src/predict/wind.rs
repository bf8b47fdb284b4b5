use crate::telemetry::geo::KM_PER_DEGREE;

const MS_TO_KMH: f64 = 3.6;
// cos(89.4°); keeps longitude scaling finite near the poles
const MIN_COS_LATITUDE: f64 = 0.01;

/// Degrees of latitude/longitude drifted with a steady wind.
///
/// `direction_deg` follows the meteorological convention (the direction the
/// wind blows *from*, clockwise from true north).
pub fn wind_displacement(speed_m_s: f64, direction_deg: f64, hours: f64, latitude: f64) -> (f64, f64) {
    if !(speed_m_s.is_finite() && direction_deg.is_finite() && hours.is_finite() && latitude.is_finite()) {
        return (0.0, 0.0);
    }

    let heading = ((direction_deg + 180.0) % 360.0).to_radians();
    let distance_km = speed_m_s * MS_TO_KMH * hours;

    let lat_scale = KM_PER_DEGREE;
    let lng_scale = KM_PER_DEGREE * latitude.to_radians().cos().max(MIN_COS_LATITUDE);

    (
        distance_km * heading.cos() / lat_scale,
        distance_km * heading.sin() / lng_scale,
    )
}
