pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const KM_PER_DEGREE: f64 = 111.0;

/// Great-circle distance between two points in kilometres (haversine).
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Flat-earth distance estimate used for hazard proximity checks, scaled
/// by the cosine of the first point's latitude.
pub fn approx_distance_km(lat: f64, lng: f64, other_lat: f64, other_lng: f64) -> f64 {
    let dy = (lat - other_lat).abs() * KM_PER_DEGREE;
    let dx = (lng - other_lng).abs() * KM_PER_DEGREE * lat.to_radians().cos();
    (dx * dx + dy * dy).sqrt()
}

/// Ray-casting containment test. Vertices are GeoJSON ordered `[lng, lat]`.
pub fn point_in_polygon(lat: f64, lng: f64, polygon: &[[f64; 2]]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let [mut p1_lng, mut p1_lat] = polygon[0];
    for i in 1..=n {
        let [p2_lng, p2_lat] = polygon[i % n];
        if lat > p1_lat.min(p2_lat) && lat <= p1_lat.max(p2_lat) && lng <= p1_lng.max(p2_lng) {
            // p1_lat != p2_lat is implied by the strict/inclusive bounds above
            let x_intersection = (lat - p1_lat) * (p2_lng - p1_lng) / (p2_lat - p1_lat) + p1_lng;
            if p1_lng == p2_lng || lng <= x_intersection {
                inside = !inside;
            }
        }
        p1_lng = p2_lng;
        p1_lat = p2_lat;
    }

    inside
}
