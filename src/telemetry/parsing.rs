use serde_json::Value;

use crate::telemetry::Position;

/// Parse one raw telemetry entry (`[lat, lng, altitude?]`).
///
/// Anything that is not an array of at least two numeric values, or that
/// lies outside the valid coordinate range, yields `None`.
pub fn parse_position(entry: &Value, hours_ago: i32) -> Option<Position> {
    let values = entry.as_array()?;
    if values.len() < 2 {
        return None;
    }

    let lat = numeric(&values[0])?;
    let lng = numeric(&values[1])?;
    let altitude = values.get(2).and_then(numeric);

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return None;
    }

    Some(Position {
        lat,
        lng,
        altitude: altitude.filter(|a| a.is_finite()),
        hours_ago,
    })
}

// Upstream occasionally serialises numbers as strings.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::parse_position;

    #[test]
    fn parses_full_triple() {
        let position = parse_position(&json!([12.5, -45.25, 15234.0]), 3).unwrap();
        assert_eq!(position.lat, 12.5);
        assert_eq!(position.lng, -45.25);
        assert_eq!(position.altitude, Some(15234.0));
        assert_eq!(position.hours_ago, 3);
    }

    #[test]
    fn altitude_is_optional() {
        let position = parse_position(&json!([1.0, 2.0]), 0).unwrap();
        assert_eq!(position.altitude, None);

        let position = parse_position(&json!([1.0, 2.0, null]), 0).unwrap();
        assert_eq!(position.altitude, None);

        let position = parse_position(&json!([1.0, 2.0, "high"]), 0).unwrap();
        assert_eq!(position.altitude, None);
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(parse_position(&json!(null), 0).is_none());
        assert!(parse_position(&json!({"lat": 1.0, "lng": 2.0}), 0).is_none());
        assert!(parse_position(&json!([1.0]), 0).is_none());
        assert!(parse_position(&json!([null, 2.0, 3.0]), 0).is_none());
        assert!(parse_position(&json!([1.0, null]), 0).is_none());
        assert!(parse_position(&json!(["north", 2.0]), 0).is_none());
        assert!(parse_position(&json!([true, 2.0]), 0).is_none());
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(parse_position(&json!([90.5, 0.0]), 0).is_none());
        assert!(parse_position(&json!([-91.0, 0.0]), 0).is_none());
        assert!(parse_position(&json!([0.0, 180.1]), 0).is_none());
        assert!(parse_position(&json!([0.0, -181.0]), 0).is_none());
        assert!(parse_position(&json!([90.0, -180.0]), 0).is_some());
    }

    #[test]
    fn accepts_numeric_strings() {
        let position = parse_position(&json!(["10.5", " 20 ", "1000"]), 1).unwrap();
        assert_eq!(position.lat, 10.5);
        assert_eq!(position.lng, 20.0);
        assert_eq!(position.altitude, Some(1000.0));

        assert!(parse_position(&json!(["NaN", 0.0]), 0).is_none());
    }

    #[test]
    fn parsing_is_stable() {
        let entry = json!([-33.9, 151.2, 12000.0]);
        assert_eq!(parse_position(&entry, 5), parse_position(&entry, 5));
    }
}
