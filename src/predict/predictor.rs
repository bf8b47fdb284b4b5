use crate::predict::velocity::estimate_velocity;
use crate::predict::wind::wind_displacement;
use crate::telemetry::{BalloonTrack, Position};
use crate::weather::WindSample;

pub const TRAJECTORY_WEIGHT: f64 = 0.6;
pub const WIND_WEIGHT: f64 = 0.4;
pub const DEFAULT_HOURS_AHEAD: [u32; 2] = [5, 10];
/// Longest horizon accepted from callers.
pub const MAX_HOURS_AHEAD: u32 = 240;

/// Project a balloon forward by each horizon in `hours_ahead`.
///
/// Each position blends the momentum extrapolation of the recent track with
/// a wind-drifted position anchored at the current fix. Without a wind sample
/// the wind term stays at the current fix. Tracks with fewer than two fixes
/// produce no predictions. Zero horizons and horizons too large to express
/// as `hours_ago` are skipped.
pub fn predict(track: &BalloonTrack, wind: Option<&WindSample>, hours_ahead: &[u32]) -> Vec<Position> {
    if track.positions.len() < 2 {
        return Vec::new();
    }

    let velocity = estimate_velocity(&track.positions);
    let current = track.current;

    hours_ahead
        .iter()
        .filter_map(|&hours| {
            let ahead = i32::try_from(hours).ok().filter(|&h| h > 0)?;
            let h = f64::from(hours);
            let trajectory_lat = current.lat + velocity.lat_deg_per_hour * h;
            let trajectory_lng = current.lng + velocity.lng_deg_per_hour * h;

            let (wind_lat, wind_lng) = wind
                .map(|w| wind_displacement(w.speed, w.direction, h, current.lat))
                .unwrap_or((0.0, 0.0));

            let lat = TRAJECTORY_WEIGHT * trajectory_lat + WIND_WEIGHT * (current.lat + wind_lat);
            let lng = TRAJECTORY_WEIGHT * trajectory_lng + WIND_WEIGHT * (current.lng + wind_lng);

            Some(Position {
                lat: clamp_latitude(lat),
                lng: wrap_longitude(lng),
                altitude: current.altitude,
                hours_ago: -ahead,
            })
        })
        .collect()
}

fn clamp_latitude(lat: f64) -> f64 {
    if lat.is_nan() {
        return 0.0;
    }
    lat.clamp(-90.0, 90.0)
}

/// Wrap into [-180, 180).
pub fn wrap_longitude(lng: f64) -> f64 {
    if !lng.is_finite() {
        return 0.0;
    }
    let wrapped = (lng + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360
    if wrapped >= 180.0 {
        -180.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(hours_ago: i32, lat: f64, lng: f64) -> Position {
        Position {
            lat,
            lng,
            altitude: Some(18000.0),
            hours_ago,
        }
    }

    fn track(positions: Vec<Position>) -> BalloonTrack {
        BalloonTrack {
            id: 7,
            color: "#FF6B6B".to_string(),
            current: positions[0],
            positions,
            future_positions: None,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn momentum_only_from_origin() {
        let track = track(vec![fix(0, 0.0, 0.0), fix(2, -2.0, -2.0)]);
        let future = predict(&track, None, &[5]);

        assert_eq!(future.len(), 1);
        assert!(close(future[0].lat, 3.0));
        assert!(close(future[0].lng, 3.0));
        assert_eq!(future[0].hours_ago, -5);
        assert_eq!(future[0].altitude, Some(18000.0));
    }

    #[test]
    fn wind_term_is_anchored_at_current_fix() {
        let track = track(vec![fix(0, 10.0, 20.0), fix(2, 8.0, 16.0)]);
        let wind = WindSample {
            lat: 10.0,
            lng: 20.0,
            speed: 10.0,
            direction: 0.0,
        };
        let future = predict(&track, Some(&wind), &[1]);

        let (wind_lat, wind_lng) = wind_displacement(10.0, 0.0, 1.0, 10.0);
        let expected_lat = 0.6 * 11.0 + 0.4 * (10.0 + wind_lat);
        let expected_lng = 0.6 * 22.0 + 0.4 * (20.0 + wind_lng);
        assert!(close(future[0].lat, expected_lat));
        assert!(close(future[0].lng, expected_lng));
    }

    #[test]
    fn horizons_keep_requested_order() {
        let track = track(vec![fix(0, 0.0, 0.0), fix(1, -1.0, 0.0)]);
        let future = predict(&track, None, &[10, 5, 1]);
        let hours: Vec<i32> = future.iter().map(|p| p.hours_ago).collect();
        assert_eq!(hours, vec![-10, -5, -1]);
        assert!(close(future[0].lat, 6.0));
        assert!(close(future[1].lat, 3.0));
    }

    #[test]
    fn longitude_wraps_across_antimeridian() {
        assert!(close(wrap_longitude(190.0), -170.0));
        assert!(close(wrap_longitude(-190.0), 170.0));
        assert!(close(wrap_longitude(180.0), -180.0));
        assert!(close(wrap_longitude(-180.0), -180.0));
        assert!(close(wrap_longitude(45.0), 45.0));

        // 170 + 0.6 * 10 * 5 = 200 => -160
        let track = track(vec![fix(0, 0.0, 170.0), fix(1, 0.0, 160.0)]);
        let future = predict(&track, None, &[5]);
        assert!(close(future[0].lng, -160.0));
    }

    #[test]
    fn latitude_is_clamped() {
        let track = track(vec![fix(0, 80.0, 0.0), fix(1, 70.0, 0.0)]);
        let future = predict(&track, None, &[10]);
        assert_eq!(future[0].lat, 90.0);

        let track = self::track(vec![fix(0, -80.0, 0.0), fix(1, -70.0, 0.0)]);
        let future = predict(&track, None, &[10]);
        assert_eq!(future[0].lat, -90.0);
    }

    #[test]
    fn unrepresentable_horizons_are_skipped() {
        let track = track(vec![fix(0, 0.0, 0.0), fix(1, -1.0, 0.0)]);
        let future = predict(&track, None, &[0, 3_000_000_000, 2_147_483_648, 4]);

        assert_eq!(future.len(), 1);
        assert_eq!(future[0].hours_ago, -4);
        assert!(predict(&track, None, &[u32::MAX]).is_empty());
    }

    #[test]
    fn single_fix_predicts_nothing() {
        let track = track(vec![fix(0, 0.0, 0.0)]);
        assert!(predict(&track, None, &[5, 10]).is_empty());
    }

    #[test]
    fn near_pole_with_wind_stays_finite() {
        let track = track(vec![fix(0, 89.99, 10.0), fix(1, 89.98, 10.0)]);
        let wind = WindSample {
            lat: 89.99,
            lng: 10.0,
            speed: 40.0,
            direction: 90.0,
        };
        for p in predict(&track, Some(&wind), &[5, 10]) {
            assert!(p.lat.is_finite() && p.lng.is_finite());
            assert!((-180.0..180.0).contains(&p.lng));
        }
    }
}
