use crate::telemetry::Position;

/// History window considered "recent" for velocity estimation.
const RECENT_HOURS: i32 = 6;
const FALLBACK_SAMPLES: usize = 6;

/// Linear drift in degrees per hour.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    pub lat_deg_per_hour: f64,
    pub lng_deg_per_hour: f64,
}

/// Two-point velocity estimate between the newest and oldest recent fixes.
///
/// `positions` is expected in ascending `hours_ago` order starting at the
/// current fix. Fewer than two usable fixes gives a zero velocity.
pub fn estimate_velocity(positions: &[Position]) -> Velocity {
    let mut recent: Vec<&Position> = positions
        .iter()
        .filter(|p| p.hours_ago <= RECENT_HOURS)
        .collect();
    if recent.len() < 2 {
        recent = positions.iter().take(FALLBACK_SAMPLES).collect();
    }
    if recent.len() < 2 {
        return Velocity::default();
    }

    recent.sort_by_key(|p| p.hours_ago);
    let newest = recent[0];
    let oldest = recent[recent.len() - 1];

    let elapsed = oldest.hours_ago - newest.hours_ago;
    if elapsed <= 0 {
        return Velocity::default();
    }

    let hours = f64::from(elapsed);
    Velocity {
        lat_deg_per_hour: (newest.lat - oldest.lat) / hours,
        lng_deg_per_hour: (newest.lng - oldest.lng) / hours,
    }
}
