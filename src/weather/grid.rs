use rand::Rng;

use crate::weather::{WindGrid, WindSample};

const GRID_LAT_STEP: usize = 15;
const GRID_LNG_STEP: usize = 20;

/// Plausible wind at a point from the three-cell global circulation model
/// (trade winds, westerlies, polar easterlies) plus random variation.
pub fn simulated_wind<R: Rng>(lat: f64, lng: f64, rng: &mut R) -> WindSample {
    let abs_lat = lat.abs();
    let northern = lat >= 0.0;

    let (base_direction, base_speed) = if abs_lat < 30.0 {
        (if northern { 90.0 } else { 270.0 }, 8.0 + rng.gen_range(-3.0..5.0))
    } else if abs_lat < 60.0 {
        (if northern { 270.0 } else { 90.0 }, 12.0 + rng.gen_range(-4.0..8.0))
    } else {
        (90.0, 6.0 + rng.gen_range(-2.0..4.0))
    };

    let direction = (base_direction + rng.gen_range(-30.0..30.0_f64)).rem_euclid(360.0);
    let speed = (base_speed + rng.gen_range(-2.0..2.0_f64)).max(0.0);

    WindSample {
        lat,
        lng,
        speed: (speed * 10.0).round() / 10.0,
        direction: direction.round().rem_euclid(360.0),
    }
}

/// Simulated winds on a 15°×20° grid between 75°S and 75°N.
pub fn wind_grid<R: Rng>(rng: &mut R) -> WindGrid {
    let mut winds = Vec::new();
    for lat in (-75..=75).step_by(GRID_LAT_STEP) {
        for lng in (-180..180).step_by(GRID_LNG_STEP) {
            winds.push(simulated_wind(f64::from(lat), f64::from(lng), rng));
        }
    }

    WindGrid {
        winds,
        timestamp: chrono::Utc::now().timestamp(),
    }
}
