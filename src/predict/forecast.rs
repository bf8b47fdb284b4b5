use std::future::Future;

use futures::future::join_all;

use crate::predict::predictor::predict;
use crate::telemetry::{BalloonTrack, Position};
use crate::weather::WindSample;

/// Supplies a wind observation for a location, or `None` when unavailable.
pub trait WindSource {
    fn wind_at(&self, lat: f64, lng: f64) -> impl Future<Output = Option<WindSample>> + Send;
}

/// Wind source that never has data; predictions fall back to momentum only.
pub struct NoWind;

impl WindSource for NoWind {
    async fn wind_at(&self, _lat: f64, _lng: f64) -> Option<WindSample> {
        None
    }
}

pub async fn forecast_track<W: WindSource + Sync>(
    track: &BalloonTrack,
    wind_source: &W,
    hours_ahead: &[u32],
) -> Vec<Position> {
    if track.positions.len() < 2 {
        return Vec::new();
    }
    let wind = wind_source
        .wind_at(track.current.lat, track.current.lng)
        .await
        .filter(WindSample::is_finite);
    predict(track, wind.as_ref(), hours_ahead)
}

/// Fill `future_positions` on every track, looking up winds concurrently.
pub async fn attach_forecasts<W: WindSource + Sync>(
    tracks: &mut [BalloonTrack],
    wind_source: &W,
    hours_ahead: &[u32],
) {
    let forecasts = join_all(
        tracks
            .iter()
            .map(|track| forecast_track(track, wind_source, hours_ahead)),
    )
    .await;

    for (track, future) in tracks.iter_mut().zip(forecasts) {
        track.future_positions = Some(future);
    }
}
