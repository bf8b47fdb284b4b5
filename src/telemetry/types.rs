use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single balloon fix. `hours_ago` is 0 for the current sample, positive
/// for history and negative for predicted positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub hours_ago: i32,
}

/// One balloon's history as seen in a single 24-hour snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BalloonTrack {
    /// Index into the raw hourly feed; only stable within one snapshot.
    pub id: usize,
    pub color: String,
    pub positions: Vec<Position>,
    pub current: Position,
    pub future_positions: Option<Vec<Position>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SelectedBalloons {
    pub balloons: Vec<BalloonTrack>,
    pub total_count: usize,
}

/// Balloon indices picked for display, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionResult {
    pub indices: Vec<usize>,
    pub total_count: usize,
}
