mod error;
pub mod fetch;
pub mod geo;
mod parsing;
mod selection;
pub mod track;
mod types;

pub use error::TelemetryError;
pub use fetch::WindborneClient;
pub use types::{BalloonTrack, Position, SelectedBalloons, SelectionResult};
