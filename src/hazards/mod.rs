mod error;
pub mod fires;
pub mod storms;

pub use error::{FireError, StormError};
pub use fires::{is_near_fire, FireClient, FireData};
pub use storms::{storm_at, StormClient, StormData};
