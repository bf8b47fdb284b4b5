mod error;
mod resolver;

pub use error::LocationError;
pub use resolver::{LocationRequest, LocationResolver, LocationResponse};
