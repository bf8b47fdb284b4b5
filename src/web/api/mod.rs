pub mod balloons;
pub mod error;
pub mod hazards;
pub mod location;
pub mod meta;
pub mod weather;
