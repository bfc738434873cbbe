pub mod config;
pub mod simulation;
pub mod control;
pub mod error;

pub use simulation::*;
pub use config::*;
pub use control::*;
pub use error::SimError;
