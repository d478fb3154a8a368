//! Token lifecycle

pub mod coordinator;
pub mod ports;

pub use coordinator::AuthCoordinator;
pub use ports::*;
