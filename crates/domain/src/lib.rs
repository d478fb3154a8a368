//! # ATS2 Domain
//!
//! Plain data shared by every layer of the ATS2 client.
//!
//! This crate contains:
//! - The closed error taxonomy and the `Result` alias
//! - Token, proxy and PBX resource types
//! - Classification rule records
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other ATS2 crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

pub use config::*;
pub use errors::*;
pub use types::*;
