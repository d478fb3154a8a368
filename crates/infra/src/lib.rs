//! # ATS2 Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The PBX open API client (reqwest) and its classification rules
//! - Token stores (file, memory) and the static proxy store
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements traits defined in `ats2-core`
//! - Depends on `ats2-domain` and `ats2-core`
//! - Contains all "impure" code (network and file I/O)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod stores;

// Re-export commonly used items
pub use api::{ApiClient, RecordingFile};
pub use errors::InfraError;
pub use http::HttpClient;
pub use stores::{FileTokenStore, MemoryTokenStore, StaticProxyStore};
