//! # ATS2 Client
//!
//! Facade over the Tele2 ATS2 PBX open API.
//!
//! This crate contains:
//! - [`Ats2Client`], which runs every endpoint through the auth coordinator
//! - Tracing initialisation and operation logging helpers
//! - The `ats2` command-line binary
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the token store, proxy store and HTTP client into one coordinator

pub mod client;
pub mod logging;

// Re-export for convenience
pub use ats2_domain::{
    Ats2Error, CallRecordInfo, CallRecordsQuery, ClientConfig, Employee, MonitoringCall,
    MonitoringCallPending, ProxyHttp, RecordSortKey, Result, SortOrder,
};
pub use ats2_infra::RecordingFile;
pub use client::Ats2Client;
