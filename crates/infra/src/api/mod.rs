//! PBX open API adapter
//!
//! Endpoint wrappers, their classification rule sets and the streamed
//! recording download.

pub mod client;
pub mod recording;
pub mod rules;

pub use client::ApiClient;
pub use recording::RecordingFile;
