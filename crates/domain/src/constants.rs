//! Client constants
//!
//! Centralized location for the wire-level constants shared by every layer.

// Remote service
pub const DEFAULT_API_HOST: &str = "https://ats2.tele2.ru/crm/openapi";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("ats2-client/", env!("CARGO_PKG_VERSION"));

// Refresh strategy: store polls after a failed remote refresh
pub const DEFAULT_STRATEGY_ATTEMPTS_MS: [u64; 3] = [1000, 3000, 5000];

// File-backed token store
pub const DEFAULT_TOKEN_FILENAME: &str = ".tele2ats2.token.json";

// Classification details reported by the remote service
pub const DETAILS_TOKEN_ALREADY_UPDATED: &str = "The token has already been updated";
pub const DETAILS_SERVER_ERROR: &str = "Tele2 Server Error";

// Recording downloads
pub const RECORDING_CONTENT_TYPE: &str = "audio/mpeg";
