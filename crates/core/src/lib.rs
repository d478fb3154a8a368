//! # ATS2 Core
//!
//! Pure client logic - no HTTP or filesystem code.
//!
//! This crate contains:
//! - Token store, proxy store and token refresher ports (traits)
//! - The error classifier that turns failed remote calls into typed errors
//! - The auth coordinator: cached access token, single-flight refresh and
//!   unauthorized-triggered re-authentication
//!
//! ## Architecture Principles
//! - Only depends on `ats2-domain`
//! - All external collaborators via traits

pub mod auth;
pub mod classification;

pub use auth::ports::{ProxyStore, TokenRefresher, TokenStore};
pub use auth::AuthCoordinator;
pub use classification::{classify, classify_failure};
