//! Conversions from external infrastructure errors into domain errors.
//!
//! Local failures (filesystem, parsing) become [`Ats2Error::Client`]. HTTP
//! failures become a [`RemoteFailure`] so the classifier decides their kind.

use ats2_domain::{Ats2Error, RemoteFailure};
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub Ats2Error);

impl From<InfraError> for Ats2Error {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<Ats2Error> for InfraError {
    fn from(value: Ats2Error) -> Self {
        Self(value)
    }
}

/* -------------------------------------------------------------------------- */
/* Local I/O and parsing → Ats2Error */
/* -------------------------------------------------------------------------- */

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        Self(Ats2Error::client(format!("I/O error: {value}")))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        Self(Ats2Error::client(format!("Invalid JSON: {value}")))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        Self(Ats2Error::client(format!("Invalid TOML: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → RemoteFailure */
/* -------------------------------------------------------------------------- */

/// Conversion of transport errors into unclassified remote failures
pub trait IntoRemoteFailure {
    fn into_remote_failure(self) -> RemoteFailure;
}

impl IntoRemoteFailure for HttpError {
    fn into_remote_failure(self) -> RemoteFailure {
        if self.is_timeout() {
            return RemoteFailure::transport("HTTP request timed out");
        }

        if self.is_connect() {
            return RemoteFailure::transport(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            return RemoteFailure::response(status.as_u16(), None);
        }

        if self.is_decode() {
            return RemoteFailure::transport(format!("Failed to decode response: {self}"));
        }

        RemoteFailure::transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(Ats2Error::client(format!("HTTP client error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
