//! Error types used throughout the client
//!
//! The taxonomy is closed: every failure that leaves the client is one of the
//! [`Ats2Error`] variants. Three variants are raised on the client side
//! (`Client`, `LostTruthToken`, `Proxy`) and four come out of the response
//! classifier (`Api`, `ApiUnauthorized`, `ApiNotFound`, `ApiServer`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Target kind of a classification rule.
///
/// Each kind maps to exactly one API-side [`Ats2Error`] variant through
/// [`ApiErrorKind::into_error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Unclassified remote failure
    Generic,
    /// Access token is stale and must be refreshed
    Unauthorized,
    /// Requested entity does not exist (click-to-call employee)
    NotFound,
    /// Remote side failed with a 500-class error
    Server,
}

impl ApiErrorKind {
    /// Build the error a matching rule raises. Classified errors carry no
    /// message.
    pub fn into_error(self) -> Ats2Error {
        match self {
            Self::Generic => Ats2Error::Api(String::new()),
            Self::Unauthorized => Ats2Error::ApiUnauthorized,
            Self::NotFound => Ats2Error::ApiNotFound,
            Self::Server => Ats2Error::ApiServer,
        }
    }
}

/// Main error type for the ATS2 client
///
/// `Clone` and `PartialEq` are required: a single refresh outcome is handed
/// to every caller that joined the in-flight refresh.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum Ats2Error {
    /// Generic wrapper for any non-auth failure reaching the coordinator
    /// boundary. `cause` keeps the classified kind when an API error was
    /// wrapped.
    #[error("Client error: {message}")]
    Client { message: String, cause: Option<ApiErrorKind> },

    /// Every refresh and store-poll avenue is exhausted. Terminal: an operator
    /// has to supply a fresh refresh token out-of-band.
    #[error("Lost truth token: maybe all tokens are expired? ({0})")]
    LostTruthToken(String),

    /// Proxy configuration could not be loaded
    #[error("Proxy error: {0}")]
    Proxy(String),

    /// Unclassified remote failure
    #[error("API error: {0}")]
    Api(String),

    /// Remote rejected the access token
    #[error("API unauthorized: the token has already been updated")]
    ApiUnauthorized,

    /// Remote reported that the target entity does not exist
    #[error("API not found: employee does not exist")]
    ApiNotFound,

    /// Remote failed with a server-side error
    #[error("API server error")]
    ApiServer,
}

impl Ats2Error {
    /// Client error without a classified cause
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client { message: message.into(), cause: None }
    }

    /// Wrap any error as a generic client error.
    ///
    /// Errors already raised on the client side pass through unchanged so they
    /// are never wrapped twice.
    pub fn into_client(self) -> Self {
        if self.is_client_side() {
            return self;
        }
        let cause = self.api_kind();
        Self::Client { message: self.to_string(), cause }
    }

    /// `true` for the variants raised by the client itself rather than the
    /// response classifier.
    pub fn is_client_side(&self) -> bool {
        matches!(self, Self::Client { .. } | Self::LostTruthToken(_) | Self::Proxy(_))
    }

    /// `true` when the remote rejected the access token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::ApiUnauthorized)
    }

    /// `true` when retrying cannot help without operator action
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::LostTruthToken(_) | Self::Proxy(_))
    }

    /// Classified API kind, looking through a client wrapper.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api(_) => Some(ApiErrorKind::Generic),
            Self::ApiUnauthorized => Some(ApiErrorKind::Unauthorized),
            Self::ApiNotFound => Some(ApiErrorKind::NotFound),
            Self::ApiServer => Some(ApiErrorKind::Server),
            Self::Client { cause, .. } => *cause,
            Self::LostTruthToken(_) | Self::Proxy(_) => None,
        }
    }

    /// Stable snake_case label for log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Client { .. } => "client",
            Self::LostTruthToken(_) => "lost_truth_token",
            Self::Proxy(_) => "proxy",
            Self::Api(_) => "api",
            Self::ApiUnauthorized => "api_unauthorized",
            Self::ApiNotFound => "api_not_found",
            Self::ApiServer => "api_server",
        }
    }
}

/// Result type alias for ATS2 operations
pub type Result<T> = std::result::Result<T, Ats2Error>;
