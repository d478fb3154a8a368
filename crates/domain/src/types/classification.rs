//! Classification records
//!
//! A failed remote call is described by a [`RemoteFailure`]; an ordered list of
//! [`ClassificationRule`]s decides which typed error it becomes. Rules are
//! plain data so each endpoint can append its own on top of a shared default
//! list. Ordering is the caller's contract: put status + detail rules before
//! broader rules sharing the same status.

use serde::{Deserialize, Serialize};

use crate::errors::{ApiErrorKind, Ats2Error};

/// Structured fields of a failed response body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub details: Option<String>,
}

impl ErrorBody {
    /// Parse a response body leniently; anything that is not a JSON object
    /// yields `None`.
    pub fn parse(raw: &[u8]) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_slice(raw).ok()?;
        if !value.is_object() {
            return None;
        }
        Some(Self {
            message: value.get("message").and_then(|v| v.as_str()).map(str::to_string),
            details: value.get("details").and_then(|v| v.as_str()).map(str::to_string),
        })
    }
}

/// A failed remote call before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteFailure {
    /// Already one of the client's typed errors
    Typed(Ats2Error),
    /// No response was received (connection, TLS, timeout, decode)
    Transport { message: String },
    /// The server answered with a non-success status
    Response { status: u16, body: Option<ErrorBody>, message: String },
}

impl RemoteFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport { message: message.into() }
    }

    pub fn response(status: u16, body: Option<ErrorBody>) -> Self {
        Self::Response { status, body, message: format!("Request failed with status code {status}") }
    }
}

impl From<Ats2Error> for RemoteFailure {
    fn from(err: Ats2Error) -> Self {
        Self::Typed(err)
    }
}

/// Declarative mapping from a response shape to an error kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub status: u16,
    /// Exact `message` the body must carry, if set
    pub message: Option<String>,
    /// Exact `details` the body must carry, if set
    pub details: Option<String>,
    pub kind: ApiErrorKind,
}

impl ClassificationRule {
    pub const fn new(status: u16, kind: ApiErrorKind) -> Self {
        Self { status, message: None, details: None, kind }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Exact match on status and every constraint the rule sets.
    pub fn matches(&self, status: u16, body: Option<&ErrorBody>) -> bool {
        if self.status != status {
            return false;
        }
        if let Some(expected) = &self.message {
            if body.and_then(|b| b.message.as_ref()) != Some(expected) {
                return false;
            }
        }
        if let Some(expected) = &self.details {
            if body.and_then(|b| b.details.as_ref()) != Some(expected) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_parse() {
        let body = ErrorBody::parse(br#"{"message":"Forbidden","details":"nope","code":3}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Forbidden"));
        assert_eq!(body.details.as_deref(), Some("nope"));

        assert!(ErrorBody::parse(b"<html>bad gateway</html>").is_none());
        assert!(ErrorBody::parse(b"[1,2]").is_none());
        assert!(ErrorBody::parse(b"").is_none());
    }

    #[test]
    fn test_status_only_rule() {
        let rule = ClassificationRule::new(500, ApiErrorKind::Server);
        assert!(rule.matches(500, None));
        assert!(!rule.matches(502, None));
    }

    #[test]
    fn test_detail_rule_is_exact() {
        let rule = ClassificationRule::new(403, ApiErrorKind::Unauthorized).with_details("already updated");
        let exact = ErrorBody { details: Some("already updated".into()), ..Default::default() };
        let other = ErrorBody { details: Some("already updated!".into()), ..Default::default() };

        assert!(rule.matches(403, Some(&exact)));
        assert!(!rule.matches(403, Some(&other)));
        assert!(!rule.matches(403, None));
    }

    #[test]
    fn test_message_rule() {
        let rule = ClassificationRule::new(404, ApiErrorKind::NotFound).with_message("Employee not found");
        let body = ErrorBody { message: Some("Employee not found".into()), details: None };
        assert!(rule.matches(404, Some(&body)));
        assert!(!rule.matches(404, Some(&ErrorBody::default())));
    }
}
