//! Error classifier
//!
//! Maps a failed remote call plus an ordered rule list to one of the typed
//! [`Ats2Error`] variants. The classifier knows nothing about endpoints: each
//! endpoint passes the rules it wants, usually a shared default list with
//! call-specific rules in front.

use std::future::Future;

use ats2_domain::{Ats2Error, ClassificationRule, RemoteFailure, Result};
use tracing::debug;

/// Await `call` and classify its failure, if any.
pub async fn classify<T, Fut>(call: Fut, rules: &[ClassificationRule]) -> Result<T>
where
    Fut: Future<Output = std::result::Result<T, RemoteFailure>>,
{
    call.await.map_err(|failure| classify_failure(failure, rules))
}

/// Turn one failure into a typed error.
///
/// Typed errors pass through unchanged. Failures without a response become a
/// generic API error. Responses are matched against `rules` in order and the
/// first match wins; no match also yields a generic API error.
pub fn classify_failure(failure: RemoteFailure, rules: &[ClassificationRule]) -> Ats2Error {
    match failure {
        RemoteFailure::Typed(err) => err,
        RemoteFailure::Transport { message } => {
            debug!(%message, "Remote call failed without a response");
            Ats2Error::Api(message)
        }
        RemoteFailure::Response { status, body, message } => {
            match rules.iter().find(|rule| rule.matches(status, body.as_ref())) {
                Some(rule) => {
                    debug!(status, kind = ?rule.kind, "Classified remote failure");
                    rule.kind.into_error()
                }
                None => {
                    debug!(status, "No classification rule matched");
                    Ats2Error::Api(message)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ats2_domain::{ApiErrorKind, ErrorBody};

    use super::*;

    fn detail_then_status_rules() -> Vec<ClassificationRule> {
        vec![
            ClassificationRule::new(403, ApiErrorKind::Unauthorized).with_details("already updated"),
            ClassificationRule::new(403, ApiErrorKind::Generic),
        ]
    }

    fn forbidden(details: &str) -> RemoteFailure {
        RemoteFailure::response(
            403,
            Some(ErrorBody { message: Some("Forbidden".into()), details: Some(details.into()) }),
        )
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let result = classify(async { Ok::<_, RemoteFailure>(7) }, &detail_then_status_rules()).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_exact_detail_matches_first_rule() {
        let result: Result<()> =
            classify(async { Err(forbidden("already updated")) }, &detail_then_status_rules())
                .await;
        assert_eq!(result, Err(Ats2Error::ApiUnauthorized));
    }

    #[tokio::test]
    async fn test_different_detail_falls_through_to_generic() {
        let result: Result<()> =
            classify(async { Err(forbidden("already updated?")) }, &detail_then_status_rules())
                .await;
        assert!(matches!(result, Err(Ats2Error::Api(_))));
    }

    #[test]
    fn test_unmatched_status_keeps_original_message() {
        let err = classify_failure(RemoteFailure::response(418, None), &detail_then_status_rules());
        assert_eq!(err, Ats2Error::Api("Request failed with status code 418".into()));
    }

    #[test]
    fn test_transport_failure_is_generic_api_error() {
        let err = classify_failure(
            RemoteFailure::transport("error sending request: connection refused"),
            &detail_then_status_rules(),
        );
        assert_eq!(err, Ats2Error::Api("error sending request: connection refused".into()));
    }

    #[test]
    fn test_typed_errors_are_not_reclassified() {
        let rules = detail_then_status_rules();
        for err in [
            Ats2Error::ApiNotFound,
            Ats2Error::Proxy("no proxy file".into()),
            Ats2Error::LostTruthToken("gone".into()),
        ] {
            let once = classify_failure(RemoteFailure::from(err.clone()), &rules);
            let twice = classify_failure(RemoteFailure::from(once.clone()), &rules);
            assert_eq!(once, err);
            assert_eq!(twice, err);
        }
    }

    #[test]
    fn test_rule_order_decides_between_overlapping_rules() {
        let rules = vec![
            ClassificationRule::new(500, ApiErrorKind::Server),
            ClassificationRule::new(500, ApiErrorKind::Unauthorized).with_details("x"),
        ];
        let failure = RemoteFailure::response(
            500,
            Some(ErrorBody { message: None, details: Some("x".into()) }),
        );
        assert_eq!(classify_failure(failure, &rules), Ats2Error::ApiServer);
    }
}
