use std::time::Duration;

use ats2_domain::Ats2Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Set `json` for
/// one JSON object per event. Calling this twice is harmless; the second
/// subscriber is ignored.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    let result = if json { builder.json().try_init() } else { builder.try_init() };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Log the outcome of a facade operation with structured fields.
///
/// `operation` should be a stable identifier such as `"employees"`.
#[inline]
pub fn log_operation<T>(operation: &str, elapsed: Duration, result: &Result<T, Ats2Error>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match result {
        Ok(_) => info!(operation, duration_ms, "operation_success"),
        Err(err) => warn!(
            operation,
            duration_ms,
            error_type = error_label(err),
            error = %err,
            "operation_failure"
        ),
    }
}

/// Stable label for an error, suitable for log fields and exit messages.
#[inline]
pub fn error_label(error: &Ats2Error) -> &'static str {
    error.label()
}

#[cfg(test)]
mod tests {
    use ats2_domain::ApiErrorKind;

    use super::*;

    #[test]
    fn wrapped_errors_keep_client_label() {
        let wrapped = Ats2Error::ApiNotFound.into_client();
        assert_eq!(error_label(&wrapped), "client");
        assert_eq!(wrapped.api_kind(), Some(ApiErrorKind::NotFound));
        assert_eq!(error_label(&Ats2Error::Proxy("x".into())), "proxy");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_tracing(false);
        init_tracing(true);
    }

    #[test]
    fn log_operation_accepts_both_outcomes() {
        log_operation("employees", Duration::from_millis(5), &Ok::<_, Ats2Error>(()));
        log_operation::<()>("employees", Duration::from_millis(5), &Err(Ats2Error::ApiServer));
    }
}
