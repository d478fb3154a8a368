//! Classification rule sets per endpoint family

use ats2_domain::constants::{DETAILS_SERVER_ERROR, DETAILS_TOKEN_ALREADY_UPDATED};
use ats2_domain::{ApiErrorKind, ClassificationRule};

/// Rules shared by token refresh, employee and monitoring endpoints
pub fn default_rules() -> Vec<ClassificationRule> {
    vec![
        ClassificationRule::new(403, ApiErrorKind::Unauthorized)
            .with_details(DETAILS_TOKEN_ALREADY_UPDATED),
        ClassificationRule::new(500, ApiErrorKind::Server),
    ]
}

/// Default rules plus 404 as an unknown employee
pub fn click_to_call_rules() -> Vec<ClassificationRule> {
    let mut rules = default_rules();
    rules.push(ClassificationRule::new(404, ApiErrorKind::NotFound));
    rules
}

/// Rules for the call recording endpoints; server errors must carry the
/// PBX detail text
pub fn recording_rules() -> Vec<ClassificationRule> {
    vec![
        ClassificationRule::new(403, ApiErrorKind::Unauthorized)
            .with_details(DETAILS_TOKEN_ALREADY_UPDATED),
        ClassificationRule::new(500, ApiErrorKind::Server).with_details(DETAILS_SERVER_ERROR),
    ]
}
