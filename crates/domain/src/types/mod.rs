//! Domain types and models
//!
//! Token and proxy records consumed by the auth coordinator, resource types
//! returned by the PBX open API, and the classification records used to turn
//! failed calls into typed errors.

pub mod auth;
pub mod classification;
pub mod employee;
pub mod monitoring;
pub mod proxy;
pub mod recording;

pub use auth::TokenPair;
pub use classification::{ClassificationRule, ErrorBody, RemoteFailure};
pub use employee::Employee;
pub use monitoring::{MonitoringCall, MonitoringCallPending, MonitoringCallType};
pub use proxy::ProxyHttp;
pub use recording::{
    CallRecordInfo, CallRecordsQuery, CallStatus, RecordCallType, RecordSort, RecordSortKey,
    SortOrder,
};
