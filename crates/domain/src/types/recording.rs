//! Call recording listing types
//!
//! [`CallRecordsQuery`] carries the filters accepted by
//! `GET /call-records/info`; [`CallRecordsQuery::query_pairs`] renders them in
//! the exact form the endpoint expects so the HTTP layer only appends pairs.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_wire_name_conversions;
use crate::utils::serde::flexible_utc;

/// Kind of a recorded call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordCallType {
    SingleChannel,
    MultiChannel,
    UnknownCall,
    Internal,
    Himself,
    InternalQueue,
    CrmOutgoing,
    Voicemail,
    Conference,
    Callback,
    PickupCall,
    Fax,
    Outgoing,
    CrmCallback,
    #[serde(other)]
    Unknown,
}

/// Final status of a recorded call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallStatus {
    AnsweredCommon,
    AnsweredByOriginalClient,
    AnsweredByBusyForwardClient,
    AnsweredByNoAnswerForwardClient,
    NotAnsweredCommon,
    CancelledByCaller,
    DeniedDueToMaxSession,
    DeniedDueToIncomingCallsBlocked,
    DeniedDueToOutgoingCallsBlocked,
    DeniedDueToOnlyInternalCallsEnabled,
    DeniedDueToBlackListed,
    DeniedNotInWhiteList,
    DeniedDueToNotWorkTime,
    DeniedDueToUnknownNumber,
    DestinationBusy,
    CancelledByPickup,
    #[serde(other)]
    Unknown,
}

/// Call record from `GET /call-records/info`.
///
/// `record_file_uri` is never sent by the server; the client derives it from
/// `record_file_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecordInfo {
    #[serde(with = "flexible_utc")]
    pub date: DateTime<Utc>,
    pub call_type: RecordCallType,
    pub call_status: CallStatus,
    #[serde(default)]
    pub destination_number: String,
    #[serde(default)]
    pub caller_number: String,
    #[serde(default)]
    pub caller_name: String,
    #[serde(default)]
    pub callee_number: String,
    #[serde(default)]
    pub callee_name: String,
    #[serde(default)]
    pub call_duration: i64,
    #[serde(default)]
    pub conversation_duration: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_file_uri: Option<String>,
}

/// Fields the record listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordSortKey {
    Date,
    CallTimestamp,
    CallType,
    DestinationNumber,
    CallerNumber,
    CallerName,
    CalleeNumber,
    CalleeName,
    CallDuration,
    CallStatus,
    RecordFileName,
}

impl_wire_name_conversions!(RecordSortKey {
    Date => "date",
    CallTimestamp => "callTimestamp",
    CallType => "callType",
    DestinationNumber => "destinationNumber",
    CallerNumber => "callerNumber",
    CallerName => "callerName",
    CalleeNumber => "calleeNumber",
    CalleeName => "calleeName",
    CallDuration => "callDuration",
    CallStatus => "callStatus",
    RecordFileName => "recordFileName",
});

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl_wire_name_conversions!(SortOrder {
    Asc => "ASC",
    Desc => "DESC",
});

/// Sort key and direction, rendered as `<key>,<ASC|DESC>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSort {
    pub key: RecordSortKey,
    pub order: SortOrder,
}

impl RecordSort {
    pub const fn new(key: RecordSortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    pub fn as_param(&self) -> String {
        format!("{},{}", self.key, self.order)
    }
}

/// Filters for the call record listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallRecordsQuery {
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<RecordSort>,
    pub callee: Option<String>,
    pub caller: Option<String>,
    pub has_recorded: bool,
}

impl CallRecordsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    #[must_use]
    pub fn page(mut self, page: u32, size: u32) -> Self {
        self.page = Some(page);
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn sort(mut self, key: RecordSortKey, order: SortOrder) -> Self {
        self.sort = Some(RecordSort::new(key, order));
        self
    }

    #[must_use]
    pub fn callee(mut self, callee: impl Into<String>) -> Self {
        self.callee = Some(callee.into());
        self
    }

    #[must_use]
    pub fn caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    /// Only list calls that have a recording
    #[must_use]
    pub fn recorded_only(mut self) -> Self {
        self.has_recorded = true;
        self
    }

    /// Query pairs in the order the endpoint documents them.
    ///
    /// Empty strings, zero page/size and an unset recorded flag are left out.
    /// Dates are ISO-8601 UTC with millisecond precision.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(callee) = self.callee.as_deref().filter(|v| !v.is_empty()) {
            pairs.push(("callee", callee.to_string()));
        }
        if let Some(caller) = self.caller.as_deref().filter(|v| !v.is_empty()) {
            pairs.push(("caller", caller.to_string()));
        }
        if self.has_recorded {
            pairs.push(("is_recorded", "true".to_string()));
        }
        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size.filter(|s| *s > 0) {
            pairs.push(("size", size.to_string()));
        }
        if let Some(from) = self.date_from {
            pairs.push(("start", from.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        if let Some(to) = self.date_to {
            pairs.push(("end", to.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_param()));
        }

        pairs
    }
}
