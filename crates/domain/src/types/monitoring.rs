//! Live call monitoring types

use serde::{Deserialize, Serialize};

/// Kind of an active call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonitoringCallType {
    MultiChannel,
    Internal,
    SingleChannel,
    Conference,
    #[serde(other)]
    Unknown,
}

/// Active call from `GET /monitoring/calls`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringCall {
    pub call_type: MonitoringCallType,
    #[serde(default)]
    pub caller_number_short: String,
    #[serde(default)]
    pub caller_number_full: String,
    #[serde(default)]
    pub called_number_short: String,
    #[serde(default)]
    pub called_number_full: String,
}

/// Queue snapshot from `GET /monitoring/calls/pending`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonitoringCallPending {
    pub queue_name: String,
    pub calls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_type_wire_names() {
        let call: MonitoringCall = serde_json::from_str(
            r#"{"callType":"SINGLE_CHANNEL","callerNumberShort":"101","callerNumberFull":"79000000101",
                "calledNumberShort":"","calledNumberFull":"79111111111"}"#,
        )
        .unwrap();
        assert_eq!(call.call_type, MonitoringCallType::SingleChannel);
        assert_eq!(call.called_number_full, "79111111111");
    }

    #[test]
    fn test_unknown_call_type_is_tolerated() {
        let call: MonitoringCall = serde_json::from_str(r#"{"callType":"HOLOGRAM"}"#).unwrap();
        assert_eq!(call.call_type, MonitoringCallType::Unknown);
    }

    #[test]
    fn test_pending_queue() {
        let pending: MonitoringCallPending =
            serde_json::from_str(r#"{"queueName":"support","calls":["79001","79002"]}"#).unwrap();
        assert_eq!(pending.queue_name, "support");
        assert_eq!(pending.calls.len(), 2);
    }
}
