use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{GetuiError, Result};
use crate::message::MessageData;
use crate::target::AliasBinding;

/// Success marker in every Getui response
pub const RESULT_OK: &str = "ok";

/// Successful Getui response
///
/// `result` is always `ok` here; everything else the provider returned is
/// kept in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub result: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ApiResponse {
    /// Check the `result` marker and split the body
    pub fn from_value(value: Value) -> Result<Self> {
        match value.get("result") {
            Some(Value::String(result)) if result == RESULT_OK => {}
            _ => return Err(GetuiError::provider(value)),
        }
        serde_json::from_value(value).map_err(|e| GetuiError::Decode(e.to_string()))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn taskid(&self) -> Option<&str> {
        self.get_str("taskid")
    }
}

/// Auth Sign Request
#[derive(Debug, Serialize)]
pub struct SignRequest<'a> {
    pub sign: String,
    pub timestamp: i64,
    pub appkey: &'a str,
}

/// Auth Sign Response
#[derive(Debug, Clone, Deserialize)]
pub struct SignResponse {
    pub auth_token: String,
    pub expire_time: Option<Value>,
}

/// Body shared by single, app, tag and save-list pushes
///
/// The template object is keyed by `msgtype`, so it is inserted into the
/// serialized body rather than declared here; `push_info` likewise.
#[derive(Debug, Serialize)]
pub struct PushBody<'a> {
    pub message: MessageData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_name: Option<&'a str>,
}

/// Push Single Batch Request
#[derive(Debug, Serialize)]
pub struct SingleBatchBody {
    pub msg_list: Vec<Value>,
    pub need_detail: bool,
}

/// Push List Request
#[derive(Debug, Serialize)]
pub struct PushListBody<'a> {
    pub taskid: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<&'a [String]>,
    pub need_detail: bool,
}

#[derive(Debug, Serialize)]
pub struct BindAliasBody<'a> {
    pub alias_list: &'a [AliasBinding],
}

#[derive(Debug, Serialize)]
pub struct UnbindAliasBody<'a> {
    pub cid: &'a str,
    pub alias: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UnbindAliasAllBody<'a> {
    pub alias: &'a str,
    pub requestid: String,
}

#[derive(Debug, Serialize)]
pub struct SetTagsBody<'a> {
    pub cid: &'a str,
    pub tag_list: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct CidListBody<'a> {
    pub cid: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct PushResultBody<'a> {
    #[serde(rename = "taskIdList")]
    pub task_id_list: &'a [String],
}

/// Badge Request
///
/// `badge` accepts the same arithmetic as `autoBadge` (`"+1"`, `"-1"`, `"3"`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct BadgeRequest {
    pub badge: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid_list: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devicetoken_list: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct UserCountBody<'a> {
    pub condition: &'a [crate::condition::Condition],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_response_keeps_fields() {
        let response =
            ApiResponse::from_value(json!({ "result": "ok", "taskid": "T1", "status": "successed_online" }))
                .unwrap();
        assert_eq!(response.result, "ok");
        assert_eq!(response.taskid(), Some("T1"));
        assert_eq!(response.get_str("status"), Some("successed_online"));
        assert!(response.get("result").is_none());
    }

    #[test]
    fn test_failed_response_is_provider_error() {
        let err = ApiResponse::from_value(json!({ "result": "fail", "code": 123 })).unwrap_err();
        match err {
            GetuiError::Provider { result, detail } => {
                assert_eq!(result, "fail");
                assert_eq!(detail["code"], 123);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_result_is_provider_error() {
        let err = ApiResponse::from_value(json!({ "taskid": "T1" })).unwrap_err();
        assert!(matches!(err, GetuiError::Provider { .. }));
    }

    #[test]
    fn test_badge_request_serialization() {
        let request = BadgeRequest {
            badge: "+1".to_string(),
            cid_list: Some(vec!["abc".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "badge": "+1", "cid_list": ["abc"] })
        );
    }
}
