use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Longest retention the gateway accepts, in seconds (4 weeks).
pub const MAX_TTL: i64 = 2_419_200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    High,
}

/// Body of the POST to the legacy FCM HTTP endpoint.
///
/// Every field holding its empty value is left out of the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcmMessage<D = serde_json::Value> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<D>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub to: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registration_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub collapse_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(default, skip_serializing_if = "NotificationPayload::is_empty")]
    pub notification: NotificationPayload,

    #[serde(default, skip_serializing_if = "is_false")]
    pub content_available: bool,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub time_to_live: i64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub restricted_package_name: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub dry_run: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub condition: String,
}

impl<D> Default for FcmMessage<D> {
    fn default() -> Self {
        Self {
            data: None,
            to: String::new(),
            registration_ids: Vec::new(),
            collapse_key: String::new(),
            priority: None,
            notification: NotificationPayload::default(),
            content_available: false,
            time_to_live: 0,
            restricted_package_name: String::new(),
            dry_run: false,
            condition: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sound: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub badge: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub click_action: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body_loc_key: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body_loc_args: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title_loc_key: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title_loc_args: String,
}

impl NotificationPayload {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Outcome of a single send.
///
/// `ok` and `status_code` are filled in locally; the remaining fields come
/// from the gateway body and are only decoded on a 200.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SendResponse {
    #[serde(skip)]
    pub ok: bool,

    #[serde(skip)]
    pub status_code: u16,

    #[serde(default)]
    pub multicast_id: i64,

    #[serde(default)]
    pub success: i64,

    #[serde(default)]
    pub failure: i64,

    #[serde(default)]
    pub canonical_ids: i64,

    #[serde(default)]
    pub results: Vec<HashMap<String, String>>,

    #[serde(default)]
    pub message_id: i64,

    #[serde(default)]
    pub error: String,
}

impl SendResponse {
    /// True when the gateway accepted the request but rejected some targets.
    pub fn has_failures(&self) -> bool {
        self.failure > 0 || !self.error.is_empty()
    }

    pub fn failed_results(&self) -> impl Iterator<Item = &HashMap<String, String>> {
        self.results.iter().filter(|r| r.contains_key("error"))
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}
