use anyhow::{Error, Result};
use reqwest::{
    Client, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    models::{
        error::NotifyError,
        fcm::{FcmMessage, MAX_TTL, NotificationPayload, Priority, SendResponse},
    },
};

/// Builds one FCM message and posts it to the legacy HTTP endpoint.
///
/// Setters mutate the held message and return `&mut Self` so calls chain.
/// None of them validate target combinations: `to`, `registration_ids` and
/// `condition` can all be set at once and are all sent.
pub struct FcmNotifier<D = serde_json::Value> {
    http_client: Client,
    api_key: String,
    service_url: String,
    message: FcmMessage<D>,
}

impl<D> FcmNotifier<D> {
    pub fn new(
        http_client: Client,
        api_key: impl Into<String>,
        service_url: impl Into<String>,
    ) -> Self {
        let service_url = service_url.into();
        info!(service_url = %service_url, "FCM notifier initialized");

        Self {
            http_client,
            api_key: api_key.into(),
            service_url,
            message: FcmMessage::default(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let http_client = config.http_client()?;
        Ok(Self::new(
            http_client,
            config.fcm_api_key.clone(),
            config.fcm_service_url.clone(),
        ))
    }

    pub fn message(&self) -> &FcmMessage<D> {
        &self.message
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Sets the single target, either a device token or `/topics/<name>`.
    pub fn set_target(&mut self, to: impl Into<String>) -> &mut Self {
        self.message.to = to.into();
        self
    }

    /// Replaces the device targets with an owned copy of `ids`.
    pub fn set_registration_ids<S: AsRef<str>>(&mut self, ids: &[S]) -> &mut Self {
        self.message.registration_ids = ids.iter().map(|id| id.as_ref().to_string()).collect();
        self
    }

    pub fn set_notification(&mut self, notification: NotificationPayload) -> &mut Self {
        self.message.notification = notification;
        self
    }

    pub fn set_title(&mut self, value: impl Into<String>) -> &mut Self {
        self.message.notification.title = value.into();
        self
    }

    pub fn set_body(&mut self, value: impl Into<String>) -> &mut Self {
        self.message.notification.body = value.into();
        self
    }

    pub fn set_icon(&mut self, value: impl Into<String>) -> &mut Self {
        self.message.notification.icon = value.into();
        self
    }

    pub fn set_sound(&mut self, value: impl Into<String>) -> &mut Self {
        self.message.notification.sound = value.into();
        self
    }

    pub fn set_badge(&mut self, value: impl Into<String>) -> &mut Self {
        self.message.notification.badge = value.into();
        self
    }

    pub fn set_tag(&mut self, value: impl Into<String>) -> &mut Self {
        self.message.notification.tag = value.into();
        self
    }

    pub fn set_color(&mut self, value: impl Into<String>) -> &mut Self {
        self.message.notification.color = value.into();
        self
    }

    pub fn set_click_action(&mut self, value: impl Into<String>) -> &mut Self {
        self.message.notification.click_action = value.into();
        self
    }

    pub fn set_body_loc_key(&mut self, value: impl Into<String>) -> &mut Self {
        self.message.notification.body_loc_key = value.into();
        self
    }

    pub fn set_body_loc_args(&mut self, value: impl Into<String>) -> &mut Self {
        self.message.notification.body_loc_args = value.into();
        self
    }

    pub fn set_title_loc_key(&mut self, value: impl Into<String>) -> &mut Self {
        self.message.notification.title_loc_key = value.into();
        self
    }

    pub fn set_title_loc_args(&mut self, value: impl Into<String>) -> &mut Self {
        self.message.notification.title_loc_args = value.into();
        self
    }

    /// Messages sharing a collapse key replace each other while the device
    /// is offline; only the latest is delivered when it reconnects.
    pub fn set_collapse_key(&mut self, value: impl Into<String>) -> &mut Self {
        self.message.collapse_key = value.into();
        self
    }

    /// Topic expression such as `'news' in topics && 'sports' in topics`.
    pub fn set_condition(&mut self, expression: impl Into<String>) -> &mut Self {
        self.message.condition = expression.into();
        self
    }

    /// Wakes an inactive iOS app on delivery.
    pub fn set_content_available(&mut self, value: bool) -> &mut Self {
        self.message.content_available = value;
        self
    }

    pub fn set_data(&mut self, value: D) -> &mut Self {
        self.message.data = Some(value);
        self
    }

    /// Asks the gateway to validate the request without delivering it.
    pub fn set_dry_run(&mut self, value: bool) -> &mut Self {
        self.message.dry_run = value;
        self
    }

    pub fn set_restricted_package_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.message.restricted_package_name = value.into();
        self
    }

    pub fn set_priority(&mut self, priority: Priority) -> &mut Self {
        self.message.priority = Some(priority);
        self
    }

    pub fn set_high_priority(&mut self) -> &mut Self {
        self.set_priority(Priority::High)
    }

    /// Seconds the gateway keeps the message for an offline device, capped
    /// at `MAX_TTL`. Negative values are stored as given.
    pub fn set_time_to_live(&mut self, seconds: i64) -> &mut Self {
        self.message.time_to_live = seconds.min(MAX_TTL);
        self
    }
}

impl<D: Serialize> FcmNotifier<D> {
    /// Posts the current message once and interprets the reply.
    ///
    /// Only a 200 body is decoded. Any other status comes back as
    /// `Ok(SendResponse { ok: false, .. })` carrying just the status code.
    /// The message is left untouched, so a second call resends it.
    pub async fn send(&self) -> Result<SendResponse, NotifyError> {
        let body = serde_json::to_vec(&self.message).map_err(NotifyError::Encode)?;

        debug!(
            to = %self.message.to,
            registration_ids = self.message.registration_ids.len(),
            condition = %self.message.condition,
            dry_run = self.message.dry_run,
            payload_bytes = body.len(),
            "Sending FCM message"
        );

        let response = self
            .http_client
            .post(&self.service_url)
            .header(AUTHORIZATION, format!("key={}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let status_code = status.as_u16();
        let bytes = response.bytes().await?;

        if status != StatusCode::OK {
            warn!(status_code, "FCM gateway rejected the request");
            return Ok(SendResponse {
                status_code,
                ..Default::default()
            });
        }

        let mut send_response: SendResponse =
            serde_json::from_slice(&bytes).map_err(|source| {
                warn!(status_code, error = %source, "Failed to parse FCM response");
                NotifyError::Decode {
                    status_code,
                    source,
                }
            })?;
        send_response.ok = true;
        send_response.status_code = status_code;

        if send_response.has_failures() {
            warn!(
                multicast_id = send_response.multicast_id,
                success = send_response.success,
                failure = send_response.failure,
                error = %send_response.error,
                "FCM gateway reported failed targets"
            );
        } else {
            info!(
                multicast_id = send_response.multicast_id,
                success = send_response.success,
                canonical_ids = send_response.canonical_ids,
                "FCM message accepted"
            );
        }

        Ok(send_response)
    }
}
