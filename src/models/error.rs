use thiserror::Error;

/// Failures surfaced by `FcmNotifier::send`.
///
/// A gateway rejection (non-200 status, or per-target failures on a 200) is
/// not an error; it is reported through `SendResponse`.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Failed to encode FCM message: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("FCM send request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse FCM response (status {status_code}): {source}")]
    Decode {
        status_code: u16,
        #[source]
        source: serde_json::Error,
    },
}
