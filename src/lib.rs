pub mod clients;
pub mod config;
pub mod models;

pub use clients::fcm::FcmNotifier;
pub use models::{
    error::NotifyError,
    fcm::{FcmMessage, MAX_TTL, NotificationPayload, Priority, SendResponse},
};
