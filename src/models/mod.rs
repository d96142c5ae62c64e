pub mod error;
pub mod fcm;
