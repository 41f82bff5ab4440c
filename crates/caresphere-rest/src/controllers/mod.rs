//! REST API controllers.

pub mod bible_controller;
pub mod health_controller;
pub mod message_controller;
pub mod notification_controller;
pub mod sender_controller;
pub mod votd_controller;

pub use health_controller::*;
