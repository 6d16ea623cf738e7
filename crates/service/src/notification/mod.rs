//! Outgoing notifications about the company registry.

pub mod mailer;
pub mod service;

pub use mailer::{MailError, MailTransport, OutgoingMail};
pub use service::NotificationService;
