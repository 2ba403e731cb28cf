pub mod mailer;
pub mod store;
