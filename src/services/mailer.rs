use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use crate::{config::AppConfig, error::AppError, models::trip::Trip};

/// One outbound transactional email, already rendered.
#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub to_name: Option<String>,
    pub to_email: String,
    pub subject: String,
    pub html_body: String,
}

/// Seam for the mail transport; tests swap in a recording implementation.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let from: Mailbox = config
            .mail_from
            .parse()
            .map_err(|err| AppError::Config(format!("invalid MAIL_FROM: {err}")))?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?.port(config.smtp_port);
        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), AppError> {
        let address = mail
            .to_email
            .parse()
            .map_err(|err| AppError::InvalidInput(format!("invalid email address: {err}")))?;
        let to = Mailbox::new(mail.to_name.clone(), address);

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(mail.html_body.clone())
            .map_err(|err| AppError::Other(err.into()))?;

        self.transport.send(message).await?;
        info!(to = %mail.to_email, subject = %mail.subject, "confirmation mail sent");
        Ok(())
    }
}

/// dayjs-style "LL" date, e.g. "July 25, 2024".
pub fn format_long_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Mail asking the owner to confirm the trip they just created.
pub fn trip_created_mail(
    trip: &Trip,
    owner_name: &str,
    owner_email: &str,
    confirmation_link: &str,
) -> OutgoingMail {
    let starts = format_long_date(&trip.starts_at);
    let ends = format_long_date(&trip.ends_at);
    OutgoingMail {
        to_name: Some(owner_name.to_string()),
        to_email: owner_email.to_string(),
        subject: format!("Confirm your trip to {} on {}.", trip.destination, starts),
        html_body: format!(
            r#"<div style="font-family: sans-serif; font-size: 16px; line-height: 1.6;">
  <p>You have requested the creation of a trip to <strong>{}</strong> on the dates of <strong>{}</strong> to <strong>{}</strong></p>
  <p></p>
  <p>To confirm your trip please click on the link below.</p>
  <p></p>
  <p>
    <a href="{}">Confirm trip</a>
  </p>
  <p></p>
  <p>If you didn't request a trip, please disregard this email.</p>
</div>"#,
            trip.destination, starts, ends, confirmation_link
        ),
    }
}

/// Mail asking an invited participant to confirm their presence.
pub fn participant_invite_mail(
    trip: &Trip,
    participant_email: &str,
    confirmation_link: &str,
) -> OutgoingMail {
    let starts = format_long_date(&trip.starts_at);
    let ends = format_long_date(&trip.ends_at);
    OutgoingMail {
        to_name: None,
        to_email: participant_email.to_string(),
        subject: format!(
            "Confirm your presence on the trip to {} on {}.",
            trip.destination, starts
        ),
        html_body: format!(
            r#"<div style="font-family: sans-serif; font-size: 16px; line-height: 1.6;">
  <p>You were invited to a trip to <strong>{}</strong> on the dates of <strong>{}</strong> to <strong>{}</strong></p>
  <p></p>
  <p>To confirm your presence on this trip please click on the link below.</p>
  <p></p>
  <p>
    <a href="{}">Confirm trip</a>
  </p>
  <p></p>
  <p>If you have no knowledge about this trip, please disregard this email.</p>
</div>"#,
            trip.destination, starts, ends, confirmation_link
        ),
    }
}
