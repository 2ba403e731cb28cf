use std::{env, net::SocketAddr};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    /// Front-end base used for browser redirects after confirmations.
    pub web_base_url: String,
    /// API base embedded in the confirmation links inside emails.
    pub api_base_url: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub mail_from: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://planner.db".to_string());
        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3333".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let web_base_url = base_url("WEB_BASE_URL", "http://localhost:3000");
        let api_base_url = base_url("API_BASE_URL", "http://localhost:3333");

        let smtp_host = env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
        let smtp_port: u16 = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid SMTP_PORT: {err}")))?;
        let smtp_username = env::var("SMTP_USERNAME").ok();
        let smtp_password = env::var("SMTP_PASSWORD").ok();

        let mail_from =
            env::var("MAIL_FROM").unwrap_or_else(|_| "Team plann.er <hello@plann.er>".to_string());

        Ok(Self {
            database_url,
            listen_addr,
            web_base_url,
            api_base_url,
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            mail_from,
        })
    }

    /// Link mailed to the trip owner right after creation.
    pub fn trip_confirm_url(&self, trip_id: &str) -> String {
        format!("{}/trips/{}/confirm", self.api_base_url, trip_id)
    }

    /// Link mailed to a participant; every participant gets their own.
    pub fn participant_confirm_url(&self, participant_id: &str) -> String {
        format!("{}/participants/{}/confirm", self.api_base_url, participant_id)
    }

    /// Front-end page the confirmation endpoints redirect to.
    pub fn trip_web_url(&self, trip_id: &str) -> String {
        format!("{}/trips/{}", self.web_base_url, trip_id)
    }
}

fn base_url(var: &str, default: &str) -> String {
    let value = env::var(var).unwrap_or_else(|_| default.to_string());
    value.trim_end_matches('/').to_string()
}
