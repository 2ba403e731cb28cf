use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participant {
    pub id: String,
    pub trip_id: String,
    pub name: Option<String>,
    pub email: String,
    pub is_owner: bool,
    pub is_confirmed: bool,
}

impl Participant {
    /// The trip owner is confirmed from the start.
    pub fn owner(trip_id: &str, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            trip_id: trip_id.to_string(),
            name: Some(name.into()),
            email: email.into(),
            is_owner: true,
            is_confirmed: true,
        }
    }

    pub fn invitee(trip_id: &str, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            trip_id: trip_id.to_string(),
            name: None,
            email: email.into(),
            is_owner: false,
            is_confirmed: false,
        }
    }
}
