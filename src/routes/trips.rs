use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use lettre::Address;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{participant::Participant, trip::Trip},
    services::mailer::{participant_invite_mail, trip_created_mail},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trips", post(create_trip))
        .route("/trips/:trip_id/invites", post(create_invite))
        .route("/trips/:trip_id/confirm", get(confirm_trip))
}

#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub owner_name: String,
    pub owner_email: String,
    pub emails_to_invite: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateTripResponse {
    #[serde(rename = "tripId")]
    pub trip_id: String,
}

pub async fn create_trip(
    State(state): State<AppState>,
    Json(body): Json<CreateTripRequest>,
) -> Result<Json<CreateTripResponse>, AppError> {
    if body.destination.chars().count() < 4 {
        return Err(AppError::InvalidInput("Invalid trip destination.".into()));
    }
    if body.starts_at < Utc::now() {
        return Err(AppError::InvalidInput("Invalid trip start date.".into()));
    }
    if body.ends_at < body.starts_at {
        return Err(AppError::InvalidInput("Invalid trip end date.".into()));
    }
    validate_email(&body.owner_email)?;
    for email in &body.emails_to_invite {
        validate_email(email)?;
    }

    let trip = Trip::new(&body.destination, body.starts_at, body.ends_at);
    let mut participants = vec![Participant::owner(&trip.id, &body.owner_name, &body.owner_email)];
    participants.extend(
        body.emails_to_invite
            .iter()
            .map(|email| Participant::invitee(&trip.id, email)),
    );

    state.store.create_trip(&trip, &participants).await?;
    info!(trip_id = %trip.id, destination = %trip.destination, "trip created");

    let confirmation_link = state.config.trip_confirm_url(&trip.id);
    let mail = trip_created_mail(&trip, &body.owner_name, &body.owner_email, &confirmation_link);
    state.mailer.send(mail).await?;

    Ok(Json(CreateTripResponse { trip_id: trip.id }))
}

#[derive(Debug, Deserialize)]
pub struct CreateInviteRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct CreateInviteResponse {
    #[serde(rename = "participantId")]
    pub participant_id: String,
}

pub async fn create_invite(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
    Json(body): Json<CreateInviteRequest>,
) -> Result<Json<CreateInviteResponse>, AppError> {
    validate_email(&body.email)?;

    let trip_id = trip_id.to_string();
    let trip = state
        .store
        .find_trip(&trip_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Trip not found.".into()))?;

    let participant = Participant::invitee(&trip.id, &body.email);
    state.store.add_participant(&participant).await?;

    let confirmation_link = state.config.participant_confirm_url(&participant.id);
    let mail = participant_invite_mail(&trip, &participant.email, &confirmation_link);
    state.mailer.send(mail).await?;

    Ok(Json(CreateInviteResponse {
        participant_id: participant.id,
    }))
}

pub async fn confirm_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    let trip_id = trip_id.to_string();
    let trip = state
        .store
        .find_trip(&trip_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Trip not found.".into()))?;

    let web_url = state.config.trip_web_url(&trip.id);
    if trip.is_confirmed {
        // Already done; nothing to flip, nobody to mail again.
        return Ok(Redirect::to(&web_url));
    }

    state.store.mark_trip_confirmed(&trip.id).await?;

    // Fan-out: every non-owner participant gets their own link, all sends in
    // flight at once. The flag stays set even if a send fails.
    let participants = state.store.non_owner_participants(&trip.id).await?;
    let sends = participants.iter().map(|participant| {
        let link = state.config.participant_confirm_url(&participant.id);
        let mail = participant_invite_mail(&trip, &participant.email, &link);
        state.mailer.send(mail)
    });
    try_join_all(sends).await?;
    info!(trip_id = %trip.id, notified = participants.len(), "trip confirmed");

    Ok(Redirect::to(&web_url))
}

fn validate_email(email: &str) -> Result<(), AppError> {
    email
        .parse::<Address>()
        .map(|_| ())
        .map_err(|_| AppError::InvalidInput(format!("Invalid email address: {email}")))
}
