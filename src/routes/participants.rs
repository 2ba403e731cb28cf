use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::get,
    Router,
};
use tracing::info;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/participants/:participant_id/confirm", get(confirm_participant))
}

pub async fn confirm_participant(
    State(state): State<AppState>,
    Path(participant_id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    let participant_id = participant_id.to_string();
    let participant = state
        .store
        .find_participant(&participant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Participant not found.".into()))?;

    if !participant.is_confirmed {
        state
            .store
            .mark_participant_confirmed(&participant.id)
            .await?;
        info!(participant_id = %participant.id, trip_id = %participant.trip_id, "participant confirmed");
    }

    Ok(Redirect::to(&state.config.trip_web_url(&participant.trip_id)))
}
