use crate::{
    db::DbPool,
    error::AppError,
    models::{participant::Participant, trip::Trip},
};

/// All reads and writes for trips and their participants go through here.
#[derive(Clone)]
pub struct TripStore {
    db: DbPool,
}

impl TripStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Inserts the trip together with its initial participants (owner plus
    /// invitees) in one transaction, so bad input never leaves partial rows.
    pub async fn create_trip(
        &self,
        trip: &Trip,
        participants: &[Participant],
    ) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;

        sqlx::query(
            "INSERT INTO trips (id, destination, starts_at, ends_at, is_confirmed) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&trip.id)
        .bind(&trip.destination)
        .bind(trip.starts_at)
        .bind(trip.ends_at)
        .bind(trip.is_confirmed)
        .execute(&mut *tx)
        .await?;

        for participant in participants {
            insert_participant(&mut tx, participant).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn find_trip(&self, trip_id: &str) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            "SELECT id, destination, starts_at, ends_at, is_confirmed FROM trips WHERE id = ?1",
        )
        .bind(trip_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(trip)
    }

    pub async fn mark_trip_confirmed(&self, trip_id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE trips SET is_confirmed = 1 WHERE id = ?1")
            .bind(trip_id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    pub async fn add_participant(&self, participant: &Participant) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;
        insert_participant(&mut tx, participant).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn participants_for_trip(
        &self,
        trip_id: &str,
    ) -> Result<Vec<Participant>, AppError> {
        let participants = sqlx::query_as::<_, Participant>(
            "SELECT id, trip_id, name, email, is_owner, is_confirmed \
             FROM participants WHERE trip_id = ?1 ORDER BY rowid",
        )
        .bind(trip_id)
        .fetch_all(&self.db)
        .await?;
        Ok(participants)
    }

    pub async fn non_owner_participants(
        &self,
        trip_id: &str,
    ) -> Result<Vec<Participant>, AppError> {
        let participants = sqlx::query_as::<_, Participant>(
            "SELECT id, trip_id, name, email, is_owner, is_confirmed \
             FROM participants WHERE trip_id = ?1 AND is_owner = 0 ORDER BY rowid",
        )
        .bind(trip_id)
        .fetch_all(&self.db)
        .await?;
        Ok(participants)
    }

    pub async fn find_participant(
        &self,
        participant_id: &str,
    ) -> Result<Option<Participant>, AppError> {
        let participant = sqlx::query_as::<_, Participant>(
            "SELECT id, trip_id, name, email, is_owner, is_confirmed \
             FROM participants WHERE id = ?1",
        )
        .bind(participant_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(participant)
    }

    pub async fn mark_participant_confirmed(&self, participant_id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE participants SET is_confirmed = 1 WHERE id = ?1")
            .bind(participant_id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

async fn insert_participant(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    participant: &Participant,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO participants (id, trip_id, name, email, is_owner, is_confirmed) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(&participant.id)
    .bind(&participant.trip_id)
    .bind(&participant.name)
    .bind(&participant.email)
    .bind(participant.is_owner)
    .bind(participant.is_confirmed)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
