use sqlx::PgPool;

use super::{models::RoundRow, StoreError, StoreResult};
use crate::game::types::{MatchId, PlayerId, Round, RoundInput, RoundStatus};

const ROUND_COLUMNS: &str =
    "match_id, round_number, pokemon_player1, pokemon_player2, status, winner";

pub async fn get_match_rounds(db: &PgPool, match_id: MatchId) -> StoreResult<Vec<Round>> {
    let rows = sqlx::query_as::<_, RoundRow>(&format!(
        "SELECT {ROUND_COLUMNS} FROM rounds WHERE match_id = $1 ORDER BY round_number"
    ))
    .bind(match_id)
    .fetch_all(db)
    .await?;
    rows.into_iter().map(Round::try_from).collect()
}

pub async fn get_round(
    db: &PgPool,
    match_id: MatchId,
    round_number: u8,
) -> StoreResult<Option<Round>> {
    let row = sqlx::query_as::<_, RoundRow>(&format!(
        "SELECT {ROUND_COLUMNS} FROM rounds WHERE match_id = $1 AND round_number = $2"
    ))
    .bind(match_id)
    .bind(i16::from(round_number))
    .fetch_optional(db)
    .await?;
    row.map(Round::try_from).transpose()
}

/// Opens an empty STARTED round. Fails with `Duplicate` if it already exists.
pub async fn create_round(db: &PgPool, match_id: MatchId, round_number: u8) -> StoreResult<()> {
    let inserted = sqlx::query(
        r#"INSERT INTO rounds (match_id, round_number, status)
           VALUES ($1, $2, $3)
           ON CONFLICT (match_id, round_number) DO NOTHING"#,
    )
    .bind(match_id)
    .bind(i16::from(round_number))
    .bind(RoundStatus::Started.as_str())
    .execute(db)
    .await?
    .rows_affected();

    if inserted == 0 {
        return Err(StoreError::Duplicate(format!(
            "round {round_number} of match {match_id}"
        )));
    }
    Ok(())
}

/// Writes whichever picks the input carries.
pub async fn update_round(db: &PgPool, input: &RoundInput) -> StoreResult<()> {
    sqlx::query(
        r#"
        UPDATE rounds
           SET pokemon_player1 = COALESCE($3, pokemon_player1),
               pokemon_player2 = COALESCE($4, pokemon_player2)
         WHERE match_id = $1 AND round_number = $2
        "#,
    )
    .bind(input.match_id)
    .bind(i16::from(input.round_number))
    .bind(input.pokemon_player1.as_deref())
    .bind(input.pokemon_player2.as_deref())
    .execute(db)
    .await?;
    Ok(())
}

pub async fn update_round_status_and_winner(
    db: &PgPool,
    match_id: MatchId,
    round_number: u8,
    status: RoundStatus,
    winner: Option<PlayerId>,
) -> StoreResult<()> {
    sqlx::query(
        "UPDATE rounds SET status = $3, winner = $4 WHERE match_id = $1 AND round_number = $2",
    )
    .bind(match_id)
    .bind(i16::from(round_number))
    .bind(status.as_str())
    .bind(winner)
    .execute(db)
    .await?;
    Ok(())
}
