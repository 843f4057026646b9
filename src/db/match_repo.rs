use sqlx::PgPool;

use super::{models::MatchRow, StoreResult};
use crate::game::types::{Match, MatchId, MatchStatus, MatchUpdate, PlayerId};

const MATCH_COLUMNS: &str = "id, id_player1, id_player2, pokemons_player1, pokemons_player2, \
                             status, winner, created_at";

/// Inserts a match in CREATED state with only player 1; returns the new id.
pub async fn add_match(db: &PgPool, player1: PlayerId) -> StoreResult<MatchId> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO matches (id_player1, status) VALUES ($1, $2) RETURNING id",
    )
    .bind(player1)
    .bind(MatchStatus::Created.as_str())
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub async fn get_match(db: &PgPool, id: MatchId) -> StoreResult<Option<Match>> {
    let row = sqlx::query_as::<_, MatchRow>(&format!(
        "SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    row.map(Match::try_from).transpose()
}

pub async fn get_matches(db: &PgPool) -> StoreResult<Vec<Match>> {
    let rows = sqlx::query_as::<_, MatchRow>(&format!(
        "SELECT {MATCH_COLUMNS} FROM matches ORDER BY id"
    ))
    .fetch_all(db)
    .await?;
    rows.into_iter().map(Match::try_from).collect()
}

/// Applies the supplied fields only; `None` keeps the stored value.
pub async fn update_match(db: &PgPool, id: MatchId, update: &MatchUpdate) -> StoreResult<()> {
    sqlx::query(
        r#"
        UPDATE matches
           SET id_player2       = COALESCE($2, id_player2),
               pokemons_player1 = COALESCE($3, pokemons_player1),
               pokemons_player2 = COALESCE($4, pokemons_player2),
               status           = COALESCE($5, status)
         WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(update.id_player2)
    .bind(update.pokemons_player1.clone())
    .bind(update.pokemons_player2.clone())
    .bind(update.status.map(MatchStatus::as_str))
    .execute(db)
    .await?;
    Ok(())
}

pub async fn update_match_status_and_winner(
    db: &PgPool,
    id: MatchId,
    status: MatchStatus,
    winner: Option<PlayerId>,
) -> StoreResult<()> {
    sqlx::query("UPDATE matches SET status = $2, winner = $3 WHERE id = $1")
        .bind(id)
        .bind(status.as_str())
        .bind(winner)
        .execute(db)
        .await?;
    Ok(())
}
