use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::StoreError;
use crate::game::types::{Match, Round, User};

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct MatchRow {
    pub id: i64,
    pub id_player1: i64,
    pub id_player2: Option<i64>,
    pub pokemons_player1: Option<Vec<String>>,
    pub pokemons_player2: Option<Vec<String>>,
    pub status: String,
    pub winner: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct RoundRow {
    pub match_id: i64,
    pub round_number: i16,
    pub pokemon_player1: Option<String>,
    pub pokemon_player2: Option<String>,
    pub status: String,
    pub winner: Option<i64>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            name: r.name,
            score: r.score,
            created_at: r.created_at,
        }
    }
}

impl TryFrom<MatchRow> for Match {
    type Error = StoreError;

    fn try_from(r: MatchRow) -> Result<Self, Self::Error> {
        let status = r
            .status
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("match {}: {e}", r.id)))?;
        Ok(Match {
            id: r.id,
            id_player1: r.id_player1,
            id_player2: r.id_player2,
            pokemons_player1: r.pokemons_player1,
            pokemons_player2: r.pokemons_player2,
            status,
            winner: r.winner,
            created_at: r.created_at,
        })
    }
}

impl TryFrom<RoundRow> for Round {
    type Error = StoreError;

    fn try_from(r: RoundRow) -> Result<Self, Self::Error> {
        let round_number = u8::try_from(r.round_number).map_err(|_| {
            StoreError::Corrupt(format!("match {}: round number {}", r.match_id, r.round_number))
        })?;
        let status = r
            .status
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("match {} round {round_number}: {e}", r.match_id)))?;
        Ok(Round {
            match_id: r.match_id,
            round_number,
            pokemon_player1: r.pokemon_player1,
            pokemon_player2: r.pokemon_player2,
            status,
            winner: r.winner,
        })
    }
}
