//! Postgres-backed [`Store`]. Thin delegation to the per-table repos.

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use super::{match_repo, round_repo, user_repo, Store, StoreResult};
use crate::game::types::{
    Match, MatchId, MatchStatus, MatchUpdate, PlayerId, Round, RoundInput, RoundStatus, User,
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open the pool and bring the schema up to date.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        user_repo::list_users(&self.pool).await
    }

    async fn get_user(&self, id: PlayerId) -> StoreResult<Option<User>> {
        user_repo::get_user(&self.pool, id).await
    }

    async fn add_user(&self, name: &str) -> StoreResult<PlayerId> {
        user_repo::add_user(&self.pool, name).await
    }

    async fn update_user_score(&self, id: PlayerId, score: i64) -> StoreResult<()> {
        user_repo::update_user_score(&self.pool, id, score).await
    }

    async fn add_match(&self, player1: PlayerId) -> StoreResult<MatchId> {
        match_repo::add_match(&self.pool, player1).await
    }

    async fn get_match(&self, id: MatchId) -> StoreResult<Option<Match>> {
        match_repo::get_match(&self.pool, id).await
    }

    async fn get_matches(&self) -> StoreResult<Vec<Match>> {
        match_repo::get_matches(&self.pool).await
    }

    async fn update_match(&self, id: MatchId, update: &MatchUpdate) -> StoreResult<()> {
        match_repo::update_match(&self.pool, id, update).await
    }

    async fn update_match_status_and_winner(
        &self,
        id: MatchId,
        status: MatchStatus,
        winner: Option<PlayerId>,
    ) -> StoreResult<()> {
        match_repo::update_match_status_and_winner(&self.pool, id, status, winner).await
    }

    async fn get_match_rounds(&self, match_id: MatchId) -> StoreResult<Vec<Round>> {
        round_repo::get_match_rounds(&self.pool, match_id).await
    }

    async fn create_round(&self, match_id: MatchId, round_number: u8) -> StoreResult<()> {
        round_repo::create_round(&self.pool, match_id, round_number).await
    }

    async fn update_round(&self, input: &RoundInput) -> StoreResult<()> {
        round_repo::update_round(&self.pool, input).await
    }

    async fn update_round_status_and_winner(
        &self,
        match_id: MatchId,
        round_number: u8,
        status: RoundStatus,
        winner: Option<PlayerId>,
    ) -> StoreResult<()> {
        round_repo::update_round_status_and_winner(&self.pool, match_id, round_number, status, winner)
            .await
    }

    async fn get_round(&self, match_id: MatchId, round_number: u8) -> StoreResult<Option<Round>> {
        round_repo::get_round(&self.pool, match_id, round_number).await
    }
}
