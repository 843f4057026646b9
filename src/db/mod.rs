//! Record store for users, matches and rounds.

pub mod match_repo;
pub mod memory;
pub mod models;
pub mod pg;
pub mod round_repo;
pub mod user_repo;

pub use memory::MemoryStore;
pub use pg::PgStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::game::types::{
    Match, MatchId, MatchStatus, MatchUpdate, PlayerId, Round, RoundInput, RoundStatus, User,
};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("{0} already exists")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("schema migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A stored row does not decode into a domain value.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Record-level operations over the `users`, `matches` and `rounds` tables.
///
/// Partial updates only touch the columns actually supplied.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;

    /// Release pooled connections. Called once on shutdown.
    async fn close(&self) {}

    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn get_user(&self, id: PlayerId) -> StoreResult<Option<User>>;
    async fn add_user(&self, name: &str) -> StoreResult<PlayerId>;
    async fn update_user_score(&self, id: PlayerId, score: i64) -> StoreResult<()>;

    async fn add_match(&self, player1: PlayerId) -> StoreResult<MatchId>;
    async fn get_match(&self, id: MatchId) -> StoreResult<Option<Match>>;
    async fn get_matches(&self) -> StoreResult<Vec<Match>>;
    async fn update_match(&self, id: MatchId, update: &MatchUpdate) -> StoreResult<()>;
    async fn update_match_status_and_winner(
        &self,
        id: MatchId,
        status: MatchStatus,
        winner: Option<PlayerId>,
    ) -> StoreResult<()>;

    /// Rounds of one match, ordered by round number.
    async fn get_match_rounds(&self, match_id: MatchId) -> StoreResult<Vec<Round>>;
    async fn create_round(&self, match_id: MatchId, round_number: u8) -> StoreResult<()>;
    async fn update_round(&self, input: &RoundInput) -> StoreResult<()>;
    async fn update_round_status_and_winner(
        &self,
        match_id: MatchId,
        round_number: u8,
        status: RoundStatus,
        winner: Option<PlayerId>,
    ) -> StoreResult<()>;
    async fn get_round(&self, match_id: MatchId, round_number: u8) -> StoreResult<Option<Round>>;
}
