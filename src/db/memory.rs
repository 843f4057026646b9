//! In-process [`Store`] used when no database is configured, and by tests.
//!
//! Mirrors the Postgres semantics: ids are assigned sequentially from 1,
//! updates of missing rows are silent no-ops, user names and round keys are unique.

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use chrono::Utc;

use super::{Store, StoreError, StoreResult};
use crate::game::types::{
    Match, MatchId, MatchStatus, MatchUpdate, PlayerId, Round, RoundInput, RoundStatus, User,
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<PlayerId, User>,
    matches: BTreeMap<MatchId, Match>,
    rounds: BTreeMap<(MatchId, u8), Round>,
    next_user_id: PlayerId,
    next_match_id: MatchId,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables().users.values().cloned().collect())
    }

    async fn get_user(&self, id: PlayerId) -> StoreResult<Option<User>> {
        Ok(self.tables().users.get(&id).cloned())
    }

    async fn add_user(&self, name: &str) -> StoreResult<PlayerId> {
        let mut t = self.tables();
        if t.users.values().any(|u| u.name == name) {
            return Err(StoreError::Duplicate(format!("user `{name}`")));
        }
        t.next_user_id += 1;
        let id = t.next_user_id;
        t.users.insert(
            id,
            User {
                id,
                name: name.to_owned(),
                score: 0,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn update_user_score(&self, id: PlayerId, score: i64) -> StoreResult<()> {
        if let Some(user) = self.tables().users.get_mut(&id) {
            user.score = score;
        }
        Ok(())
    }

    async fn add_match(&self, player1: PlayerId) -> StoreResult<MatchId> {
        let mut t = self.tables();
        t.next_match_id += 1;
        let id = t.next_match_id;
        t.matches.insert(
            id,
            Match {
                id,
                id_player1: player1,
                id_player2: None,
                pokemons_player1: None,
                pokemons_player2: None,
                status: MatchStatus::Created,
                winner: None,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn get_match(&self, id: MatchId) -> StoreResult<Option<Match>> {
        Ok(self.tables().matches.get(&id).cloned())
    }

    async fn get_matches(&self) -> StoreResult<Vec<Match>> {
        Ok(self.tables().matches.values().cloned().collect())
    }

    async fn update_match(&self, id: MatchId, update: &MatchUpdate) -> StoreResult<()> {
        if let Some(m) = self.tables().matches.get_mut(&id) {
            if let Some(p2) = update.id_player2 {
                m.id_player2 = Some(p2);
            }
            if let Some(roster) = &update.pokemons_player1 {
                m.pokemons_player1 = Some(roster.clone());
            }
            if let Some(roster) = &update.pokemons_player2 {
                m.pokemons_player2 = Some(roster.clone());
            }
            if let Some(status) = update.status {
                m.status = status;
            }
        }
        Ok(())
    }

    async fn update_match_status_and_winner(
        &self,
        id: MatchId,
        status: MatchStatus,
        winner: Option<PlayerId>,
    ) -> StoreResult<()> {
        if let Some(m) = self.tables().matches.get_mut(&id) {
            m.status = status;
            m.winner = winner;
        }
        Ok(())
    }

    async fn get_match_rounds(&self, match_id: MatchId) -> StoreResult<Vec<Round>> {
        Ok(self
            .tables()
            .rounds
            .range((match_id, 0)..=(match_id, u8::MAX))
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn create_round(&self, match_id: MatchId, round_number: u8) -> StoreResult<()> {
        let mut t = self.tables();
        let key = (match_id, round_number);
        if t.rounds.contains_key(&key) {
            return Err(StoreError::Duplicate(format!(
                "round {round_number} of match {match_id}"
            )));
        }
        t.rounds.insert(key, Round::started(match_id, round_number));
        Ok(())
    }

    async fn update_round(&self, input: &RoundInput) -> StoreResult<()> {
        if let Some(r) = self
            .tables()
            .rounds
            .get_mut(&(input.match_id, input.round_number))
        {
            if let Some(pick) = &input.pokemon_player1 {
                r.pokemon_player1 = Some(pick.clone());
            }
            if let Some(pick) = &input.pokemon_player2 {
                r.pokemon_player2 = Some(pick.clone());
            }
        }
        Ok(())
    }

    async fn update_round_status_and_winner(
        &self,
        match_id: MatchId,
        round_number: u8,
        status: RoundStatus,
        winner: Option<PlayerId>,
    ) -> StoreResult<()> {
        if let Some(r) = self.tables().rounds.get_mut(&(match_id, round_number)) {
            r.status = status;
            r.winner = winner;
        }
        Ok(())
    }

    async fn get_round(&self, match_id: MatchId, round_number: u8) -> StoreResult<Option<Round>> {
        Ok(self.tables().rounds.get(&(match_id, round_number)).cloned())
    }
}
