//! Request-level pipelines over the store and the reference oracle.
//!
//! Each step either hands its result to the next or short-circuits the
//! pipeline with the first failure. Writes already made by earlier steps
//! stay committed; the next successful mutation recomputes derived fields.

use std::sync::Arc;

use futures::future::{join, try_join};

use crate::{
    db::{Store, StoreError},
    error::{GameError, GameResult},
    game::{
        logic, rules, scoring,
        types::{
            Match, MatchId, MatchStatus, MatchUpdate, MatchWithRounds, PlayerId, Round, RoundInput,
            RoundStatus, User,
        },
    },
    oracle::ReferenceOracle,
};

#[derive(Clone)]
pub struct GameCoordinator {
    store: Arc<dyn Store>,
    oracle: Arc<dyn ReferenceOracle>,
}

impl GameCoordinator {
    pub fn new(store: Arc<dyn Store>, oracle: Arc<dyn ReferenceOracle>) -> Self {
        Self { store, oracle }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    // ---------- users ----------

    pub async fn create_user(&self, name: &str) -> GameResult<PlayerId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::invalid("name is required"));
        }
        match self.store.add_user(name).await {
            Ok(id) => Ok(id),
            Err(StoreError::Duplicate(_)) => Err(GameError::invalid("name already taken")),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list_users(&self) -> GameResult<Vec<User>> {
        Ok(self.store.list_users().await?)
    }

    pub async fn get_user(&self, id: PlayerId) -> GameResult<User> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| GameError::not_found(format!("user {id}")))
    }

    async fn require_player(&self, id: PlayerId) -> GameResult<()> {
        match self.store.get_user(id).await? {
            Some(_) => Ok(()),
            None => Err(GameError::invalid(format!("player {id} does not exist"))),
        }
    }

    // ---------- matches ----------

    pub async fn create_match(&self, player1: PlayerId) -> GameResult<MatchId> {
        self.require_player(player1).await?;
        let id = self.store.add_match(player1).await?;
        log::info!("match {id} created by player {player1}");
        Ok(id)
    }

    pub async fn list_matches(&self) -> GameResult<Vec<Match>> {
        Ok(self.store.get_matches().await?)
    }

    pub async fn get_match(&self, id: MatchId) -> GameResult<Match> {
        self.store
            .get_match(id)
            .await?
            .ok_or_else(|| GameError::not_found(format!("match {id}")))
    }

    pub async fn get_match_with_rounds(&self, id: MatchId) -> GameResult<MatchWithRounds> {
        let info = self.get_match(id).await?;
        let rounds = self.store.get_match_rounds(id).await?;
        Ok(MatchWithRounds { info, rounds })
    }

    /// validate → persist raw update → reload.
    pub async fn update_match(&self, id: MatchId, update: MatchUpdate) -> GameResult<MatchWithRounds> {
        let current = self.get_match(id).await?;
        let update = rules::validate_match_update(&current, update)?;
        if let Some(player2) = update.id_player2 {
            self.require_player(player2).await?;
        }

        self.store.update_match(id, &update).await?;
        if update.status == Some(MatchStatus::InProgress) {
            log::info!("match {id} started");
        }
        self.get_match_with_rounds(id).await
    }

    // ---------- rounds ----------

    async fn get_round(&self, match_id: MatchId, round_number: u8) -> GameResult<Round> {
        self.store
            .get_round(match_id, round_number)
            .await?
            .ok_or_else(|| GameError::not_found(format!("round {round_number} of match {match_id}")))
    }

    /// Opens a round that does not exist yet, then applies the picks it carries.
    pub async fn create_round(&self, input: RoundInput) -> GameResult<Round> {
        let m = self.get_match_with_rounds(input.match_id).await?;
        let input = rules::validate_round_input(&m, input)?;
        if m.round(input.round_number).is_some() {
            return Err(GameError::invalid("round already exists"));
        }
        self.apply_round(&m, input).await
    }

    /// Submits picks for a round, creating it on first use.
    pub async fn update_round(&self, input: RoundInput) -> GameResult<Round> {
        let m = self.get_match_with_rounds(input.match_id).await?;
        let input = rules::validate_round_input(&m, input)?;
        self.apply_round(&m, input).await
    }

    /// persist picks → reload → resolve → persist status/winner → reload,
    /// then settle the enclosing match.
    async fn apply_round(&self, m: &MatchWithRounds, input: RoundInput) -> GameResult<Round> {
        let (match_id, number) = (input.match_id, input.round_number);
        let player1 = m.info.id_player1;
        let player2 = m
            .info
            .id_player2
            .ok_or_else(|| GameError::invalid("cannot start the round with only one player"))?;

        if m.round(number).is_none() {
            match self.store.create_round(match_id, number).await {
                // Opened concurrently by the other player.
                Ok(()) | Err(StoreError::Duplicate(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.store.update_round(&input).await?;

        let round = self.get_round(match_id, number).await?;
        let (status, winner) =
            logic::compute_round_update(self.oracle.as_ref(), &round, player1, player2).await?;
        self.store
            .update_round_status_and_winner(match_id, number, status, winner)
            .await?;
        let round = self.get_round(match_id, number).await?;
        if round.status == RoundStatus::Finished {
            log::info!("match {match_id} round {number} finished, winner {winner:?}");
        }

        self.settle_match(match_id).await?;
        Ok(round)
    }

    /// Recomputes the match status and winner; on the one-time transition to
    /// FINISHED, pays out both players.
    pub async fn settle_match(&self, match_id: MatchId) -> GameResult<MatchWithRounds> {
        let m = self.get_match_with_rounds(match_id).await?;
        let (status, winner) = logic::compute_match_update(&m);
        if status == m.info.status && winner == m.info.winner {
            return Ok(m);
        }

        self.store
            .update_match_status_and_winner(match_id, status, winner)
            .await?;
        let settled = self.get_match_with_rounds(match_id).await?;

        if status == MatchStatus::Finished && m.info.status != MatchStatus::Finished {
            log::info!("match {match_id} finished, winner {winner:?}");
            self.propagate_scores(&settled).await?;
        }
        Ok(settled)
    }

    /// Both score writes are issued together; one failing does not undo the other.
    async fn propagate_scores(&self, m: &MatchWithRounds) -> GameResult<()> {
        let player1 = m.info.id_player1;
        let player2 = m
            .info
            .id_player2
            .ok_or_else(|| StoreError::Corrupt(format!("finished match {} has no player 2", m.info.id)))?;

        let (user1, user2) = try_join(self.store.get_user(player1), self.store.get_user(player2)).await?;
        let missing = |id: PlayerId| StoreError::Corrupt(format!("match {} references missing user {id}", m.info.id));
        let user1 = user1.ok_or_else(|| missing(player1))?;
        let user2 = user2.ok_or_else(|| missing(player2))?;

        let score1 = scoring::player_score(user1.id, user1.score, m.info.winner);
        let score2 = scoring::player_score(user2.id, user2.score, m.info.winner);

        let (res1, res2) = join(
            self.store.update_user_score(user1.id, score1),
            self.store.update_user_score(user2.id, score2),
        )
        .await;
        for (id, res) in [(user1.id, &res1), (user2.id, &res2)] {
            if let Err(e) = res {
                log::warn!("score update for player {id} failed: {e}");
            }
        }
        res1?;
        res2?;
        Ok(())
    }
}
