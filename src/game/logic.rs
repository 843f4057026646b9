use futures::future::try_join;

use crate::{
    game::types::{MatchStatus, MatchWithRounds, PlayerId, Round, RoundStatus},
    oracle::{OracleError, ReferenceOracle, TypeRelations},
};

/// A round is over as soon as both picks are in.
pub fn round_status(round: &Round) -> RoundStatus {
    if round.pokemon_player1.is_some() && round.pokemon_player2.is_some() {
        RoundStatus::Finished
    } else {
        RoundStatus::Started
    }
}

/// The player whose type is *not* double-damage-vulnerable to the other's wins.
/// Mutual or no vulnerability is a tie.
pub fn winner_by_type(
    type1: &TypeRelations,
    type2: &TypeRelations,
    player1: PlayerId,
    player2: PlayerId,
) -> Option<PlayerId> {
    match (type1.is_vulnerable_to(type2), type2.is_vulnerable_to(type1)) {
        (true, false) => Some(player2),
        (false, true) => Some(player1),
        _ => None,
    }
}

/// Looks both picks up in the reference data and compares their primary types.
/// Returns `None` when a pick is missing or the round is a tie.
pub async fn resolve_round_winner(
    oracle: &dyn ReferenceOracle,
    round: &Round,
    player1: PlayerId,
    player2: PlayerId,
) -> Result<Option<PlayerId>, OracleError> {
    let (Some(pick1), Some(pick2)) = (&round.pokemon_player1, &round.pokemon_player2) else {
        return Ok(None);
    };

    let (creature1, creature2) =
        try_join(oracle.get_creature(pick1), oracle.get_creature(pick2)).await?;
    let (type1, type2) = try_join(
        oracle.get_type(&creature1.primary_type),
        oracle.get_type(&creature2.primary_type),
    )
    .await?;

    Ok(winner_by_type(&type1, &type2, player1, player2))
}

/// Derived status and winner of a round after its picks changed.
pub async fn compute_round_update(
    oracle: &dyn ReferenceOracle,
    round: &Round,
    player1: PlayerId,
    player2: PlayerId,
) -> Result<(RoundStatus, Option<PlayerId>), OracleError> {
    match round_status(round) {
        RoundStatus::Finished => {
            let winner = resolve_round_winner(oracle, round, player1, player2).await?;
            Ok((RoundStatus::Finished, winner))
        }
        RoundStatus::Started => Ok((RoundStatus::Started, None)),
    }
}

/// Enough rounds to exhaust a deck have been played and the last one is closed.
pub fn is_match_over(m: &MatchWithRounds) -> bool {
    let played = m.rounds.len();
    let deck_len = |deck: &Option<Vec<String>>| deck.as_ref().map_or(0, Vec::len);
    let deck_exhausted =
        played >= deck_len(&m.info.pokemons_player1) || played >= deck_len(&m.info.pokemons_player2);
    let last_closed = m
        .last_round()
        .is_some_and(|r| r.status == RoundStatus::Finished);
    deck_exhausted && last_closed
}

/// Player with strictly more round wins; equal counts is a draw.
pub fn match_winner(m: &MatchWithRounds) -> Option<PlayerId> {
    let wins = |player: PlayerId| m.rounds.iter().filter(|r| r.winner == Some(player)).count();
    let player1 = m.info.id_player1;
    let player2 = m.info.id_player2?;
    let (won1, won2) = (wins(player1), wins(player2));

    match won1.cmp(&won2) {
        std::cmp::Ordering::Greater => Some(player1),
        std::cmp::Ordering::Less => Some(player2),
        std::cmp::Ordering::Equal => None,
    }
}

/// Derived status and winner of a match. Unchanged unless the match is over.
pub fn compute_match_update(m: &MatchWithRounds) -> (MatchStatus, Option<PlayerId>) {
    if is_match_over(m) {
        (MatchStatus::Finished, match_winner(m))
    } else {
        (m.info.status, m.info.winner)
    }
}
