//! Validation of caller-proposed match and round mutations.
//!
//! Every check is a pure function of the freshly loaded state and the proposal.
//! On acceptance the proposal is handed back unchanged.

use std::collections::HashSet;

use crate::{
    error::{GameError, GameResult},
    game::types::{Match, MatchStatus, MatchUpdate, MatchWithRounds, RoundInput, RoundStatus, MAX_ROUNDS},
};

fn reject<T>(reason: impl Into<String>) -> GameResult<T> {
    Err(GameError::invalid(reason))
}

fn check_roster(player: u8, current: Option<&Vec<String>>, proposed: Option<&Vec<String>>) -> GameResult<()> {
    let Some(roster) = proposed else {
        return Ok(());
    };
    if let Some(assigned) = current {
        if assigned != roster {
            return reject(format!("Cannot change player {player}'s pokemons once chosen"));
        }
    }
    if roster.is_empty() || roster.len() > usize::from(MAX_ROUNDS) {
        return reject(format!("A deck must hold between 1 and {MAX_ROUNDS} pokemons"));
    }
    let mut seen = HashSet::new();
    if !roster.iter().all(|p| seen.insert(p)) {
        return reject("A pokemon can only appear once in a deck");
    }
    Ok(())
}

/// Accepts or rejects a change to a match.
///
/// Start prerequisites are checked against the state the update would produce,
/// so a single request may join, pick both decks and start.
pub fn validate_match_update(current: &Match, update: MatchUpdate) -> GameResult<MatchUpdate> {
    if update.status == Some(MatchStatus::Finished) {
        return reject("Cannot finish a match manually");
    }
    if current.status == MatchStatus::Finished {
        return reject("Cannot modify a finished match");
    }
    if update.id_player2 == Some(current.id_player1) {
        return reject("You cannot play against yourself");
    }
    if let (Some(joined), Some(proposed)) = (current.id_player2, update.id_player2) {
        if joined != proposed {
            return reject("Player 2 has already joined this match");
        }
    }
    check_roster(1, current.pokemons_player1.as_ref(), update.pokemons_player1.as_ref())?;
    check_roster(2, current.pokemons_player2.as_ref(), update.pokemons_player2.as_ref())?;

    match update.status {
        Some(MatchStatus::Created) if current.status != MatchStatus::Created => {
            return reject("Cannot move a started match back to CREATED");
        }
        Some(MatchStatus::InProgress) => {
            if current.status != MatchStatus::Created {
                return reject("Cannot start match: already in progress");
            }
            if update.id_player2.or(current.id_player2).is_none() {
                return reject("Cannot start match: still waiting for player 2");
            }
            if update.pokemons_player1.is_none() && current.pokemons_player1.is_none() {
                return reject("Cannot start match: still waiting for player 1's pokemons");
            }
            if update.pokemons_player2.is_none() && current.pokemons_player2.is_none() {
                return reject("Cannot start match: still waiting for player 2's pokemons");
            }
        }
        _ => {}
    }

    Ok(update)
}

/// Accepts or rejects a pick submission for one round.
///
/// Only the frontier round (highest existing number) or the one right after it
/// may be addressed, and the frontier must be closed before moving on.
pub fn validate_round_input(m: &MatchWithRounds, input: RoundInput) -> GameResult<RoundInput> {
    if m.info.id_player2.is_none() {
        return reject("cannot start the round with only one player");
    }
    if m.info.status != MatchStatus::InProgress {
        return reject("cannot modify the round if the match is not in progress");
    }
    if input.round_number == 0 || input.round_number > MAX_ROUNDS {
        return reject("invalid round number");
    }
    if m
        .round(input.round_number)
        .is_some_and(|r| r.status == RoundStatus::Finished)
    {
        return reject("cannot modify a finished round");
    }

    let frontier = m.frontier();
    let frontier_open = m
        .round(frontier)
        .is_some_and(|r| r.status != RoundStatus::Finished);
    if input.round_number != frontier && frontier_open {
        return reject("you must finish previous round");
    }
    if input.round_number != frontier && input.round_number != frontier + 1 {
        return reject("invalid round number");
    }

    let in_deck = |deck: &Option<Vec<String>>, pick: &String| {
        deck.as_ref().is_some_and(|d| d.contains(pick))
    };
    if let Some(pick) = &input.pokemon_player1 {
        if !in_deck(&m.info.pokemons_player1, pick) {
            return reject("Use only pokemons in your deck");
        }
    }
    if let Some(pick) = &input.pokemon_player2 {
        if !in_deck(&m.info.pokemons_player2, pick) {
            return reject("Use only pokemons in your deck");
        }
    }

    let others = || m.rounds.iter().filter(|r| r.round_number != input.round_number);
    if let Some(pick) = &input.pokemon_player1 {
        if others().any(|r| r.pokemon_player1.as_ref() == Some(pick)) {
            return reject(format!("{pick} cannot fight twice"));
        }
    }
    if let Some(pick) = &input.pokemon_player2 {
        if others().any(|r| r.pokemon_player2.as_ref() == Some(pick)) {
            return reject(format!("{pick} cannot fight twice"));
        }
    }

    Ok(input)
}
