//! Shared fixtures: a fixed type chart and state builders.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use chrono::Utc;
use pokefumi_server::{
    db::{MemoryStore, Store},
    game::{
        coordinator::GameCoordinator,
        types::{Match, MatchStatus, MatchWithRounds, Round, RoundStatus},
    },
    oracle::{Creature, OracleError, ReferenceOracle, TypeRelations},
};

/// Reference data served from memory. Unknown names answer 404.
pub struct FixtureOracle {
    creatures: HashMap<&'static str, &'static str>,
    types: HashMap<&'static str, (Vec<&'static str>, Vec<&'static str>)>,
    pub lookups: AtomicUsize,
}

impl FixtureOracle {
    pub fn new() -> Self {
        let creatures = HashMap::from([
            ("pikachu", "electric"),
            ("raichu", "electric"),
            ("squirtle", "water"),
            ("psyduck", "water"),
            ("charmander", "fire"),
            ("bulbasaur", "grass"),
            ("eevee", "normal"),
            ("snorlax", "normal"),
        ]);
        // type -> (double_damage_from, double_damage_to)
        let types = HashMap::from([
            ("electric", (vec![], vec!["water", "flying"])),
            ("water", (vec!["electric", "grass"], vec!["fire", "ground", "rock"])),
            ("fire", (vec!["water", "ground", "rock"], vec!["grass", "ice", "bug", "steel"])),
            ("grass", (vec!["fire", "ice", "flying", "bug"], vec!["water", "ground", "rock"])),
            ("normal", (vec!["fighting"], vec![])),
        ]);
        Self {
            creatures,
            types,
            lookups: AtomicUsize::new(0),
        }
    }
}

fn not_found(resource: String) -> OracleError {
    OracleError::Status {
        status: 404,
        resource,
    }
}

#[async_trait]
impl ReferenceOracle for FixtureOracle {
    async fn get_creature(&self, name: &str) -> Result<Creature, OracleError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let primary_type = self
            .creatures
            .get(name)
            .ok_or_else(|| not_found(format!("pokemon/{name}")))?;
        Ok(Creature {
            name: name.to_owned(),
            primary_type: primary_type.to_string(),
        })
    }

    async fn get_type(&self, name: &str) -> Result<TypeRelations, OracleError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let (from, to) = self
            .types
            .get(name)
            .ok_or_else(|| not_found(format!("type/{name}")))?;
        Ok(TypeRelations {
            name: name.to_owned(),
            double_damage_from: from.iter().map(|s| s.to_string()).collect(),
            double_damage_to: to.iter().map(|s| s.to_string()).collect(),
        })
    }
}

/// Oracle that is always down.
pub struct DownOracle;

#[async_trait]
impl ReferenceOracle for DownOracle {
    async fn get_creature(&self, name: &str) -> Result<Creature, OracleError> {
        Err(OracleError::Status {
            status: 503,
            resource: format!("pokemon/{name}"),
        })
    }

    async fn get_type(&self, name: &str) -> Result<TypeRelations, OracleError> {
        Err(OracleError::Status {
            status: 503,
            resource: format!("type/{name}"),
        })
    }
}

pub fn relations(name: &str, from: &[&str], to: &[&str]) -> TypeRelations {
    TypeRelations {
        name: name.to_owned(),
        double_damage_from: from.iter().map(|s| s.to_string()).collect(),
        double_damage_to: to.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn deck(names: &[&str]) -> Option<Vec<String>> {
    Some(names.iter().map(|s| s.to_string()).collect())
}

/// A match between players 1 and 2 with the given decks and status.
pub fn a_match(status: MatchStatus, deck1: &[&str], deck2: &[&str]) -> Match {
    Match {
        id: 1,
        id_player1: 1,
        id_player2: Some(2),
        pokemons_player1: deck(deck1),
        pokemons_player2: deck(deck2),
        status,
        winner: None,
        created_at: Utc::now(),
    }
}

/// A freshly created match: player 1 only, no decks.
pub fn created_match() -> Match {
    Match {
        id: 1,
        id_player1: 1,
        id_player2: None,
        pokemons_player1: None,
        pokemons_player2: None,
        status: MatchStatus::Created,
        winner: None,
        created_at: Utc::now(),
    }
}

pub fn round(number: u8, pick1: Option<&str>, pick2: Option<&str>, winner: Option<i64>) -> Round {
    let status = if pick1.is_some() && pick2.is_some() {
        RoundStatus::Finished
    } else {
        RoundStatus::Started
    };
    Round {
        match_id: 1,
        round_number: number,
        pokemon_player1: pick1.map(str::to_owned),
        pokemon_player2: pick2.map(str::to_owned),
        status,
        winner,
    }
}

pub fn in_progress(deck1: &[&str], deck2: &[&str], rounds: Vec<Round>) -> MatchWithRounds {
    MatchWithRounds {
        info: a_match(MatchStatus::InProgress, deck1, deck2),
        rounds,
    }
}

/// Coordinator over an empty in-memory store and the fixture type chart.
pub fn coordinator() -> (GameCoordinator, Arc<MemoryStore>, Arc<FixtureOracle>) {
    let store = Arc::new(MemoryStore::new());
    let oracle = Arc::new(FixtureOracle::new());
    let game = GameCoordinator::new(store.clone() as Arc<dyn Store>, oracle.clone());
    (game, store, oracle)
}
