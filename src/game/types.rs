use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Numeric identity shared by users and matches.
pub type PlayerId = i64;
pub type MatchId = i64;

/// Rounds are numbered 1..=MAX_ROUNDS within a match.
pub const MAX_ROUNDS: u8 = 6;

/// A registered player and their cumulative score.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct User {
    pub id: PlayerId,
    pub name: String,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

/// Match life-cycle. Only ever advances left to right.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Created,
    InProgress,
    Finished,
}

/// Round life-cycle.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundStatus {
    Started,
    Finished,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Created => "CREATED",
            MatchStatus::InProgress => "IN_PROGRESS",
            MatchStatus::Finished => "FINISHED",
        }
    }
}

impl RoundStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RoundStatus::Started => "STARTED",
            RoundStatus::Finished => "FINISHED",
        }
    }
}

/// Raised when a stored status column holds an unknown value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status `{}`", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for MatchStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(MatchStatus::Created),
            "IN_PROGRESS" => Ok(MatchStatus::InProgress),
            "FINISHED" => Ok(MatchStatus::Finished),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

impl FromStr for RoundStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STARTED" => Ok(RoundStatus::Started),
            "FINISHED" => Ok(RoundStatus::Finished),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// One duel between two players, without its rounds.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub id_player1: PlayerId,
    pub id_player2: Option<PlayerId>,
    pub pokemons_player1: Option<Vec<String>>,
    pub pokemons_player2: Option<Vec<String>>,
    pub status: MatchStatus,
    pub winner: Option<PlayerId>,
    pub created_at: DateTime<Utc>,
}

/// A match together with every round played so far, ordered by round number.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MatchWithRounds {
    #[serde(flatten)]
    pub info: Match,
    pub rounds: Vec<Round>,
}

impl MatchWithRounds {
    /// Highest existing round number, 0 when no round exists yet.
    pub fn frontier(&self) -> u8 {
        self.rounds
            .iter()
            .map(|r| r.round_number)
            .max()
            .unwrap_or(0)
    }

    pub fn round(&self, number: u8) -> Option<&Round> {
        self.rounds.iter().find(|r| r.round_number == number)
    }

    /// The round with the highest number, if any.
    pub fn last_round(&self) -> Option<&Round> {
        self.rounds.iter().max_by_key(|r| r.round_number)
    }
}

/// One exchange of picks inside a match.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub match_id: MatchId,
    pub round_number: u8,
    pub pokemon_player1: Option<String>,
    pub pokemon_player2: Option<String>,
    pub status: RoundStatus,
    pub winner: Option<PlayerId>,
}

impl Round {
    /// A freshly opened round with no picks.
    pub fn started(match_id: MatchId, round_number: u8) -> Self {
        Round {
            match_id,
            round_number,
            pokemon_player1: None,
            pokemon_player2: None,
            status: RoundStatus::Started,
            winner: None,
        }
    }
}

/// Caller-supplied changes to a match. Absent fields are left untouched.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchUpdate {
    pub id_player2: Option<PlayerId>,
    pub pokemons_player1: Option<Vec<String>>,
    pub pokemons_player2: Option<Vec<String>>,
    pub status: Option<MatchStatus>,
}

/// Caller-supplied picks for one round. Absent picks are left untouched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoundInput {
    pub match_id: MatchId,
    pub round_number: u8,
    #[serde(default)]
    pub pokemon_player1: Option<String>,
    #[serde(default)]
    pub pokemon_player2: Option<String>,
}
