//! Read-only creature/type reference data.

mod pokeapi;

pub use pokeapi::PokeApiClient;

use async_trait::async_trait;
use thiserror::Error;

/// A creature as far as round resolution cares: its primary type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creature {
    pub name: String,
    pub primary_type: String,
}

/// Double-damage edges of one type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeRelations {
    pub name: String,
    /// Types that deal double damage to this one.
    pub double_damage_from: Vec<String>,
    /// Types this one deals double damage to.
    pub double_damage_to: Vec<String>,
}

impl TypeRelations {
    /// True when `other` hits this type for double damage, from either side of the relation.
    pub fn is_vulnerable_to(&self, other: &TypeRelations) -> bool {
        self.double_damage_from.iter().any(|t| *t == other.name)
            || other.double_damage_to.iter().any(|t| *t == self.name)
    }
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("request to reference service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("reference service answered {status} for {resource}")]
    Status { status: u16, resource: String },

    #[error("creature `{0}` has no type")]
    MissingType(String),

    #[error("reference base URL `{0}` cannot carry a path")]
    BaseUrl(String),
}

#[async_trait]
pub trait ReferenceOracle: Send + Sync {
    async fn get_creature(&self, name: &str) -> Result<Creature, OracleError>;

    async fn get_type(&self, name: &str) -> Result<TypeRelations, OracleError>;
}
