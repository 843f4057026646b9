//! PokeAPI-backed oracle with an in-process memo of every successful lookup.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Deserialize};
use url::Url;

use super::{Creature, OracleError, ReferenceOracle, TypeRelations};

#[derive(Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Deserialize)]
struct TypeSlot {
    slot: u32,
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Deserialize)]
struct PokemonBody {
    name: String,
    types: Vec<TypeSlot>,
}

#[derive(Deserialize)]
struct DamageRelations {
    #[serde(default)]
    double_damage_from: Vec<NamedResource>,
    #[serde(default)]
    double_damage_to: Vec<NamedResource>,
}

#[derive(Deserialize)]
struct TypeBody {
    name: String,
    damage_relations: DamageRelations,
}

impl PokemonBody {
    fn into_creature(self) -> Result<Creature, OracleError> {
        let primary = self
            .types
            .into_iter()
            .min_by_key(|t| t.slot)
            .ok_or_else(|| OracleError::MissingType(self.name.clone()))?;
        Ok(Creature {
            name: self.name,
            primary_type: primary.kind.name,
        })
    }
}

impl From<TypeBody> for TypeRelations {
    fn from(body: TypeBody) -> Self {
        let names = |v: Vec<NamedResource>| -> Vec<String> { v.into_iter().map(|r| r.name).collect() };
        TypeRelations {
            name: body.name,
            double_damage_from: names(body.damage_relations.double_damage_from),
            double_damage_to: names(body.damage_relations.double_damage_to),
        }
    }
}

pub struct PokeApiClient {
    base_url: Url,
    http_client: reqwest::Client,
    creatures: DashMap<String, Creature>,
    types: DashMap<String, TypeRelations>,
}

impl PokeApiClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            http_client: reqwest::Client::new(),
            creatures: DashMap::new(),
            types: DashMap::new(),
        }
    }

    /// `{base}/{kind}/{name}`, with `name` percent-encoded as a single path segment.
    fn resource_url(&self, kind: &str, name: &str) -> Result<Url, OracleError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| OracleError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(kind)
            .push(name);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, kind: &str, name: &str) -> Result<T, OracleError> {
        let url = self.resource_url(kind, name)?;
        log::debug!("reference lookup {url}");

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Status {
                status: status.as_u16(),
                resource: format!("{kind}/{name}"),
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ReferenceOracle for PokeApiClient {
    async fn get_creature(&self, name: &str) -> Result<Creature, OracleError> {
        let key = name.trim().to_lowercase();
        if let Some(hit) = self.creatures.get(&key) {
            return Ok(hit.value().clone());
        }

        let body: PokemonBody = self.fetch("pokemon", &key).await?;
        let creature = body.into_creature()?;
        self.creatures.insert(key, creature.clone());
        Ok(creature)
    }

    async fn get_type(&self, name: &str) -> Result<TypeRelations, OracleError> {
        let key = name.trim().to_lowercase();
        if let Some(hit) = self.types.get(&key) {
            return Ok(hit.value().clone());
        }

        let body: TypeBody = self.fetch("type", &key).await?;
        let relations = TypeRelations::from(body);
        self.types.insert(key, relations.clone());
        Ok(relations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_type_is_lowest_slot() {
        let body: PokemonBody = serde_json::from_str(
            r#"{
                "name": "charizard",
                "types": [
                    {"slot": 2, "type": {"name": "flying", "url": "x"}},
                    {"slot": 1, "type": {"name": "fire", "url": "y"}}
                ]
            }"#,
        )
        .unwrap();

        let creature = body.into_creature().unwrap();
        assert_eq!(creature.primary_type, "fire");
    }

    #[test]
    fn creature_without_types_is_rejected() {
        let body: PokemonBody = serde_json::from_str(r#"{"name": "missingno", "types": []}"#).unwrap();
        assert!(matches!(
            body.into_creature(),
            Err(OracleError::MissingType(name)) if name == "missingno"
        ));
    }

    #[test]
    fn damage_relations_are_flattened_to_names() {
        let body: TypeBody = serde_json::from_str(
            r#"{
                "name": "water",
                "damage_relations": {
                    "double_damage_from": [{"name": "electric", "url": ""}, {"name": "grass", "url": ""}],
                    "double_damage_to": [{"name": "fire", "url": ""}],
                    "half_damage_from": []
                }
            }"#,
        )
        .unwrap();

        let rel = TypeRelations::from(body);
        assert_eq!(rel.name, "water");
        assert_eq!(rel.double_damage_from, vec!["electric", "grass"]);
        assert_eq!(rel.double_damage_to, vec!["fire"]);
    }

    fn client(base: &str) -> PokeApiClient {
        PokeApiClient::new(Url::parse(base).unwrap())
    }

    #[test]
    fn resource_url_ignores_trailing_slash() {
        let with = client("http://localhost:9000/api/v2/").resource_url("pokemon", "pikachu").unwrap();
        let without = client("http://localhost:9000/api/v2").resource_url("pokemon", "pikachu").unwrap();
        assert_eq!(with.as_str(), "http://localhost:9000/api/v2/pokemon/pikachu");
        assert_eq!(with, without);
    }

    #[test]
    fn names_cannot_escape_their_path_segment() {
        let url = client("http://localhost:9000/api/v2")
            .resource_url("pokemon", "mr/mime?x=1#top")
            .unwrap();
        assert_eq!(url.path(), "/api/v2/pokemon/mr%2Fmime%3Fx=1%23top");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn opaque_base_url_is_reported() {
        let err = client("mailto:pokedex@example.com")
            .resource_url("type", "fire")
            .unwrap_err();
        assert!(matches!(err, OracleError::BaseUrl(_)));
    }
}
