//! Response shapes returned by the PokéAPI type endpoints.

use serde::Deserialize;

/// A `{name, url}` pair, the API's generic link to another resource.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Body of `GET /type/`: every known elemental type.
#[derive(Debug, Deserialize)]
pub struct TypeListResponse {
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

impl TypeListResponse {
    /// Returns the first type whose name matches `name`, ignoring case.
    pub fn find(&self, name: &str) -> Option<&NamedResource> {
        let wanted = name.to_lowercase();
        self.results
            .iter()
            .find(|entry| entry.name.to_lowercase() == wanted)
    }
}

/// One membership record inside a type's detail resource. Only the nested
/// Pokémon is read; `slot` and any other siblings are ignored.
#[derive(Debug, Deserialize)]
pub struct TypePokemon {
    pub pokemon: NamedResource,
}

/// Body of `GET /type/{id}/`.
#[derive(Debug, Deserialize)]
pub struct TypeDetailResponse {
    #[serde(default)]
    pub pokemon: Vec<TypePokemon>,
}

impl TypeDetailResponse {
    /// Pokémon names in the order the API listed them.
    pub fn pokemon_names(self) -> Vec<String> {
        self.pokemon
            .into_iter()
            .map(|entry| entry.pokemon.name)
            .collect()
    }
}
