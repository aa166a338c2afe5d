//! Resolve a type, list its Pokémon, print them.
//!
//! Failures never abort the pipeline: a failed request or an unknown type is
//! reported on `out` and collapses into an empty result, so the caller always
//! reaches [`display_pokemon`].

use crate::data::{self, JsonSource};
use crate::model::{TypeDetailResponse, TypeListResponse};
use anyhow::Result;
use std::io::{self, Write};

pub const DEFAULT_TYPE: &str = "water";

/// Where to look and what to look for.
#[derive(Debug, Clone)]
pub struct TypeQuery {
    pub base_url: String,
    pub type_name: String,
}

#[cfg(test)]
impl Default for TypeQuery {
    fn default() -> Self {
        Self {
            base_url: data::DEFAULT_BASE_URL.to_string(),
            type_name: DEFAULT_TYPE.to_string(),
        }
    }
}

impl TypeQuery {
    /// Display form of the type name: `water` becomes `Water`.
    pub fn label(&self) -> String {
        let mut chars = self.type_name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Turns a fetch failure into an absent value after reporting it.
fn report<T>(out: &mut dyn Write, result: Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            tracing::warn!(error = %err, "request failed");
            writeln!(out, "Error fetching data: {:#}", err)?;
            Ok(None)
        }
    }
}

/// Looks up the detail URL of `query.type_name` in the type listing.
pub fn resolve_type_url(
    source: &dyn JsonSource,
    query: &TypeQuery,
    out: &mut dyn Write,
) -> io::Result<Option<String>> {
    let url = data::type_list_url(&query.base_url);
    let fetched = data::fetch_data::<TypeListResponse>(source, &url);
    let Some(list) = report(out, fetched)? else {
        return Ok(None);
    };

    match list.find(&query.type_name) {
        Some(entry) => {
            tracing::debug!(type_name = %entry.name, url = %entry.url, "type resolved");
            Ok(Some(entry.url.clone()))
        }
        None => {
            writeln!(out, "{} type not found in API response.", query.label())?;
            Ok(None)
        }
    }
}

/// Names of every Pokémon of the queried type, in API order.
pub fn fetch_type_pokemon(
    source: &dyn JsonSource,
    query: &TypeQuery,
    out: &mut dyn Write,
) -> io::Result<Vec<String>> {
    let Some(detail_url) = resolve_type_url(source, query, out)? else {
        return Ok(Vec::new());
    };

    let fetched = data::fetch_data::<TypeDetailResponse>(source, &detail_url);
    let Some(detail) = report(out, fetched)? else {
        return Ok(Vec::new());
    };

    let names = detail.pokemon_names();
    tracing::debug!(count = names.len(), "pokemon extracted");
    Ok(names)
}

pub fn display_pokemon(out: &mut dyn Write, label: &str, pokemon: &[String]) -> io::Result<()> {
    if pokemon.is_empty() {
        writeln!(out, "No {}-type Pokémon found.", label)
    } else {
        writeln!(out, "The {}-type Pokémon are: {}", label, pokemon.join(", "))
    }
}
