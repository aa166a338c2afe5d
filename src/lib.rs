//! typedex library: fetch a PokéAPI type listing and report its Pokémon.

pub mod data;
pub mod model;
pub mod pokedex;
