//! # typedex
//!
//! Prints every Pokémon of one elemental type, Water unless told otherwise.

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use typedex::data::{DEFAULT_BASE_URL, HttpSource};
use typedex::pokedex::{self, DEFAULT_TYPE, TypeQuery};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root of the PokéAPI to query
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Elemental type to list (e.g. water, fire, ghost)
    #[arg(short, long = "type", default_value = DEFAULT_TYPE)]
    type_name: String,

    /// Request timeout in seconds (client default when omitted)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Log requests to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let query = TypeQuery {
        base_url: args.base_url,
        type_name: args.type_name,
    };
    tracing::info!(base_url = %query.base_url, type_name = %query.type_name, "starting");

    let source = HttpSource::new(args.timeout.map(Duration::from_secs))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let pokemon = pokedex::fetch_type_pokemon(&source, &query, &mut out)?;
    pokedex::display_pokemon(&mut out, &query.label(), &pokemon)?;
    out.flush()?;
    Ok(())
}
