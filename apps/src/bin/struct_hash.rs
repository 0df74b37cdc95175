use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::debug;

use eip712_ast::{format_digest, struct_hash, Eip712Hasher, StructReference};

/// CLI to compute the EIP-712 struct hash of a Solidity struct straight from
/// its compiled artifact.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Struct to hash, as `path/to/File.sol:StructName`.
    #[clap(value_parser = parse_reference)]
    reference: StructReference,

    /// Compiler output directory to search for the artifact.
    #[clap(short, long, env = "EIP712_OUT_DIR", default_value = "out")]
    out: PathBuf,

    /// Field values, in declaration order.
    #[clap(allow_negative_numbers = true)]
    values: Vec<String>,
}

fn parse_reference(s: &str) -> Result<StructReference, String> {
    s.parse().map_err(|e: eip712_ast::Error| e.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables if present
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment variables from {:?}", path),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => bail!("failed to load .env file: {}", e),
    }

    let args = Args::parse();
    debug!(reference = %args.reference, out = %args.out.display(), "hashing struct");

    let digest = struct_hash(&args.out, &args.reference, &args.values, &Eip712Hasher)?;
    println!("{}", format_digest(&digest));

    Ok(())
}
