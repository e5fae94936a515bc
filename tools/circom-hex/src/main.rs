//! circom-hex: convert snarkjs artifacts to canonical verifier hex
//!
//! ```bash
//! circom-hex vk build/verification_key.json   # constructor argument
//! circom-hex proof build/proof.json
//! circom-hex public build/public.json
//! circom-hex inspect-proof proof.hex          # layout dump
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use num_bigint::BigUint;
use proof_codec::field::FQ_BYTES;
use proof_codec::layout::{read_proof, read_public_inputs};
use proof_codec::{
    encode_proof, encode_public_inputs, encode_verification_key, hex_to_bytes, ProofObject,
    PublicInputs, VerificationKeyObject,
};
use serde::de::DeserializeOwned;

/// circom-hex: snarkjs JSON to canonical BLS12-381 hex
#[derive(Parser)]
#[command(name = "circom-hex")]
#[command(about = "Convert snarkjs Groth16 artifacts to canonical verifier hex")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode verification_key.json
    Vk { file: PathBuf },
    /// Encode proof.json
    Proof { file: PathBuf },
    /// Encode public.json
    Public { file: PathBuf },
    /// Dump the layout of a canonical proof hex file
    InspectProof { file: PathBuf },
    /// Dump the layout of a canonical public-inputs hex file
    InspectPublic { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = match &cli.command {
        Commands::Vk { file } => {
            encode_verification_key(&read_json::<VerificationKeyObject>(file)?)?
        }
        Commands::Proof { file } => encode_proof(&read_json::<ProofObject>(file)?)?,
        Commands::Public { file } => encode_public_inputs(&read_json::<PublicInputs>(file)?)?,
        Commands::InspectProof { file } => inspect_proof(&read_text(file)?)?,
        Commands::InspectPublic { file } => inspect_public(&read_text(file)?)?,
    };

    println!("{output}");
    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    serde_json::from_str(&read_text(path)?)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn inspect_proof(hex: &str) -> Result<String> {
    let bytes = hex_to_bytes(hex)?;
    let proof = read_proof(&bytes)?;

    // B limbs are stored c0 first, the verifier's order
    let sections = [
        ("A.x", &proof.a[..FQ_BYTES]),
        ("A.y", &proof.a[FQ_BYTES..]),
        ("B.x.c0", &proof.b[..FQ_BYTES]),
        ("B.x.c1", &proof.b[FQ_BYTES..2 * FQ_BYTES]),
        ("B.y.c0", &proof.b[2 * FQ_BYTES..3 * FQ_BYTES]),
        ("B.y.c1", &proof.b[3 * FQ_BYTES..]),
        ("C.x", &proof.c[..FQ_BYTES]),
        ("C.y", &proof.c[FQ_BYTES..]),
    ];

    let mut lines = vec![format!("proof: {} bytes", bytes.len())];
    lines.extend(sections.iter().map(|(label, limb)| {
        format!("{label:<7} {} = {}", hex::encode(limb), BigUint::from_bytes_be(limb))
    }));
    Ok(lines.join("\n"))
}

fn inspect_public(hex: &str) -> Result<String> {
    let bytes = hex_to_bytes(hex)?;
    let words = read_public_inputs(&bytes)?;

    let mut lines = vec![format!("public inputs: {}", words.len())];
    lines.extend(
        words
            .iter()
            .enumerate()
            .map(|(i, word)| format!("[{i}] {}", BigUint::from_bytes_be(word))),
    );
    Ok(lines.join("\n"))
}
