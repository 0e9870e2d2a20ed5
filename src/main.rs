//! meeting-merkle: fingerprint meeting records and prove item membership.
//!
//! - `root`   computes the Merkle root (and leaves) of a record file
//! - `prove`  writes a portable proof document for one item
//! - `verify` checks a proof document
//! - `check`  compares a record against a published root
//! - `leaf`   hashes a single item

use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use eyre::{bail, Result, WrapErr};
use meeting_merkle::config::{log_directives, LOG_ENV_VAR};
use meeting_merkle::{compute_leaf_hash, load_record, verify_record, Item, ProofDocument};
use tracing::info;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{registry, EnvFilter};

#[derive(Parser)]
#[command(name = "meeting-merkle")]
#[command(about = "Tamper-evident fingerprints and membership proofs for meeting records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the Merkle root of a meeting record
    Root {
        /// Path to the meeting record (JSON)
        record: PathBuf,

        /// Print root, leaves and every layer as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a membership proof document for one item
    Prove {
        /// Path to the meeting record (JSON)
        record: PathBuf,

        /// Zero-based index of the item to prove
        #[arg(long, short)]
        index: usize,

        /// Write the document here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Verify a proof document
    Verify {
        /// Path to the proof document (JSON)
        proof: PathBuf,
    },

    /// Check a meeting record against an expected root
    Check {
        /// Path to the meeting record (JSON)
        record: PathBuf,

        /// Expected root as 64 hex characters
        #[arg(long)]
        root: String,
    },

    /// Hash a single item into its leaf digest
    Leaf {
        /// Agenda text of the item
        #[arg(long)]
        agenda: String,

        /// Notes text of the item
        #[arg(long)]
        notes: String,

        /// Record salt, if the record has one
        #[arg(long)]
        salt: Option<String>,
    },
}

fn setup() -> Result<()> {
    let directives = log_directives(var(LOG_ENV_VAR).ok());

    registry()
        .with(EnvFilter::builder().parse(directives)?)
        .with(layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

/// Renders the root of a record, optionally with the full tree as JSON.
fn render_root(record_path: &Path, json: bool) -> Result<String> {
    let record = load_record(record_path)?;
    let tree = record.tree()?;
    if json {
        return serde_json::to_string_pretty(&tree).wrap_err("failed to encode tree");
    }
    let mut out = tree.root().to_hex();
    for (index, leaf) in tree.leaves().iter().enumerate() {
        out.push_str(&format!("\nLeaf {index}: {leaf}"));
    }
    Ok(out)
}

/// Builds the proof document for `index` and returns it as pretty JSON.
fn render_proof(record_path: &Path, index: usize) -> Result<String> {
    let record = load_record(record_path)?;
    if index >= record.items().len() {
        bail!(
            "Index {index} is out of bounds for items array of length {}",
            record.items().len()
        );
    }
    let document = ProofDocument::from_record(&record, index)?;
    serde_json::to_string_pretty(&document).wrap_err("failed to encode proof document")
}

fn prove(record_path: &Path, index: usize, output: Option<&Path>) -> Result<()> {
    let document = render_proof(record_path, index)?;
    match output {
        Some(path) => {
            fs::write(path, document)
                .wrap_err_with(|| format!("failed to write proof: {}", path.display()))?;
            info!(path = %path.display(), index, "wrote proof document");
        }
        None => println!("{document}"),
    }
    Ok(())
}

/// Returns the verified root, or an error describing which check failed.
fn verify_proof_file(proof_path: &Path) -> Result<String> {
    let text = fs::read_to_string(proof_path)
        .wrap_err_with(|| format!("failed to read proof: {}", proof_path.display()))?;
    let document = ProofDocument::from_json_str(&text)
        .wrap_err_with(|| format!("invalid proof document: {}", proof_path.display()))?;
    let report = document.verify();
    if !report.leaf_ok {
        bail!("Leaf hash does not match canonicalized item contents");
    }
    if !report.root_ok {
        bail!("Proof does not match the supplied root");
    }
    Ok(document.root.to_hex())
}

fn check(record_path: &Path, root: &str) -> Result<bool> {
    let record = load_record(record_path)?;
    Ok(verify_record(&record, root))
}

fn main() -> Result<ExitCode> {
    setup()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Root { record, json } => println!("{}", render_root(&record, json)?),
        Commands::Prove {
            record,
            index,
            output,
        } => prove(&record, index, output.as_deref())?,
        Commands::Verify { proof } => {
            let root = verify_proof_file(&proof)?;
            println!("Proof verified for root {root}");
        }
        Commands::Check { record, root } => {
            if !check(&record, &root)? {
                println!("Record does not match root {root}");
                return Ok(ExitCode::FAILURE);
            }
            println!("Record matches root {root}");
        }
        Commands::Leaf {
            agenda,
            notes,
            salt,
        } => println!(
            "{}",
            compute_leaf_hash(&Item::new(agenda, notes), salt.as_deref())
        ),
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const GOLDEN_ROOT: &str = "7a1ea358a7cf2b135d76c558f74ea39b1bfa37377d6a916d7a94fdfb8dfd0738";

    fn write_record(dir: &Path) -> PathBuf {
        let path = dir.join("meeting.json");
        let record = serde_json::json!({
            "meeting_id": "Team-Weekly-2025-09-18",
            "timestamp": "2025-09-18T10:00:00Z",
            "salt": "optional-random-string",
            "items": [
                {"agenda": "Budget Allocation for Q4", "notes": "Allocate 500 tokens to community fund."},
                {"agenda": "Project X Update", "notes": "Extend deadline to Nov 30."},
                {"agenda": "Onboarding", "notes": "No formal resolution."}
            ]
        });
        fs::write(&path, serde_json::to_string_pretty(&record).unwrap()).unwrap();
        path
    }

    #[test]
    fn root_lists_root_then_leaves() {
        let dir = tempdir().unwrap();
        let out = render_root(&write_record(dir.path()), false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], GOLDEN_ROOT);
        assert_eq!(
            lines[1],
            "Leaf 0: 742bafad6709b8e599774a9118f8b04bd1e3c59f03ac6d98fab4d4fb120cb730"
        );
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn root_json_exposes_layers() {
        let dir = tempdir().unwrap();
        let out = render_root(&write_record(dir.path()), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["root"], GOLDEN_ROOT);
        assert_eq!(value["layers"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn prove_then_verify() {
        let dir = tempdir().unwrap();
        let record = write_record(dir.path());
        let proof_path = dir.path().join("proof.json");
        prove(&record, 1, Some(&proof_path)).unwrap();
        assert_eq!(verify_proof_file(&proof_path).unwrap(), GOLDEN_ROOT);
    }

    #[test]
    fn verify_reports_tampered_item() {
        let dir = tempdir().unwrap();
        let record = write_record(dir.path());
        let mut document: serde_json::Value =
            serde_json::from_str(&render_proof(&record, 0).unwrap()).unwrap();
        document["item"]["agenda"] = serde_json::json!("Tampered agenda");
        let proof_path = dir.path().join("tampered.json");
        fs::write(&proof_path, document.to_string()).unwrap();
        let err = verify_proof_file(&proof_path).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Leaf hash does not match canonicalized item contents"
        );
    }

    #[test]
    fn prove_rejects_out_of_range_index() {
        let dir = tempdir().unwrap();
        let err = render_proof(&write_record(dir.path()), 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Index 3 is out of bounds for items array of length 3"
        );
    }

    #[test]
    fn check_compares_roots() {
        let dir = tempdir().unwrap();
        let record = write_record(dir.path());
        assert!(check(&record, GOLDEN_ROOT).unwrap());
        assert!(!check(&record, &"0".repeat(64)).unwrap());
        assert!(!check(&record, "not-hex").unwrap());
    }
}
