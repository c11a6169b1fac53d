use std::{fs, path::PathBuf, process::ExitCode};

use airdrop_tree::{verify, Distribution, Error, HasherKind};
use clap::{Parser, Subcommand};
use log::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "airdrop-tree", version, about = "Build and check merkle-airdrop distributions")]
struct Cli {
	/// Hash function of the tree, must match the runtime configuration.
	#[arg(long, value_enum, env = "AIRDROP_HASHER", default_value = "keccak256", global = true)]
	hasher: HasherKind,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Build the tree and print the root with every account's proof.
	Build {
		/// JSON file with `{ "claims": [{ "account": ..., "amount": ... }] }`.
		#[arg(long)]
		claims: PathBuf,
		/// Write the report here instead of stdout.
		#[arg(long)]
		out: Option<PathBuf>,
	},
	/// Print the amount and proof of a single account.
	Proof {
		#[arg(long)]
		claims: PathBuf,
		#[arg(long)]
		account: String,
	},
	/// Check a proof against a root.
	Verify {
		#[arg(long)]
		root: String,
		#[arg(long)]
		account: String,
		#[arg(long)]
		amount: u128,
		/// Proof elements from leaf to root, repeat for each element.
		#[arg(long = "proof")]
		proof: Vec<String>,
	},
}

fn run(cli: Cli) -> Result<bool, Error> {
	match cli.command {
		Command::Build { claims, out } => {
			let report = Distribution::from_file(&claims)?.build(cli.hasher)?;
			let json = serde_json::to_string_pretty(&report)?;
			match out {
				Some(path) => {
					fs::write(&path, json).map_err(|source| Error::Io {
						path: path.display().to_string(),
						source,
					})?;
					info!("wrote {} proofs to {}", report.claims.len(), path.display());
				},
				None => println!("{json}"),
			}
			Ok(true)
		},
		Command::Proof { claims, account } => {
			let report = Distribution::from_file(&claims)?.build(cli.hasher)?;
			let claim = report.claim_of(&account)?;
			println!("{}", serde_json::to_string_pretty(claim)?);
			Ok(true)
		},
		Command::Verify { root, account, amount, proof } => {
			let valid = verify(cli.hasher, &root, &account, amount, &proof)?;
			if valid {
				info!("proof of {account} for {amount} is valid");
			} else {
				warn!("proof of {account} for {amount} does not match {root}");
			}
			Ok(valid)
		},
	}
}

fn main() -> ExitCode {
	env_logger::init();

	match run(Cli::parse()) {
		Ok(true) => ExitCode::SUCCESS,
		Ok(false) => ExitCode::FAILURE,
		Err(e) => {
			error!("{e}");
			ExitCode::FAILURE
		},
	}
}
