//! Off-chain side of `pallet-merkle-airdrop`.
//!
//! Reads a list of `(account, amount)` claims, builds the distribution tree with the same
//! hashing rules the pallet verifies against and produces the root to register on-chain plus
//! one proof per account.

use std::{collections::BTreeSet, fs, path::Path};

use log::{debug, info};
use qp_merkle_airdrop::{Blake2_256, Keccak256, MerkleHash, MerkleHasher, MerkleTree, TreeError};
use serde::{Deserialize, Serialize};
use sp_core::crypto::{AccountId32, Ss58Codec};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("failed to read {path}: {source}")]
	Io { path: String, source: std::io::Error },
	#[error("malformed json: {0}")]
	Json(#[from] serde_json::Error),
	#[error("invalid account `{0}`, expected an SS58 address or 0x-prefixed 32-byte hex")]
	InvalidAccount(String),
	#[error("invalid hash `{0}`, expected 0x-prefixed 32-byte hex")]
	InvalidHash(String),
	#[error("account {0} appears more than once in the claims")]
	DuplicateAccount(String),
	#[error("account {0} is listed with a zero amount, which can never be claimed")]
	ZeroAmount(String),
	#[error("the claims add up to more than {}", u128::MAX)]
	TotalOverflow,
	#[error("account {0} is not part of the distribution")]
	UnknownAccount(String),
	#[error(transparent)]
	Tree(#[from] TreeError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Hash function of the tree. Must match the runtime's `MerkleHasher`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum HasherKind {
	#[serde(rename = "keccak256")]
	#[value(name = "keccak256")]
	Keccak256,
	#[serde(rename = "blake2-256")]
	#[value(name = "blake2-256")]
	Blake2_256,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimsFile {
	pub claims: Vec<ClaimEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimEntry {
	pub account: String,
	pub amount: u128,
}

/// Output of `build`: everything needed to register and claim the airdrop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeReport {
	pub hasher: HasherKind,
	pub root: String,
	pub claims: Vec<ClaimProof>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimProof {
	pub account: String,
	pub amount: u128,
	pub leaf: String,
	pub proof: Vec<String>,
}

/// A validated list of claims.
#[derive(Debug, Clone)]
pub struct Distribution {
	claims: Vec<(AccountId32, u128)>,
	total: u128,
}

impl Distribution {
	pub fn from_file(path: &Path) -> Result<Self> {
		let raw = fs::read_to_string(path)
			.map_err(|source| Error::Io { path: path.display().to_string(), source })?;
		Self::from_json(&raw)
	}

	pub fn from_json(raw: &str) -> Result<Self> {
		let file: ClaimsFile = serde_json::from_str(raw)?;
		let mut seen = BTreeSet::new();
		let mut claims = Vec::with_capacity(file.claims.len());
		let mut total = 0u128;

		for entry in file.claims {
			let account = parse_account(&entry.account)?;
			if !seen.insert(account.clone()) {
				return Err(Error::DuplicateAccount(entry.account))
			}
			if entry.amount == 0 {
				return Err(Error::ZeroAmount(entry.account))
			}
			total = total.checked_add(entry.amount).ok_or(Error::TotalOverflow)?;
			claims.push((account, entry.amount));
		}

		debug!("parsed {} claims", claims.len());
		Ok(Self { claims, total })
	}

	pub fn len(&self) -> usize {
		self.claims.len()
	}

	pub fn is_empty(&self) -> bool {
		self.claims.is_empty()
	}

	/// Amount the airdrop must be funded with to pay out every claim.
	pub fn total(&self) -> u128 {
		self.total
	}

	pub fn build(&self, hasher: HasherKind) -> Result<TreeReport> {
		match hasher {
			HasherKind::Keccak256 => self.build_with::<Keccak256>(hasher),
			HasherKind::Blake2_256 => self.build_with::<Blake2_256>(hasher),
		}
	}

	fn build_with<H: MerkleHasher>(&self, hasher: HasherKind) -> Result<TreeReport> {
		let tree = MerkleTree::<H>::from_claims(self.claims.iter().map(|(a, b)| (a, b)))?;

		let claims = self
			.claims
			.iter()
			.zip(tree.leaves())
			.enumerate()
			.map(|(index, ((account, amount), leaf))| ClaimProof {
				account: account.to_ss58check(),
				amount: *amount,
				leaf: encode_hash(leaf),
				proof: tree.proof(index).unwrap_or_default().iter().map(encode_hash).collect(),
			})
			.collect();

		let root = encode_hash(&tree.root());
		info!("built tree of {} claims worth {} with root {}", self.len(), self.total(), root);

		Ok(TreeReport { hasher, root, claims })
	}
}

impl TreeReport {
	/// The proof entry of `account`, which may be given in any accepted format.
	pub fn claim_of(&self, account: &str) -> Result<&ClaimProof> {
		let wanted = parse_account(account)?.to_ss58check();
		self.claims
			.iter()
			.find(|claim| claim.account == wanted)
			.ok_or_else(|| Error::UnknownAccount(account.to_string()))
	}
}

/// Checks a single claim against a root.
pub fn verify(
	hasher: HasherKind,
	root: &str,
	account: &str,
	amount: u128,
	proof: &[String],
) -> Result<bool> {
	let root = parse_hash(root)?;
	let account = parse_account(account)?;
	let proof = proof.iter().map(|p| parse_hash(p)).collect::<Result<Vec<_>>>()?;

	Ok(match hasher {
		HasherKind::Keccak256 => verify_with::<Keccak256>(&root, &account, amount, &proof),
		HasherKind::Blake2_256 => verify_with::<Blake2_256>(&root, &account, amount, &proof),
	})
}

fn verify_with<H: MerkleHasher>(
	root: &MerkleHash,
	account: &AccountId32,
	amount: u128,
	proof: &[MerkleHash],
) -> bool {
	let leaf = qp_merkle_airdrop::leaf_hash::<H, _, _>(account, &amount);
	qp_merkle_airdrop::verify_proof::<H>(root, leaf, proof)
}

/// Accepts SS58 addresses and raw 0x-prefixed public keys.
pub fn parse_account(raw: &str) -> Result<AccountId32> {
	let raw = raw.trim();
	if let Some(hex_part) = raw.strip_prefix("0x") {
		let bytes: [u8; 32] = hex::decode(hex_part)
			.ok()
			.and_then(|bytes| bytes.try_into().ok())
			.ok_or_else(|| Error::InvalidAccount(raw.to_string()))?;
		return Ok(AccountId32::new(bytes))
	}
	AccountId32::from_ss58check(raw).map_err(|_| Error::InvalidAccount(raw.to_string()))
}

pub fn parse_hash(raw: &str) -> Result<MerkleHash> {
	let raw = raw.trim();
	raw.strip_prefix("0x")
		.and_then(|hex_part| hex::decode(hex_part).ok())
		.and_then(|bytes| bytes.try_into().ok())
		.ok_or_else(|| Error::InvalidHash(raw.to_string()))
}

pub fn encode_hash(hash: &MerkleHash) -> String {
	format!("0x{}", hex::encode(hash))
}
