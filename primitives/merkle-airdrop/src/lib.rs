//! Merkle airdrop primitives
//!
//! Hashing, proof verification and tree construction shared by `pallet-merkle-airdrop`
//! and the off-chain tooling that prepares a distribution.
//!
//! Leaves commit to a SCALE-encoded `(account, amount)` pair. Inner nodes hash their two
//! children in ascending byte order, so a proof is just the list of sibling hashes from
//! the leaf up to the root and carries no position information.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::{collections::BTreeSet, vec::Vec};
use codec::Encode;
use core::{fmt, marker::PhantomData};

/// A node of the tree.
pub type MerkleHash = [u8; 32];

/// Hash function used for both leaves and inner nodes.
pub trait MerkleHasher {
	fn hash(data: &[u8]) -> MerkleHash;
}

/// Keccak-256, the usual choice for airdrops whose trees are built by EVM tooling.
pub struct Keccak256;

impl MerkleHasher for Keccak256 {
	fn hash(data: &[u8]) -> MerkleHash {
		sp_crypto_hashing::keccak_256(data)
	}
}

/// Blake2b-256, the native Substrate hash.
pub struct Blake2_256;

impl MerkleHasher for Blake2_256 {
	fn hash(data: &[u8]) -> MerkleHash {
		sp_crypto_hashing::blake2_256(data)
	}
}

/// Hash of a single claim.
pub fn leaf_hash<H: MerkleHasher, A: Encode, B: Encode>(account: &A, amount: &B) -> MerkleHash {
	(account, amount).using_encoded(H::hash)
}

/// Parent of two nodes. The smaller child always goes first.
pub fn node_hash<H: MerkleHasher>(a: &MerkleHash, b: &MerkleHash) -> MerkleHash {
	let mut combined = [0u8; 64];
	let (first, second) = if a <= b { (a, b) } else { (b, a) };
	combined[..32].copy_from_slice(first);
	combined[32..].copy_from_slice(second);
	H::hash(&combined)
}

/// Root obtained by walking `proof` upwards from `leaf`.
pub fn process_proof<H: MerkleHasher>(leaf: MerkleHash, proof: &[MerkleHash]) -> MerkleHash {
	proof.iter().fold(leaf, |computed, sibling| node_hash::<H>(&computed, sibling))
}

/// Whether `proof` links `leaf` to `root`.
pub fn verify_proof<H: MerkleHasher>(
	root: &MerkleHash,
	leaf: MerkleHash,
	proof: &[MerkleHash],
) -> bool {
	process_proof::<H>(leaf, proof) == *root
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
	/// A tree needs at least one leaf.
	NoLeaves,
	/// The same leaf appears twice, so one of them could never be claimed.
	DuplicateLeaf(MerkleHash),
}

impl fmt::Display for TreeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TreeError::NoLeaves => write!(f, "cannot build a merkle tree without leaves"),
			TreeError::DuplicateLeaf(leaf) => {
				write!(f, "duplicate leaf 0x")?;
				for byte in leaf {
					write!(f, "{:02x}", byte)?;
				}
				Ok(())
			},
		}
	}
}

#[cfg(feature = "std")]
impl std::error::Error for TreeError {}

/// A fully materialised sorted-pair tree.
///
/// `layers[0]` holds the leaves in insertion order and the last layer holds the root. A node
/// without a sibling is promoted to the next layer unchanged.
pub struct MerkleTree<H> {
	layers: Vec<Vec<MerkleHash>>,
	_hasher: PhantomData<H>,
}

impl<H: MerkleHasher> MerkleTree<H> {
	pub fn from_leaves(leaves: Vec<MerkleHash>) -> Result<Self, TreeError> {
		if leaves.is_empty() {
			return Err(TreeError::NoLeaves)
		}

		let mut seen = BTreeSet::new();
		for leaf in &leaves {
			if !seen.insert(*leaf) {
				return Err(TreeError::DuplicateLeaf(*leaf))
			}
		}

		let mut layers = Vec::new();
		let mut current = leaves;
		while current.len() > 1 {
			let next = current
				.chunks(2)
				.map(|pair| match pair {
					[left, right] => node_hash::<H>(left, right),
					[single] => *single,
					_ => unreachable!("chunks(2) yields one or two elements"),
				})
				.collect();
			layers.push(core::mem::replace(&mut current, next));
		}
		layers.push(current);

		Ok(Self { layers, _hasher: PhantomData })
	}

	/// Builds the tree for a list of `(account, amount)` claims.
	pub fn from_claims<A: Encode, B: Encode>(
		claims: impl IntoIterator<Item = (A, B)>,
	) -> Result<Self, TreeError> {
		let leaves =
			claims.into_iter().map(|(account, amount)| leaf_hash::<H, _, _>(&account, &amount));
		Self::from_leaves(leaves.collect())
	}

	pub fn root(&self) -> MerkleHash {
		// `from_leaves` never produces an empty top layer.
		self.layers.last().and_then(|top| top.first()).copied().unwrap_or_default()
	}

	pub fn leaves(&self) -> &[MerkleHash] {
		&self.layers[0]
	}

	pub fn leaf_count(&self) -> usize {
		self.layers[0].len()
	}

	pub fn leaf_index(&self, leaf: &MerkleHash) -> Option<usize> {
		self.layers[0].iter().position(|candidate| candidate == leaf)
	}

	/// Sibling path for the leaf at `index`, or `None` when out of range.
	pub fn proof(&self, index: usize) -> Option<Vec<MerkleHash>> {
		if index >= self.leaf_count() {
			return None
		}

		let mut proof = Vec::with_capacity(self.layers.len());
		let mut position = index;
		for layer in &self.layers[..self.layers.len() - 1] {
			if let Some(sibling) = layer.get(position ^ 1) {
				proof.push(*sibling);
			}
			position /= 2;
		}
		Some(proof)
	}

	/// Proof for a claim, if the claim is part of the tree.
	pub fn proof_for<A: Encode, B: Encode>(&self, account: &A, amount: &B) -> Option<Vec<MerkleHash>> {
		let leaf = leaf_hash::<H, _, _>(account, amount);
		self.leaf_index(&leaf).and_then(|index| self.proof(index))
	}
}
