//! weights for pallet_merkle_airdrop

#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]

use frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

/// Weight functions needed for pallet_merkle_airdrop.
pub trait WeightInfo {
	fn create_airdrop() -> Weight;
	fn fund_airdrop() -> Weight;
	fn claim(p: u32, ) -> Weight;
	fn withdraw() -> Weight;
	fn grant_role() -> Weight;
	fn revoke_role() -> Weight;
}

/// Weights for pallet_merkle_airdrop using the Substrate node and recommended hardware.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
	/// Storage: `MerkleAirdrop::NextAirdropId` (r:1 w:1)
	/// Storage: `MerkleAirdrop::Airdrops` (r:0 w:1)
	/// Storage: `MerkleAirdrop::Roles` (r:0 w:1)
	/// Storage: `System::Account` (r:1 w:1)
	fn create_airdrop() -> Weight {
		Weight::from_parts(12_000_000, 3_593)
			.saturating_add(T::DbWeight::get().reads(2_u64))
			.saturating_add(T::DbWeight::get().writes(4_u64))
	}
	/// Storage: `MerkleAirdrop::Airdrops` (r:1 w:0)
	/// Storage: `Assets::Asset` (r:1 w:1)
	/// Storage: `Assets::Account` (r:2 w:2)
	fn fund_airdrop() -> Weight {
		Weight::from_parts(30_000_000, 6_208)
			.saturating_add(T::DbWeight::get().reads(4_u64))
			.saturating_add(T::DbWeight::get().writes(3_u64))
	}
	/// Storage: `MerkleAirdrop::Airdrops` (r:1 w:0)
	/// Storage: `MerkleAirdrop::Claimed` (r:1 w:1)
	/// Storage: `Assets::Asset` (r:1 w:1)
	/// Storage: `Assets::Account` (r:2 w:2)
	/// The range of component `p` is `[0, 32]`.
	fn claim(p: u32, ) -> Weight {
		Weight::from_parts(35_000_000, 6_208)
			// Standard Error: 1_500
			.saturating_add(Weight::from_parts(550_000, 0).saturating_mul(p.into()))
			.saturating_add(T::DbWeight::get().reads(5_u64))
			.saturating_add(T::DbWeight::get().writes(4_u64))
	}
	/// Storage: `MerkleAirdrop::Airdrops` (r:1 w:0)
	/// Storage: `MerkleAirdrop::Roles` (r:2 w:0)
	/// Storage: `Assets::Asset` (r:1 w:1)
	/// Storage: `Assets::Account` (r:2 w:2)
	fn withdraw() -> Weight {
		Weight::from_parts(32_000_000, 6_208)
			.saturating_add(T::DbWeight::get().reads(6_u64))
			.saturating_add(T::DbWeight::get().writes(3_u64))
	}
	/// Storage: `MerkleAirdrop::Airdrops` (r:1 w:0)
	/// Storage: `MerkleAirdrop::Roles` (r:2 w:1)
	fn grant_role() -> Weight {
		Weight::from_parts(11_000_000, 3_513)
			.saturating_add(T::DbWeight::get().reads(3_u64))
			.saturating_add(T::DbWeight::get().writes(1_u64))
	}
	/// Storage: `MerkleAirdrop::Airdrops` (r:1 w:0)
	/// Storage: `MerkleAirdrop::Roles` (r:2 w:1)
	fn revoke_role() -> Weight {
		Weight::from_parts(11_000_000, 3_513)
			.saturating_add(T::DbWeight::get().reads(3_u64))
			.saturating_add(T::DbWeight::get().writes(1_u64))
	}
}

// For backwards compatibility and tests
impl WeightInfo for () {
	fn create_airdrop() -> Weight {
		Weight::from_parts(12_000_000, 3_593)
			.saturating_add(RocksDbWeight::get().reads(2_u64))
			.saturating_add(RocksDbWeight::get().writes(4_u64))
	}
	fn fund_airdrop() -> Weight {
		Weight::from_parts(30_000_000, 6_208)
			.saturating_add(RocksDbWeight::get().reads(4_u64))
			.saturating_add(RocksDbWeight::get().writes(3_u64))
	}
	fn claim(p: u32, ) -> Weight {
		Weight::from_parts(35_000_000, 6_208)
			.saturating_add(Weight::from_parts(550_000, 0).saturating_mul(p.into()))
			.saturating_add(RocksDbWeight::get().reads(5_u64))
			.saturating_add(RocksDbWeight::get().writes(4_u64))
	}
	fn withdraw() -> Weight {
		Weight::from_parts(32_000_000, 6_208)
			.saturating_add(RocksDbWeight::get().reads(6_u64))
			.saturating_add(RocksDbWeight::get().writes(3_u64))
	}
	fn grant_role() -> Weight {
		Weight::from_parts(11_000_000, 3_513)
			.saturating_add(RocksDbWeight::get().reads(3_u64))
			.saturating_add(RocksDbWeight::get().writes(1_u64))
	}
	fn revoke_role() -> Weight {
		Weight::from_parts(11_000_000, 3_513)
			.saturating_add(RocksDbWeight::get().reads(3_u64))
			.saturating_add(RocksDbWeight::get().writes(1_u64))
	}
}
