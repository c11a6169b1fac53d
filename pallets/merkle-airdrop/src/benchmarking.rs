//! Benchmarking setup for pallet-merkle-airdrop

use super::*;

#[allow(unused)]
use crate::Pallet as MerkleAirdrop;
use alloc::vec::Vec;
use frame_benchmarking::v2::*;
use frame_support::{
	traits::{
		fungibles::{Create, Inspect, Mutate},
		Get,
	},
	BoundedVec,
};
use frame_system::RawOrigin;

const SEED: u32 = 0;

fn create_token<T: Config>(admin: &T::AccountId) -> T::AssetId
where
	T::Assets: Create<T::AccountId>,
{
	let asset_id = T::BenchmarkHelper::asset_id();
	if !T::Assets::asset_exists(asset_id) {
		T::Assets::create(asset_id, admin.clone(), true, 1u32.into())
			.expect("benchmark asset can be created");
	}
	asset_id
}

fn funded_airdrop<T: Config>(
	owner: &T::AccountId,
	merkle_root: MerkleRoot,
	amount: AssetBalanceOf<T>,
) -> AirdropId
where
	T::Assets: Create<T::AccountId>,
{
	let asset_id = create_token::<T>(owner);
	let airdrop_id = NextAirdropId::<T>::get();
	Pallet::<T>::create_airdrop(RawOrigin::Signed(owner.clone()).into(), asset_id, merkle_root)
		.expect("airdrop can be created");
	T::Assets::mint_into(asset_id, &Pallet::<T>::airdrop_account(airdrop_id), amount)
		.expect("airdrop can be funded");
	airdrop_id
}

#[benchmarks(where T::Assets: Create<T::AccountId>)]
mod benchmarks {
	use super::*;

	#[benchmark]
	fn create_airdrop() {
		let caller: T::AccountId = whitelisted_caller();
		let asset_id = create_token::<T>(&caller);
		let airdrop_id = NextAirdropId::<T>::get();
		let merkle_root = [0u8; 32];

		#[extrinsic_call]
		_(RawOrigin::Signed(caller.clone()), asset_id, merkle_root);

		assert!(Pallet::<T>::has_role(airdrop_id, &caller, Role::Admin));
	}

	#[benchmark]
	fn fund_airdrop() {
		let caller: T::AccountId = whitelisted_caller();
		let airdrop_id = funded_airdrop::<T>(&caller, [0u8; 32], 1u32.into());
		let asset_id = create_token::<T>(&caller);
		T::Assets::mint_into(asset_id, &caller, 10_000u32.into()).expect("caller can be funded");
		let amount: AssetBalanceOf<T> = 1_000u32.into();

		#[extrinsic_call]
		_(RawOrigin::Signed(caller), airdrop_id, amount);

		assert_eq!(Pallet::<T>::airdrop_balance(airdrop_id), 1_001u32.into());
	}

	#[benchmark]
	fn claim(p: Linear<0, { T::MaxProofs::get() }>) {
		let caller: T::AccountId = whitelisted_caller();
		let amount: AssetBalanceOf<T> = 1_000u32.into();

		// Any sibling path is a valid proof for the root it folds into.
		let proof: Vec<MerkleHash> = (0..p).map(|i| [(i % 256) as u8; 32]).collect();
		let leaf = qp_merkle_airdrop::leaf_hash::<T::MerkleHasher, _, _>(&caller, &amount);
		let merkle_root = qp_merkle_airdrop::process_proof::<T::MerkleHasher>(leaf, &proof);
		let proof: BoundedVec<MerkleHash, T::MaxProofs> =
			proof.try_into().expect("p is bounded by MaxProofs");

		let owner: T::AccountId = account("owner", 0, SEED);
		let airdrop_id = funded_airdrop::<T>(&owner, merkle_root, amount);

		#[extrinsic_call]
		_(RawOrigin::Signed(caller.clone()), airdrop_id, amount, proof);

		assert!(Pallet::<T>::is_claimed(airdrop_id, &caller));
	}

	#[benchmark]
	fn withdraw() {
		let owner: T::AccountId = account("owner", 0, SEED);
		let withdrawer: T::AccountId = whitelisted_caller();
		let airdrop_id = funded_airdrop::<T>(&owner, [0u8; 32], 1_000u32.into());
		Roles::<T>::insert((airdrop_id, &withdrawer, Role::Withdrawer), ());

		#[extrinsic_call]
		_(RawOrigin::Signed(withdrawer.clone()), airdrop_id, withdrawer.clone());

		assert_eq!(Pallet::<T>::airdrop_balance(airdrop_id), 0u32.into());
	}

	#[benchmark]
	fn grant_role() {
		let caller: T::AccountId = whitelisted_caller();
		let grantee: T::AccountId = account("grantee", 0, SEED);
		let airdrop_id = funded_airdrop::<T>(&caller, [0u8; 32], 1u32.into());

		#[extrinsic_call]
		_(RawOrigin::Signed(caller), airdrop_id, grantee.clone(), Role::Withdrawer);

		assert!(Pallet::<T>::has_role(airdrop_id, &grantee, Role::Withdrawer));
	}

	#[benchmark]
	fn revoke_role() {
		let caller: T::AccountId = whitelisted_caller();
		let grantee: T::AccountId = account("grantee", 0, SEED);
		let airdrop_id = funded_airdrop::<T>(&caller, [0u8; 32], 1u32.into());
		Roles::<T>::insert((airdrop_id, &grantee, Role::Withdrawer), ());

		#[extrinsic_call]
		_(RawOrigin::Signed(caller), airdrop_id, grantee.clone(), Role::Withdrawer);

		assert!(!Pallet::<T>::has_role(airdrop_id, &grantee, Role::Withdrawer));
	}

	impl_benchmark_test_suite!(MerkleAirdrop, crate::mock::new_test_ext(), crate::mock::Test);
}
