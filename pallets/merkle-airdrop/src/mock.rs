//! Mock runtime for pallet-merkle-airdrop.
//!
//! The token is a `pallet_assets` asset deployed by [`DEPLOYER`] when the externalities are
//! built. Distributions are plain `(account, amount)` lists turned into trees with
//! `qp_merkle_airdrop`, exactly as off-chain tooling would do it.

use crate as pallet_merkle_airdrop;
use frame_support::{
	assert_ok, derive_impl, parameter_types,
	traits::{AsEnsureOriginWithArg, ConstU128, ConstU32},
	BoundedVec, PalletId,
};
use frame_system::{EnsureRoot, EnsureSigned};
use qp_merkle_airdrop::{Keccak256, MerkleHash, MerkleTree};
use sp_runtime::BuildStorage;

type Block = frame_system::mocking::MockBlock<Test>;
pub type AccountId = u64;
pub type Balance = u128;
pub type AssetId = u32;

frame_support::construct_runtime!(
	pub enum Test {
		System: frame_system,
		Balances: pallet_balances,
		Assets: pallet_assets,
		MerkleAirdrop: pallet_merkle_airdrop,
	}
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
	type Block = Block;
	type AccountData = pallet_balances::AccountData<Balance>;
}

#[derive_impl(pallet_balances::config_preludes::TestDefaultConfig)]
impl pallet_balances::Config for Test {
	type Balance = Balance;
	type ExistentialDeposit = ConstU128<1>;
	type AccountStore = System;
}

parameter_types! {
	pub const AssetDeposit: Balance = 0;
	pub const AssetAccountDeposit: Balance = 0;
	pub const AssetsStringLimit: u32 = 50;
	pub const MetadataDepositBase: Balance = 0;
	pub const MetadataDepositPerByte: Balance = 0;
}

impl pallet_assets::Config for Test {
	type Balance = Balance;
	type RuntimeEvent = RuntimeEvent;
	type AssetId = AssetId;
	type AssetIdParameter = codec::Compact<AssetId>;
	type Currency = Balances;
	type CreateOrigin = AsEnsureOriginWithArg<EnsureSigned<AccountId>>;
	type ForceOrigin = EnsureRoot<AccountId>;
	type AssetDeposit = AssetDeposit;
	type MetadataDepositBase = MetadataDepositBase;
	type MetadataDepositPerByte = MetadataDepositPerByte;
	type ApprovalDeposit = ConstU128<0>;
	type StringLimit = AssetsStringLimit;
	type Freezer = ();
	type Extra = ();
	type WeightInfo = ();
	type CallbackHandle = ();
	type AssetAccountDeposit = AssetAccountDeposit;
	type RemoveItemsLimit = ConstU32<1000>;
	type Holder = ();
	#[cfg(feature = "runtime-benchmarks")]
	type BenchmarkHelper = ();
}

parameter_types! {
	pub const AirdropPalletId: PalletId = PalletId(*b"py/airdr");
	pub const MaxAirdrops: u32 = 5;
	pub const MaxProofs: u32 = 32;
}

impl pallet_merkle_airdrop::Config for Test {
	type AssetId = AssetId;
	type Assets = Assets;
	type MerkleHasher = Keccak256;
	type MaxAirdrops = MaxAirdrops;
	type MaxProofs = MaxProofs;
	type PalletId = AirdropPalletId;
	type WeightInfo = ();
	#[cfg(feature = "runtime-benchmarks")]
	type BenchmarkHelper = AirdropBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct AirdropBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl pallet_merkle_airdrop::BenchmarkHelper<AssetId> for AirdropBenchmarkHelper {
	fn asset_id() -> AssetId {
		7
	}
}

// Named accounts
pub const DEPLOYER: AccountId = 1;
pub const ALICE: AccountId = 2;
pub const BOB: AccountId = 3;
pub const CHARLIE: AccountId = 4;
/// Funded, but not part of any distribution.
pub const MALLORY: AccountId = 5;

pub fn named_account(name: &str) -> Option<AccountId> {
	match name {
		"deployer" => Some(DEPLOYER),
		"alice" => Some(ALICE),
		"bob" => Some(BOB),
		"charlie" => Some(CHARLIE),
		"mallory" => Some(MALLORY),
		_ => None,
	}
}

/// The airdropped token.
pub const TOKEN: AssetId = 42;
pub const INITIAL_SUPPLY: Balance = 1_000_000;

/// Who gets what in the default distribution.
pub fn distribution() -> Vec<(AccountId, Balance)> {
	vec![(ALICE, 100), (BOB, 250), (CHARLIE, 400)]
}

pub fn distribution_total() -> Balance {
	distribution().iter().map(|(_, amount)| amount).sum()
}

pub fn tree_of(claims: Vec<(AccountId, Balance)>) -> MerkleTree<Keccak256> {
	MerkleTree::from_claims(claims).expect("test distributions are non-empty and unique")
}

pub fn bounded_proof(proof: Vec<MerkleHash>) -> BoundedVec<MerkleHash, MaxProofs> {
	proof.try_into().expect("test proofs fit MaxProofs")
}

/// Proof for a claim of the default distribution.
pub fn proof_for(account: AccountId, amount: Balance) -> BoundedVec<MerkleHash, MaxProofs> {
	let proof = tree_of(distribution())
		.proof_for(&account, &amount)
		.expect("claim is part of the distribution");
	bounded_proof(proof)
}

pub fn token_balance(who: AccountId) -> Balance {
	Assets::balance(TOKEN, who)
}

/// Creates [`TOKEN`] and mints the whole supply to [`DEPLOYER`].
fn deploy_token() {
	assert_ok!(Assets::force_create(RuntimeOrigin::root(), TOKEN.into(), DEPLOYER, true, 1));
	assert_ok!(Assets::mint(RuntimeOrigin::signed(DEPLOYER), TOKEN.into(), DEPLOYER, INITIAL_SUPPLY));
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
	let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

	pallet_balances::GenesisConfig::<Test> {
		balances: vec![
			(DEPLOYER, 10_000),
			(ALICE, 10_000),
			(BOB, 10_000),
			(CHARLIE, 10_000),
			(MALLORY, 10_000),
		],
		dev_accounts: None,
	}
	.assimilate_storage(&mut t)
	.unwrap();

	let mut ext = sp_io::TestExternalities::new(t);
	ext.execute_with(|| {
		System::set_block_number(1);
		deploy_token();
	});
	ext
}
