//! # Merkle Airdrop Pallet
//!
//! A pallet for distributing tokens via Merkle proofs, allowing efficient token airdrops
//! where recipients can claim their tokens by providing cryptographic proofs of eligibility.
//!
//! ## Overview
//!
//! Every airdrop is bound to one token (an asset of the configured `fungibles` backend) and to
//! a Merkle root committing to the full list of `(account, amount)` claims. The tokens being
//! distributed sit in a sub-account of the pallet derived from the airdrop ID, so each airdrop
//! behaves like its own small distribution contract:
//!
//! - anyone can fund it with the airdropped token,
//! - each listed account can claim its amount exactly once by presenting a proof,
//! - holders of the `Admin` or `Withdrawer` role can withdraw whatever is left.
//!
//! The account that creates an airdrop becomes its owner and holds the `Admin` role, which
//! lets it grant and revoke roles for that airdrop. The owner can never lose `Admin`.
//!
//! Trees are built off-chain with [`qp_merkle_airdrop::MerkleTree`] using the same
//! [`Config::MerkleHasher`] as the pallet.
//!
//! ## Interface
//!
//! ### Dispatchable Functions
//!
//! * `create_airdrop` - Create a new airdrop for a token with a Merkle root
//! * `fund_airdrop` - Fund an existing airdrop with tokens
//! * `claim` - Claim tokens from an airdrop by providing a Merkle proof
//! * `withdraw` - Move the unclaimed remainder out of an airdrop
//! * `grant_role` / `revoke_role` - Manage who may administer an airdrop

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;
pub mod weights;
pub use weights::*;

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use frame_support::traits::fungibles;
use scale_info::TypeInfo;
use sp_runtime::RuntimeDebug;

pub use qp_merkle_airdrop::{MerkleHash, MerkleHasher};

const LOG_TARGET: &str = "runtime::merkle-airdrop";

/// Balance type of the token backend.
pub type AssetBalanceOf<T> = <<T as Config>::Assets as fungibles::Inspect<
	<T as frame_system::Config>::AccountId,
>>::Balance;

/// Type for storing a Merkle root hash
pub type MerkleRoot = MerkleHash;

/// Airdrop ID type
pub type AirdropId = u32;

/// Everything the chain needs to know about a single airdrop.
#[derive(Encode, Decode, MaxEncodedLen, Clone, TypeInfo, RuntimeDebug, PartialEq, Eq)]
pub struct AirdropMetadata<AssetId, AccountId> {
	/// Root of the claims tree
	pub merkle_root: MerkleRoot,
	/// Token being distributed
	pub asset_id: AssetId,
	/// Creator of the airdrop. Always holds [`Role::Admin`].
	pub owner: AccountId,
}

pub type AirdropMetadataOf<T> =
	AirdropMetadata<<T as Config>::AssetId, <T as frame_system::Config>::AccountId>;

/// Capabilities that can be held on an airdrop.
#[derive(
	Encode,
	Decode,
	DecodeWithMemTracking,
	MaxEncodedLen,
	Clone,
	Copy,
	TypeInfo,
	RuntimeDebug,
	PartialEq,
	Eq,
)]
pub enum Role {
	/// Manage roles and withdraw funds.
	Admin,
	/// Withdraw funds.
	Withdrawer,
}

#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AssetId> {
	/// An asset ID that is free to be created by the benchmarks.
	fn asset_id() -> AssetId;
}

#[frame_support::pallet]
pub mod pallet {
	use super::*;
	use frame_support::{
		pallet_prelude::*,
		traits::{
			fungibles::{Inspect, Mutate},
			tokens::{Fortitude, Preservation},
		},
		PalletId,
	};
	use frame_system::pallet_prelude::*;
	use sp_runtime::traits::{AccountIdConversion, Zero};

	use super::weights::WeightInfo;

	#[pallet::pallet]
	pub struct Pallet<T>(_);

	/// Configuration trait for the Merkle airdrop pallet.
	#[pallet::config]
	pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
		/// Identifier of the token an airdrop distributes.
		type AssetId: Member + Parameter + Copy + MaxEncodedLen;

		/// The token backend.
		type Assets: fungibles::Inspect<Self::AccountId, AssetId = Self::AssetId>
			+ fungibles::Mutate<Self::AccountId>;

		/// Hash used for leaves and inner nodes. Must match the one used to build the trees.
		type MerkleHasher: MerkleHasher;

		/// The maximum number of airdrops that can ever be created.
		#[pallet::constant]
		type MaxAirdrops: Get<u32>;

		/// The maximum number of elements in a Merkle proof.
		#[pallet::constant]
		type MaxProofs: Get<u32>;

		/// The pallet id, used for deriving the account that holds each airdrop's funds.
		#[pallet::constant]
		type PalletId: Get<PalletId>;

		/// Weight information for the extrinsics in this pallet.
		type WeightInfo: WeightInfo;

		#[cfg(feature = "runtime-benchmarks")]
		type BenchmarkHelper: BenchmarkHelper<Self::AssetId>;
	}

	/// Proof supplied with a claim.
	pub type MerkleProofOf<T> = BoundedVec<MerkleHash, <T as Config>::MaxProofs>;

	/// Metadata of each airdrop
	#[pallet::storage]
	pub type Airdrops<T: Config> = StorageMap<_, Blake2_128Concat, AirdropId, AirdropMetadataOf<T>>;

	/// Storage for claimed status
	#[pallet::storage]
	pub type Claimed<T: Config> = StorageDoubleMap<
		_,
		Blake2_128Concat,
		AirdropId,
		Blake2_128Concat,
		T::AccountId,
		bool,
		ValueQuery,
	>;

	/// Roles held per airdrop
	#[pallet::storage]
	pub type Roles<T: Config> = StorageNMap<
		_,
		(
			NMapKey<Blake2_128Concat, AirdropId>,
			NMapKey<Blake2_128Concat, T::AccountId>,
			NMapKey<Twox64Concat, Role>,
		),
		(),
		OptionQuery,
	>;

	/// Counter for airdrop IDs
	#[pallet::storage]
	pub type NextAirdropId<T> = StorageValue<_, AirdropId, ValueQuery>;

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		/// A new airdrop has been created.
		AirdropCreated {
			airdrop_id: AirdropId,
			asset_id: T::AssetId,
			merkle_root: MerkleRoot,
			owner: T::AccountId,
		},
		/// An airdrop has been funded with tokens.
		AirdropFunded { airdrop_id: AirdropId, who: T::AccountId, amount: AssetBalanceOf<T> },
		/// A user has claimed tokens from an airdrop.
		Claimed { airdrop_id: AirdropId, account: T::AccountId, amount: AssetBalanceOf<T> },
		/// The unclaimed remainder of an airdrop has been withdrawn.
		Withdrawn {
			airdrop_id: AirdropId,
			who: T::AccountId,
			beneficiary: T::AccountId,
			amount: AssetBalanceOf<T>,
		},
		/// A role has been granted on an airdrop.
		RoleGranted { airdrop_id: AirdropId, account: T::AccountId, role: Role },
		/// A role has been revoked on an airdrop.
		RoleRevoked { airdrop_id: AirdropId, account: T::AccountId, role: Role },
	}

	#[pallet::error]
	pub enum Error<T> {
		/// The specified airdrop does not exist.
		AirdropNotFound,
		/// The maximum number of airdrops has been reached.
		TooManyAirdrops,
		/// The airdrop does not have sufficient balance for this operation.
		InsufficientAirdropBalance,
		/// The user has already claimed from this airdrop.
		AlreadyClaimed,
		/// The provided Merkle proof is invalid.
		InvalidProof,
		/// Amounts must be greater than zero.
		ZeroAmount,
		/// The funder does not hold enough of the airdrop's token.
		InsufficientBalance,
		/// The caller does not hold a role that allows this operation.
		NotAuthorized,
		/// The airdrop holds no funds.
		NothingToWithdraw,
		/// The account already holds this role.
		RoleAlreadyGranted,
		/// The account does not hold this role.
		RoleNotGranted,
		/// The owner's admin role is permanent.
		CannotRevokeOwner,
	}

	impl<T: Config> Pallet<T> {
		/// Account holding the funds of an airdrop.
		pub fn airdrop_account(airdrop_id: AirdropId) -> T::AccountId {
			T::PalletId::get().into_sub_account_truncating(airdrop_id)
		}

		pub fn airdrop(airdrop_id: AirdropId) -> Option<AirdropMetadataOf<T>> {
			Airdrops::<T>::get(airdrop_id)
		}

		pub fn next_airdrop_id() -> AirdropId {
			NextAirdropId::<T>::get()
		}

		pub fn is_claimed(airdrop_id: AirdropId, account: &T::AccountId) -> bool {
			Claimed::<T>::get(airdrop_id, account)
		}

		pub fn has_role(airdrop_id: AirdropId, account: &T::AccountId, role: Role) -> bool {
			Roles::<T>::contains_key((airdrop_id, account, role))
		}

		/// Tokens currently held by an airdrop, zero for unknown airdrops.
		pub fn airdrop_balance(airdrop_id: AirdropId) -> AssetBalanceOf<T> {
			match Airdrops::<T>::get(airdrop_id) {
				Some(airdrop) =>
					T::Assets::balance(airdrop.asset_id, &Self::airdrop_account(airdrop_id)),
				None => Zero::zero(),
			}
		}

		/// Verifies that `merkle_proof` links the claim `(account, amount)` to `merkle_root`.
		pub fn verify_merkle_proof(
			account: &T::AccountId,
			amount: AssetBalanceOf<T>,
			merkle_root: &MerkleRoot,
			merkle_proof: &[MerkleHash],
		) -> bool {
			let leaf = qp_merkle_airdrop::leaf_hash::<T::MerkleHasher, _, _>(account, &amount);
			qp_merkle_airdrop::verify_proof::<T::MerkleHasher>(merkle_root, leaf, merkle_proof)
		}

		/// Whether `account` could claim `amount` from the airdrop with this proof right now,
		/// ignoring the airdrop's balance.
		pub fn can_claim(
			airdrop_id: AirdropId,
			account: &T::AccountId,
			amount: AssetBalanceOf<T>,
			merkle_proof: &[MerkleHash],
		) -> bool {
			let Some(airdrop) = Airdrops::<T>::get(airdrop_id) else { return false };

			!amount.is_zero() &&
				!Self::is_claimed(airdrop_id, account) &&
				Self::verify_merkle_proof(account, amount, &airdrop.merkle_root, merkle_proof)
		}

		fn ensure_any_role(
			airdrop_id: AirdropId,
			who: &T::AccountId,
			roles: &[Role],
		) -> DispatchResult {
			ensure!(
				roles.iter().any(|role| Self::has_role(airdrop_id, who, *role)),
				Error::<T>::NotAuthorized
			);
			Ok(())
		}
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Create a new airdrop of `asset_id` tokens with a Merkle root.
		///
		/// The Merkle root is a cryptographic hash that represents all valid claims
		/// for this airdrop. The caller becomes the owner and is granted [`Role::Admin`].
		///
		/// # Errors
		///
		/// * `TooManyAirdrops` - If the maximum number of airdrops has been reached
		#[pallet::call_index(0)]
		#[pallet::weight(T::WeightInfo::create_airdrop())]
		pub fn create_airdrop(
			origin: OriginFor<T>,
			asset_id: T::AssetId,
			merkle_root: MerkleRoot,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;

			let airdrop_id = NextAirdropId::<T>::get();
			ensure!(airdrop_id < T::MaxAirdrops::get(), Error::<T>::TooManyAirdrops);

			Airdrops::<T>::insert(
				airdrop_id,
				AirdropMetadata { merkle_root, asset_id, owner: who.clone() },
			);
			Roles::<T>::insert((airdrop_id, &who, Role::Admin), ());
			NextAirdropId::<T>::put(airdrop_id.saturating_add(1));

			// Lets the airdrop account hold non-sufficient assets.
			frame_system::Pallet::<T>::inc_providers(&Self::airdrop_account(airdrop_id));

			log::info!(
				target: LOG_TARGET,
				"airdrop {} created by {:?} for asset {:?}",
				airdrop_id,
				who,
				asset_id
			);

			Self::deposit_event(Event::AirdropCreated {
				airdrop_id,
				asset_id,
				merkle_root,
				owner: who,
			});

			Ok(())
		}

		/// Fund an existing airdrop with tokens.
		///
		/// Transfers `amount` of the airdrop's token from the caller to the airdrop account.
		/// The caller's token account is kept alive.
		///
		/// # Errors
		///
		/// * `AirdropNotFound` - If the specified airdrop does not exist
		/// * `ZeroAmount` - If `amount` is zero
		/// * `InsufficientBalance` - If the caller cannot spend `amount` of the token
		#[pallet::call_index(1)]
		#[pallet::weight(T::WeightInfo::fund_airdrop())]
		pub fn fund_airdrop(
			origin: OriginFor<T>,
			airdrop_id: AirdropId,
			amount: AssetBalanceOf<T>,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;

			let airdrop = Airdrops::<T>::get(airdrop_id).ok_or(Error::<T>::AirdropNotFound)?;
			ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);
			ensure!(
				T::Assets::reducible_balance(
					airdrop.asset_id,
					&who,
					Preservation::Preserve,
					Fortitude::Polite
				) >= amount,
				Error::<T>::InsufficientBalance
			);

			T::Assets::transfer(
				airdrop.asset_id,
				&who,
				&Self::airdrop_account(airdrop_id),
				amount,
				Preservation::Preserve,
			)?;

			Self::deposit_event(Event::AirdropFunded { airdrop_id, who, amount });

			Ok(())
		}

		/// Claim tokens from an airdrop by providing a Merkle proof.
		///
		/// # Errors
		///
		/// * `AirdropNotFound` - If the specified airdrop does not exist
		/// * `ZeroAmount` - If `amount` is zero
		/// * `AlreadyClaimed` - If the user has already claimed from this airdrop
		/// * `InvalidProof` - If the provided Merkle proof is invalid
		/// * `InsufficientAirdropBalance` - If the airdrop doesn't have enough tokens
		#[pallet::call_index(2)]
		#[pallet::weight(T::WeightInfo::claim(merkle_proof.len() as u32))]
		pub fn claim(
			origin: OriginFor<T>,
			airdrop_id: AirdropId,
			amount: AssetBalanceOf<T>,
			merkle_proof: MerkleProofOf<T>,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;

			let airdrop = Airdrops::<T>::get(airdrop_id).ok_or(Error::<T>::AirdropNotFound)?;
			ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);
			ensure!(!Self::is_claimed(airdrop_id, &who), Error::<T>::AlreadyClaimed);

			if !Self::verify_merkle_proof(&who, amount, &airdrop.merkle_root, &merkle_proof) {
				log::debug!(
					target: LOG_TARGET,
					"rejected proof of {:?} for airdrop {}",
					who,
					airdrop_id
				);
				return Err(Error::<T>::InvalidProof.into())
			}

			let airdrop_account = Self::airdrop_account(airdrop_id);
			ensure!(
				T::Assets::balance(airdrop.asset_id, &airdrop_account) >= amount,
				Error::<T>::InsufficientAirdropBalance
			);

			// Recorded before the transfer; a failing transfer reverts both.
			Claimed::<T>::insert(airdrop_id, &who, true);

			T::Assets::transfer(
				airdrop.asset_id,
				&airdrop_account,
				&who,
				amount,
				Preservation::Expendable,
			)?;

			log::info!(target: LOG_TARGET, "{:?} claimed from airdrop {}", who, airdrop_id);

			Self::deposit_event(Event::Claimed { airdrop_id, account: who, amount });

			Ok(())
		}

		/// Withdraw everything left in an airdrop to `beneficiary`.
		///
		/// The caller must hold [`Role::Admin`] or [`Role::Withdrawer`]. Claims stay possible
		/// afterwards but fail until the airdrop is funded again.
		///
		/// # Errors
		///
		/// * `AirdropNotFound` - If the specified airdrop does not exist
		/// * `NotAuthorized` - If the caller holds neither role
		/// * `NothingToWithdraw` - If the airdrop is empty
		#[pallet::call_index(3)]
		#[pallet::weight(T::WeightInfo::withdraw())]
		pub fn withdraw(
			origin: OriginFor<T>,
			airdrop_id: AirdropId,
			beneficiary: T::AccountId,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;

			let airdrop = Airdrops::<T>::get(airdrop_id).ok_or(Error::<T>::AirdropNotFound)?;
			Self::ensure_any_role(airdrop_id, &who, &[Role::Admin, Role::Withdrawer])?;

			let airdrop_account = Self::airdrop_account(airdrop_id);
			let amount = T::Assets::reducible_balance(
				airdrop.asset_id,
				&airdrop_account,
				Preservation::Expendable,
				Fortitude::Polite,
			);
			ensure!(!amount.is_zero(), Error::<T>::NothingToWithdraw);

			T::Assets::transfer(
				airdrop.asset_id,
				&airdrop_account,
				&beneficiary,
				amount,
				Preservation::Expendable,
			)?;

			log::info!(
				target: LOG_TARGET,
				"{:?} withdrew airdrop {} to {:?}",
				who,
				airdrop_id,
				beneficiary
			);

			Self::deposit_event(Event::Withdrawn { airdrop_id, who, beneficiary, amount });

			Ok(())
		}

		/// Grant `role` on an airdrop to `account`. Requires [`Role::Admin`].
		#[pallet::call_index(4)]
		#[pallet::weight(T::WeightInfo::grant_role())]
		pub fn grant_role(
			origin: OriginFor<T>,
			airdrop_id: AirdropId,
			account: T::AccountId,
			role: Role,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;

			ensure!(Airdrops::<T>::contains_key(airdrop_id), Error::<T>::AirdropNotFound);
			Self::ensure_any_role(airdrop_id, &who, &[Role::Admin])?;
			ensure!(!Self::has_role(airdrop_id, &account, role), Error::<T>::RoleAlreadyGranted);

			Roles::<T>::insert((airdrop_id, &account, role), ());

			log::info!(
				target: LOG_TARGET,
				"{:?} granted {:?} on airdrop {} to {:?}",
				who,
				role,
				airdrop_id,
				account
			);

			Self::deposit_event(Event::RoleGranted { airdrop_id, account, role });

			Ok(())
		}

		/// Revoke `role` on an airdrop from `account`. Requires [`Role::Admin`].
		#[pallet::call_index(5)]
		#[pallet::weight(T::WeightInfo::revoke_role())]
		pub fn revoke_role(
			origin: OriginFor<T>,
			airdrop_id: AirdropId,
			account: T::AccountId,
			role: Role,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;

			let airdrop = Airdrops::<T>::get(airdrop_id).ok_or(Error::<T>::AirdropNotFound)?;
			Self::ensure_any_role(airdrop_id, &who, &[Role::Admin])?;
			ensure!(
				!(role == Role::Admin && account == airdrop.owner),
				Error::<T>::CannotRevokeOwner
			);
			ensure!(Self::has_role(airdrop_id, &account, role), Error::<T>::RoleNotGranted);

			Roles::<T>::remove((airdrop_id, &account, role));

			log::info!(
				target: LOG_TARGET,
				"{:?} revoked {:?} on airdrop {} from {:?}",
				who,
				role,
				airdrop_id,
				account
			);

			Self::deposit_event(Event::RoleRevoked { airdrop_id, account, role });

			Ok(())
		}
	}
}
