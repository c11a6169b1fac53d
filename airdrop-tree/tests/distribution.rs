use std::io::Write;

use airdrop_tree::{encode_hash, parse_account, verify, Distribution, Error, HasherKind};
use pretty_assertions::assert_eq;
use qp_merkle_airdrop::{Keccak256, MerkleHash, MerkleTree, TreeError};

const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
const ALICE_HEX: &str = "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";
const BOB: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";
const CHARLIE_HEX: &str = "0x0303030303030303030303030303030303030303030303030303030303030303";

fn claims_json() -> String {
	format!(
		r#"{{ "claims": [
			{{ "account": "{ALICE}", "amount": 100 }},
			{{ "account": "{BOB}", "amount": 250 }},
			{{ "account": "{CHARLIE_HEX}", "amount": 400 }}
		] }}"#
	)
}

#[test]
fn report_matches_a_directly_built_tree() {
	let distribution = Distribution::from_json(&claims_json()).unwrap();
	assert_eq!(distribution.len(), 3);
	assert_eq!(distribution.total(), 750);

	let report = distribution.build(HasherKind::Keccak256).unwrap();

	let expected = MerkleTree::<Keccak256>::from_claims(vec![
		(parse_account(ALICE).unwrap(), 100u128),
		(parse_account(BOB).unwrap(), 250u128),
		(parse_account(CHARLIE_HEX).unwrap(), 400u128),
	])
	.unwrap();
	assert_eq!(report.root, encode_hash(&expected.root()));
	assert_eq!(report.claims.len(), 3);
	assert_eq!(report.claims[0].account, ALICE);
	assert_eq!(report.claims[1].amount, 250);
}

#[test]
fn every_reported_proof_verifies() {
	let report = Distribution::from_json(&claims_json())
		.unwrap()
		.build(HasherKind::Blake2_256)
		.unwrap();

	for claim in &report.claims {
		assert!(verify(HasherKind::Blake2_256, &report.root, &claim.account, claim.amount, &claim.proof)
			.unwrap());
		assert!(!verify(
			HasherKind::Blake2_256,
			&report.root,
			&claim.account,
			claim.amount + 1,
			&claim.proof
		)
		.unwrap());
	}
}

#[test]
fn proofs_do_not_cross_hashers() {
	let distribution = Distribution::from_json(&claims_json()).unwrap();
	let keccak = distribution.build(HasherKind::Keccak256).unwrap();
	let blake = distribution.build(HasherKind::Blake2_256).unwrap();

	assert_ne!(keccak.root, blake.root);
	let claim = &keccak.claims[2];
	assert!(!verify(HasherKind::Blake2_256, &keccak.root, &claim.account, claim.amount, &claim.proof)
		.unwrap());
}

#[test]
fn claims_can_be_looked_up_by_hex_or_ss58() {
	let report =
		Distribution::from_json(&claims_json()).unwrap().build(HasherKind::Keccak256).unwrap();

	assert_eq!(report.claim_of(ALICE_HEX).unwrap().amount, 100);
	assert_eq!(report.claim_of(BOB).unwrap().amount, 250);
	assert!(matches!(
		report.claim_of("0x0404040404040404040404040404040404040404040404040404040404040404"),
		Err(Error::UnknownAccount(_))
	));
}

#[test]
fn rejects_duplicate_accounts_across_formats() {
	let raw = format!(
		r#"{{ "claims": [
			{{ "account": "{ALICE}", "amount": 1 }},
			{{ "account": "{ALICE_HEX}", "amount": 2 }}
		] }}"#
	);

	assert!(matches!(Distribution::from_json(&raw), Err(Error::DuplicateAccount(a)) if a == ALICE_HEX));
}

#[test]
fn rejects_empty_and_malformed_input() {
	let empty = Distribution::from_json(r#"{ "claims": [] }"#).unwrap();
	assert!(empty.is_empty());
	assert!(matches!(empty.build(HasherKind::Keccak256), Err(Error::Tree(TreeError::NoLeaves))));

	assert!(matches!(
		Distribution::from_json(r#"{ "claims": [{ "account": "0x1234", "amount": 1 }] }"#),
		Err(Error::InvalidAccount(_))
	));
	assert!(matches!(
		Distribution::from_json(r#"{ "claims": [{ "account": "not-an-address", "amount": 1 }] }"#),
		Err(Error::InvalidAccount(_))
	));
	assert!(matches!(
		Distribution::from_json(&format!(r#"{{ "claims": [{{ "account": "{BOB}", "amount": 0 }}] }}"#)),
		Err(Error::ZeroAmount(a)) if a == BOB
	));
	assert!(matches!(Distribution::from_json("{"), Err(Error::Json(_))));
	assert!(matches!(
		verify(HasherKind::Keccak256, "0xabcd", ALICE, 1, &[]),
		Err(Error::InvalidHash(_))
	));
}

#[test]
fn rejects_totals_beyond_u128() {
	let half = 1u128 << 127;
	let raw = format!(
		r#"{{ "claims": [
			{{ "account": "{ALICE}", "amount": {half} }},
			{{ "account": "{BOB}", "amount": {half} }}
		] }}"#
	);
	assert!(matches!(Distribution::from_json(&raw), Err(Error::TotalOverflow)));

	let raw = format!(
		r#"{{ "claims": [
			{{ "account": "{ALICE}", "amount": {half} }},
			{{ "account": "{BOB}", "amount": {} }}
		] }}"#,
		half - 1
	);
	assert_eq!(Distribution::from_json(&raw).unwrap().total(), u128::MAX);
}

#[test]
fn reads_claims_from_disk() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(claims_json().as_bytes()).unwrap();

	let distribution = Distribution::from_file(file.path()).unwrap();
	assert_eq!(distribution.len(), 3);

	let missing = file.path().with_extension("missing");
	assert!(matches!(Distribution::from_file(&missing), Err(Error::Io { .. })));
}

#[test]
fn report_serialises_hasher_by_name() {
	let report =
		Distribution::from_json(&claims_json()).unwrap().build(HasherKind::Blake2_256).unwrap();
	let json = serde_json::to_value(&report).unwrap();

	assert_eq!(json["hasher"], "blake2-256");
	let root: MerkleHash = airdrop_tree::parse_hash(json["root"].as_str().unwrap()).unwrap();
	assert_eq!(encode_hash(&root), report.root);
}
