//! # Commitment Determinism
//!
//! Cross-crate checks that roots, proofs, and encodings are bit-stable:
//! the properties the whole distribution scheme leans on.

#[cfg(test)]
mod tests {
    use gd_01_merkle_commitment::{
        combine_hashes, verify_proof, BatchProofCodec, MerkleTree, Proof, EMPTY_TREE_ROOT,
    };
    use gd_02_claim_engine::{ClaimResult, LedgerSnapshot};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use shared_crypto::hash_address;
    use shared_types::{format_address, parse_address, Address, U256};

    fn random_accounts(seed: u64, count: usize) -> Vec<Address> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count).map(|_| rng.gen::<[u8; 20]>()).collect()
    }

    #[test]
    fn test_root_stable_across_shuffles() {
        let accounts = random_accounts(7, 100);
        let reference = MerkleTree::new(accounts.clone()).root();

        let mut rng = StdRng::seed_from_u64(8);
        let mut shuffled = accounts;
        for _ in 0..10 {
            // Fisher-Yates pass
            for i in (1..shuffled.len()).rev() {
                let j = rng.gen_range(0..=i);
                shuffled.swap(i, j);
            }
            assert_eq!(MerkleTree::new(shuffled.clone()).root(), reference);
        }
    }

    #[test]
    fn test_root_stable_across_rebuilds() {
        let accounts = random_accounts(21, 64);
        let first = MerkleTree::new(accounts.clone()).root();
        let second = MerkleTree::new(accounts).root();
        assert_eq!(first, second);
    }

    #[test]
    fn test_two_leaf_root_matches_manual_fold() {
        let a = [0x11u8; 20];
        let b = [0x22u8; 20];
        let tree = MerkleTree::new([a, b]);
        assert_eq!(tree.root(), combine_hashes(&hash_address(&a), &hash_address(&b)));
    }

    #[test]
    fn test_three_leaf_root_matches_manual_fold() {
        let accounts = [[0x11u8; 20], [0x22u8; 20], [0x33u8; 20]];
        let tree = MerkleTree::new(accounts);

        let mut leaves: Vec<_> = accounts.iter().map(hash_address).collect();
        leaves.sort_unstable();
        // Layer 1: pair the first two, carry the tail; then combine.
        let expected = combine_hashes(&combine_hashes(&leaves[0], &leaves[1]), &leaves[2]);
        assert_eq!(tree.root(), expected);
    }

    #[test]
    fn test_empty_tree_sentinel() {
        let tree = MerkleTree::new([]);
        assert_eq!(tree.root(), EMPTY_TREE_ROOT);
        assert_eq!(tree.hex_root(), format!("0x{}", "00".repeat(32)));
    }

    #[test]
    fn test_every_proof_verifies_at_scale() {
        let accounts = random_accounts(42, 257); // odd count exercises tail carry
        let tree = MerkleTree::new(accounts.clone());
        let root = tree.root();

        for account in &accounts {
            let proof = tree.proof_of(account).unwrap();
            assert!(verify_proof(account, &proof, &root));
        }
    }

    #[test]
    fn test_single_bit_flip_breaks_proof() {
        let accounts = random_accounts(3, 33);
        let tree = MerkleTree::new(accounts.clone());
        let root = tree.root();
        let target = accounts[17];

        let proof = tree.proof_of(&target).unwrap();
        for sibling_idx in 0..proof.len() {
            let mut siblings = proof.siblings().to_vec();
            siblings[sibling_idx][31] ^= 0x01;
            assert!(
                !verify_proof(&target, &Proof::new(siblings), &root),
                "bit flip in sibling {sibling_idx} went unnoticed"
            );
        }
    }

    #[test]
    fn test_hex_forms_roundtrip() {
        let accounts = random_accounts(5, 19);
        let tree = MerkleTree::new(accounts.clone());

        let proof = tree.proof_of(&accounts[3]).unwrap();
        assert_eq!(Proof::from_hex(&proof.to_hex()).unwrap(), proof);

        let parsed = parse_address(&format_address(&accounts[3])).unwrap();
        assert_eq!(parsed, accounts[3]);
    }

    #[test]
    fn test_packed_batch_roundtrips_at_scale() {
        let accounts = random_accounts(11, 73);
        let tree = MerkleTree::new(accounts.clone());
        let proofs: Vec<Proof> = accounts
            .iter()
            .map(|a| tree.proof_of(a).unwrap())
            .collect();

        let packed = BatchProofCodec::encode(&proofs);
        assert_eq!(BatchProofCodec::decode(&packed).unwrap(), proofs);

        let hex_packed = BatchProofCodec::encode_hex(&proofs);
        assert_eq!(BatchProofCodec::decode_hex(&hex_packed).unwrap(), proofs);
    }

    #[test]
    fn test_value_records_serialize_roundtrip() {
        let result = ClaimResult {
            recipient: [0x01; 20],
            caller: [0xCC; 20],
            recipient_token_amount: U256::from(600_000u64),
            caller_token_amount: U256::from(400_000u64),
            block: 51,
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: ClaimResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);

        let snapshot = LedgerSnapshot {
            root: [0xAB; 32],
            total_genesis_tokens: U256::from(10_000_000u64),
            total_genesis_recipients: 10,
            balance_threshold: U256::from(1_000u64),
            genesis_block: 0,
            caller_allocation_start_block: 11,
            caller_allocation_end_block: 111,
            started: true,
            generated: [[0x01u8; 20]].into_iter().collect(),
            ledger_balance: U256::from(10_000_000u64),
            current_block: 51,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: LedgerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_text_records_match_binary_build() {
        let accounts = random_accounts(13, 25);
        let binary_tree = MerkleTree::new(accounts.clone());

        let records: Vec<String> = accounts
            .iter()
            .map(|a| format_address(a).to_uppercase().replace("0X", "0x"))
            .collect();
        let text_tree =
            MerkleTree::from_text_records(records.iter().map(String::as_str)).unwrap();

        assert_eq!(text_tree.root(), binary_tree.root());
        assert_eq!(text_tree.num_leaves(), binary_tree.num_leaves());
    }
}
