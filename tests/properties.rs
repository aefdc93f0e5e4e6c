//! Property tests for the verifier's invariants.

use proptest::prelude::*;
use rand::RngCore;

use fairplay::{
    core::{hex, index_from_value, keccak256},
    reconstruct, verify_commitment, BoundaryMode,
};

fn seed_hex() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 1..64).prop_map(|bytes| hex::encode(&bytes))
}

fn round_config() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..=10_000, 1..40)
}

proptest! {
    #[test]
    fn prop_hex_round_trip(bytes in prop::collection::vec(any::<u8>(), 1..128)) {
        let encoded = hex::encode(&bytes);
        prop_assert_eq!(encoded.len(), bytes.len() * 2);
        prop_assert_eq!(hex::decode(&encoded).unwrap(), bytes);
    }

    #[test]
    fn prop_digest_hex_round_trip(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let digest = keccak256(&bytes);
        let encoded = hex::encode(&digest);
        prop_assert_eq!(hex::decode(&encoded).unwrap(), digest.to_vec());
    }

    #[test]
    fn prop_reconstruct_deterministic(seed in seed_hex(), config in round_config()) {
        prop_assert_eq!(reconstruct(&seed, &config), reconstruct(&seed, &config));
    }

    #[test]
    fn prop_indices_in_bounds(seed in seed_hex(), config in round_config()) {
        let indices = reconstruct(&seed, &config);
        prop_assert_eq!(indices.len(), config.len());
        for (index, size) in indices.iter().zip(&config) {
            prop_assert!(index < size);
        }
    }

    #[test]
    fn prop_single_position_yields_zero(seed in seed_hex(), rounds in 1usize..30) {
        prop_assert!(reconstruct(&seed, &vec![1; rounds]).iter().all(|&i| i == 0));
    }

    #[test]
    fn prop_clamped_index_in_bounds(value in any::<u32>(), size in 1u32..=u32::MAX) {
        let (index, _) = index_from_value(value, size, BoundaryMode::Clamp);
        prop_assert!(index < size);
    }

    #[test]
    fn prop_clamp_only_at_max(value in any::<u32>(), size in 1u32..=u32::MAX) {
        let (clamped, _) = index_from_value(value, size, BoundaryMode::Clamp);
        let (raw, _) = index_from_value(value, size, BoundaryMode::Unclamped);
        if value != u32::MAX {
            prop_assert_eq!(clamped, raw);
        }
    }

    #[test]
    fn prop_rounds_independent(
        seed in seed_hex(),
        config in round_config(),
        pick in any::<prop::sample::Index>(),
        replacement in 1u32..=10_000,
    ) {
        let j = pick.index(config.len());
        let mut changed = config.clone();
        changed[j] = replacement;

        let before = reconstruct(&seed, &config);
        let after = reconstruct(&seed, &changed);
        for i in (0..config.len()).filter(|&i| i != j) {
            prop_assert_eq!(before[i], after[i]);
        }
    }

    #[test]
    fn prop_commitment_case_insensitive(bytes in prop::collection::vec(any::<u8>(), 1..64)) {
        let seed = hex::encode(&bytes);
        let digest = hex::encode(&keccak256(&bytes));
        let upper = digest.to_ascii_uppercase();

        prop_assert!(verify_commitment(&seed, &digest).unwrap());
        prop_assert_eq!(
            verify_commitment(&seed, &upper).unwrap(),
            verify_commitment(&seed, &digest).unwrap()
        );
    }

    #[test]
    fn prop_wrong_commitment_rejected(
        bytes in prop::collection::vec(any::<u8>(), 1..64),
        flip in 0usize..32,
    ) {
        let seed = hex::encode(&bytes);
        let mut digest = keccak256(&bytes);
        digest[flip] ^= 0x01;

        prop_assert_eq!(verify_commitment(&seed, &hex::encode(&digest)), Ok(false));
    }
}

#[test]
fn test_random_seeds_verify() {
    let mut rng = rand::thread_rng();

    for _ in 0..32 {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        let seed_hex = hex::encode(&seed);
        let commitment = hex::encode(&keccak256(&seed));

        assert_eq!(verify_commitment(&seed_hex, &commitment), Ok(true));
    }
}
