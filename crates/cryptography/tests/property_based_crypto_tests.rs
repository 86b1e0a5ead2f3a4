//! Property-Based Cryptographic Testing
//!
//! Determinism, tamper detection and intent separation across every
//! single-key signature scheme.

use ptb_cryptography::{blake2b256, Intent, SignatureScheme};
use proptest::prelude::*;

const SCHEMES: [SignatureScheme; 3] = [
    SignatureScheme::Ed25519,
    SignatureScheme::Secp256k1,
    SignatureScheme::Secp256r1,
];

fn scheme_strategy() -> impl Strategy<Value = SignatureScheme> {
    prop::sample::select(SCHEMES.to_vec())
}

mod signature_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Signing the same digest twice with the same key gives the same bytes
        #[test]
        fn prop_signing_is_deterministic(
            scheme in scheme_strategy(),
            message in prop::collection::vec(any::<u8>(), 0..256)
        ) {
            let (private_key, public_key) = scheme.generate_key_pair().unwrap();
            let digest = Intent::transaction_data().digest(&message);

            let first = scheme.sign(&private_key, &digest).unwrap();
            let second = scheme.sign(&private_key, &digest).unwrap();

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), scheme.signature_length().unwrap());
            prop_assert!(scheme.verify(&public_key, &digest, &first));
        }

        /// Flipping any bit of the signed digest breaks verification
        #[test]
        fn prop_tampered_digest_fails(
            scheme in scheme_strategy(),
            message in prop::collection::vec(any::<u8>(), 1..128),
            bit in 0usize..256
        ) {
            let (private_key, public_key) = scheme.generate_key_pair().unwrap();
            let digest = blake2b256(&message);
            let signature = scheme.sign(&private_key, &digest).unwrap();

            let mut tampered = digest;
            tampered[bit / 8] ^= 1 << (bit % 8);
            prop_assert!(!scheme.verify(&public_key, &tampered, &signature));
        }

        /// Signatures of the wrong length never verify
        #[test]
        fn prop_wrong_length_signatures_fail(
            scheme in scheme_strategy(),
            signature in prop::collection::vec(any::<u8>(), 0..63)
        ) {
            let (_, public_key) = scheme.generate_key_pair().unwrap();
            prop_assert!(!scheme.verify(&public_key, &[7u8; 32], &signature));
        }
    }
}

mod intent_properties {
    use super::*;

    proptest! {
        /// The transaction digest never equals a plain hash of the bytes
        #[test]
        fn prop_intent_separates_domains(
            message in prop::collection::vec(any::<u8>(), 0..512)
        ) {
            let framed = Intent::transaction_data().digest(&message);
            prop_assert_ne!(framed, blake2b256(&message));
            prop_assert_ne!(framed, Intent::personal_message().digest(&message));
        }
    }
}
