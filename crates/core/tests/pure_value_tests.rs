//! Property-based tests for the pure value encoder

use num_bigint::BigUint;
use proptest::prelude::*;
use ptb_core::{decode, encode, Address, PureType, PureValue};

const MAX: usize = 16 * 1024;

/// A type together with a canonical value of that type.
fn typed_value() -> impl Strategy<Value = (PureType, PureValue)> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(|b| (PureType::Bool, PureValue::Bool(b))),
        any::<u8>().prop_map(|n| (PureType::U8, PureValue::from(n))),
        any::<u16>().prop_map(|n| (PureType::U16, PureValue::from(n))),
        any::<u32>().prop_map(|n| (PureType::U32, PureValue::from(n))),
        any::<u64>().prop_map(|n| (PureType::U64, PureValue::from(n))),
        any::<u128>().prop_map(|n| (PureType::U128, PureValue::from(n))),
        prop::array::uniform32(any::<u8>()).prop_map(|b| {
            (PureType::U256, PureValue::BigNumber(BigUint::from_bytes_le(&b)))
        }),
        prop::array::uniform32(any::<u8>())
            .prop_map(|b| (PureType::Address, PureValue::Address(Address::new(b)))),
        ".{0,40}".prop_map(|s| (PureType::String, PureValue::String(s))),
        prop::collection::vec(any::<u8>(), 0..64)
            .prop_map(|b| (PureType::vector(PureType::U8), PureValue::Bytes(b))),
    ];
    leaf.prop_recursive(2, 32, 4, |inner| {
        // vector<u8> decodes as Bytes, which the leaves already cover
        inner
            .prop_filter("u8 elements", |(ty, _)| *ty != PureType::U8)
            .prop_flat_map(|(ty, value)| {
                prop::collection::vec(Just(value), 0..4).prop_map(move |items| {
                    (PureType::vector(ty.clone()), PureValue::Vector(items))
                })
            })
    })
}

proptest! {
    /// decode is the exact inverse of encode for canonical values
    #[test]
    fn prop_encode_decode_round_trip((ty, value) in typed_value()) {
        let bytes = encode(&value, &ty, MAX).unwrap();
        prop_assert_eq!(decode(&bytes, &ty, MAX).unwrap(), value);
    }

    /// Encoding never depends on anything but the value and type
    #[test]
    fn prop_encode_is_deterministic((ty, value) in typed_value()) {
        prop_assert_eq!(encode(&value, &ty, MAX).unwrap(), encode(&value, &ty, MAX).unwrap());
    }

    /// Values wider than the declared integer type are rejected
    #[test]
    fn prop_u16_range(n in any::<u32>()) {
        let result = encode(&PureValue::from(n), &PureType::U16, MAX);
        prop_assert_eq!(result.is_ok(), n <= u16::MAX as u32);
    }
}

#[test]
fn test_vector_of_addresses_accepts_hex_strings() {
    let ty: PureType = "vector<address>".parse().unwrap();
    let value = PureValue::Vector(vec![PureValue::from("0x2"), PureValue::from("0x6")]);
    let bytes = encode(&value, &ty, MAX).unwrap();
    assert_eq!(bytes.len(), 1 + 64);
    assert_eq!(
        decode(&bytes, &ty, MAX).unwrap(),
        PureValue::Vector(vec![
            PureValue::Address(Address::from_u64(2)),
            PureValue::Address(Address::from_u64(6)),
        ])
    );
}
