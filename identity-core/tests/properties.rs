//! Property tests over randomly generated keys, messages, paths and type tags.

use proptest::prelude::*;
use sui_identity_core::crypto::KeyDeriver;
use sui_identity_core::{
    address_from_public_key, hash_intent_bytes, parse_type_tag, DerivationPath, IntentScope,
    PathSegment, SignatureScheme, StructTag, SuiAddress, SuiKeyPair, TypeTag,
};

const SECP256K1_HALF_ORDER: &str = "7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0";
const SECP256R1_HALF_ORDER: &str = "7fffffff800000007fffffffffffffffde737d56d38bcf4279dce5617e3192a8";

fn scheme_strategy() -> impl Strategy<Value = SignatureScheme> {
    prop_oneof![
        Just(SignatureScheme::Ed25519),
        Just(SignatureScheme::Secp256k1),
        Just(SignatureScheme::Secp256r1),
    ]
}

fn message_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=256)
}

fn segment_strategy() -> impl Strategy<Value = PathSegment> {
    (0u32..(1 << 31), any::<bool>())
        .prop_map(|(index, hardened)| PathSegment::new(index, hardened).unwrap())
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,7}"
}

fn type_tag_strategy() -> impl Strategy<Value = TypeTag> {
    let leaf = prop_oneof![
        Just(TypeTag::Bool),
        Just(TypeTag::U8),
        Just(TypeTag::U16),
        Just(TypeTag::U32),
        Just(TypeTag::U64),
        Just(TypeTag::U128),
        Just(TypeTag::U256),
        Just(TypeTag::Address),
        Just(TypeTag::Signer),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|tag| TypeTag::Vector(Box::new(tag))),
            (
                any::<[u8; 32]>(),
                identifier_strategy(),
                identifier_strategy(),
                prop::collection::vec(inner, 0..3),
            )
                .prop_map(|(address, module, name, params)| {
                    let tag = StructTag::new(SuiAddress::new(address), &module, &name, params)
                        .unwrap();
                    TypeTag::Struct(Box::new(tag))
                }),
        ]
    })
}

fn try_keypair(scheme: SignatureScheme, secret: &[u8; 32]) -> Option<SuiKeyPair> {
    SuiKeyPair::from_secret_key(scheme, secret).ok()
}

proptest! {
    #[test]
    fn address_is_prefixed_lowercase_hex(
        scheme in scheme_strategy(),
        key in prop::collection::vec(any::<u8>(), 33),
    ) {
        let key = &key[..scheme.public_key_length()];
        let address = address_from_public_key(scheme, key).unwrap();
        prop_assert_eq!(address.len(), 66);
        prop_assert!(address.starts_with("0x"));
        prop_assert!(address[2..].chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        prop_assert_eq!(address.parse::<SuiAddress>().unwrap().to_string(), address);
    }

    #[test]
    fn intent_scopes_never_collide(payload in message_strategy()) {
        let personal = hash_intent_bytes(IntentScope::PersonalMessage, &payload);
        let transaction = hash_intent_bytes(IntentScope::TransactionData, &payload);
        prop_assert_ne!(personal, transaction);
    }

    #[test]
    fn derivation_path_text_is_stable(segments in prop::collection::vec(segment_strategy(), 0..8)) {
        let path = DerivationPath::new(segments);
        let text = path.to_string();
        let reparsed = DerivationPath::parse(&text).unwrap();
        prop_assert_eq!(reparsed.to_string(), text);
        prop_assert_eq!(reparsed, path);
    }

    #[test]
    fn type_tag_text_is_stable(tag in type_tag_strategy()) {
        let text = tag.to_string();
        let reparsed = parse_type_tag(&text).unwrap();
        prop_assert_eq!(reparsed.to_string(), text);
        prop_assert_eq!(reparsed, tag);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn signatures_round_trip(
        scheme in scheme_strategy(),
        secret in any::<[u8; 32]>(),
        message in message_strategy(),
    ) {
        let keypair = try_keypair(scheme, &secret);
        prop_assume!(keypair.is_some());
        let keypair = keypair.unwrap();

        let signature = keypair.sign_personal_message(&message).unwrap();
        prop_assert_eq!(signature.len(), scheme.envelope_length());
        prop_assert_eq!(signature[0], scheme.flag());
        let public_key = keypair.public_key();
        prop_assert_eq!(&signature[65..], public_key.as_bytes());

        keypair.public_key().verify_personal_message(&message, &signature).unwrap();
        let err = keypair.verify_transaction(&message, &signature).unwrap_err();
        prop_assert!(err.is_verification_failure());
    }

    #[test]
    fn ecdsa_signatures_are_low_s(
        r1 in any::<bool>(),
        secret in any::<[u8; 32]>(),
        message in message_strategy(),
    ) {
        let (scheme, half) = if r1 {
            (SignatureScheme::Secp256r1, SECP256R1_HALF_ORDER)
        } else {
            (SignatureScheme::Secp256k1, SECP256K1_HALF_ORDER)
        };
        let keypair = try_keypair(scheme, &secret);
        prop_assume!(keypair.is_some());
        let keypair = keypair.unwrap();

        let signature = keypair.sign_transaction(&message).unwrap();
        let half = hex::decode(half).unwrap();
        prop_assert!(signature[33..65] <= half[..]);
    }

    #[test]
    fn secp256k1_derivation_matches_bip32_crate(
        seed in prop::collection::vec(any::<u8>(), 64),
        account in 0u32..16,
        index in 0u32..16,
    ) {
        let text = format!("m/54'/784'/{}'/0/{}", account, index);
        let ours = KeyDeriver::derive(
            SignatureScheme::Secp256k1,
            &seed,
            &DerivationPath::parse(&text).unwrap(),
        )
        .unwrap();

        let reference = bip32::XPrv::derive_from_path(
            &seed,
            &text.parse::<bip32::DerivationPath>().unwrap(),
        )
        .unwrap();
        let reference_key = reference.private_key().to_bytes();
        prop_assert_eq!(reference_key.as_slice(), &ours.key()[..]);
    }
}
