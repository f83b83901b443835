//! End-to-end scenarios: literal keys, mnemonics and signatures that other Sui
//! tooling produces byte-for-byte.

use sui_identity_core::crypto::hash::blake2b256;
use sui_identity_core::{
    hash_intent_bytes, IntentScope, PersonalMessage, SignatureScheme, SuiKeyPair,
};

const MNEMONIC: &str = "film crazy soon outside stand loop subway crumble thrive popular green nuclear struggle pistol arm wife phrase warfare march wheat nephew ask sunny firm";

const ED25519_BECH32: &str =
    "suiprivkey1qz6qzxye624vk8epr7c9j4flnxm5lze2e7y2pmxzm4qarny03lt8xavx8zj";
const ED25519_SEED_HEX: &str = "b4011899d2aacb1f211fb059553f99b74f8b2acf88a0ecc2dd41d1cc8f8fd673";
const ED25519_ADDRESS: &str = "0x55d07fa035a02cf143f2bea4aa34bbac516560c9386a077af3fd30f169fc2cc2";

const SECP256K1_BECH32: &str =
    "suiprivkey1qyqr6yvxdqkh32ep4pk9caqvphmk9epn6rhkczcrhaeermsyvwsg783y9am";
const SECP256K1_ADDRESS: &str = "0x9e8f732575cc5386f8df3c784cd3ed1b53ce538da79926b2ad54dcc1197d2532";

const SECP256R1_BECH32: &str =
    "suiprivkey1qgj6vet4rstf2p00j860xctkg4fyqqq5hxgu4mm0eg60fq787ujnqs5wc8q";
const SECP256R1_ADDRESS: &str = "0x4a822457f1970468d38dae8e63fb60eefdaa497d74d781f581ea2d137ec36f3a";

const SECP256K1_HALF_ORDER: &str = "7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0";
const SECP256R1_HALF_ORDER: &str = "7fffffff800000007fffffffffffffffde737d56d38bcf4279dce5617e3192a8";

// =============================================================================
// IMPORT
// =============================================================================

#[test]
fn ed25519_from_bech32() {
    let keypair = SuiKeyPair::from_bech32(ED25519_BECH32).unwrap();
    assert_eq!(keypair.scheme(), SignatureScheme::Ed25519);
    assert_eq!(keypair.address().to_string(), ED25519_ADDRESS);
}

#[test]
fn ed25519_from_hex_seed() {
    let keypair = SuiKeyPair::from_hex(SignatureScheme::Ed25519, ED25519_SEED_HEX).unwrap();
    assert_eq!(keypair.address().to_string(), ED25519_ADDRESS);
    assert_eq!(keypair.to_bech32().unwrap().as_str(), ED25519_BECH32);
}

#[test]
fn secp256k1_from_bech32() {
    let keypair = SuiKeyPair::from_bech32(SECP256K1_BECH32).unwrap();
    assert_eq!(keypair.scheme(), SignatureScheme::Secp256k1);
    assert_eq!(keypair.address().to_string(), SECP256K1_ADDRESS);
    assert_eq!(keypair.to_bech32().unwrap().as_str(), SECP256K1_BECH32);
}

#[test]
fn secp256r1_from_bech32() {
    let keypair = SuiKeyPair::from_bech32(SECP256R1_BECH32).unwrap();
    assert_eq!(keypair.scheme(), SignatureScheme::Secp256r1);
    assert_eq!(keypair.address().to_string(), SECP256R1_ADDRESS);
    assert_eq!(keypair.to_bech32().unwrap().as_str(), SECP256R1_BECH32);
}

// =============================================================================
// MNEMONIC DERIVATION
// =============================================================================

#[test]
fn ed25519_mnemonic_signs_and_verifies() {
    let keypair = SuiKeyPair::derive_from_mnemonic(
        SignatureScheme::Ed25519,
        MNEMONIC,
        "",
        Some("m/44'/784'/0'/0'/0'"),
    )
    .unwrap();
    assert_eq!(
        keypair.address().to_string(),
        "0xa2d14fad60c56049ecf75246a481934691214ce413e6a8ae2fe6834c173a6133"
    );

    let signature = keypair.sign_personal_message(b"hello").unwrap();
    keypair
        .public_key()
        .verify_personal_message(b"hello", &signature)
        .unwrap();
}

#[test]
fn mnemonic_addresses_per_scheme() {
    let cases = [
        (
            SignatureScheme::Ed25519,
            "m/44'/784'/1'/0'/0'",
            "0x448de8c74daaa8ee4c4d766a1e490266e2525c78c64492e956021bfc49b719ff",
        ),
        (
            SignatureScheme::Secp256k1,
            "m/54'/784'/0'/0/0",
            SECP256K1_ADDRESS,
        ),
        (
            SignatureScheme::Secp256k1,
            "m/54'/784'/1'/0/1",
            "0xaacf39fc769e3844161298b38b731f3bd38463bbeecda55beef24fc925c17878",
        ),
        // walked on the secp256k1 group, then used as a P-256 scalar
        (
            SignatureScheme::Secp256r1,
            "m/74'/784'/0'/0/0",
            "0x1f5bb61b9672d96b58e8336ed5d009fc9776c36c8d3f8f8787aeb56a5827b464",
        ),
    ];
    for (scheme, path, address) in cases {
        let keypair = SuiKeyPair::derive_from_mnemonic(scheme, MNEMONIC, "", Some(path)).unwrap();
        assert_eq!(keypair.address().to_string(), address, "{} {}", scheme, path);
    }
}

#[test]
fn mnemonic_derivation_is_deterministic() {
    for scheme in SignatureScheme::ALL {
        let first = SuiKeyPair::derive_from_mnemonic(scheme, MNEMONIC, "", None).unwrap();
        let second = SuiKeyPair::derive_from_mnemonic(scheme, MNEMONIC, "", None).unwrap();
        assert_eq!(first.address(), second.address());
        assert_eq!(*first.export_secret(), *second.export_secret());
    }
}

#[test]
fn passphrase_changes_address() {
    let plain =
        SuiKeyPair::derive_from_mnemonic(SignatureScheme::Ed25519, MNEMONIC, "", None).unwrap();
    let salted =
        SuiKeyPair::derive_from_mnemonic(SignatureScheme::Ed25519, MNEMONIC, "sui", None).unwrap();
    assert_ne!(plain.address(), salted.address());
}

#[test]
fn wrong_path_profile_is_rejected() {
    let err = SuiKeyPair::derive_from_mnemonic(
        SignatureScheme::Secp256k1,
        MNEMONIC,
        "",
        Some("m/54'/784'/0'/0'/0'"),
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("path:"), "{}", err);

    let err = SuiKeyPair::derive_from_mnemonic(
        SignatureScheme::Ed25519,
        MNEMONIC,
        "",
        Some("m/44'/784'/0'"),
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("path:"), "{}", err);
}

// =============================================================================
// INTENT & SIGNATURES
// =============================================================================

#[test]
fn intent_hash_of_personal_message() {
    let bcs_message = bcs::to_bytes(&PersonalMessage {
        message: b"Hello".to_vec(),
    })
    .unwrap();
    let mut prefixed = vec![0x03, 0x00, 0x00];
    prefixed.extend_from_slice(&bcs_message);
    assert_eq!(
        hash_intent_bytes(IntentScope::PersonalMessage, &bcs_message),
        blake2b256(&[prefixed.as_slice()])
    );
}

#[test]
fn personal_message_envelopes_are_byte_exact() {
    let cases = [
        (
            ED25519_BECH32,
            "00d94b6180fe59e9d183768f1509485e7564dfa9f39e6558207437263cb6126be395436b5ee76554bdbbb4f38e6ef79d82891836a39be80fb76d79c85f34180d081e77545bd8f4b8ca78eb5b22af228e89124bcaee3be1d78bc2f0838f61136199",
        ),
        (
            SECP256K1_BECH32,
            "01b37cd6be9deac37a85a164c2201afe7f56e5b011f8b95251f22d569f34fa2e532d12f087fc298a3980c998df1f41a7dde2b3c7cbde2d1f933fcc4bad8b80a43e02bd95b367a2d8781a088bdcb0054067a6ca6178437d14e5178df6a7c5a7e25b0b",
        ),
        (
            SECP256R1_BECH32,
            "02ffcc7026bd516ed30439e25e151d41f8d0a22dfc323ab547c3d2ccddd1b61b226d7d7ff8281bd8d59670ac772b83e8dc196dd907ce7a7443718bec6f6b58a63d02cbd52b544561807a69fff2b167dc5b110d57cefd2b1ff9b6c56ae80606d77bd3",
        ),
    ];
    for (bech32, expected) in cases {
        let keypair = SuiKeyPair::from_bech32(bech32).unwrap();
        let signature = keypair.sign_personal_message(b"hello").unwrap();
        assert_eq!(hex::encode(&signature), expected, "{}", keypair.scheme());
        keypair.verify_personal_message(b"hello", &signature).unwrap();
    }
}

#[test]
fn ecdsa_signatures_are_low_s() {
    for (bech32, half) in [
        (SECP256K1_BECH32, SECP256K1_HALF_ORDER),
        (SECP256R1_BECH32, SECP256R1_HALF_ORDER),
    ] {
        let keypair = SuiKeyPair::from_bech32(bech32).unwrap();
        let half = hex::decode(half).unwrap();
        for i in 0..32u8 {
            let message = vec![i; 1 + i as usize];
            let signature = keypair.sign_personal_message(&message).unwrap();
            assert_eq!(signature.len(), 98);
            assert!(signature[33..65] <= half[..]);

            let tx = keypair.sign_transaction(&message).unwrap();
            assert!(tx[33..65] <= half[..]);
        }
    }
}

#[test]
fn tampered_envelopes_do_not_verify() {
    for bech32 in [ED25519_BECH32, SECP256K1_BECH32, SECP256R1_BECH32] {
        let keypair = SuiKeyPair::from_bech32(bech32).unwrap();
        let signature = keypair.sign_transaction(b"tx").unwrap();

        let mut flipped = signature.clone();
        flipped[10] ^= 0x01;
        assert!(keypair.verify_transaction(b"tx", &flipped).is_err());

        let mut wrong_flag = signature.clone();
        wrong_flag[0] = (wrong_flag[0] + 1) % 3;
        let err = keypair.verify_transaction(b"tx", &wrong_flag).unwrap_err();
        assert!(!err.is_verification_failure());

        assert!(keypair
            .verify_transaction(b"other tx", &signature)
            .unwrap_err()
            .is_verification_failure());
    }
}

#[test]
fn empty_personal_message_is_rejected() {
    let keypair = SuiKeyPair::from_bech32(ED25519_BECH32).unwrap();
    let err = keypair.sign_personal_message(b"").unwrap_err();
    assert_eq!(err.to_string(), "intent: message must not be empty");
}
