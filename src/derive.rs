//! Brainwallet key derivation
//!
//! passphrase bytes -> SHA256 seed -> secp256k1 keypair.
//!
//! The passphrase is hashed exactly as supplied: no trimming, no case
//! folding, no Unicode normalization. Identical byte sequences always
//! derive identical keys.

use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// 32-byte seed produced by hashing the passphrase
pub type Seed = [u8; 32];

#[derive(Debug, Error)]
pub enum DeriveError {
    /// The seed, read as a big-endian integer, is zero or not below the
    /// secp256k1 curve order. Practically unreachable for SHA256 output,
    /// but checked rather than assumed.
    #[error("seed is not a valid secp256k1 scalar (zero or >= curve order)")]
    InvalidScalar,
}

/// A derived secp256k1 keypair
///
/// Owned by the single derivation call that produced it; never stored,
/// logged, or serialized.
pub struct KeyPair {
    pub secret: SecretKey,
    pub public: PublicKey,
}

/// Hash a passphrase into a 32-byte seed
///
/// Pure and total: any byte sequence, including empty, produces a seed.
pub fn seed_from_passphrase(passphrase: &[u8]) -> Seed {
    Sha256::digest(passphrase).into()
}

/// Derive a keypair from a seed
///
/// The public key is the base-point multiplication of the secret scalar.
pub fn derive_keypair(seed: &Seed) -> Result<KeyPair, DeriveError> {
    let secp = Secp256k1::new();
    let secret = SecretKey::from_slice(seed).map_err(|_| DeriveError::InvalidScalar)?;
    let public = PublicKey::from_secret_key(&secp, &secret);

    Ok(KeyPair { secret, public })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_plain_sha256() {
        let seed = seed_from_passphrase(b"correct horse battery staple");
        assert_eq!(
            hex::encode(seed),
            "c4bbcb1fbec99d65bf59d85c8cb62ee2db963f0fe106f483d9afa73bd4e39a8a"
        );
    }

    #[test]
    fn test_empty_passphrase_hashes() {
        // SHA256 of the empty byte sequence
        let seed = seed_from_passphrase(b"");
        assert_eq!(
            hex::encode(seed),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let seed = seed_from_passphrase(b"test");
        let a = derive_keypair(&seed).unwrap();
        let b = derive_keypair(&seed).unwrap();

        assert_eq!(a.secret.secret_bytes(), b.secret.secret_bytes());
        assert_eq!(a.public.serialize_uncompressed(), b.public.serialize_uncompressed());
    }

    #[test]
    fn test_zero_seed_rejected() {
        let seed = [0u8; 32];
        assert!(matches!(
            derive_keypair(&seed),
            Err(DeriveError::InvalidScalar)
        ));
    }

    #[test]
    fn test_seed_above_curve_order_rejected() {
        // 0xFF..FF is well above the secp256k1 group order
        let seed = [0xFFu8; 32];
        assert!(matches!(
            derive_keypair(&seed),
            Err(DeriveError::InvalidScalar)
        ));
    }
}
