//! P2PKH address encoding
//!
//! Serialization is pinned to the uncompressed 65-byte SEC1 form: this is
//! what classic brainwallet tooling produces, and switching to compressed
//! keys would change every derived address for the same passphrase.
//!
//! Address layout: version byte || HASH160(pubkey) || 4-byte checksum,
//! base58 encoded. The checksum is the leading 4 bytes of
//! SHA256(SHA256(version || hash160)).

use ripemd::Ripemd160;
use secp256k1::PublicKey;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::P2PKH_VERSION_MAINNET;

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("address is not valid base58: {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error("address payload too short: {0} bytes")]
    TooShort(usize),

    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

/// Compute HASH160 = RIPEMD160(SHA256(data))
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(&sha).into()
}

/// Encode a public key as a mainnet P2PKH address
///
/// Never fails for a valid public key. bs58 maps each leading zero byte
/// of the payload to a leading '1', so mainnet addresses start with '1'.
pub fn p2pkh_address(public_key: &PublicKey) -> String {
    let serialized = public_key.serialize_uncompressed();
    let digest = hash160(&serialized);

    let mut payload = Vec::with_capacity(25);
    payload.push(P2PKH_VERSION_MAINNET);
    payload.extend_from_slice(&digest);

    let checksum = checksum4(&payload);
    payload.extend_from_slice(&checksum);

    bs58::encode(payload).into_string()
}

/// Base58check decode: strip and verify the 4-byte checksum
///
/// Returns the payload (version byte + hash) on success.
pub fn decode_check(address: &str) -> Result<Vec<u8>, AddressError> {
    let raw = bs58::decode(address).into_vec()?;
    if raw.len() < 5 {
        return Err(AddressError::TooShort(raw.len()));
    }

    let (payload, checksum) = raw.split_at(raw.len() - 4);
    let expected = checksum4(payload);
    if checksum != &expected[..] {
        return Err(AddressError::ChecksumMismatch);
    }

    Ok(payload.to_vec())
}

/// First 4 bytes of a double SHA256
fn checksum4(payload: &[u8]) -> [u8; 4] {
    let hash1 = Sha256::digest(payload);
    let hash2 = Sha256::digest(&hash1);

    let mut checksum = [0u8; 4];
    checksum.copy_from_slice(&hash2[..4]);
    checksum
}
