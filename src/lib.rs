//! Brainwallet address checker library
//!
//! This library derives a deterministic Bitcoin address from a passphrase
//! (SHA256 seed -> secp256k1 keypair -> P2PKH base58check address) and
//! checks the address for on-chain activity against an esplora-style
//! address API. A small session state machine sequences entry, lookup,
//! and result display.
//!
//! Brainwallets are inherently vulnerable to dictionary attack; nothing
//! here tries to fix that, and no key material is retained after the
//! address is produced.

pub mod address;
pub mod balance;
pub mod derive;
pub mod session;

pub use address::{decode_check, p2pkh_address};
pub use balance::{AddressLookup, BalanceClient, BalanceSummary, LookupError};
pub use derive::{derive_keypair, seed_from_passphrase, DeriveError, KeyPair};
pub use session::{Command, Event, Session, SessionState};

/// Version byte prepended to the HASH160 for mainnet P2PKH addresses
pub const P2PKH_VERSION_MAINNET: u8 = 0x00;
