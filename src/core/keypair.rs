//! Ed25519 signer derived from a BIP-39 mnemonic.
//!
//! Derivation follows SLIP-0010 along Sui's default path
//! `m/44'/784'/0'/0'/0'`, so a phrase yields the same address here as in the
//! Sui wallets and SDKs.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bip39::{Language, Mnemonic};
use ed25519_dalek::{Signer, SigningKey};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::fmt;

use crate::domain::model::{blake2b256, SuiAddress};
use crate::utils::error::{Result, ScriptError};

type HmacSha512 = Hmac<Sha512>;

pub const ED25519_FLAG: u8 = 0x00;
pub const DERIVATION_PATH: [u32; 5] = [44, 784, 0, 0, 0];
const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Intent prefix for signing transaction data: scope, version, app id.
pub const TRANSACTION_INTENT: [u8; 3] = [0, 0, 0];

fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<[u8; 64]> {
    let mut mac = HmacSha512::new_from_slice(key).map_err(|e| ScriptError::KeyError {
        message: format!("HMAC key rejected: {}", e),
    })?;
    mac.update(data);
    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

fn split_key(i: [u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&i[..32]);
    chain_code.copy_from_slice(&i[32..]);
    (key, chain_code)
}

/// SLIP-0010 Ed25519 derivation; every segment is hardened.
fn derive_slip10(seed: &[u8], path: &[u32]) -> Result<[u8; 32]> {
    let (mut key, mut chain_code) = split_key(hmac_sha512(b"ed25519 seed", seed)?);
    for segment in path {
        let mut data = Vec::with_capacity(37);
        data.push(0u8);
        data.extend_from_slice(&key);
        data.extend_from_slice(&(segment | HARDENED_OFFSET).to_be_bytes());
        (key, chain_code) = split_key(hmac_sha512(&chain_code, &data)?);
    }
    Ok(key)
}

pub struct Ed25519Keypair {
    signing_key: SigningKey,
}

impl Ed25519Keypair {
    pub fn from_mnemonic(phrase: &str) -> Result<Self> {
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase.trim())
            .map_err(|e| ScriptError::KeyError {
                message: format!("invalid mnemonic: {}", e),
            })?;
        let seed = mnemonic.to_seed("");
        Self::from_seed(&seed)
    }

    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let secret = derive_slip10(seed, &DERIVATION_PATH)?;
        Ok(Self::from_secret_key(secret))
    }

    pub fn from_secret_key(secret: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&secret),
        }
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn address(&self) -> SuiAddress {
        let mut preimage = Vec::with_capacity(33);
        preimage.push(ED25519_FLAG);
        preimage.extend_from_slice(&self.public_key_bytes());
        SuiAddress::new(blake2b256(&preimage))
    }

    /// Signs BCS `TransactionData` bytes and returns the Base64 serialized
    /// signature `flag || signature || public key`.
    pub fn sign_transaction(&self, tx_data: &[u8]) -> String {
        let mut message = Vec::with_capacity(TRANSACTION_INTENT.len() + tx_data.len());
        message.extend_from_slice(&TRANSACTION_INTENT);
        message.extend_from_slice(tx_data);
        let digest = blake2b256(&message);
        let signature = self.signing_key.sign(&digest);

        let mut serialized = Vec::with_capacity(1 + 64 + 32);
        serialized.push(ED25519_FLAG);
        serialized.extend_from_slice(&signature.to_bytes());
        serialized.extend_from_slice(&self.public_key_bytes());
        BASE64.encode(serialized)
    }
}

impl fmt::Debug for Ed25519Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519Keypair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
