// common/src/keys.rs
//! Wallet files and Ed25519 keypairs.
//!
//! Secret material is never logged; `Debug` output shows the address only.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest as _};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::error::{Fault, KeyDerivationError, Result};
use crate::types::SuiAddress;

pub type Blake2b256 = Blake2b<U32>;

pub const SECRET_KEY_LENGTH: usize = 32;
pub const ED25519_FLAG: u8 = 0x00;
const SUI_PRIVATE_KEY_PREFIX: &str = "suiprivkey";

/// Contents of a wallet file: a raw byte array or `{ "privateKey": "..." }`.
#[derive(Deserialize, Clone)]
#[serde(untagged)]
pub enum KeyMaterial {
    Bytes(Vec<u8>),
    Text {
        #[serde(rename = "privateKey")]
        private_key: String,
    },
}

impl KeyMaterial {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let wallet_error = |reason: String| Fault::WalletFile {
            path: path.to_path_buf(),
            reason,
        };
        let raw = std::fs::read_to_string(path).map_err(|e| wallet_error(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| wallet_error(e.to_string()))
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMaterial::Bytes(b) => write!(f, "KeyMaterial::Bytes(<{} bytes>)", b.len()),
            KeyMaterial::Text { .. } => f.write_str("KeyMaterial::Text(<redacted>)"),
        }
    }
}

/// Ed25519 keypair able to sign transactions and derive its Sui address.
#[derive(Clone)]
pub struct SuiKeypair {
    signing: SigningKey,
}

impl SuiKeypair {
    /// 32-byte seed, or 64 bytes laid out as `seed || public key`.
    pub fn from_secret_key(bytes: &[u8]) -> Result<Self, KeyDerivationError> {
        match bytes.len() {
            SECRET_KEY_LENGTH => {
                let mut seed = [0u8; SECRET_KEY_LENGTH];
                seed.copy_from_slice(bytes);
                Ok(Self {
                    signing: SigningKey::from_bytes(&seed),
                })
            }
            64 => {
                let kp = Self::from_secret_key(&bytes[..SECRET_KEY_LENGTH])?;
                if kp.public_key().as_bytes() != &bytes[SECRET_KEY_LENGTH..] {
                    return Err(KeyDerivationError::PublicKeyMismatch);
                }
                Ok(kp)
            }
            actual => Err(KeyDerivationError::WrongLength {
                expected: SECRET_KEY_LENGTH,
                actual,
            }),
        }
    }

    /// Bech32 `suiprivkey1...` strings are decoded; any other text is taken
    /// as its UTF-8 bytes.
    pub fn from_private_key_text(text: &str) -> Result<Self, KeyDerivationError> {
        if text.starts_with(SUI_PRIVATE_KEY_PREFIX) {
            let (hrp, data) =
                bech32::decode(text).map_err(|e| KeyDerivationError::Bech32(e.to_string()))?;
            if hrp.to_string().to_ascii_lowercase() != SUI_PRIVATE_KEY_PREFIX {
                return Err(KeyDerivationError::Bech32(format!("unexpected prefix '{}'", hrp)));
            }
            let (flag, secret) = data
                .split_first()
                .ok_or_else(|| KeyDerivationError::Bech32("empty payload".into()))?;
            if *flag != ED25519_FLAG {
                return Err(KeyDerivationError::UnsupportedScheme(*flag));
            }
            return Self::from_secret_key(secret);
        }
        Self::from_secret_key(text.as_bytes())
    }

    pub fn from_material(material: &KeyMaterial) -> Result<Self, KeyDerivationError> {
        match material {
            KeyMaterial::Bytes(bytes) => Self::from_secret_key(bytes),
            KeyMaterial::Text { private_key } => Self::from_private_key_text(private_key),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let material = KeyMaterial::from_file(path)?;
        Ok(Self::from_material(&material)?)
    }

    pub fn public_key(&self) -> VerifyingKey {
        self.signing.verifying_key()
    }

    /// `blake2b256(flag || public key)`.
    pub fn address(&self) -> SuiAddress {
        let mut hasher = Blake2b256::new();
        hasher.update([ED25519_FLAG]);
        hasher.update(self.public_key().as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        SuiAddress(bytes)
    }

    /// Signs the intent message for `tx_bytes` and returns the serialized
    /// signature `flag || signature || public key`, base64 encoded.
    pub fn sign_transaction(&self, tx_bytes: &[u8]) -> String {
        let digest = Blake2b256::digest(intent_message(tx_bytes));
        let signature = self.signing.sign(&digest);

        let mut serialized = Vec::with_capacity(1 + 64 + 32);
        serialized.push(ED25519_FLAG);
        serialized.extend_from_slice(&signature.to_bytes());
        serialized.extend_from_slice(self.public_key().as_bytes());
        base64::encode(serialized)
    }
}

impl fmt::Debug for SuiKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuiKeypair")
            .field("address", &self.address())
            .finish()
    }
}

/// Intent `TransactionData / V0 / Sui` prepended to the BCS transaction.
pub fn intent_message(tx_bytes: &[u8]) -> Vec<u8> {
    let mut msg = Vec::with_capacity(3 + tx_bytes.len());
    msg.extend_from_slice(&[0, 0, 0]);
    msg.extend_from_slice(tx_bytes);
    msg
}
