//! Encryption for the bearer token persisted in the session file.
//!
//! The session file lives in the user's config directory; the token inside it
//! is encrypted with AES-256-GCM so a copied file is useless without the key.
//! The key is read from the `OPSDESK_TOKEN_KEY` environment variable as a
//! 64-character hex string (32 bytes). A missing key is not an error; the
//! session store degrades to keeping the token in memory only.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use thiserror::Error;

/// Encryption key environment variable name.
pub const TOKEN_KEY_ENV_VAR: &str = "OPSDESK_TOKEN_KEY";

/// Nonce size for AES-256-GCM (96 bits = 12 bytes).
const NONCE_SIZE: usize = 12;

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Invalid encryption key: {0}")]
    InvalidKey(String),

    #[error("Encryption error: {0}")]
    Encrypt(String),

    #[error("Decryption error: {0}")]
    Decrypt(String),
}

pub type Result<T> = std::result::Result<T, SecretError>;

/// Token encryptor using AES-256-GCM.
///
/// Ciphertext format: `<12-byte nonce><ciphertext>`, hex-encoded as one
/// string.
pub struct TokenEncryptor {
    cipher: Aes256Gcm,
}

impl TokenEncryptor {
    /// Creates a TokenEncryptor from `OPSDESK_TOKEN_KEY`.
    ///
    /// Returns `Ok(None)` when the variable is unset, so callers can degrade
    /// to not persisting the token. A set-but-invalid key is an error.
    pub fn from_env() -> Result<Option<Self>> {
        match std::env::var(TOKEN_KEY_ENV_VAR) {
            Ok(key_hex) => Self::from_hex_key(key_hex.trim()).map(Some),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(SecretError::InvalidKey(format!(
                "{} contains invalid UTF-8",
                TOKEN_KEY_ENV_VAR
            ))),
        }
    }

    /// Creates a TokenEncryptor from a 64-character hex key (32 bytes).
    pub fn from_hex_key(key_hex: &str) -> Result<Self> {
        let key_bytes =
            hex_decode(key_hex).map_err(|e| SecretError::InvalidKey(format!("Invalid hex: {}", e)))?;

        if key_bytes.len() != 32 {
            return Err(SecretError::InvalidKey(format!(
                "Key must be 32 bytes (64 hex chars), got {} bytes",
                key_bytes.len()
            )));
        }

        let cipher = Aes256Gcm::new_from_slice(&key_bytes)
            .map_err(|e| SecretError::InvalidKey(e.to_string()))?;

        Ok(Self { cipher })
    }

    /// Encrypts plaintext, returning hex-encoded nonce + ciphertext.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        getrandom::fill(&mut nonce_bytes)
            .map_err(|e| SecretError::Encrypt(format!("Failed to generate nonce: {}", e)))?;
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| SecretError::Encrypt(e.to_string()))?;

        let mut combined = nonce_bytes.to_vec();
        combined.extend(ciphertext);

        Ok(hex_encode(&combined))
    }

    /// Decrypts hex-encoded nonce + ciphertext back to plaintext.
    pub fn decrypt(&self, ciphertext_hex: &str) -> Result<String> {
        let combined = hex_decode(ciphertext_hex)
            .map_err(|e| SecretError::Decrypt(format!("Invalid hex: {}", e)))?;

        if combined.len() < NONCE_SIZE {
            return Err(SecretError::Decrypt("Ciphertext too short".to_string()));
        }

        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext_bytes = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| SecretError::Decrypt(e.to_string()))?;

        String::from_utf8(plaintext_bytes)
            .map_err(|e| SecretError::Decrypt(format!("Invalid UTF-8: {}", e)))
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn hex_decode(hex: &str) -> std::result::Result<Vec<u8>, String> {
    if hex.len() % 2 != 0 {
        return Err("Hex string must have even length".to_string());
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("Invalid hex at position {}: {}", i, e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // 32 bytes = 64 hex chars
    const TEST_KEY: &str = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";

    #[test]
    fn test_roundtrip() {
        let encryptor = TokenEncryptor::from_hex_key(TEST_KEY).unwrap();
        let ciphertext = encryptor.encrypt("bearer-token-value").unwrap();
        assert_eq!(encryptor.decrypt(&ciphertext).unwrap(), "bearer-token-value");
    }

    #[test]
    fn test_nonce_varies_between_encryptions() {
        let encryptor = TokenEncryptor::from_hex_key(TEST_KEY).unwrap();
        let a = encryptor.encrypt("same").unwrap();
        let b = encryptor.encrypt("same").unwrap();
        assert_ne!(a, b);
        assert_eq!(encryptor.decrypt(&a).unwrap(), "same");
        assert_eq!(encryptor.decrypt(&b).unwrap(), "same");
    }

    #[test]
    fn test_invalid_key_rejected() {
        assert!(matches!(
            TokenEncryptor::from_hex_key("deadbeef"),
            Err(SecretError::InvalidKey(_))
        ));
        assert!(matches!(
            TokenEncryptor::from_hex_key("zz112233445566778899aabbccddeeff00112233445566778899aabbccddeeff"),
            Err(SecretError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_tampered_ciphertext_rejected() {
        let encryptor = TokenEncryptor::from_hex_key(TEST_KEY).unwrap();
        let mut bytes = hex_decode(&encryptor.encrypt("token").unwrap()).unwrap();
        if let Some(last) = bytes.last_mut() {
            *last ^= 0xff;
        }
        let result = encryptor.decrypt(&hex_encode(&bytes));
        assert!(matches!(result, Err(SecretError::Decrypt(_))));
    }

    #[test]
    fn test_short_ciphertext_rejected() {
        let encryptor = TokenEncryptor::from_hex_key(TEST_KEY).unwrap();
        assert!(matches!(
            encryptor.decrypt("aabbcc"),
            Err(SecretError::Decrypt(_))
        ));
    }

    #[test]
    #[serial]
    fn test_from_env_absent_is_none() {
        std::env::remove_var(TOKEN_KEY_ENV_VAR);
        assert!(TokenEncryptor::from_env().unwrap().is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_is_error() {
        std::env::set_var(TOKEN_KEY_ENV_VAR, "not-hex");
        assert!(TokenEncryptor::from_env().is_err());
        std::env::remove_var(TOKEN_KEY_ENV_VAR);
    }

    #[test]
    fn test_hex_roundtrip() {
        let original = vec![0x00, 0x0f, 0xf0, 0xff];
        assert_eq!(hex_encode(&original), "000ff0ff");
        assert_eq!(hex_decode("000ff0ff").unwrap(), original);
        assert!(hex_decode("abc").is_err());
        assert!(hex_decode("wxyz").is_err());
    }
}
