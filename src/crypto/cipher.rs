//! AES-128-CBC user-data payloads.
//!
//! A payload is the 16-byte IV as 32 hex characters followed by the base64 ciphertext, which
//! the service may wrap with MIME line breaks.

// crates.io
use aes::{
	Aes128,
	cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, auth::SharedSecret};

type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes128CbcEnc = cbc::Encryptor<Aes128>;

/// AES block and IV size in bytes.
pub const BLOCK_LEN: usize = 16;

const IV_HEX_LEN: usize = BLOCK_LEN * 2;

/// Failures while recovering the plaintext user data.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum DecryptionError {
	/// Payload is too short or its ciphertext is not whole blocks.
	#[error("Encrypted payload is truncated.")]
	Truncated,
	/// IV prefix is not hex.
	#[error("Encrypted payload has a malformed IV prefix.")]
	InvalidIv,
	/// Ciphertext is not base64.
	#[error("Encrypted payload ciphertext is not valid base64.")]
	InvalidEncoding,
	/// Shared secret does not decode to an AES-128 key.
	#[error("Shared secret is not a 16-byte hex key.")]
	InvalidKey,
	/// Padding check failed: wrong key or tampered ciphertext.
	#[error("Encrypted payload failed padding validation.")]
	Padding,
}

/// Decrypts an IV-prefixed payload with the application's shared secret.
pub fn decrypt(secret: &SharedSecret, payload: &str) -> Result<Vec<u8>, DecryptionError> {
	let payload = payload.trim();

	if payload.len() < IV_HEX_LEN || !payload.is_char_boundary(IV_HEX_LEN) {
		return Err(DecryptionError::Truncated);
	}

	let (iv_hex, body) = payload.split_at(IV_HEX_LEN);
	let iv = hex::decode(iv_hex).map_err(|_| DecryptionError::InvalidIv)?;
	let body: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
	let ciphertext = STANDARD.decode(body).map_err(|_| DecryptionError::InvalidEncoding)?;

	if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
		return Err(DecryptionError::Truncated);
	}

	let key = secret.aes_key().map_err(|_| DecryptionError::InvalidKey)?;
	let cipher =
		Aes128CbcDec::new_from_slices(&key, &iv).map_err(|_| DecryptionError::InvalidKey)?;

	cipher.decrypt_padded_vec_mut::<Pkcs7>(&ciphertext).map_err(|_| DecryptionError::Padding)
}

/// Encrypts `plaintext` into the payload format accepted by [`decrypt`].
///
/// The identity service performs this step in production; the client exposes it for mock
/// services and fixtures.
pub fn encrypt(key: &[u8; BLOCK_LEN], iv: &[u8; BLOCK_LEN], plaintext: &[u8]) -> String {
	let ciphertext = Aes128CbcEnc::new(&(*key).into(), &(*iv).into())
		.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

	format!("{}{}", hex::encode(iv), STANDARD.encode(ciphertext))
}
