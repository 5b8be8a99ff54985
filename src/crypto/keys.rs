//! P-256 key parsing for the application signing key and the service's trusted key.

// crates.io
use p256::ecdsa::{SigningKey, VerifyingKey};
// self
use crate::{_prelude::*, auth::PrivateSigningKey};

/// Identity service signing key (uncompressed SEC1 point, hex encoded).
pub const PRODUCTION_PUBLIC_KEY_HEX: &str = "049a45998638cfb3c4b211d72030d9ae8329a242db63bfb0076a54e7647370a8ac5708b57af6065805d5a6be72332620932dbb35e8d318fce18e7c980a0eb26aa1";

const SCALAR_LEN: usize = 32;

/// Errors raised while parsing hex-encoded key material.
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum KeyError {
	/// Key material was empty.
	#[error("Key material is empty.")]
	Empty,
	/// Key material is not valid hexadecimal.
	#[error("Key material is not valid hex: {0}.")]
	Hex(#[from] hex::FromHexError),
	/// Private scalar is wider than the curve order.
	#[error("Private scalar is {len} bytes; P-256 scalars are at most 32 bytes.")]
	ScalarTooLong {
		/// Decoded byte length.
		len: usize,
	},
	/// Value is zero, out of range, or not a point on P-256.
	#[error("Key material is not valid for curve P-256.")]
	Curve,
}

/// Reconstructs the P-256 signing key from a hex big integer.
///
/// Leading zeros may be omitted and odd digit counts are accepted, mirroring how big
/// integers are usually printed.
pub fn parse_signing_key(key: &PrivateSigningKey) -> Result<SigningKey, KeyError> {
	let digits = key.expose().trim().trim_start_matches('0');

	if key.expose().trim().is_empty() {
		return Err(KeyError::Empty);
	}

	let bytes = decode_big_hex(digits)?;

	if bytes.len() > SCALAR_LEN {
		return Err(KeyError::ScalarTooLong { len: bytes.len() });
	}

	let mut scalar = [0_u8; SCALAR_LEN];

	scalar[SCALAR_LEN - bytes.len()..].copy_from_slice(&bytes);

	SigningKey::from_slice(&scalar).map_err(|_| KeyError::Curve)
}

/// Hex-encoded uncompressed SEC1 public key matching `key`.
///
/// Useful for pointing a mock identity service at a locally generated key pair.
pub fn public_key_hex(key: &PrivateSigningKey) -> Result<String, KeyError> {
	let signing_key = parse_signing_key(key)?;

	Ok(hex::encode(signing_key.verifying_key().to_encoded_point(false).as_bytes()))
}

/// Fixed public key that authenticates the identity service's responses.
#[derive(Clone, PartialEq, Eq)]
pub struct TrustedPublicKey(VerifyingKey);
impl TrustedPublicKey {
	/// The identity service's long-lived production key.
	pub fn production() -> Self {
		Self::from_hex(PRODUCTION_PUBLIC_KEY_HEX)
			.unwrap_or_else(|e| unreachable!("embedded production key must parse: {e}"))
	}

	/// Parses a hex-encoded SEC1 point (compressed or uncompressed).
	pub fn from_hex(value: &str) -> Result<Self, KeyError> {
		let digits = value.trim();

		if digits.is_empty() {
			return Err(KeyError::Empty);
		}

		let bytes = decode_big_hex(digits)?;

		VerifyingKey::from_sec1_bytes(&bytes).map(Self).map_err(|_| KeyError::Curve)
	}

	/// Hex encoding of the uncompressed point.
	pub fn to_hex(&self) -> String {
		hex::encode(self.0.to_encoded_point(false).as_bytes())
	}

	pub(crate) fn verifying_key(&self) -> &VerifyingKey {
		&self.0
	}
}
impl Default for TrustedPublicKey {
	fn default() -> Self {
		Self::production()
	}
}
impl Debug for TrustedPublicKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TrustedPublicKey").field(&self.to_hex()).finish()
	}
}
impl FromStr for TrustedPublicKey {
	type Err = KeyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_hex(s)
	}
}

fn decode_big_hex(digits: &str) -> Result<Vec<u8>, KeyError> {
	if digits.len() % 2 == 1 {
		Ok(hex::decode(format!("0{digits}"))?)
	} else {
		Ok(hex::decode(digits)?)
	}
}
