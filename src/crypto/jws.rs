//! Compact JWS serialization restricted to ES256.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use p256::ecdsa::{
	Signature, SigningKey, VerifyingKey,
	signature::{Signer, Verifier},
};
// self
use crate::_prelude::*;

/// Only JWS algorithm produced or accepted by the client.
pub const ES256: &str = "ES256";

/// Protected header of a compact JWS.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwsHeader {
	/// Signature algorithm identifier.
	pub alg: String,
}
impl JwsHeader {
	/// Header emitted for every signed assertion: exactly `{"alg":"ES256"}`.
	pub fn es256() -> Self {
		Self { alg: ES256.into() }
	}
}

/// Failures while authenticating a signed token.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum VerificationError {
	/// Token is not a well-formed compact JWS.
	#[error("Signed token is malformed: {reason}.")]
	Malformed {
		/// Which structural check failed.
		reason: &'static str,
	},
	/// Token header names an algorithm other than ES256.
	#[error("Signed token uses unsupported algorithm `{alg}`.")]
	UnsupportedAlgorithm {
		/// Algorithm found in the header.
		alg: String,
	},
	/// Signature does not validate against the trusted key.
	#[error("Signature verification failed.")]
	InvalidSignature,
}

/// Serializes `claims` and signs `header.payload` with ES256.
pub fn encode_es256<T>(claims: &T, key: &SigningKey) -> Result<String, serde_json::Error>
where
	T: ?Sized + Serialize,
{
	let header = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&JwsHeader::es256())?);
	let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
	let signing_input = format!("{header}.{payload}");
	let signature: Signature = key.sign(signing_input.as_bytes());

	Ok(format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature.to_bytes())))
}

/// Checks the structure, algorithm, and signature of `token`, returning the raw payload bytes.
pub fn decode_es256(token: &str, key: &VerifyingKey) -> Result<Vec<u8>, VerificationError> {
	let mut segments = token.trim().split('.');
	let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) =
		(segments.next(), segments.next(), segments.next(), segments.next())
	else {
		return Err(VerificationError::Malformed { reason: "expected three segments" });
	};
	let header_bytes = URL_SAFE_NO_PAD
		.decode(header_b64)
		.map_err(|_| VerificationError::Malformed { reason: "header is not base64url" })?;
	let header: JwsHeader = serde_json::from_slice(&header_bytes)
		.map_err(|_| VerificationError::Malformed { reason: "header is not a JSON object" })?;

	if header.alg != ES256 {
		return Err(VerificationError::UnsupportedAlgorithm { alg: header.alg });
	}

	let payload = URL_SAFE_NO_PAD
		.decode(payload_b64)
		.map_err(|_| VerificationError::Malformed { reason: "payload is not base64url" })?;
	let signature_bytes = URL_SAFE_NO_PAD
		.decode(signature_b64)
		.map_err(|_| VerificationError::Malformed { reason: "signature is not base64url" })?;
	let signature =
		Signature::from_slice(&signature_bytes).map_err(|_| VerificationError::InvalidSignature)?;
	let signing_input_len = header_b64.len() + 1 + payload_b64.len();
	let signing_input = &token.trim()[..signing_input_len];

	key.verify(signing_input.as_bytes(), &signature)
		.map_err(|_| VerificationError::InvalidSignature)?;

	Ok(payload)
}
