//! Authentication of the identity service's signed response tokens.
//!
//! Only the structure, algorithm, and signature are checked. The token's `exp` claim is
//! surfaced through [`ResponseClaims::expires_at`] but never enforced here.

// self
use crate::{
	_prelude::*,
	crypto::{TrustedPublicKey, jws},
	error::PayloadError,
};

/// Claims carried by a verified response token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseClaims {
	/// Encrypted user data: hex IV followed by base64 ciphertext.
	pub data: String,
	/// Token identifier.
	#[serde(default)]
	pub jti: Option<String>,
	/// Issued-at, Unix seconds.
	#[serde(default)]
	pub iat: Option<i64>,
	/// Expiry, Unix seconds.
	#[serde(default)]
	pub exp: Option<i64>,
	/// Issuer.
	#[serde(default)]
	pub iss: Option<String>,
	/// Audience.
	#[serde(default)]
	pub aud: Option<String>,
	/// Subject.
	#[serde(default)]
	pub sub: Option<String>,
}
impl ResponseClaims {
	/// Expiry as a timestamp, when present and representable.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.exp.and_then(|exp| OffsetDateTime::from_unix_timestamp(exp).ok())
	}
}

/// Verifies response tokens against one trusted key.
#[derive(Clone, Debug, Default)]
pub struct ResponseVerifier {
	trusted_key: TrustedPublicKey,
}
impl ResponseVerifier {
	/// Creates a verifier pinned to `trusted_key`.
	pub fn new(trusted_key: TrustedPublicKey) -> Self {
		Self { trusted_key }
	}

	/// Key every token must be signed by.
	pub fn trusted_key(&self) -> &TrustedPublicKey {
		&self.trusted_key
	}

	/// Authenticates `token` and decodes its claims.
	///
	/// Signature, algorithm, and structure failures surface as
	/// [`Error::Verification`](crate::error::Error::Verification);
	/// authentic tokens whose claims lack a string `data` surface as
	/// [`Error::MalformedPayload`](crate::error::Error::MalformedPayload).
	pub fn verify(&self, token: &str) -> Result<ResponseClaims> {
		let payload = jws::decode_es256(token, self.trusted_key.verifying_key())?;
		let mut de = serde_json::Deserializer::from_slice(&payload);
		let claims = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| PayloadError::Claims { source })?;

		Ok(claims)
	}
}
