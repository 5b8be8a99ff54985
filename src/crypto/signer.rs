//! Short-lived ES256 assertions authorizing a single API call.
//!
//! Each assertion names the application as issuer and subject, the service base URL as
//! audience, and carries a `data` claim listing the HTTP method and path being authorized.
//! Assertions live for exactly [`ASSERTION_TTL`] and carry a fresh random `jti`.

// crates.io
use p256::ecdsa::SigningKey;
use rand::Rng;
// self
use crate::{
	_prelude::*,
	auth::{AppId, PrivateSigningKey},
	crypto::{
		jws,
		keys::{self, KeyError},
	},
};

/// Lifetime of every request assertion.
pub const ASSERTION_TTL: Duration = Duration::seconds(180);

const JTI_BYTES: usize = 16;

/// Failures while producing request credentials locally.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// Private signing key is malformed or not a valid P-256 scalar.
	#[error("Private signing key is invalid.")]
	InvalidKey(#[from] KeyError),
	/// Claims could not be serialized.
	#[error("Assertion claims could not be serialized.")]
	Serialize(#[from] serde_json::Error),
}

/// HTTP method and path pair an assertion authorizes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedCall {
	/// HTTP method, upper case.
	pub method: String,
	/// Path relative to the service stage.
	pub path: String,
}
impl ScopedCall {
	/// Path of the authorization code exchange endpoint.
	pub const AUTH_CODE_PATH: &'static str = "scopeRequest/authCode";

	/// Creates a new call description.
	pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
		Self { method: method.into(), path: path.into() }
	}

	/// `POST scopeRequest/authCode`.
	pub fn auth_code() -> Self {
		Self::new("POST", Self::AUTH_CODE_PATH)
	}
}

/// Claim set of a request assertion, serialized in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestClaims {
	/// Issued-at, Unix seconds.
	pub iat: i64,
	/// Expiry, always `iat` plus [`ASSERTION_TTL`].
	pub exp: i64,
	/// Issuer (application identifier).
	pub iss: String,
	/// Audience; the hosted service expects its own base URL here, not the app identifier.
	pub aud: String,
	/// Subject (application identifier).
	pub sub: String,
	/// Unique assertion identifier.
	pub jti: String,
	/// Calls authorized by this assertion.
	pub data: Vec<ScopedCall>,
}
impl RequestClaims {
	/// Builds the claim set for `call` issued at `issued_at`.
	pub fn new(
		app_id: &AppId,
		audience: &str,
		call: ScopedCall,
		issued_at: OffsetDateTime,
		jti: impl Into<String>,
	) -> Self {
		let iat = issued_at.unix_timestamp();

		Self {
			iat,
			exp: iat + ASSERTION_TTL.whole_seconds(),
			iss: app_id.to_string(),
			aud: audience.to_owned(),
			sub: app_id.to_string(),
			jti: jti.into(),
			data: vec![call],
		}
	}
}

/// Generates a fresh assertion identifier: 16 random bytes as lowercase hex.
pub fn generate_jti() -> String {
	let mut bytes = [0_u8; JTI_BYTES];

	rand::rng().fill(&mut bytes);

	hex::encode(bytes)
}

/// Signs request assertions on behalf of one application.
#[derive(Clone)]
pub struct RequestSigner {
	app_id: AppId,
	audience: String,
	key: SigningKey,
}
impl RequestSigner {
	/// Parses the private key and binds it to the application and audience.
	pub fn new(
		app_id: AppId,
		private_key: &PrivateSigningKey,
		audience: impl Into<String>,
	) -> Result<Self, SigningError> {
		let key = keys::parse_signing_key(private_key)?;

		Ok(Self { app_id, audience: audience.into(), key })
	}

	/// Signs an assertion for `call` issued at `issued_at` with a fresh `jti`.
	pub fn sign(
		&self,
		call: ScopedCall,
		issued_at: OffsetDateTime,
	) -> Result<String, SigningError> {
		let claims =
			RequestClaims::new(&self.app_id, &self.audience, call, issued_at, generate_jti());

		self.sign_claims(&claims)
	}

	/// Signs an assertion for `call` issued now.
	pub fn sign_now(&self, call: ScopedCall) -> Result<String, SigningError> {
		self.sign(call, OffsetDateTime::now_utc())
	}

	/// Signs a caller-assembled claim set.
	pub fn sign_claims(&self, claims: &RequestClaims) -> Result<String, SigningError> {
		Ok(jws::encode_es256(claims, &self.key)?)
	}
}
impl Debug for RequestSigner {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestSigner")
			.field("app_id", &self.app_id)
			.field("audience", &self.audience)
			.finish_non_exhaustive()
	}
}
