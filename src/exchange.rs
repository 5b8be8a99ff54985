//! Authorization code exchange orchestrated end to end.
//!
//! [`Client::exchange_code`] walks a single exchange through the stages of
//! [`ExchangeStage`]: it signs the request assertion, digests the exact body, composes the
//! `Civic <assertion>.<digest>` header, performs one POST, and for a success status verifies
//! the response token against the trusted key before decrypting the user data. Every stage
//! is attempted at most once; any failure ends the exchange with a typed
//! [`Error`](crate::error::Error).

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;

// self
use crate::{
	_prelude::*,
	auth::Credentials,
	crypto::{self, RequestSigner, ResponseVerifier, SigningError},
	error::{ApiError, ConfigError},
	http::{HttpResponse, SipHttpClient},
	obs::{self, ExchangeOutcome, ExchangeSpan, ExchangeStage},
	service::ServiceDescriptor,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestSipClient = Client<ReqwestHttpClient>;

/// Exchanges front-end authorization codes for verified, decrypted user data.
///
/// The client owns the transport, the immutable application credentials, and the service
/// descriptor. It holds no mutable state, so clones and concurrent exchanges are
/// independent of each other.
#[derive(Clone)]
pub struct Client<C>
where
	C: ?Sized + SipHttpClient,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Application credentials used to sign, digest, and decrypt.
	pub credentials: Credentials,
	/// Service endpoints, trusted key, and timeout.
	pub descriptor: ServiceDescriptor,
	verifier: ResponseVerifier,
}
impl<C> Client<C>
where
	C: ?Sized + SipHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		credentials: Credentials,
		descriptor: ServiceDescriptor,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		let verifier = ResponseVerifier::new(descriptor.trusted_key.clone());

		Self { http_client: http_client.into(), credentials, descriptor, verifier }
	}

	/// Exchanges `token` for the user's identifier and decrypted data.
	pub async fn exchange_code(&self, token: &str) -> Result<ExchangeResult> {
		let span = ExchangeSpan::new(&self.credentials.app_id);
		let mut stage = StageTracker::default();

		obs::record_exchange_outcome(ExchangeStage::Idle, ExchangeOutcome::Attempt);

		let result = span.instrument(self.run(token, &mut stage)).await;

		match &result {
			Ok(_) => obs::record_exchange_outcome(stage.current(), ExchangeOutcome::Success),
			Err(_) => obs::record_exchange_outcome(stage.current(), ExchangeOutcome::Failure),
		}

		result
	}

	/// Builds the signed request for `token` using the current time.
	pub fn build_request(&self, token: &str) -> Result<SignedRequest> {
		self.sign_request(&ExchangeRequest::auth_code(token), OffsetDateTime::now_utc())
	}

	/// Signs `request` with an assertion issued at `issued_at`.
	pub fn sign_request(
		&self,
		request: &ExchangeRequest,
		issued_at: OffsetDateTime,
	) -> Result<SignedRequest> {
		let signer = RequestSigner::new(
			self.credentials.app_id.clone(),
			&self.credentials.private_signing_key,
			self.descriptor.audience(),
		)?;
		let assertion = signer.sign(request.call.clone(), issued_at)?;
		let body = request.body().map_err(SigningError::from)?;
		let digest = crypto::digest(self.credentials.secret.hmac_key(), body.as_bytes());
		let endpoint = self.descriptor.endpoint(&request.call.path).map_err(ConfigError::from)?;

		Ok(SignedRequest { endpoint, body, authorization: AuthorizationHeader::new(assertion, digest) })
	}

	/// Turns the service's answer into an [`ExchangeResult`].
	///
	/// Non-success statuses become [`Error::Api`](crate::error::Error::Api) without touching
	/// the body; success bodies are verified before anything is decrypted.
	pub fn process_response(&self, response: HttpResponse) -> Result<ExchangeResult> {
		self.process(response, &mut StageTracker(ExchangeStage::ResponseReceived))
	}

	async fn run(&self, token: &str, stage: &mut StageTracker) -> Result<ExchangeResult> {
		let request = self.build_request(token)?;

		stage.advance(ExchangeStage::RequestBuilt);

		let post = request.into_post(self.descriptor.request_timeout);

		stage.advance(ExchangeStage::Sent);

		let response = self.http_client.post_json(post).await?;

		stage.advance(ExchangeStage::ResponseReceived);

		self.process(response, stage)
	}

	fn process(&self, response: HttpResponse, stage: &mut StageTracker) -> Result<ExchangeResult> {
		if !response.is_success() {
			return Err(ApiError::new(response.status, response.body).into());
		}

		let envelope = ResponseEnvelope::parse(&response.body)?;
		let claims = self.verifier.verify(&envelope.data)?;

		stage.advance(ExchangeStage::Verified);

		let plaintext = crypto::decrypt(&self.credentials.secret, &claims.data)?;
		let data = response::parse_user_data(&plaintext)?;

		stage.advance(ExchangeStage::Decrypted);

		let result = ExchangeResult { user_id: envelope.user_id, data };

		stage.advance(ExchangeStage::Done);

		Ok(result)
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Creates a client for the hosted production service.
	///
	/// The client provisions its own reqwest-backed transport so callers do not need to pass
	/// HTTP handles explicitly.
	pub fn new(credentials: Credentials) -> Self {
		Self::with_descriptor(credentials, ServiceDescriptor::production())
	}

	/// Creates a reqwest-backed client for a custom descriptor.
	pub fn with_descriptor(credentials: Credentials, descriptor: ServiceDescriptor) -> Self {
		Self::with_http_client(credentials, descriptor, ReqwestHttpClient::default())
	}
}
impl<C> Debug for Client<C>
where
	C: ?Sized + SipHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("app_id", &self.credentials.app_id)
			.field("descriptor", &self.descriptor)
			.finish_non_exhaustive()
	}
}

/// Last stage an exchange reached.
#[derive(Debug, Default)]
struct StageTracker(ExchangeStage);
impl StageTracker {
	fn advance(&mut self, stage: ExchangeStage) {
		self.0 = stage;

		obs::record_stage(stage);
	}

	fn current(&self) -> ExchangeStage {
		self.0
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
	// self
	use super::*;
	use crate::{
		auth::{AppId, PrivateSigningKey},
		crypto::{RequestClaims, TrustedPublicKey, VerificationError, keys},
		error::{Error, TransportError},
		http::{JsonPost, TransportFuture},
	};

	const SIGNING_KEY_HEX: &str =
		"ec844af6422e1f3db7bdbf6443bd47ea9e58f31a708045a9b8c4f36a3987bad4";
	const SECRET: &str = "50c0c3273d5a7ca8a04287f82c6d0111";
	const SERVICE_KEY_HEX: &str =
		"1f4ad6c4a0f06a43ac8e6b6f84bd2c4e0b9f0e37d0de2a2c1f73c8f2a5e0a9b1";
	const USER_DATA: &str = r#"[{"label":"contact.personal.email","value":"foo@example.com","isValid":true,"isOwner":true}]"#;

	struct CannedHttpClient {
		response: HttpResponse,
		requests: std::sync::Mutex<Vec<JsonPost>>,
	}
	impl CannedHttpClient {
		fn new(response: HttpResponse) -> Self {
			Self { response, requests: Default::default() }
		}
	}
	impl SipHttpClient for CannedHttpClient {
		fn post_json(&self, request: JsonPost) -> TransportFuture<'_> {
			self.requests.lock().expect("Request log should not be poisoned.").push(request);

			let response = self.response.clone();

			Box::pin(async move { Ok(response) })
		}
	}

	struct UnreachableHttpClient;
	impl SipHttpClient for UnreachableHttpClient {
		fn post_json(&self, _request: JsonPost) -> TransportFuture<'_> {
			Box::pin(async {
				Err(TransportError::network(std::io::Error::new(
					std::io::ErrorKind::ConnectionRefused,
					"connection refused",
				)))
			})
		}
	}

	fn credentials() -> Credentials {
		Credentials::new(
			AppId::new("app42").expect("Fixture app should be valid."),
			SIGNING_KEY_HEX,
			SECRET,
		)
	}

	fn descriptor() -> ServiceDescriptor {
		let public = keys::public_key_hex(&PrivateSigningKey::new(SERVICE_KEY_HEX))
			.expect("Fixture key should derive a public key.");

		ServiceDescriptor::builder(
			Url::parse("https://sip.example.com/sip").expect("Fixture URL should parse."),
		)
		.trusted_key(TrustedPublicKey::from_hex(&public).expect("Public key should parse."))
		.build()
		.expect("Fixture descriptor should build.")
	}

	fn envelope_for(user_data: &str) -> String {
		envelope_with_user(user_data, "user-123")
	}

	fn envelope_with_user(user_data: &str, user_id: &str) -> String {
		let key: [u8; 16] = hex::decode(SECRET)
			.expect("Fixture secret should be hex.")
			.try_into()
			.expect("Fixture secret should be 16 bytes.");
		let blob = crypto::encrypt(&key, &[9; 16], user_data.as_bytes());
		let service_key = keys::parse_signing_key(&PrivateSigningKey::new(SERVICE_KEY_HEX))
			.expect("Fixture key should parse.");
		let token = crypto::encode_es256(&serde_json::json!({ "data": blob }), &service_key)
			.expect("Claims should serialize.");

		serde_json::json!({ "data": token, "userId": user_id, "encrypted": true, "alg": "aes" })
			.to_string()
	}

	fn client<C>(http_client: C) -> Client<C>
	where
		C: SipHttpClient,
	{
		Client::with_http_client(credentials(), descriptor(), http_client)
	}

	#[test]
	fn signed_request_has_digest_over_exact_body() {
		let client = client(UnreachableHttpClient);
		let request = client.build_request("token42").expect("Request should build.");
		let header = request.authorization.to_string();

		assert_eq!(request.body, r#"{"authToken":"token42"}"#);
		assert_eq!(request.endpoint.as_str(), "https://sip.example.com/sip/prod/scopeRequest/authCode");
		assert!(header.starts_with("Civic eyJhbGciOiJFUzI1NiJ9."));
		assert!(header.ends_with(".y5QbDonAB/e49jINSyQVItCq90cq39hfBUyIynYv5DI="));
		assert_eq!(
			request.authorization.digest(),
			crypto::digest(SECRET.as_bytes(), request.body.as_bytes())
		);
	}

	#[test]
	fn assertion_claims_follow_descriptor_audience() {
		let client = client(UnreachableHttpClient);
		let request = client.build_request("token42").expect("Request should build.");
		let payload = request
			.authorization
			.assertion()
			.split('.')
			.nth(1)
			.expect("Assertion should have a payload.");
		let claims: RequestClaims = serde_json::from_slice(
			&URL_SAFE_NO_PAD.decode(payload).expect("Payload should be base64url."),
		)
		.expect("Payload should be request claims.");

		assert_eq!(claims.aud, "https://sip.example.com/sip");
		assert_eq!(claims.exp - claims.iat, 180);
	}

	#[tokio::test]
	async fn exchange_decrypts_verified_payload() {
		let http_client = CannedHttpClient::new(HttpResponse::new(200, envelope_for(USER_DATA)));
		let client = client(http_client);
		let result = client.exchange_code("token42").await.expect("Exchange should succeed.");

		assert_eq!(result.user_id.as_ref(), "user-123");
		assert_eq!(
			result.data,
			serde_json::from_str::<serde_json::Value>(USER_DATA).expect("Fixture should parse.")
		);

		let requests = client.http_client.requests.lock().expect("Log should not be poisoned.");

		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].body, r#"{"authToken":"token42"}"#);
		assert!(requests[0].timeout.is_none());
	}

	#[test]
	fn user_ids_from_authentic_responses_pass_through_verbatim() {
		let client = client(UnreachableHttpClient);
		let long = "a".repeat(129);

		for user_id in ["user 123", "", long.as_str(), "ユーザー\t42"] {
			let result = client
				.process_response(HttpResponse::new(200, envelope_with_user(USER_DATA, user_id)))
				.expect("Authentic responses should succeed whatever the user identifier.");

			assert_eq!(result.user_id.as_ref(), user_id);
		}
	}

	#[tokio::test]
	async fn non_success_status_becomes_api_error() {
		let client = client(CannedHttpClient::new(HttpResponse::new(
			400,
			"[Bad Request]: token failed verification",
		)));
		let err = client.exchange_code("token42").await.expect_err("HTTP 400 must fail.");

		match err {
			Error::Api(api) => {
				assert_eq!(api.http_code(), "400");
				assert_eq!(api.message(), "[Bad Request]: token failed verification");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[tokio::test]
	async fn transport_failures_are_surfaced() {
		let err = client(UnreachableHttpClient)
			.exchange_code("token42")
			.await
			.expect_err("Unreachable service must fail.");

		assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
		assert!(err.is_retryable());
	}

	#[test]
	fn forged_signer_fails_before_decryption() {
		let client = client(UnreachableHttpClient);
		let mut envelope: serde_json::Value =
			serde_json::from_str(&envelope_for(USER_DATA)).expect("Envelope should parse.");
		let rogue = keys::parse_signing_key(&PrivateSigningKey::new(SIGNING_KEY_HEX))
			.expect("Fixture key should parse.");

		// Undecryptable data proves the verifier runs first.
		envelope["data"] = crypto::encode_es256(&serde_json::json!({ "data": "garbage" }), &rogue)
			.expect("Claims should serialize.")
			.into();

		let err = client
			.process_response(HttpResponse::new(200, envelope.to_string()))
			.expect_err("Forged responses must fail.");

		assert!(matches!(err, Error::Verification(VerificationError::InvalidSignature)));
	}

	#[test]
	fn undecryptable_and_unparseable_payloads_are_distinct() {
		let client = client(UnreachableHttpClient);
		let service_key = keys::parse_signing_key(&PrivateSigningKey::new(SERVICE_KEY_HEX))
			.expect("Fixture key should parse.");
		let token = crypto::encode_es256(&serde_json::json!({ "data": "00" }), &service_key)
			.expect("Claims should serialize.");
		let body = serde_json::json!({ "data": token, "userId": "user-123" }).to_string();
		let err = client
			.process_response(HttpResponse::new(200, body))
			.expect_err("Truncated payloads must fail.");

		assert!(matches!(err, Error::Decryption(crypto::DecryptionError::Truncated)));

		let err = client
			.process_response(HttpResponse::new(200, envelope_for("not json")))
			.expect_err("Non-JSON user data must fail.");

		assert!(matches!(err, Error::MalformedPayload(crate::error::PayloadError::UserData { .. })));
	}

	#[tokio::test]
	async fn malformed_signing_key_fails_before_sending() {
		let http_client = CannedHttpClient::new(HttpResponse::new(200, "{}"));
		let credentials =
			Credentials::new(AppId::new("app42").expect("Fixture app should be valid."), "zz", SECRET);
		let client =
			<Client<CannedHttpClient>>::with_http_client(credentials, descriptor(), http_client);
		let err = client.exchange_code("token42").await.expect_err("Bad keys must fail.");

		assert!(matches!(err, Error::Signing(SigningError::InvalidKey(_))));
		assert!(client.http_client.requests.lock().expect("Log should not be poisoned.").is_empty());
	}
}
