//! Fixtures shared by the integration tests: application credentials, a mock service key,
//! and helpers that forge the service's signed and encrypted envelopes.

#![allow(dead_code)]

// crates.io
use httpmock::MockServer;
// self
use civic_sip::{
	auth::{AppId, Credentials, PrivateSigningKey},
	crypto::{self, TrustedPublicKey, keys},
	http::ReqwestHttpClient,
	reqwest::Client as ReqwestClient,
	service::ServiceDescriptor,
	url::Url,
};

pub const APP_ID: &str = "app42";
pub const SIGNING_KEY_HEX: &str = "ec844af6422e1f3db7bdbf6443bd47ea9e58f31a708045a9b8c4f36a3987bad4";
pub const SECRET: &str = "50c0c3273d5a7ca8a04287f82c6d0111";
pub const SERVICE_KEY_HEX: &str = "1f4ad6c4a0f06a43ac8e6b6f84bd2c4e0b9f0e37d0de2a2c1f73c8f2a5e0a9b1";
pub const ROGUE_KEY_HEX: &str = "5a1c0e2f9b7d3a4c6e8f0a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f";
pub const TOKEN: &str = "token42";
pub const REQUEST_BODY: &str = r#"{"authToken":"token42"}"#;
pub const REQUEST_DIGEST: &str = "y5QbDonAB/e49jINSyQVItCq90cq39hfBUyIynYv5DI=";
pub const USER_ID: &str = "user-123";
pub const USER_DATA: &str = r#"[{"label":"contact.personal.email","value":"foo@example.com","isValid":true,"isOwner":true},{"label":"contact.personal.phoneNumber","value":"+1 555 0100","isValid":true,"isOwner":true}]"#;
pub const AUTH_CODE_PATH: &str = "/sip/prod/scopeRequest/authCode";

pub fn credentials() -> Credentials {
	Credentials::new(
		AppId::new(APP_ID).expect("Fixture application identifier should be valid."),
		SIGNING_KEY_HEX,
		SECRET,
	)
}

/// Public half of [`SERVICE_KEY_HEX`], trusted by [`descriptor`].
pub fn service_public_key() -> TrustedPublicKey {
	let public = keys::public_key_hex(&PrivateSigningKey::new(SERVICE_KEY_HEX))
		.expect("Fixture service key should derive a public key.");

	TrustedPublicKey::from_hex(&public).expect("Derived public key should parse.")
}

/// Descriptor pointing at the mock server's `/sip` base.
pub fn descriptor(server: &MockServer) -> ServiceDescriptor {
	ServiceDescriptor::builder(
		Url::parse(&server.url("/sip")).expect("Mock base URL should parse successfully."),
	)
	.trusted_key(service_public_key())
	.build()
	.expect("Mock descriptor should build successfully.")
}

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock`.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = ReqwestClient::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Encrypts `user_data` under the fixture secret and signs it with `signer_hex`.
pub fn signed_data(user_data: &str, signer_hex: &str) -> String {
	let key: [u8; 16] = hex::decode(SECRET)
		.expect("Fixture secret should be hex.")
		.try_into()
		.expect("Fixture secret should decode to 16 bytes.");
	let blob = crypto::encrypt(&key, &[7; 16], user_data.as_bytes());
	let signer = keys::parse_signing_key(&PrivateSigningKey::new(signer_hex))
		.expect("Fixture signer should parse.");
	let claims = serde_json::json!({
		"jti": "3c0e2c57-5f5c-4c9d-9d26-b5a7a3c87f27",
		"iat": 1_500_000_000,
		"exp": 1_500_000_180,
		"iss": "civic-sip-hosted-service",
		"aud": "https://api.civic.com/sip/",
		"sub": "civic-sip-hosted-service",
		"data": blob,
	});

	crypto::encode_es256(&claims, &signer).expect("Fixture claims should serialize.")
}

/// Success body as the hosted service returns it.
pub fn envelope(user_data: &str, signer_hex: &str) -> String {
	serde_json::json!({
		"data": signed_data(user_data, signer_hex),
		"userId": USER_ID,
		"encrypted": true,
		"alg": "aes",
	})
	.to_string()
}
