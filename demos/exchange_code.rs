//! Demonstrates a full code exchange against a local mock of the identity service: the mock
//! checks the request shape and answers with user data encrypted under the application secret
//! and signed by a mock service key.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use civic_sip::{
	auth::{Credentials, PrivateSigningKey},
	crypto::{self, TrustedPublicKey, keys},
	exchange::Client,
	http::ReqwestHttpClient,
	reqwest::Client as ReqwestClient,
	service::ServiceDescriptor,
	url::Url,
};

const SECRET: &str = "50c0c3273d5a7ca8a04287f82c6d0111";
const SERVICE_KEY_HEX: &str = "1f4ad6c4a0f06a43ac8e6b6f84bd2c4e0b9f0e37d0de2a2c1f73c8f2a5e0a9b1";
const USER_DATA: &str = r#"[{"label":"contact.personal.email","value":"demo@example.com","isValid":true,"isOwner":true}]"#;

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let service_key = PrivateSigningKey::new(SERVICE_KEY_HEX);
	let aes_key: [u8; 16] = hex::decode(SECRET)?
		.try_into()
		.map_err(|_| color_eyre::eyre::eyre!("Demo secret must be 16 bytes."))?;
	let blob = crypto::encrypt(&aes_key, &[3; 16], USER_DATA.as_bytes());
	let token = crypto::encode_es256(
		&serde_json::json!({ "data": blob }),
		&keys::parse_signing_key(&service_key)?,
	)?;
	let server = MockServer::start_async().await;
	let exchange_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/sip/prod/scopeRequest/authCode")
				.header_exists("authorization")
				.body(r#"{"authToken":"demo-token"}"#);
			then.status(200).header("content-type", "application/json").body(
				serde_json::json!({
					"data": token,
					"userId": "demo-user",
					"encrypted": true,
					"alg": "aes",
				})
				.to_string(),
			);
		})
		.await;
	let credentials = Credentials::builder()
		.app_id("demo-app")
		.private_signing_key("ec844af6422e1f3db7bdbf6443bd47ea9e58f31a708045a9b8c4f36a3987bad4")
		.secret(SECRET)
		.build()?;
	let descriptor = ServiceDescriptor::builder(Url::parse(&server.url("/sip"))?)
		.trusted_key(TrustedPublicKey::from_hex(&keys::public_key_hex(&service_key)?)?)
		.build()?;
	let http_client = ReqwestHttpClient::with_client(
		ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client =
		<Client<ReqwestHttpClient>>::with_http_client(credentials, descriptor, http_client);
	let result = client.exchange_code("demo-token").await?;

	println!("User {} shared {} attribute(s).", result.user_id, result.attributes()?.len());

	if let Some(email) = result.attribute("contact.personal.email") {
		println!("Email: {email}.");
	}

	exchange_mock.assert_async().await;

	Ok(())
}
