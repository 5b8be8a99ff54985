//! Transport primitives for the code exchange.
//!
//! [`SipHttpClient`] is the client's only dependency on an HTTP stack. It performs exactly one
//! POST per call and reports every HTTP answer, including non-success statuses, as an
//! [`HttpResponse`]; only connection-level failures become [`TransportError`]s.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
// self
use crate::{_prelude::*, error::TransportError};

/// Media type sent in both `Accept` and `Content-Type`.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Boxed future returned by [`SipHttpClient::post_json`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Status and raw body of an HTTP answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body decoded as text.
	pub body: String,
}
impl HttpResponse {
	/// Creates a response from its parts.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, body: body.into() }
	}

	/// Whether the status lies in `200..=299`.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Outbound JSON POST as composed by the exchange client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonPost {
	/// Absolute endpoint URL.
	pub endpoint: Url,
	/// Serialized JSON body; the request digest covers exactly these bytes.
	pub body: String,
	/// Value of the `Authorization` header.
	pub authorization: String,
	/// Optional request timeout; `None` keeps the transport default.
	pub timeout: Option<std::time::Duration>,
}

/// Abstraction over HTTP transports able to deliver a single [`JsonPost`].
///
/// Implementations must send `Accept: application/json`,
/// `Content-Type: application/json`, and the supplied `Authorization` header, must not retry,
/// and must return non-success answers as ordinary [`HttpResponse`] values.
pub trait SipHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves with the service's answer.
	fn post_json(&self, request: JsonPost) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl SipHttpClient for ReqwestHttpClient {
	fn post_json(&self, request: JsonPost) -> TransportFuture<'_> {
		Box::pin(async move {
			let JsonPost { endpoint, body, authorization, timeout } = request;
			let authorization =
				HeaderValue::from_str(&authorization).map_err(TransportError::network)?;
			let mut builder = self
				.0
				.post(endpoint)
				.header(ACCEPT, JSON_MEDIA_TYPE)
				.header(CONTENT_TYPE, JSON_MEDIA_TYPE)
				.header(AUTHORIZATION, authorization)
				.body(body);

			if let Some(timeout) = timeout {
				builder = builder.timeout(timeout);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.text().await?;

			Ok(HttpResponse { status, body })
		})
	}
}
