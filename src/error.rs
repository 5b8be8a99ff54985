//! Client-level error types shared across the exchange pipeline.

// self
use crate::{
	_prelude::*,
	auth::IdentifierError,
	crypto::{DecryptionError, SigningError, VerificationError},
	service::ServiceDescriptorError,
};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// The variants separate "the service said no" ([`Error::Api`]) from "the response could not
/// be trusted or read" ([`Error::Verification`], [`Error::Decryption`],
/// [`Error::MalformedPayload`]) and from "the service could not be reached"
/// ([`Error::Transport`]).
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout); safe to retry with backoff.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Identity service answered with a non-success HTTP status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Local signing key could not produce the request assertion.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Response token failed authenticity checks.
	#[error(transparent)]
	Verification(#[from] VerificationError),
	/// Authentic payload could not be decrypted.
	#[error(transparent)]
	Decryption(#[from] DecryptionError),
	/// Response or decrypted payload is not the expected JSON document.
	#[error(transparent)]
	MalformedPayload(#[from] PayloadError),
}
impl Error {
	/// Returns `true` when the failure happened before the service produced an answer.
	///
	/// Only transport failures qualify; the client itself never retries.
	pub fn is_retryable(&self) -> bool {
		matches!(self, Self::Transport(_))
	}
}

/// Non-success response returned by the identity service.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Identity service responded with HTTP {status}: {body}")]
pub struct ApiError {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body, kept verbatim.
	pub body: String,
}
impl ApiError {
	/// Creates a new API error from a status code and raw body.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, body: body.into() }
	}

	/// Status code rendered as text (e.g. `"400"`).
	pub fn http_code(&self) -> String {
		self.status.to_string()
	}

	/// Raw response body.
	pub fn message(&self) -> &str {
		&self.body
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A required credential was not supplied to the builder.
	#[error("Missing credential: {field}.")]
	MissingCredential {
		/// Name of the missing builder field.
		field: &'static str,
	},
	/// Application identifier failed validation.
	#[error("Application identifier is invalid.")]
	InvalidAppId(#[from] IdentifierError),
	/// Service descriptor failed validation.
	#[error("Service descriptor is invalid.")]
	InvalidDescriptor(#[from] ServiceDescriptorError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the identity service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request did not complete within the configured timeout.
	#[error("Request to the identity service timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the identity service.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}

/// JSON documents that could not be read at some stage of the exchange.
#[derive(Debug, ThisError)]
pub enum PayloadError {
	/// Success response body is not a valid envelope.
	#[error("Response envelope is malformed.")]
	Envelope {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Envelope declares an encoding this client does not understand.
	#[error("Response envelope declares unsupported encoding (encrypted: {encrypted}, alg: {alg}).")]
	UnsupportedEnvelope {
		/// Value of the `encrypted` flag.
		encrypted: bool,
		/// Value of the `alg` field.
		alg: String,
	},
	/// Verified token claims do not carry the expected fields.
	#[error("Response token claims are malformed.")]
	Claims {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Decrypted user data is not valid JSON.
	#[error("Decrypted user data is not valid JSON.")]
	UserData {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
