//! Identity service descriptor: where requests go and which key signs responses.
//!
//! [`ServiceDescriptor::production`] targets the hosted service. Tests and staging setups
//! build their own descriptor through [`ServiceDescriptorBuilder`], which enforces HTTPS
//! endpoints and is the only way to replace the trusted response key.

/// Builder API for assembling service descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, crypto::TrustedPublicKey};

/// Base URL of the hosted identity service; also the audience of request assertions.
pub const PRODUCTION_BASE_URL: &str = "https://api.civic.com/sip";
/// Deployment stage segment used by the hosted service.
pub const PRODUCTION_STAGE: &str = "prod";

/// Immutable service metadata consumed by the exchange client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceDescriptor {
	/// Base URL without a trailing slash; doubles as assertion audience.
	pub base_url: Url,
	/// Stage segment inserted between the base URL and API paths.
	pub stage: String,
	/// Key that must have signed every response token.
	pub trusted_key: TrustedPublicKey,
	/// Optional per-request timeout; `None` keeps the transport default.
	pub request_timeout: Option<std::time::Duration>,
}
impl ServiceDescriptor {
	/// Creates a new builder for the provided base URL.
	pub fn builder(base_url: Url) -> ServiceDescriptorBuilder {
		ServiceDescriptorBuilder::new(base_url)
	}

	/// Descriptor for the hosted production service.
	pub fn production() -> Self {
		Self {
			base_url: Url::parse(PRODUCTION_BASE_URL)
				.unwrap_or_else(|e| unreachable!("production base URL must parse: {e}")),
			stage: PRODUCTION_STAGE.into(),
			trusted_key: TrustedPublicKey::production(),
			request_timeout: None,
		}
	}

	/// Audience claim for request assertions.
	pub fn audience(&self) -> &str {
		self.base_url.as_str().trim_end_matches('/')
	}

	/// Absolute URL of `path` under the configured stage.
	pub fn endpoint(&self, path: &str) -> Result<Url, ServiceDescriptorError> {
		let raw = format!("{}/{}/{}", self.audience(), self.stage, path.trim_start_matches('/'));

		Url::parse(&raw).map_err(|source| ServiceDescriptorError::InvalidEndpoint { url: raw, source })
	}
}
impl Default for ServiceDescriptor {
	fn default() -> Self {
		Self::production()
	}
}
