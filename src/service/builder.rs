// self
use crate::{
	_prelude::*,
	crypto::{KeyError, TrustedPublicKey},
	service::{PRODUCTION_STAGE, ServiceDescriptor},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, ThisError)]
pub enum ServiceDescriptorError {
	/// Base URL must use HTTPS.
	#[error("The identity service base URL must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URL must not carry a query or fragment.
	#[error("The identity service base URL must not carry a query or fragment: {url}.")]
	UnexpectedUrlComponents {
		/// Base URL that failed validation.
		url: String,
	},
	/// Stage segment is empty or contains path separators.
	#[error("Stage segment `{stage}` must be a single non-empty path segment.")]
	InvalidStage {
		/// Stage that failed validation.
		stage: String,
	},
	/// Request timeout must be positive.
	#[error("Request timeout must be greater than zero.")]
	ZeroTimeout,
	/// Trusted key is not a P-256 point.
	#[error("Trusted public key is invalid.")]
	InvalidTrustedKey(#[from] KeyError),
	/// Composed endpoint failed to parse.
	#[error("Endpoint `{url}` is not a valid URL.")]
	InvalidEndpoint {
		/// Composed URL.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

/// Builder for [`ServiceDescriptor`] values.
#[derive(Debug)]
pub struct ServiceDescriptorBuilder {
	/// Base URL of the identity service.
	pub base_url: Url,
	/// Stage segment (defaults to `prod`).
	pub stage: String,
	/// Trusted response key (defaults to the production key).
	pub trusted_key: TrustedPublicKey,
	/// Optional per-request timeout.
	pub request_timeout: Option<std::time::Duration>,
}
impl ServiceDescriptorBuilder {
	/// Creates a new builder seeded with the provided base URL.
	pub fn new(base_url: Url) -> Self {
		Self {
			base_url,
			stage: PRODUCTION_STAGE.into(),
			trusted_key: TrustedPublicKey::production(),
			request_timeout: None,
		}
	}

	/// Overrides the stage segment.
	pub fn stage(mut self, stage: impl Into<String>) -> Self {
		self.stage = stage.into();

		self
	}

	/// Replaces the trusted response key; intended for mock services.
	pub fn trusted_key(mut self, key: TrustedPublicKey) -> Self {
		self.trusted_key = key;

		self
	}

	/// Parses and replaces the trusted response key from SEC1 hex.
	pub fn trusted_key_hex(self, hex: &str) -> Result<Self, ServiceDescriptorError> {
		let key = TrustedPublicKey::from_hex(hex)?;

		Ok(self.trusted_key(key))
	}

	/// Bounds each request to `timeout`.
	pub fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
		self.request_timeout = Some(timeout);

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ServiceDescriptor, ServiceDescriptorError> {
		let descriptor = ServiceDescriptor {
			base_url: self.base_url,
			stage: self.stage,
			trusted_key: self.trusted_key,
			request_timeout: self.request_timeout,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ServiceDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ServiceDescriptorError> {
		if self.base_url.scheme() != "https" {
			return Err(ServiceDescriptorError::InsecureEndpoint {
				url: self.base_url.to_string(),
			});
		}
		if self.base_url.query().is_some() || self.base_url.fragment().is_some() {
			return Err(ServiceDescriptorError::UnexpectedUrlComponents {
				url: self.base_url.to_string(),
			});
		}
		if self.stage.is_empty() || self.stage.contains('/') {
			return Err(ServiceDescriptorError::InvalidStage { stage: self.stage.clone() });
		}
		if self.request_timeout.is_some_and(|timeout| timeout.is_zero()) {
			return Err(ServiceDescriptorError::ZeroTimeout);
		}

		Ok(())
	}
}
