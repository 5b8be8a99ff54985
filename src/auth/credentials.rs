//! Application credentials supplied once per client.

// self
use crate::{
	_prelude::*,
	auth::{AppId, PrivateSigningKey, SharedSecret},
	error::ConfigError,
};

/// Immutable credential triple issued to an application by the identity service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// Application identifier; doubles as issuer and subject of request assertions.
	pub app_id: AppId,
	/// P-256 private scalar used to sign request assertions.
	pub private_signing_key: PrivateSigningKey,
	/// Shared secret used for request digests and payload decryption.
	pub secret: SharedSecret,
}
impl Credentials {
	/// Creates credentials from already validated parts.
	pub fn new(
		app_id: AppId,
		private_signing_key: impl Into<String>,
		secret: impl Into<String>,
	) -> Self {
		Self {
			app_id,
			private_signing_key: PrivateSigningKey::new(private_signing_key),
			secret: SharedSecret::new(secret),
		}
	}

	/// Starts a builder for callers assembling credentials from configuration sources.
	pub fn builder() -> CredentialsBuilder {
		CredentialsBuilder::default()
	}
}

/// Builder for [`Credentials`] values.
#[derive(Debug, Default)]
pub struct CredentialsBuilder {
	app_id: Option<String>,
	private_signing_key: Option<PrivateSigningKey>,
	secret: Option<SharedSecret>,
}
impl CredentialsBuilder {
	/// Sets the application identifier.
	pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
		self.app_id = Some(app_id.into());

		self
	}

	/// Sets the hex-encoded private signing key.
	pub fn private_signing_key(mut self, key: impl Into<String>) -> Self {
		self.private_signing_key = Some(PrivateSigningKey::new(key));

		self
	}

	/// Sets the hex-encoded application secret.
	pub fn secret(mut self, secret: impl Into<String>) -> Self {
		self.secret = Some(SharedSecret::new(secret));

		self
	}

	/// Validates the collected values and produces [`Credentials`].
	pub fn build(self) -> Result<Credentials, ConfigError> {
		let app_id = self.app_id.ok_or(ConfigError::MissingCredential { field: "app_id" })?;
		let private_signing_key = self
			.private_signing_key
			.ok_or(ConfigError::MissingCredential { field: "private_signing_key" })?;
		let secret = self.secret.ok_or(ConfigError::MissingCredential { field: "secret" })?;

		Ok(Credentials { app_id: AppId::new(app_id)?, private_signing_key, secret })
	}
}
