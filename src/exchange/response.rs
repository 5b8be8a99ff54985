//! Response side of the exchange: envelope, verified payload, and final result.

// self
use crate::{_prelude::*, auth::UserId, error::PayloadError};

/// Algorithm label the service uses for encrypted user data.
pub const ENVELOPE_ALG_AES: &str = "aes";

/// Success body returned by the identity service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
	/// Signed token wrapping the encrypted user data.
	pub data: String,
	/// Identifier of the user who approved the request.
	pub user_id: UserId,
	/// Whether `data` carries encrypted user data.
	#[serde(default)]
	pub encrypted: Option<bool>,
	/// Encryption algorithm label.
	#[serde(default)]
	pub alg: Option<String>,
}
impl ResponseEnvelope {
	/// Parses a success body, reporting the failing JSON path on error.
	pub fn parse(body: &str) -> Result<Self, PayloadError> {
		let mut de = serde_json::Deserializer::from_str(body);
		let envelope: Self = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| PayloadError::Envelope { source })?;

		envelope.ensure_supported()?;

		Ok(envelope)
	}

	/// Rejects envelopes that explicitly declare a plaintext or non-AES payload.
	///
	/// Absent `encrypted`/`alg` fields are accepted.
	fn ensure_supported(&self) -> Result<(), PayloadError> {
		let encrypted = self.encrypted.unwrap_or(true);
		let alg = self.alg.as_deref().unwrap_or(ENVELOPE_ALG_AES);

		if encrypted && alg.eq_ignore_ascii_case(ENVELOPE_ALG_AES) {
			Ok(())
		} else {
			Err(PayloadError::UnsupportedEnvelope { encrypted, alg: alg.to_owned() })
		}
	}
}

/// One attribute the user agreed to share.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAttribute {
	/// Attribute label, e.g. `contact.personal.email`.
	pub label: String,
	/// Attribute value.
	pub value: String,
	/// Whether the service validated the value.
	pub is_valid: bool,
	/// Whether the user proved ownership of the value.
	pub is_owner: bool,
}

/// Decrypted outcome of a successful exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeResult {
	/// Identifier of the user who approved the request.
	pub user_id: UserId,
	/// Decrypted user data, as parsed JSON.
	pub data: serde_json::Value,
}
impl ExchangeResult {
	/// Interprets `data` as the usual list of [`UserAttribute`] records.
	pub fn attributes(&self) -> Result<Vec<UserAttribute>, PayloadError> {
		serde_path_to_error::deserialize(&self.data)
			.map_err(|source| PayloadError::UserData { source })
	}

	/// Value of the first attribute carrying `label`.
	pub fn attribute(&self, label: &str) -> Option<&str> {
		self.data
			.as_array()?
			.iter()
			.filter(|entry| entry.get("label").and_then(serde_json::Value::as_str) == Some(label))
			.find_map(|entry| entry.get("value")?.as_str())
	}
}

/// Parses decrypted user data into JSON.
pub(crate) fn parse_user_data(plaintext: &[u8]) -> Result<serde_json::Value, PayloadError> {
	let mut de = serde_json::Deserializer::from_slice(plaintext);

	serde_path_to_error::deserialize(&mut de).map_err(|source| PayloadError::UserData { source })
}
