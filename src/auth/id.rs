//! Identifiers exchanged with the identity service.
//!
//! Both are opaque strings owned by the service. [`AppId`] only refuses the empty string,
//! which can never name an application; [`UserId`] is taken verbatim from responses.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
		pub struct $name(String);
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

/// Error returned when an application identifier is unusable.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("Application identifier cannot be empty.")]
	Empty,
}

def_id! { AppId, "Application identifier issued by the identity service dashboard.", "App" }
impl AppId {
	/// Wraps `value`, refusing only the empty string.
	pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
		let value = value.into();

		if value.is_empty() {
			return Err(IdentifierError::Empty);
		}

		Ok(Self(value))
	}
}
impl TryFrom<String> for AppId {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl FromStr for AppId {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Serialize for AppId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}
impl<'de> Deserialize<'de> for AppId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Self::new(String::deserialize(deserializer)?).map_err(serde::de::Error::custom)
	}
}

def_id! { UserId, "User identifier returned by an exchange, kept exactly as sent.", "User" }
impl UserId {
	/// Wraps `value` without inspecting it.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}
}
impl From<String> for UserId {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for UserId {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Serialize for UserId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}
impl<'de> Deserialize<'de> for UserId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		String::deserialize(deserializer).map(Self)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn app_id_refuses_only_empty_values() {
		assert_eq!(AppId::new(""), Err(IdentifierError::Empty));

		let spaced = AppId::new("my app").expect("Spaces are part of an opaque app identifier.");

		assert_eq!(spaced.as_ref(), "my app");
		assert!(serde_json::from_str::<AppId>("\"\"").is_err());
	}

	#[test]
	fn user_ids_round_trip_verbatim() {
		let long = "a".repeat(512);

		for raw in ["user-123", "user 123", "", long.as_str(), " padded\t"] {
			let json = serde_json::to_string(raw).expect("Raw value should serialize.");
			let user: UserId =
				serde_json::from_str(&json).expect("Any string should be a user identifier.");

			assert_eq!(user.as_ref(), raw);
			assert_eq!(
				serde_json::to_string(&user).expect("User should serialize successfully."),
				json
			);
		}
	}

	#[test]
	fn debug_includes_identifier_kind() {
		let user = UserId::new("user-123");

		assert_eq!(format!("{user:?}"), "User(user-123)");
		assert_eq!(user.to_string(), "user-123");
	}
}
