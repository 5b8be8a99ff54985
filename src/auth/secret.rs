//! Redacted wrappers for the application's secret key material.

// self
use crate::_prelude::*;

macro_rules! def_secret {
	($name:ident, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq)]
		pub struct $name(String);
		impl $name {
			/// Wraps a new secret string.
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			/// Returns the inner value. Callers must avoid logging this string.
			pub fn expose(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				self.expose()
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&"<redacted>").finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str("<redacted>")
			}
		}
	};
}

def_secret! {
	SharedSecret,
	"Application secret shared with the identity service, configured as hex text.\n\n\
	 The text itself keys the request-body HMAC while its hex-decoded bytes form the AES key \
	 for the returned user data."
}
def_secret! {
	PrivateSigningKey,
	"Application's P-256 private signing scalar, configured as a hex big integer."
}

impl SharedSecret {
	/// Key bytes used for the HMAC-SHA256 request digest.
	pub fn hmac_key(&self) -> &[u8] {
		self.0.as_bytes()
	}

	/// Key bytes used for AES payload decryption.
	pub fn aes_key(&self) -> Result<Vec<u8>, hex::FromHexError> {
		hex::decode(self.0.trim())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = SharedSecret::new("50c0c3273d5a7ca8a04287f82c6d0111");
		let key = PrivateSigningKey::new("ec844af6422e1f3db7bdbf6443bd47ea");

		assert_eq!(format!("{secret:?}"), "SharedSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert_eq!(format!("{key:?}"), "PrivateSigningKey(\"<redacted>\")");
	}

	#[test]
	fn shared_secret_derives_both_keys() {
		let secret = SharedSecret::new("50c0c3273d5a7ca8a04287f82c6d0111");

		assert_eq!(secret.hmac_key(), b"50c0c3273d5a7ca8a04287f82c6d0111");
		assert_eq!(
			secret.aes_key().expect("Hex secret should decode."),
			[0x50, 0xc0, 0xc3, 0x27, 0x3d, 0x5a, 0x7c, 0xa8, 0xa0, 0x42, 0x87, 0xf8, 0x2c, 0x6d, 0x01, 0x11]
		);
		assert!(SharedSecret::new("not-hex").aes_key().is_err());
	}
}
