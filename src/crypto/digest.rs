//! Keyed integrity digest over request bodies.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes the base64-encoded HMAC-SHA256 of `body` keyed by `secret`.
///
/// The output uses the standard alphabet with padding and no line breaks. HMAC-SHA256 hashes
/// or pads any key to its block size, so every secret is usable.
pub fn digest(secret: &[u8], body: &[u8]) -> String {
	let mut mac = HmacSha256::new_from_slice(secret)
		.unwrap_or_else(|e| unreachable!("HMAC-SHA256 accepts keys of any length: {e}"));

	mac.update(body);

	STANDARD.encode(mac.finalize().into_bytes())
}
