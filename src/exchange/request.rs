//! Request side of the exchange: body, digest, and composite authorization header.

// self
use crate::{_prelude::*, crypto::ScopedCall, http::JsonPost};

/// Scheme prefix of the composite authorization header.
pub const AUTHORIZATION_SCHEME: &str = "Civic";

/// Authorization code exchange requested by the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeRequest {
	/// Opaque token handed over by the front-end widget.
	pub auth_token: String,
	/// Call authorized by the request assertion.
	pub call: ScopedCall,
}
impl ExchangeRequest {
	/// Creates the `POST scopeRequest/authCode` request for `auth_token`.
	pub fn auth_code(auth_token: impl Into<String>) -> Self {
		Self { auth_token: auth_token.into(), call: ScopedCall::auth_code() }
	}

	/// Serializes the JSON body, e.g. `{"authToken":"token42"}`.
	pub fn body(&self) -> Result<String, serde_json::Error> {
		#[derive(Serialize)]
		#[serde(rename_all = "camelCase")]
		struct Body<'a> {
			auth_token: &'a str,
		}

		serde_json::to_string(&Body { auth_token: &self.auth_token })
	}
}

/// Composite `Authorization` header value: `Civic <assertion>.<digest>`.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizationHeader {
	assertion: String,
	digest: String,
}
impl AuthorizationHeader {
	/// Combines a signed assertion with the body digest.
	pub fn new(assertion: impl Into<String>, digest: impl Into<String>) -> Self {
		Self { assertion: assertion.into(), digest: digest.into() }
	}

	/// Splits a header value back into its assertion and digest.
	///
	/// The digest is the last dot-separated segment, so it never contains a dot itself.
	pub fn parse(value: &str) -> Option<Self> {
		let rest = value.strip_prefix(AUTHORIZATION_SCHEME)?.strip_prefix(' ')?;
		let (assertion, digest) = rest.rsplit_once('.')?;

		if assertion.is_empty() || digest.is_empty() {
			return None;
		}

		Some(Self::new(assertion, digest))
	}

	/// Signed request assertion.
	pub fn assertion(&self) -> &str {
		&self.assertion
	}

	/// Base64 HMAC-SHA256 of the request body.
	pub fn digest(&self) -> &str {
		&self.digest
	}
}
impl Display for AuthorizationHeader {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{AUTHORIZATION_SCHEME} {}.{}", self.assertion, self.digest)
	}
}
impl Debug for AuthorizationHeader {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationHeader")
			.field("assertion", &"<redacted>")
			.field("digest", &self.digest)
			.finish()
	}
}

/// Fully composed request, ready for a [`SipHttpClient`](crate::http::SipHttpClient).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
	/// Absolute endpoint URL.
	pub endpoint: Url,
	/// Exact body bytes covered by the digest.
	pub body: String,
	/// Composite authorization header.
	pub authorization: AuthorizationHeader,
}
impl SignedRequest {
	/// Converts into the transport-level request.
	pub fn into_post(self, timeout: Option<std::time::Duration>) -> JsonPost {
		JsonPost {
			endpoint: self.endpoint,
			body: self.body,
			authorization: self.authorization.to_string(),
			timeout,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn body_is_compact_camel_case_json() {
		let body = ExchangeRequest::auth_code("token42").body().expect("Body should serialize.");

		assert_eq!(body, r#"{"authToken":"token42"}"#);
	}

	#[test]
	fn body_escapes_token_content() {
		let body =
			ExchangeRequest::auth_code("a\"b\\c").body().expect("Body should serialize.");

		assert_eq!(body, r#"{"authToken":"a\"b\\c"}"#);
	}

	#[test]
	fn header_formats_and_parses() {
		let header = AuthorizationHeader::new("aaa.bbb.ccc", "ZGlnZXN0+/=");
		let rendered = header.to_string();

		assert_eq!(rendered, "Civic aaa.bbb.ccc.ZGlnZXN0+/=");
		assert_eq!(AuthorizationHeader::parse(&rendered), Some(header));
		assert_eq!(AuthorizationHeader::parse("Bearer aaa.bbb"), None);
		assert_eq!(AuthorizationHeader::parse("Civic nodigest"), None);
	}

	#[test]
	fn header_debug_redacts_assertion() {
		let header = AuthorizationHeader::new("secret.assertion.sig", "digest");

		assert!(!format!("{header:?}").contains("secret"));
	}
}
