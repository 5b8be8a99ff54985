//! Optional observability helpers for code exchanges.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap each exchange in a span named `civic_sip.exchange` (with the
//!   `app_id` field) and emit a `debug` event on every stage transition.
//! - Enable `metrics` to increment the `civic_sip_exchange_total` counter for every
//!   attempt/success/failure, labeled by `outcome` + the last `stage` reached.
//!
//! Failures are never logged here; they are returned to the caller untouched.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Stages of a single exchange, in the order they are reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExchangeStage {
	/// Nothing has happened yet.
	#[default]
	Idle,
	/// Assertion signed, body digested, header composed.
	RequestBuilt,
	/// Request handed to the transport.
	Sent,
	/// Transport returned an HTTP answer.
	ResponseReceived,
	/// Response token authenticated.
	Verified,
	/// User data decrypted and parsed.
	Decrypted,
	/// Result handed back to the caller.
	Done,
}
impl ExchangeStage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ExchangeStage::Idle => "idle",
			ExchangeStage::RequestBuilt => "request_built",
			ExchangeStage::Sent => "sent",
			ExchangeStage::ResponseReceived => "response_received",
			ExchangeStage::Verified => "verified",
			ExchangeStage::Decrypted => "decrypted",
			ExchangeStage::Done => "done",
		}
	}
}
impl Display for ExchangeStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExchangeOutcome {
	/// Entry to [`Client::exchange_code`](crate::exchange::Client::exchange_code).
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl ExchangeOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ExchangeOutcome::Attempt => "attempt",
			ExchangeOutcome::Success => "success",
			ExchangeOutcome::Failure => "failure",
		}
	}
}
impl Display for ExchangeOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
