// self
use crate::obs::{ExchangeOutcome, ExchangeStage};

/// Records an exchange outcome via the global metrics recorder (when enabled).
pub fn record_exchange_outcome(stage: ExchangeStage, outcome: ExchangeOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"civic_sip_exchange_total",
			"stage" => stage.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (stage, outcome);
	}
}
