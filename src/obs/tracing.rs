// self
use crate::{_prelude::*, obs::ExchangeStage};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedExchange<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedExchange<F> = F;

/// Span wrapping a single exchange.
#[derive(Clone, Debug)]
pub struct ExchangeSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl ExchangeSpan {
	/// Creates a new span tagged with the application identifier.
	pub fn new(app_id: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("civic_sip.exchange", app_id);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = app_id;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedExchange<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a `debug` event for a stage transition (when enabled).
pub fn record_stage(stage: ExchangeStage) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(stage = stage.as_str(), "exchange stage reached");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = stage;
	}
}
