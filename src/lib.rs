//! Rust client for the Civic Secure Identity Platform: exchange a front-end authorization
//! code for verified, decrypted user data in one typed call.
//!
//! ```no_run
//! # async fn run() -> civic_sip::error::Result<()> {
//! use civic_sip::auth::Credentials;
//!
//! let credentials = Credentials::builder()
//! 	.app_id("app42")
//! 	.private_signing_key("ec844af6422e1f3db7bdbf6443bd47ea9e58f31a708045a9b8c4f36a3987bad4")
//! 	.secret("50c0c3273d5a7ca8a04287f82c6d0111")
//! 	.build()?;
//! let result = civic_sip::exchange_code(credentials, "token-from-the-widget").await?;
//!
//! println!("{} -> {}", result.user_id, result.data);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod crypto;
pub mod error;
pub mod exchange;
pub mod http;
pub mod obs;
pub mod service;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::Result;
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};

// self
#[cfg(feature = "reqwest")] use crate::{auth::Credentials, exchange::ExchangeResult};

/// Exchanges `token` against the production service with a default reqwest transport.
///
/// Use [`exchange::Client`] directly to reuse one transport across exchanges or to target a
/// different [`service::ServiceDescriptor`].
#[cfg(feature = "reqwest")]
pub async fn exchange_code(credentials: Credentials, token: &str) -> error::Result<ExchangeResult> {
	exchange::Client::new(credentials).exchange_code(token).await
}
