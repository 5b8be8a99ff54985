//! Cryptographic building blocks of the code exchange.
//!
//! - [`digest`] keys an HMAC-SHA256 over the exact request body.
//! - [`signer`] issues the short-lived ES256 request assertion.
//! - [`verifier`] authenticates the service's signed response token.
//! - [`cipher`] recovers the AES-128-CBC encrypted user data.
//!
//! [`jws`] and [`keys`] hold the compact-serialization and key-parsing helpers the other
//! modules share.

pub mod cipher;
pub mod digest;
pub mod jws;
pub mod keys;
pub mod signer;
pub mod verifier;

pub use cipher::*;
pub use digest::*;
pub use jws::*;
pub use keys::*;
pub use signer::*;
pub use verifier::*;
