//! Application identity: identifiers, redacted secrets, and the credential triple.

pub mod credentials;
pub mod id;
pub mod secret;

pub use credentials::*;
pub use id::*;
pub use secret::*;
