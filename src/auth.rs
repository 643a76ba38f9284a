//! Auth-domain identifiers, secrets, credentials, and session snapshots.

pub mod credentials;
pub mod id;
pub mod secret;
pub mod session;

pub use credentials::*;
pub use id::*;
pub use secret::*;
pub use session::*;
