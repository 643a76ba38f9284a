//! Process-wide developer credentials.

// self
use crate::{
	_prelude::*,
	auth::{AuthKey, DeveloperId},
	error::ConfigError,
};

/// Developer identifier + authorization key pair supplied at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// Developer identifier embedded in request paths.
	pub developer_id: DeveloperId,
	/// Authorization key used only for signing; never transmitted.
	pub auth_key: AuthKey,
}
impl Credentials {
	/// Validates the developer identifier and wraps the authorization key.
	pub fn new(developer_id: impl AsRef<str>, auth_key: impl Into<String>) -> Result<Self> {
		let developer_id = DeveloperId::new(developer_id).map_err(ConfigError::from)?;

		Ok(Self { developer_id, auth_key: AuthKey::new(auth_key) })
	}
}
