//! Request timestamps and the MD5 request signature expected by the API.
//!
//! Every request carries `md5(developer_id || method || auth_key || timestamp)` rendered as
//! lowercase hex. The digest is a wire-compatibility requirement and must match the server
//! bit-for-bit, so it is not configurable.

// crates.io
use md5::{Digest, Md5};
use time::{UtcOffset, macros::format_description};
// self
use crate::{
	_prelude::*,
	auth::{AuthKey, Credentials, DeveloperId},
	clock::Clock,
};

/// UTC request timestamp with second precision and its cached `YYYYMMDDHHMMSS` rendering.
///
/// One value is both signed and embedded in the request path, so the two can never diverge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timestamp {
	instant: OffsetDateTime,
	formatted: String,
}
impl Timestamp {
	/// Normalizes `instant` to UTC, drops sub-second precision, and renders it.
	pub fn new(instant: OffsetDateTime) -> Result<Self, time::error::Format> {
		let utc = instant.to_offset(UtcOffset::UTC);
		let instant = utc - Duration::nanoseconds(i64::from(utc.nanosecond()));
		let formatted =
			instant.format(format_description!("[year][month][day][hour][minute][second]"))?;

		Ok(Self { instant, formatted })
	}

	/// Captures the current instant of `clock`.
	pub fn now(clock: &dyn Clock) -> Result<Self, time::error::Format> {
		Self::new(clock.now())
	}

	/// Returns the truncated UTC instant.
	pub fn instant(&self) -> OffsetDateTime {
		self.instant
	}

	/// Returns the `YYYYMMDDHHMMSS` rendering.
	pub fn as_str(&self) -> &str {
		&self.formatted
	}
}
impl Display for Timestamp {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.formatted)
	}
}

/// Lowercase hexadecimal request signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature(String);
impl Signature {
	/// Returns the hex string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Signature {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Display for Signature {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Deterministic signer bound to one set of developer credentials.
#[derive(Clone, Debug)]
pub struct RequestSigner {
	developer_id: DeveloperId,
	auth_key: AuthKey,
}
impl RequestSigner {
	/// Creates a signer for the provided credentials.
	pub fn new(credentials: &Credentials) -> Self {
		Self {
			developer_id: credentials.developer_id.clone(),
			auth_key: credentials.auth_key.clone(),
		}
	}

	/// Signs `method` at `timestamp`.
	pub fn sign(&self, method: &str, timestamp: &Timestamp) -> Signature {
		let mut hasher = Md5::new();

		hasher.update(self.developer_id.as_bytes());
		hasher.update(method.as_bytes());
		hasher.update(self.auth_key.expose().as_bytes());
		hasher.update(timestamp.as_str().as_bytes());

		Signature(format!("{:x}", hasher.finalize()))
	}
}
