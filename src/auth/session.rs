//! Immutable authenticated session snapshots.

// self
use crate::{_prelude::*, auth::SessionId};

/// Default validity window of a server-issued session.
pub const SESSION_TTL: Duration = Duration::minutes(15);

/// Server-issued session token plus the instant its creation request started.
///
/// Sessions are never mutated; a refresh replaces the whole value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
	/// Token embedded in authenticated request paths.
	pub id: SessionId,
	/// Instant captured when the creating request started.
	pub created_at: OffsetDateTime,
}
impl Session {
	/// Creates a session snapshot.
	pub fn new(id: SessionId, created_at: OffsetDateTime) -> Self {
		Self { id, created_at }
	}

	/// Returns `true` once `ttl` has fully elapsed since creation.
	pub fn is_stale_at(&self, instant: OffsetDateTime, ttl: Duration) -> bool {
		instant - self.created_at >= ttl
	}

	/// Returns the instant at which the session becomes stale.
	pub fn stale_at(&self, ttl: Duration) -> OffsetDateTime {
		self.created_at + ttl
	}
}
