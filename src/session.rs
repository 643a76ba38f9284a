//! Session lifecycle: staleness checks and single-flight refresh.
//!
//! [`SessionManager`] owns the current [`Session`]. Callers holding a session that is still
//! inside its TTL read it without contending on anything but a short read lock. When the
//! session is absent or stale, callers queue on an async mutex that stays held across the
//! refresh request, so at most one `createsession` call is in flight per client. Whoever
//! enters the critical section re-checks the session first and reuses a refresh that
//! finished while it was waiting.
//!
//! A refresh that fails or is cancelled publishes nothing: the previous session (if any)
//! stays in place and the mutex is released when its guard drops.

mod metrics;

pub use metrics::SessionMetrics;

// self
use crate::{
	_prelude::*,
	auth::{SESSION_TTL, Session, SessionId},
	clock::Clock,
	error::AuthError,
	sign::Timestamp,
};

/// Status text the API returns in `ret_msg` for a granted session.
pub const APPROVED: &str = "Approved";

/// Decoded `createsession` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SessionGrant {
	/// `Approved` on success, otherwise the failure reason.
	pub ret_msg: String,
	/// Issued session token.
	#[serde(default)]
	pub session_id: Option<String>,
	/// Server-side creation time as sent by the API.
	#[serde(default)]
	pub timestamp: Option<String>,
}
impl SessionGrant {
	/// Converts an approved grant into a session created at `started_at`.
	pub fn into_session(self, started_at: OffsetDateTime) -> Result<Session, AuthError> {
		if self.ret_msg != APPROVED {
			return Err(AuthError::Rejected { status: self.ret_msg });
		}

		let id = self
			.session_id
			.filter(|id| !id.is_empty())
			.ok_or(AuthError::MissingSessionId)?;

		Ok(Session::new(SessionId::new(id), started_at))
	}
}

/// Owner of the current session and the refresh critical section.
#[derive(Debug)]
pub struct SessionManager {
	current: RwLock<Option<Session>>,
	refresh_guard: AsyncMutex<()>,
	ttl: Duration,
	metrics: SessionMetrics,
}
impl SessionManager {
	/// Creates an empty manager with the provided TTL.
	pub fn new(ttl: Duration) -> Self {
		Self {
			current: RwLock::new(None),
			refresh_guard: AsyncMutex::new(()),
			ttl,
			metrics: SessionMetrics::default(),
		}
	}

	/// Returns the TTL applied to sessions.
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Returns refresh counters.
	pub fn metrics(&self) -> &SessionMetrics {
		&self.metrics
	}

	/// Returns the stored session regardless of staleness.
	pub fn current(&self) -> Option<Session> {
		self.current.read().clone()
	}

	/// Returns the stored session if it is still valid at `instant`.
	pub fn valid_at(&self, instant: OffsetDateTime) -> Option<Session> {
		self.current
			.read()
			.as_ref()
			.filter(|session| !session.is_stale_at(instant, self.ttl))
			.cloned()
	}

	/// Drops the stored session so the next acquisition refreshes.
	pub fn invalidate(&self) {
		*self.current.write() = None;
	}

	/// Returns a valid session, running `refresh` if none exists at the current instant.
	///
	/// `refresh` receives the timestamp captured when the refresh starts; it must use that
	/// timestamp for the `createsession` request, and the new session's `created_at` is set
	/// to its instant. Errors from `refresh` or a non-approved grant propagate unchanged and
	/// leave the stored session untouched.
	pub async fn acquire<F, Fut>(&self, clock: &dyn Clock, refresh: F) -> Result<Session>
	where
		F: FnOnce(Timestamp) -> Fut,
		Fut: Future<Output = Result<SessionGrant>>,
	{
		if let Some(session) = self.valid_at(clock.now()) {
			return Ok(session);
		}

		let _singleflight = self.refresh_guard.lock().await;
		let started = Timestamp::now(clock)?;

		if let Some(session) = self.valid_at(started.instant()) {
			self.metrics.record_reuse();

			return Ok(session);
		}

		self.metrics.record_attempt();

		let started_at = started.instant();
		let session = match refresh(started).await {
			Ok(grant) => grant.into_session(started_at).map_err(Error::from),
			Err(e) => Err(e),
		}
		.inspect_err(|_| self.metrics.record_failure())?;

		*self.current.write() = Some(session.clone());

		self.metrics.record_success();

		Ok(session)
	}
}
impl Default for SessionManager {
	fn default() -> Self {
		Self::new(SESSION_TTL)
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;
	use crate::clock::ManualClock;

	const START: OffsetDateTime = datetime!(2024-03-01 12:00:00 UTC);

	fn approved(id: &str) -> SessionGrant {
		SessionGrant { ret_msg: APPROVED.into(), session_id: Some(id.into()), timestamp: None }
	}

	fn rejected(status: &str) -> SessionGrant {
		SessionGrant { ret_msg: status.into(), session_id: None, timestamp: None }
	}

	#[test]
	fn grant_requires_approved_status_and_session_id() {
		let session = approved("abc").into_session(START).expect("Approved grants should convert.");

		assert_eq!(session.id.expose(), "abc");
		assert_eq!(session.created_at, START);
		assert_eq!(
			rejected("Invalid Developer Id").into_session(START),
			Err(AuthError::Rejected { status: "Invalid Developer Id".into() })
		);
		assert_eq!(
			SessionGrant { session_id: None, ..approved("") }.into_session(START),
			Err(AuthError::MissingSessionId)
		);
	}

	#[test]
	fn grant_decodes_api_payload() {
		let grant: SessionGrant = serde_json::from_str(
			r#"{"ret_msg":"Approved","session_id":"1465AFCA","timestamp":"3/1/2024 12:00:00 PM"}"#,
		)
		.expect("createsession payload should decode.");

		assert_eq!(grant.session_id.as_deref(), Some("1465AFCA"));
		assert!(serde_json::from_str::<SessionGrant>(r#"{"session_id":"x"}"#).is_err());
	}

	#[tokio::test]
	async fn session_is_reused_until_ttl_elapses() {
		let clock = ManualClock::new(START);
		let manager = SessionManager::default();
		let calls = AtomicUsize::new(0);
		let refresh = |ts: Timestamp| {
			let n = calls.fetch_add(1, Ordering::SeqCst);

			async move {
				assert_eq!(ts.as_str().len(), 14);

				Ok::<_, Error>(approved(&format!("session-{n}")))
			}
		};
		let first =
			manager.acquire(&clock, refresh).await.expect("First acquisition should refresh.");

		assert_eq!(first.created_at, START);

		clock.advance(SESSION_TTL - Duration::seconds(1));

		let reused = manager.acquire(&clock, refresh).await.expect("Valid sessions are reused.");

		assert_eq!(reused, first);

		clock.advance(Duration::seconds(1));

		let renewed = manager.acquire(&clock, refresh).await.expect("Stale sessions refresh.");

		assert_eq!(renewed.id.expose(), "session-1");
		assert_eq!(renewed.created_at, START + SESSION_TTL);
		assert_eq!(calls.load(Ordering::SeqCst), 2);
		assert_eq!(manager.metrics().attempts(), 2);
		assert_eq!(manager.metrics().successes(), 2);
	}

	#[tokio::test]
	async fn rejected_refresh_stores_nothing_and_retries_next_time() {
		let clock = ManualClock::new(START);
		let manager = SessionManager::default();
		let err = manager
			.acquire(&clock, |_| async { Ok(rejected("Invalid Session")) })
			.await
			.expect_err("Rejected grants must fail.");

		assert!(matches!(
			err,
			Error::Auth(AuthError::Rejected { ref status }) if status == "Invalid Session"
		));
		assert!(manager.current().is_none());

		let session = manager
			.acquire(&clock, |_| async { Ok(approved("second")) })
			.await
			.expect("A later acquisition should refresh again.");

		assert_eq!(session.id.expose(), "second");
		assert_eq!(manager.metrics().attempts(), 2);
		assert_eq!(manager.metrics().failures(), 1);
	}

	#[tokio::test]
	async fn failed_refresh_keeps_previous_session() {
		let clock = ManualClock::new(START);
		let manager = SessionManager::default();
		let original = manager
			.acquire(&clock, |_| async { Ok(approved("original")) })
			.await
			.expect("Initial refresh should succeed.");

		clock.advance(SESSION_TTL);

		let _ = manager
			.acquire(&clock, |_| async { Ok(rejected("Exceeded daily limit")) })
			.await
			.expect_err("Rejected refresh must fail.");

		assert_eq!(manager.current(), Some(original));
		assert!(manager.valid_at(clock.now()).is_none());
	}

	#[tokio::test]
	async fn concurrent_acquisitions_share_one_refresh() {
		let clock = ManualClock::new(START);
		let manager = SessionManager::default();
		let calls = AtomicUsize::new(0);
		let refresh = |_: Timestamp| {
			calls.fetch_add(1, Ordering::SeqCst);

			async {
				tokio::time::sleep(std::time::Duration::from_millis(20)).await;

				Ok::<_, Error>(approved("shared"))
			}
		};
		let (a, b, c) = tokio::join!(
			manager.acquire(&clock, refresh),
			manager.acquire(&clock, refresh),
			manager.acquire(&clock, refresh),
		);
		let a = a.expect("First acquisition should succeed.");

		assert_eq!(a, b.expect("Second acquisition should succeed."));
		assert_eq!(a, c.expect("Third acquisition should succeed."));
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(manager.metrics().reuses(), 2);
	}
}
