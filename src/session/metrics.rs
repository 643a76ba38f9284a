// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for session refreshes.
#[derive(Debug, Default)]
pub struct SessionMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
	reuse: AtomicU64,
}
impl SessionMetrics {
	/// Returns the number of `createsession` calls started.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of refreshes that published a new session.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of failed refreshes.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	/// Returns how often a waiter reused a session refreshed while it queued.
	pub fn reuses(&self) -> u64 {
		self.reuse.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_reuse(&self) {
		self.reuse.fetch_add(1, Ordering::Relaxed);
	}
}
