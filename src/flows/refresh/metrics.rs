// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for client-credentials grants.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	attempts: AtomicU64,
	successes: AtomicU64,
	failures: AtomicU64,
}
impl RefreshMetrics {
	/// Total number of grants started.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Grants that produced and persisted a token.
	pub fn successes(&self) -> u64 {
		self.successes.load(Ordering::Relaxed)
	}

	/// Grants that failed at any step.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	/// Reads all three counters at once.
	pub fn snapshot(&self) -> RefreshCounts {
		RefreshCounts {
			attempts: self.attempts(),
			successes: self.successes(),
			failures: self.failures(),
		}
	}

	pub(crate) fn record(&self, succeeded: bool) {
		let outcome = if succeeded { &self.successes } else { &self.failures };

		self.attempts.fetch_add(1, Ordering::Relaxed);
		outcome.fetch_add(1, Ordering::Relaxed);
	}
}

/// Point-in-time copy of [`RefreshMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshCounts {
	/// Total number of grants started.
	pub attempts: u64,
	/// Grants that produced and persisted a token.
	pub successes: u64,
	/// Grants that failed at any step.
	pub failures: u64,
}
