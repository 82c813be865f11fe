//! Sliding usage window over a trailing time span.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// One recorded unit of usage.
#[derive(Debug, Clone, Copy)]
struct UsageEntry {
    at: Instant,
    cost: u64,
}

/// Ordered sequence of (timestamp, cost) entries within a trailing span.
///
/// The window holds only entries younger than its span at query time; callers
/// purge before every decision. Entries are appended in time order, so the
/// front of the queue is always the oldest surviving entry.
///
/// The window itself is not synchronized. The [`RateLimiter`] owns both of
/// its windows behind a single lock so that concurrent admissions serialize.
///
/// [`RateLimiter`]: crate::RateLimiter
#[derive(Debug, Clone)]
pub struct UsageWindow {
    entries: VecDeque<UsageEntry>,
    span: Duration,
}

impl UsageWindow {
    /// Create an empty window covering the given trailing span.
    pub fn new(span: Duration) -> Self {
        Self {
            entries: VecDeque::new(),
            span,
        }
    }

    /// Drop entries whose age reaches or exceeds the span.
    pub fn prune(&mut self, now: Instant) {
        while let Some(entry) = self.entries.front() {
            if now.duration_since(entry.at) >= self.span {
                self.entries.pop_front();
            } else {
                break;
            }
        }
    }

    /// Append a usage entry at `now`.
    pub fn record(&mut self, now: Instant, cost: u64) {
        self.entries.push_back(UsageEntry { at: now, cost });
    }

    /// Sum of costs currently in the window.
    pub fn total_cost(&self) -> u64 {
        self.entries.iter().map(|e| e.cost).sum()
    }

    /// Number of entries currently in the window.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries survive.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Timestamp of the oldest surviving entry.
    pub fn oldest(&self) -> Option<Instant> {
        self.entries.front().map(|e| e.at)
    }

    /// The trailing span this window covers.
    pub fn span(&self) -> Duration {
        self.span
    }
}
