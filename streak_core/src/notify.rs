//! Ephemeral unlock notices for newly earned badges.
//!
//! Notices drive one-shot celebration output and are never persisted.
//! They expire on their own after a short window unless the caller clears
//! them first; expiry is checked lazily on access, so no timer thread is
//! needed.

use crate::MilestoneBadge;
use std::time::{Duration, Instant};

/// Auto-clear window for unlock notices
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Holder for the badges unlocked by the most recent recomputation
#[derive(Debug)]
pub struct UnlockNotices {
    badges: Vec<MilestoneBadge>,
    posted_at: Option<Instant>,
    ttl: Duration,
}

impl Default for UnlockNotices {
    fn default() -> Self {
        Self::new()
    }
}

impl UnlockNotices {
    /// Empty holder with the standard 5-second auto-clear window
    pub fn new() -> Self {
        Self::with_ttl(NOTICE_TTL)
    }

    /// Holder with a custom auto-clear window (used by tests)
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            badges: Vec::new(),
            posted_at: None,
            ttl,
        }
    }

    /// Replace the held notices with the latest newly-unlocked batch.
    ///
    /// Posting an empty batch clears any prior notices.
    pub fn post(&mut self, badges: Vec<MilestoneBadge>) {
        if badges.is_empty() {
            self.clear();
            return;
        }
        tracing::debug!("Posting {} unlock notice(s)", badges.len());
        self.badges = badges;
        self.posted_at = Some(Instant::now());
    }

    /// The currently visible notices; empty once cleared or expired
    pub fn active(&self) -> &[MilestoneBadge] {
        match self.posted_at {
            Some(posted) if posted.elapsed() < self.ttl => &self.badges,
            _ => &[],
        }
    }

    /// Explicitly drop the notices; later expiry becomes a no-op
    pub fn clear(&mut self) {
        self.badges.clear();
        self.posted_at = None;
    }
}
