use std::time::{Duration, Instant};

use crate::model::is_blank;
use crate::settings::MAX_DEBOUNCE_MS;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);
pub const MAX_DEBOUNCE: Duration = Duration::from_millis(MAX_DEBOUNCE_MS);

/// Identifies one scheduled commit. Only the newest token can ever fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CommitToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Committed,
    Scheduled { token: CommitToken, due_at: Instant },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingCommit {
    query: String,
    due_at: Instant,
    token: CommitToken,
}

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    raw_query: String,
    committed_query: String,
    pending: Option<PendingCommit>,
    generation: u64,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchDebouncer {
    /// Delays above `MAX_DEBOUNCE` are clamped.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay: delay.min(MAX_DEBOUNCE),
            raw_query: String::new(),
            committed_query: String::new(),
            pending: None,
            generation: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn committed_query(&self) -> &str {
        &self.committed_query
    }

    /// True iff a commit for a non-blank query is pending.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due_at)
    }

    pub fn submit(&mut self, raw_query: &str, now: Instant) -> SubmitOutcome {
        self.raw_query = raw_query.to_string();
        // A commit that came due before this keystroke still counts.
        self.poll(now);
        self.cancel();

        if is_blank(raw_query) {
            self.committed_query.clear();
            return SubmitOutcome::Committed;
        }

        let token = self.next_token();
        let due_at = now.checked_add(self.delay).unwrap_or(now);
        self.pending = Some(PendingCommit {
            query: raw_query.to_string(),
            due_at,
            token,
        });
        tracing::debug!(token = token.0, delay_ms = self.delay.as_millis() as u64, "commit scheduled");
        SubmitOutcome::Scheduled { token, due_at }
    }

    /// Applies the pending commit if `token` is still current and its
    /// deadline has passed.
    pub fn fire(&mut self, token: CommitToken, now: Instant) -> bool {
        match self.pending.take() {
            Some(pending) if pending.token == token && now >= pending.due_at => {
                tracing::debug!(token = token.0, "commit fired");
                self.committed_query = pending.query;
                true
            }
            other => {
                tracing::debug!(token = token.0, "ignoring stale or early commit");
                self.pending = other;
                false
            }
        }
    }

    /// Fires the pending commit once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = self
            .pending
            .as_ref()
            .filter(|pending| now >= pending.due_at)
            .map(|pending| pending.token);
        match due {
            Some(token) => self.fire(token, now),
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::debug!(token = pending.token.0, "pending commit superseded");
        }
        // Any token handed out before this point is now void.
        self.generation = self.generation.wrapping_add(1);
    }

    fn next_token(&mut self) -> CommitToken {
        self.generation = self.generation.wrapping_add(1);
        CommitToken(self.generation)
    }
}
