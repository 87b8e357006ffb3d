use tracing::warn;

/// Ticks after which a stale guard closes itself. The close normally
/// arrives when the submission settles; the timer only catches windows
/// whose close never fired, so a stuck OPEN state cannot corrupt
/// unrelated later rolls.
pub const GUARD_TIMEOUT_TICKS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Closed,
    Open { opened_at: u64 },
}

/// Scopes the override to the dice of one dialog submission.
///
/// State machine: CLOSED -> (submit begins) -> OPEN -> (submit settles, or
/// timeout fires) -> CLOSED. No other transitions. Time is a monotonic
/// tick supplied by the caller; the guard owns no clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitGuard {
    state: GuardState,
    timeout: u64,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::with_timeout(GUARD_TIMEOUT_TICKS)
    }

    pub fn with_timeout(ticks: u64) -> Self {
        Self {
            state: GuardState::Closed,
            timeout: ticks,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, GuardState::Open { .. })
    }

    /// Open the submission window. Re-entrant opens while OPEN are
    /// best-effort: the new window replaces the old one.
    pub fn open(&mut self, now: u64) {
        if let GuardState::Open { opened_at } = self.state {
            warn!(opened_at, now, "guard reopened while open, replacing the stale window");
        }
        self.state = GuardState::Open { opened_at: now };
    }

    pub fn close(&mut self) {
        self.state = GuardState::Closed;
    }

    /// Forcibly close a window that outlived its timeout. Returns true
    /// when the guard expired on this call.
    pub fn expire_if_stale(&mut self, now: u64) -> bool {
        if let GuardState::Open { opened_at } = self.state {
            if now.saturating_sub(opened_at) >= self.timeout {
                warn!(opened_at, now, "guard timed out without an explicit close");
                self.state = GuardState::Closed;
                return true;
            }
        }
        false
    }
}

impl Default for SubmitGuard {
    fn default() -> Self {
        Self::new()
    }
}
