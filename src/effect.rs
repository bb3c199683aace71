//! Effect requests and scheduling
//!
//! Command handlers never touch the display or timers directly; they return
//! `Effect` values. Delayed effects go through the `Scheduler`, which is
//! polled from the event loop with an explicit "now", so tests can assert on
//! requested effects without sleeping.

use std::time::{Duration, Instant};

/// Delay before the viewport eases to the bottom after new output
pub const SCROLL_DELAY: Duration = Duration::from_millis(100);

/// Delay between the `exit` farewell line and actual termination
pub const TERMINATE_DELAY: Duration = Duration::from_millis(1000);

/// A side effect requested by the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Wipe the scrollback and reset the prompt row
    ClearScreen,
    /// Scroll the viewport to the newest output
    ScrollToBottom,
    /// End the session
    Terminate,
}

/// A pending delayed effect
#[derive(Clone, Copy, Debug)]
struct Pending {
    due: Instant,
    effect: Effect,
}

/// Due-time ordered effect scheduler
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an effect `delay` from `now`
    pub fn schedule(&mut self, effect: Effect, delay: Duration, now: Instant) {
        self.pending.push(Pending {
            due: now + delay,
            effect,
        });
    }

    /// Remove and return all effects due at `now`, oldest first
    pub fn take_due(&mut self, now: Instant) -> Vec<Effect> {
        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due <= now {
                due.push(*p);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|p| p.due);
        due.into_iter().map(|p| p.effect).collect()
    }

    /// Cancel every pending instance of one effect kind
    pub fn cancel(&mut self, effect: Effect) {
        self.pending.retain(|p| p.effect != effect);
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether an effect of this kind is pending
    #[allow(dead_code)]
    pub fn has_pending(&self, effect: Effect) -> bool {
        self.pending.iter().any(|p| p.effect == effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_before_delay() {
        let now = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(Effect::Terminate, TERMINATE_DELAY, now);

        assert!(sched.take_due(now).is_empty());
        assert!(sched.has_pending(Effect::Terminate));
    }

    #[test]
    fn test_due_after_delay() {
        let now = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(Effect::ScrollToBottom, SCROLL_DELAY, now);

        let due = sched.take_due(now + SCROLL_DELAY);
        assert_eq!(due, vec![Effect::ScrollToBottom]);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_due_ordering() {
        let now = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(Effect::Terminate, Duration::from_millis(50), now);
        sched.schedule(Effect::ScrollToBottom, Duration::from_millis(10), now);

        let due = sched.take_due(now + Duration::from_millis(100));
        assert_eq!(due, vec![Effect::ScrollToBottom, Effect::Terminate]);
    }

    #[test]
    fn test_cancel_removes_kind() {
        let now = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(Effect::ScrollToBottom, SCROLL_DELAY, now);
        sched.schedule(Effect::ScrollToBottom, SCROLL_DELAY * 2, now);
        sched.schedule(Effect::Terminate, TERMINATE_DELAY, now);

        sched.cancel(Effect::ScrollToBottom);

        assert!(!sched.has_pending(Effect::ScrollToBottom));
        assert!(sched.has_pending(Effect::Terminate));
    }
}
