//! Interrupt-to-main signalling cells.
//!
//! Both types are meant to live in `static`s shared between an interrupt
//! handler (the single producer) and the main loop (the single consumer).
//! Every access runs inside a critical section, so they also work on cores
//! without atomic read-modify-write instructions such as the Cortex-M0.

use core::cell::Cell;

use critical_section::Mutex;

use crate::types::FrequencyTier;

/// A single-slot "something is due" flag.
///
/// Raising an already raised flag is a no-op: several raises before the next
/// [`take`](PendingFlag::take) collapse into one.
pub struct PendingFlag {
    raised: Mutex<Cell<bool>>,
}

impl PendingFlag {
    pub const fn new() -> Self {
        Self {
            raised: Mutex::new(Cell::new(false)),
        }
    }

    /// Raises the flag. Safe to call from interrupt context.
    pub fn raise(&self) {
        critical_section::with(|cs| self.raised.borrow(cs).set(true));
    }

    /// Returns whether the flag was raised and clears it in the same critical section.
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.raised.borrow(cs).replace(false))
    }

    /// Returns whether the flag is raised without consuming it.
    pub fn is_raised(&self) -> bool {
        critical_section::with(|cs| self.raised.borrow(cs).get())
    }
}

impl Default for PendingFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Tick gate shared between the timer interrupts and the pattern engine.
///
/// The engine arms the gate with the tier of the running pattern; a tick only
/// requests an update when it comes from that tier. Ticks from a source that
/// was stopped late, or while no pattern runs, are discarded here, in the
/// interrupt, without touching any main-loop state.
pub struct TickSignal {
    armed: Mutex<Cell<Option<FrequencyTier>>>,
    pending: PendingFlag,
}

impl TickSignal {
    pub const fn new() -> Self {
        Self {
            armed: Mutex::new(Cell::new(None)),
            pending: PendingFlag::new(),
        }
    }

    /// Delivers a tick from the periodic source of `tier`.
    ///
    /// Call this from the timer interrupt handler. Returns true if the tick
    /// requested a pattern step.
    pub fn on_tick(&self, tier: FrequencyTier) -> bool {
        critical_section::with(|cs| {
            if self.armed.borrow(cs).get() == Some(tier) {
                self.pending.raised.borrow(cs).set(true);
                true
            } else {
                false
            }
        })
    }

    /// Tier currently accepted by [`on_tick`](TickSignal::on_tick), if any.
    pub fn armed(&self) -> Option<FrequencyTier> {
        critical_section::with(|cs| self.armed.borrow(cs).get())
    }

    /// Returns true if a step has been requested and not yet consumed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_raised()
    }

    pub(crate) fn arm(&self, tier: Option<FrequencyTier>) {
        critical_section::with(|cs| self.armed.borrow(cs).set(tier));
    }

    pub(crate) fn request_update(&self) {
        self.pending.raise();
    }

    pub(crate) fn take_update(&self) -> bool {
        self.pending.take()
    }
}

impl Default for TickSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_flag_is_consumed_once() {
        let flag = PendingFlag::new();
        assert!(!flag.take());

        flag.raise();
        flag.raise();
        assert!(flag.is_raised());
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn disarmed_signal_ignores_ticks() {
        let signal = TickSignal::new();
        assert!(!signal.on_tick(FrequencyTier::Normal));
        assert!(!signal.is_pending());
    }

    #[test]
    fn armed_signal_only_accepts_its_tier() {
        let signal = TickSignal::new();
        signal.arm(Some(FrequencyTier::Fast));

        assert!(!signal.on_tick(FrequencyTier::Slow));
        assert!(!signal.is_pending());

        assert!(signal.on_tick(FrequencyTier::Fast));
        assert!(signal.on_tick(FrequencyTier::Fast));
        assert!(signal.take_update());
        assert!(!signal.take_update());
    }
}
