//! Periodic tick source abstraction.

use crate::types::FrequencyTier;

/// Trait for abstracting the periodic timers that pace the patterns.
///
/// There is one periodic source per [`FrequencyTier`]. While a source runs,
/// its interrupt handler must call
/// [`TickSignal::on_tick`](crate::TickSignal::on_tick) with the same tier once
/// per period. Handle any hardware errors internally - these methods cannot
/// fail.
pub trait PeriodicTimer {
    /// Starts the periodic source of `tier`.
    fn start(&mut self, tier: FrequencyTier);

    /// Stops the periodic source of `tier`.
    fn stop(&mut self, tier: FrequencyTier);
}

impl<T: PeriodicTimer + ?Sized> PeriodicTimer for &mut T {
    fn start(&mut self, tier: FrequencyTier) {
        (**self).start(tier);
    }

    fn stop(&mut self, tier: FrequencyTier) {
        (**self).stop(tier);
    }
}
