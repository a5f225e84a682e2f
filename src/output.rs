//! Output bank with interlock, plus the hardware abstraction it drives.
//!
//! Provides [`OutputBank`], which owns the on/off state of every output and
//! rejects direct writes while a pattern is running, and the [`OutputDriver`]
//! trait it uses to reach the hardware. [`PinOutputs`] implements the trait
//! for any array of `embedded-hal` output pins.

use embedded_hal::digital::{OutputPin, PinState};

use crate::OUTPUT_COUNT;
use crate::types::{OutputError, OutputId, OutputState};

/// Trait for abstracting the physical outputs.
///
/// Implement this for your hardware (GPIO, shift register, I/O expander...)
/// to let the bank drive it. `index` is 0-based and always below
/// [`OUTPUT_COUNT`]. Handle any hardware errors internally - this method
/// cannot fail.
pub trait OutputDriver {
    /// Drives output `index` to `state`.
    fn write(&mut self, index: usize, state: OutputState);
}

/// [`OutputDriver`] over an array of `embedded-hal` output pins.
///
/// Pin `i` of the array is output `i + 1` on the wire. Pin errors are
/// ignored; for the usual infallible GPIO pins there are none.
pub struct PinOutputs<P: OutputPin, const N: usize> {
    pins: [P; N],
}

impl<P: OutputPin, const N: usize> PinOutputs<P, N> {
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    /// Releases the pins.
    pub fn into_inner(self) -> [P; N] {
        self.pins
    }
}

impl<P: OutputPin, const N: usize> OutputDriver for PinOutputs<P, N> {
    fn write(&mut self, index: usize, state: OutputState) {
        if let Some(pin) = self.pins.get_mut(index) {
            let _ = pin.set_state(PinState::from(state.is_on()));
        }
    }
}

/// Owns the state of the [`OUTPUT_COUNT`] outputs.
///
/// Direct writes ([`set`](OutputBank::set), [`toggle`](OutputBank::toggle))
/// are refused while the interlock is engaged. The interlock is engaged and
/// released only by the [`PatternEngine`](crate::PatternEngine) that owns the
/// bank, which is also the only caller of the unchecked write path.
///
/// The interlock flag mirrors [`PatternEngine::is_active`](crate::PatternEngine::is_active):
/// `start` engages it and `stop` releases it, so the two never disagree.
pub struct OutputBank<D: OutputDriver> {
    driver: D,
    states: [OutputState; OUTPUT_COUNT],
    interlocked: bool,
}

impl<D: OutputDriver> OutputBank<D> {
    /// Creates a bank with every output driven off.
    pub fn new(mut driver: D) -> Self {
        for index in 0..OUTPUT_COUNT {
            driver.write(index, OutputState::Off);
        }

        Self {
            driver,
            states: [OutputState::Off; OUTPUT_COUNT],
            interlocked: false,
        }
    }

    /// Sets an output from the command path.
    ///
    /// # Errors
    /// * `InvalidId` - `id` is outside `1..=OUTPUT_COUNT`
    /// * `Interlocked` - a pattern currently owns the outputs
    pub fn set(&mut self, id: OutputId, state: OutputState) -> Result<(), OutputError> {
        let index = id.index().ok_or(OutputError::InvalidId(id))?;
        if self.interlocked {
            return Err(OutputError::Interlocked);
        }

        self.write(index, state);
        Ok(())
    }

    /// Flips an output and returns its new state.
    ///
    /// Subject to the same checks as [`set`](OutputBank::set).
    pub fn toggle(&mut self, id: OutputId) -> Result<OutputState, OutputError> {
        let index = id.index().ok_or(OutputError::InvalidId(id))?;
        if self.interlocked {
            return Err(OutputError::Interlocked);
        }

        let state = self.states[index].toggled();
        self.write(index, state);
        Ok(state)
    }

    /// Returns the current state of an output.
    pub fn get(&self, id: OutputId) -> Result<OutputState, OutputError> {
        let index = id.index().ok_or(OutputError::InvalidId(id))?;
        Ok(self.states[index])
    }

    /// Snapshot of every output, output 1 first.
    pub fn states(&self) -> [OutputState; OUTPUT_COUNT] {
        self.states
    }

    /// Returns true while a pattern owns the outputs.
    pub fn is_interlocked(&self) -> bool {
        self.interlocked
    }

    /// Returns a reference to the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Releases the driver.
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Writes without the interlock check. Pattern engine only.
    pub(crate) fn force_set(&mut self, id: OutputId, state: OutputState) -> Result<(), OutputError> {
        let index = id.index().ok_or(OutputError::InvalidId(id))?;
        self.write(index, state);
        Ok(())
    }

    /// Drives every output off, bypassing the interlock.
    pub(crate) fn force_all_off(&mut self) {
        for index in 0..OUTPUT_COUNT {
            self.write(index, OutputState::Off);
        }
    }

    pub(crate) fn engage_interlock(&mut self) {
        self.interlocked = true;
    }

    pub(crate) fn release_interlock(&mut self) {
        self.interlocked = false;
    }

    fn write(&mut self, index: usize, state: OutputState) {
        self.driver.write(index, state);
        self.states[index] = state;
    }
}
