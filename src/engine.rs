//! Pattern/frequency engine.
//!
//! Provides [`PatternEngine`], which owns the [`OutputBank`] and the
//! [`PeriodicTimer`], runs at most one [`Pattern`] at a time and advances it
//! by one step per accepted timer tick.

use crate::output::{OutputBank, OutputDriver};
use crate::pattern::Pattern;
use crate::signal::TickSignal;
use crate::timer::PeriodicTimer;
use crate::types::{FrequencyTier, OutputError, OutputId, OutputState, PatternError, PatternId};

/// Runs the chase patterns.
///
/// The engine is either idle (no pattern, outputs under direct control) or
/// running one pattern at the selected [`FrequencyTier`]. While running, the
/// output bank interlock is engaged and only the engine writes outputs.
///
/// Timer interrupts never touch the engine: they go through the shared
/// [`TickSignal`], and [`poll`](PatternEngine::poll) picks the request up from
/// the main loop.
///
/// # Type Parameters
/// * `'s` - Lifetime of the shared tick signal
/// * `D` - Output driver type
/// * `T` - Periodic timer type
pub struct PatternEngine<'s, D: OutputDriver, T: PeriodicTimer> {
    outputs: OutputBank<D>,
    timer: T,
    ticks: &'s TickSignal,
    active: Option<Pattern>,
    frequency: FrequencyTier,
    step: u8,
}

impl<'s, D: OutputDriver, T: PeriodicTimer> PatternEngine<'s, D, T> {
    /// Creates an idle engine at the default frequency tier.
    pub fn new(outputs: OutputBank<D>, timer: T, ticks: &'s TickSignal) -> Self {
        ticks.arm(None);
        ticks.take_update();

        Self {
            outputs,
            timer,
            ticks,
            active: None,
            frequency: FrequencyTier::default(),
            step: 0,
        }
    }

    /// Starts pattern `id` from its first step.
    ///
    /// A running pattern, the same one included, is stopped first. The first
    /// step is requested immediately instead of waiting one full period.
    ///
    /// # Errors
    /// * `InvalidPattern` - `id` does not name a pattern; nothing changes
    pub fn start(&mut self, id: PatternId) -> Result<(), PatternError> {
        let pattern = Pattern::from_id(id).ok_or(PatternError::InvalidPattern(id))?;

        if self.active.is_some() {
            self.stop()?;
        }

        self.active = Some(pattern);
        self.step = 0;
        self.outputs.engage_interlock();

        self.ticks.arm(Some(self.frequency));
        self.timer.start(self.frequency);
        self.ticks.request_update();

        info!("pattern {} started at {}", pattern, self.frequency);
        Ok(())
    }

    /// Stops the running pattern and turns every output off.
    ///
    /// # Errors
    /// * `NotRunning` - no pattern was running; nothing changes
    pub fn stop(&mut self) -> Result<(), PatternError> {
        let Some(pattern) = self.active.take() else {
            return Err(PatternError::NotRunning);
        };

        self.timer.stop(self.frequency);
        self.ticks.arm(None);
        self.ticks.take_update();

        self.outputs.release_interlock();
        self.outputs.force_all_off();

        info!("pattern {} stopped", pattern);
        Ok(())
    }

    /// Selects the frequency tier.
    ///
    /// While running, the timer is moved to the new tier and the pattern keeps
    /// its current step. While idle, the tier is only recorded for the next
    /// [`start`](PatternEngine::start).
    pub fn set_frequency(&mut self, tier: FrequencyTier) {
        if self.active.is_some() {
            self.timer.stop(self.frequency);
            self.frequency = tier;
            self.ticks.arm(Some(tier));
            self.timer.start(tier);
        } else {
            self.frequency = tier;
        }

        debug!("frequency set to {}", tier);
    }

    /// Applies the next step if a tick requested one.
    ///
    /// Call this from the main loop. Returns the step that was applied, or
    /// `None` if the engine is idle or no step was due.
    pub fn poll(&mut self) -> Option<u8> {
        let pattern = self.active?;
        if !self.ticks.take_update() {
            return None;
        }

        let applied = self.step;
        self.apply(pattern, applied);
        self.step = (applied + 1) % pattern.sequence_len();

        trace!("pattern {} step {}", pattern, applied);
        Some(applied)
    }

    fn apply(&mut self, pattern: Pattern, step: u8) {
        for id in OutputId::all() {
            let _ = self.outputs.force_set(id, pattern.state_at(step, id));
        }
    }

    /// Sets an output from the command path, honouring the interlock.
    pub fn set_output(&mut self, id: OutputId, state: OutputState) -> Result<(), OutputError> {
        self.outputs.set(id, state)
    }

    /// Returns true while a pattern is running. This is the interlock predicate.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The running pattern, if any.
    pub fn active(&self) -> Option<Pattern> {
        self.active
    }

    /// The selected frequency tier.
    pub fn frequency(&self) -> FrequencyTier {
        self.frequency
    }

    /// Index of the next step to apply.
    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn outputs(&self) -> &OutputBank<D> {
        &self.outputs
    }

    /// Mutable access to the bank. Writes through it are still interlocked.
    pub fn outputs_mut(&mut self) -> &mut OutputBank<D> {
        &mut self.outputs
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }
}
