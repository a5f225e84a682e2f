//! Shared test infrastructure for led-chaser integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use led_chaser::{
    Console, FrequencyTier, OUTPUT_COUNT, OutputBank, OutputDriver, OutputState, PatternEngine,
    PeriodicTimer, TickSignal,
};

// ============================================================================
// Mock Output Driver
// ============================================================================

/// Mock driver that records every write
pub struct MockDriver {
    levels: [OutputState; OUTPUT_COUNT],
    history: Vec<(usize, OutputState)>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self {
            levels: [OutputState::Off; OUTPUT_COUNT],
            history: Vec::new(),
        }
    }

    /// Physical levels, output 1 first
    pub fn levels(&self) -> [OutputState; OUTPUT_COUNT] {
        self.levels
    }

    /// Levels as booleans, handy for pattern assertions
    pub fn lit(&self) -> [bool; OUTPUT_COUNT] {
        self.levels.map(OutputState::is_on)
    }

    pub fn history(&self) -> &[(usize, OutputState)] {
        &self.history
    }
}

impl OutputDriver for MockDriver {
    fn write(&mut self, index: usize, state: OutputState) {
        self.levels[index] = state;
        self.history.push((index, state));
    }
}

// ============================================================================
// Mock Periodic Timer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Start(FrequencyTier),
    Stop(FrequencyTier),
}

/// Mock timer that records start/stop calls and tracks running sources
pub struct MockTimer {
    running: Vec<FrequencyTier>,
    events: Vec<TimerEvent>,
}

impl MockTimer {
    pub fn new() -> Self {
        Self {
            running: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn running(&self) -> &[FrequencyTier] {
        &self.running
    }

    pub fn events(&self) -> &[TimerEvent] {
        &self.events
    }
}

impl PeriodicTimer for MockTimer {
    fn start(&mut self, tier: FrequencyTier) {
        if !self.running.contains(&tier) {
            self.running.push(tier);
        }
        self.events.push(TimerEvent::Start(tier));
    }

    fn stop(&mut self, tier: FrequencyTier) {
        self.running.retain(|&t| t != tier);
        self.events.push(TimerEvent::Stop(tier));
    }
}

// ============================================================================
// Builders
// ============================================================================

pub type TestEngine<'s> = PatternEngine<'s, MockDriver, MockTimer>;
pub type TestConsole<'s> = Console<'s, MockDriver, MockTimer>;

pub fn engine(ticks: &TickSignal) -> TestEngine<'_> {
    PatternEngine::new(OutputBank::new(MockDriver::new()), MockTimer::new(), ticks)
}

pub fn console(ticks: &TickSignal) -> TestConsole<'_> {
    Console::new(engine(ticks))
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Feeds `text` character by character and returns everything written back
pub fn send<const N: usize>(console: &mut Console<'_, MockDriver, MockTimer, N>, text: &str) -> String {
    let mut out = String::new();
    for byte in text.bytes() {
        console.feed(byte, &mut out);
    }
    out
}

/// Delivers one tick of `tier` and polls the engine
pub fn tick(engine: &mut TestEngine<'_>, ticks: &TickSignal, tier: FrequencyTier) -> Option<u8> {
    ticks.on_tick(tier);
    engine.poll()
}

/// Current output levels of an engine as booleans
pub fn lit(engine: &TestEngine<'_>) -> [bool; OUTPUT_COUNT] {
    engine.outputs().driver().lit()
}
