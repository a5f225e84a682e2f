#![no_std]
#![no_main]

use core::fmt;

use cortex_m_rt::entry;
use led_chaser::{
    Console, FrequencyTier, OutputBank, OutputDriver, OutputState, PatternEngine, PeriodicTimer,
    RX_BUFFER_SIZE, RxBuffer, TickSignal,
};
use panic_halt as _;

static RX: RxBuffer<RX_BUFFER_SIZE> = RxBuffer::new();
static TICKS: TickSignal = TickSignal::new();

// ============================================================================
// Minimal Output Implementation
// ============================================================================

/// Zero-size output driver for measuring library overhead
pub struct MinimalOutputs;

impl OutputDriver for MinimalOutputs {
    fn write(&mut self, index: usize, state: OutputState) {
        core::hint::black_box((index, state));
    }
}

// ============================================================================
// Minimal Timer Implementation
// ============================================================================

pub struct MinimalTimer;

impl PeriodicTimer for MinimalTimer {
    fn start(&mut self, tier: FrequencyTier) {
        core::hint::black_box(tier);
    }

    fn stop(&mut self, tier: FrequencyTier) {
        core::hint::black_box(tier);
    }
}

// ============================================================================
// Minimal Transmitter
// ============================================================================

pub struct MinimalTx;

impl fmt::Write for MinimalTx {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        core::hint::black_box(s);
        Ok(())
    }
}

// ============================================================================
// Test Session
// ============================================================================

// This function uses the library to prevent optimizer from removing code
#[inline(never)]
fn test_session() {
    let engine = PatternEngine::new(OutputBank::new(MinimalOutputs), MinimalTimer, &TICKS);
    let mut console = Console::new(engine);
    let mut tx = MinimalTx;

    console.banner(&mut tx);

    for line in ["LED1 ON\r", "PAT2\r", "FREQ1\r", "STATUS\r", "STOP\r", "BOGUS\r"] {
        for byte in line.bytes() {
            RX.push(byte);
        }
        console.service(&RX, &mut tx);
        TICKS.on_tick(FrequencyTier::Fast);
        let _ = console.poll();
    }

    core::hint::black_box(console);
}

#[entry]
fn main() -> ! {
    // Call test function to ensure all code is included
    test_session();

    // Halt - this is a size analysis binary, not meant to run
    loop {
        cortex_m::asm::nop();
    }
}
