#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`LineAssembler`**: Turns a raw character stream into upper-cased, CR-terminated command lines
//! - **`Command`**: One parsed command line (`LED<n> ON`, `PAT<n>`, `STOP`, ...)
//! - **`OutputBank`**: Owns the on/off state of the indicator outputs and enforces the interlock
//! - **`OutputDriver`**: Trait to implement for your output hardware (or use `PinOutputs`)
//! - **`PatternEngine`**: Runs one of the chase patterns at a selected frequency tier
//! - **`PeriodicTimer`**: Trait to implement for the periodic tick sources
//! - **`TickSignal`**: Interrupt-safe cell through which timer ticks request a pattern step
//! - **`RxBuffer`**: Interrupt-safe byte queue between the UART receive handler and the main loop
//! - **`Console`**: Ties everything together and writes `[OK]`/`[ERR]` responses
//!
//! Interrupt handlers only ever touch `RxBuffer::push` and `TickSignal::on_tick`.
//! Everything else runs from the main loop through `Console::service` and `Console::poll`.

#[macro_use]
mod fmt;

pub mod types;
pub mod signal;
pub mod rx;
pub mod output;
pub mod line;
pub mod pattern;
pub mod timer;
pub mod engine;
pub mod command;
pub mod response;
pub mod console;

pub use types::{FrequencyTier, OutputError, OutputId, OutputState, PatternError, PatternId};
pub use signal::{PendingFlag, TickSignal};
pub use rx::RxBuffer;
pub use output::{OutputBank, OutputDriver, PinOutputs};
pub use line::{AssemblerState, LineAssembler, PushOutcome};
pub use pattern::Pattern;
pub use timer::PeriodicTimer;
pub use engine::PatternEngine;
pub use command::{Command, ParseError};
pub use response::{CommandError, Reply, StatusReport};
pub use console::Console;

/// Number of addressable outputs.
pub const OUTPUT_COUNT: usize = 3;

/// Number of selectable chase patterns.
pub const PATTERN_COUNT: usize = 3;

/// Capacity of the command line buffer, terminator slot included.
pub const COMMAND_BUFFER_SIZE: usize = 64;

/// Capacity of the interrupt-fed receive queue.
pub const RX_BUFFER_SIZE: usize = 64;

/// Prompt written after every non-empty command line.
pub const PROMPT: &str = "STM32> ";
