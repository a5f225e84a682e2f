//! Command console: line assembly, dispatch and responses.
//!
//! Provides [`Console`], the main-loop side of the firmware. It assembles
//! received characters into lines, parses and executes them against the
//! [`PatternEngine`], and writes the protocol responses to any
//! [`core::fmt::Write`] sink (usually the UART transmitter).

use core::fmt::Write;

use crate::command::Command;
use crate::engine::PatternEngine;
use crate::line::{LineAssembler, PushOutcome};
use crate::output::OutputDriver;
use crate::response::{CommandError, Reply, StatusReport};
use crate::rx::RxBuffer;
use crate::timer::PeriodicTimer;
use crate::types::PatternError;
use crate::{COMMAND_BUFFER_SIZE, PROMPT};

const GREETING: &str = "--= LED chaser console =--\r\n";

/// Text command console driving a [`PatternEngine`].
///
/// Write errors on the response sink are ignored: transmission is
/// fire-and-forget and a lost response never blocks command processing.
///
/// # Type Parameters
/// * `'s` - Lifetime of the shared tick signal
/// * `D` - Output driver type
/// * `T` - Periodic timer type
/// * `N` - Command line buffer capacity
pub struct Console<'s, D: OutputDriver, T: PeriodicTimer, const N: usize = COMMAND_BUFFER_SIZE> {
    assembler: LineAssembler<N>,
    engine: PatternEngine<'s, D, T>,
    prompt: &'static str,
    rx_overflow: bool,
}

impl<'s, D: OutputDriver, T: PeriodicTimer> Console<'s, D, T> {
    /// Creates a console with a [`COMMAND_BUFFER_SIZE`] line buffer.
    pub fn new(engine: PatternEngine<'s, D, T>) -> Self {
        Self::with_line_capacity(engine)
    }
}

impl<'s, D: OutputDriver, T: PeriodicTimer, const N: usize> Console<'s, D, T, N> {
    /// Creates a console whose lines hold up to `N - 1` characters.
    pub fn with_line_capacity(engine: PatternEngine<'s, D, T>) -> Self {
        Self {
            assembler: LineAssembler::new(),
            engine,
            prompt: PROMPT,
            rx_overflow: false,
        }
    }

    /// Replaces the default [`PROMPT`].
    pub fn with_prompt(mut self, prompt: &'static str) -> Self {
        self.prompt = prompt;
        self
    }

    /// Writes the boot greeting and the first prompt.
    pub fn banner<W: Write>(&self, out: &mut W) {
        let _ = out.write_str(GREETING);
        let _ = out.write_str(self.prompt);
    }

    /// Processes one received character, executing the line it completes.
    pub fn feed<W: Write>(&mut self, byte: u8, out: &mut W) -> PushOutcome {
        let outcome = self.assembler.push(byte);
        if outcome == PushOutcome::LineReady {
            if let Some(line) = self.assembler.take_line() {
                self.execute_line(&line, out);
            }
        }
        outcome
    }

    /// Drains the receive queue through [`feed`](Console::feed).
    ///
    /// Returns the number of bytes consumed.
    pub fn service<const RX: usize, W: Write>(&mut self, rx: &RxBuffer<RX>, out: &mut W) -> usize {
        if rx.take_overflow() {
            warn!("receive queue overflowed, bytes were dropped");
            self.rx_overflow = true;
        }

        let mut consumed = 0;
        while let Some(byte) = rx.pop() {
            self.feed(byte, out);
            consumed += 1;
        }
        consumed
    }

    /// Advances the running pattern if a tick is due.
    pub fn poll(&mut self) -> Option<u8> {
        self.engine.poll()
    }

    /// Parses, executes and answers one assembled line.
    ///
    /// Empty lines produce no output at all. Any other line produces exactly
    /// one response (an `[OK]` line, an `[ERR]` line, or the status block)
    /// followed by the prompt.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) {
        if line.is_empty() {
            return;
        }

        let result = Command::parse(line)
            .map_err(CommandError::from)
            .and_then(|command| self.execute(command));

        let _ = match result {
            Ok(reply) => reply.write_to(out),
            Err(err) => {
                debug!("command rejected: {}", err);
                err.write_to(out)
            }
        };
        let _ = out.write_str(self.prompt);
    }

    /// Executes a parsed command.
    pub fn execute(&mut self, command: Command) -> Result<Reply, CommandError> {
        match command {
            Command::Status => Ok(Reply::Status(self.status())),
            Command::Stop => match self.engine.stop() {
                Ok(()) => Ok(Reply::PatternStopped),
                Err(PatternError::NotRunning) => Ok(Reply::NothingToStop),
                Err(err) => Err(err.into()),
            },
            Command::SetOutput { id, state } => {
                self.engine.set_output(id, state)?;
                Ok(Reply::OutputSet { id, state })
            }
            Command::StartPattern(id) => {
                self.engine.start(id)?;
                Ok(Reply::PatternStarted(id))
            }
            Command::SetFrequency(tier) => {
                self.engine.set_frequency(tier);
                Ok(Reply::FrequencySet(tier))
            }
        }
    }

    /// Builds the status report. Clears the overflow and truncation warnings.
    pub fn status(&mut self) -> StatusReport {
        StatusReport {
            outputs: self.engine.outputs().states(),
            active: self.engine.active().map(|pattern| pattern.id()),
            frequency: self.engine.frequency(),
            rx_overflow: core::mem::replace(&mut self.rx_overflow, false),
            truncated: self.assembler.take_truncated(),
        }
    }

    pub fn engine(&self) -> &PatternEngine<'s, D, T> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PatternEngine<'s, D, T> {
        &mut self.engine
    }

    pub fn assembler(&self) -> &LineAssembler<N> {
        &self.assembler
    }
}
