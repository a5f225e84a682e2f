//! Line assembly from a raw character stream.

use heapless::String;

/// State of a [`LineAssembler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssemblerState {
    /// Collecting characters.
    Accumulating,
    /// A carriage return completed the line; it is waiting to be taken.
    LineReady,
}

/// What [`LineAssembler::push`] did with a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PushOutcome {
    /// Stored at the end of the line.
    Stored,
    /// Backspace/delete removed the last character.
    Erased,
    /// Line feed, or backspace on an empty line. Nothing changed.
    Ignored,
    /// Non-printable, or the line is full.
    Dropped,
    /// Carriage return completed the line.
    LineReady,
}

/// Accumulates characters into upper-cased command lines.
///
/// Lines hold at most `N - 1` characters; extra printable characters are
/// dropped and remembered in a sticky truncation flag. Line feeds are ignored
/// so CR and CR+LF terminators behave the same.
///
/// A completed line stays available until it is taken or until the next
/// character arrives, which clears it and starts a new line.
pub struct LineAssembler<const N: usize> {
    buffer: String<N>,
    state: AssemblerState,
    truncated: bool,
}

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;

impl<const N: usize> LineAssembler<N> {
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
            state: AssemblerState::Accumulating,
            truncated: false,
        }
    }

    /// Processes one received character.
    pub fn push(&mut self, byte: u8) -> PushOutcome {
        if self.state == AssemblerState::LineReady {
            self.clear();
        }

        match byte.to_ascii_uppercase() {
            b'\n' => PushOutcome::Ignored,
            b'\r' => {
                self.state = AssemblerState::LineReady;
                PushOutcome::LineReady
            }
            BACKSPACE | DELETE => match self.buffer.pop() {
                Some(_) => PushOutcome::Erased,
                None => PushOutcome::Ignored,
            },
            c @ 0x20..=0x7E => {
                if self.buffer.len() + 1 < N && self.buffer.push(c as char).is_ok() {
                    PushOutcome::Stored
                } else {
                    self.truncated = true;
                    PushOutcome::Dropped
                }
            }
            _ => PushOutcome::Dropped,
        }
    }

    pub fn state(&self) -> AssemblerState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == AssemblerState::LineReady
    }

    /// Number of characters in the current line.
    pub fn cursor(&self) -> usize {
        self.buffer.len()
    }

    /// The completed line, if one is ready.
    pub fn line(&self) -> Option<&str> {
        match self.state {
            AssemblerState::LineReady => Some(self.buffer.as_str()),
            AssemblerState::Accumulating => None,
        }
    }

    /// Characters collected so far, ready or not.
    pub fn contents(&self) -> &str {
        self.buffer.as_str()
    }

    /// Consumes the completed line and resets to `Accumulating`.
    pub fn take_line(&mut self) -> Option<String<N>> {
        if !self.is_ready() {
            return None;
        }
        let line = self.buffer.clone();
        self.clear();
        Some(line)
    }

    /// Returns whether characters were dropped for lack of room since the last call.
    pub fn take_truncated(&mut self) -> bool {
        core::mem::replace(&mut self.truncated, false)
    }

    /// Clears the buffer and resets to `Accumulating`.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.state = AssemblerState::Accumulating;
    }
}

impl<const N: usize> Default for LineAssembler<N> {
    fn default() -> Self {
        Self::new()
    }
}
