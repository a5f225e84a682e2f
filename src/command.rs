//! Command line parsing.
//!
//! [`Command::parse`] turns one assembled line into a [`Command`] without
//! touching any state. Whether the command is allowed right now is decided
//! when it is executed by the [`Console`](crate::Console).
//!
//! Grammar, tried in this order (lines are already upper-case):
//!
//! | Line | Command |
//! |---|---|
//! | `STATUS` | [`Command::Status`] |
//! | `STOP` | [`Command::Stop`] |
//! | `LED<n> ON`, `LED<n> OFF` | [`Command::SetOutput`] |
//! | `CHENILLARD<n> ON` | [`Command::StartPattern`] |
//! | `CHENILLARD FREQUENCE<f>` | [`Command::SetFrequency`] |
//! | `PAT<n>` | [`Command::StartPattern`] |
//! | `FREQ<f>` | [`Command::SetFrequency`] |

use crate::types::{FrequencyTier, OutputId, OutputState, PatternId};
use crate::{OUTPUT_COUNT, PATTERN_COUNT};

const STATUS: &str = "STATUS";
const STOP: &str = "STOP";
const LED: &str = "LED";
const CHENILLARD: &str = "CHENILLARD";
const FREQUENCE: &str = " FREQUENCE";
const PAT: &str = "PAT";
const FREQ: &str = "FREQ";

/// A parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Print the status report.
    Status,
    /// Stop the running pattern.
    Stop,
    /// Set one output directly.
    SetOutput { id: OutputId, state: OutputState },
    /// Start a pattern.
    StartPattern(PatternId),
    /// Select the pattern frequency tier.
    SetFrequency(FrequencyTier),
}

/// Reasons a line does not parse.
///
/// `Display` gives the message sent back after `[ERR]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// `LED` line shorter than `LEDn ON`.
    LedTooShort,
    /// `LED` digit outside `1..=OUTPUT_COUNT`.
    LedBadNumber,
    /// No single space after the `LED` digit.
    LedMissingSpace,
    /// State token other than `ON`/`OFF`.
    LedBadState,
    /// `CHENILLARD<n> ON` with a digit outside `1..=PATTERN_COUNT`.
    PatternBadNumber,
    /// `CHENILLARD FREQUENCE` not followed by exactly one character.
    FrequencyBadFormat,
    /// `CHENILLARD FREQUENCE` digit outside `1..=3`.
    FrequencyBadNumber,
    /// `PAT<n>` digit outside `1..=PATTERN_COUNT`.
    PatBadNumber,
    /// `FREQ<f>` digit outside `1..=3`.
    FreqBadNumber,
    /// `PAT`/`FREQ` prefix with the wrong length.
    BadShortcut,
    /// Nothing matched.
    Unknown,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let message = match self {
            ParseError::LedTooShort => "Format LED invalide (trop court)",
            ParseError::LedBadNumber => "Numero LED invalide (1-3)",
            ParseError::LedMissingSpace => "Format LED invalide (espace manquant)",
            ParseError::LedBadState => "Etat LED invalide (ON/OFF attendu)",
            ParseError::PatternBadNumber => "Numero chenillard invalide (1-3)",
            ParseError::FrequencyBadFormat => "Format Frequence invalide",
            ParseError::FrequencyBadNumber => "Numero Frequence invalide (1-3)",
            ParseError::PatBadNumber => "Numero PAT invalide (1-3)",
            ParseError::FreqBadNumber => "Numero FREQ invalide (1-3)",
            ParseError::BadShortcut => "Raccourci invalide",
            ParseError::Unknown => "Commande inconnue ou format invalide",
        };
        f.write_str(message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Parses an ASCII digit in `1..=max`.
fn digit(byte: u8, max: usize) -> Option<u8> {
    let value = byte.checked_sub(b'0')?;
    (1..=max as u8).contains(&value).then_some(value)
}

impl Command {
    /// Parses one non-empty, upper-case line.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        if line == STATUS {
            return Ok(Command::Status);
        }
        if line == STOP {
            return Ok(Command::Stop);
        }
        if let Some(rest) = line.strip_prefix(LED) {
            return Self::parse_led(rest);
        }
        if let Some(rest) = line.strip_prefix(CHENILLARD) {
            return Self::parse_chenillard(rest);
        }
        if line.starts_with(PAT) || line.starts_with(FREQ) {
            return Self::parse_shortcut(line);
        }
        Err(ParseError::Unknown)
    }

    /// `<n> ON|OFF` after `LED`.
    fn parse_led(rest: &str) -> Result<Self, ParseError> {
        let bytes = rest.as_bytes();
        if bytes.len() < 4 {
            return Err(ParseError::LedTooShort);
        }

        let number = digit(bytes[0], OUTPUT_COUNT).ok_or(ParseError::LedBadNumber)?;
        if bytes[1] != b' ' {
            return Err(ParseError::LedMissingSpace);
        }

        let state = match rest.get(2..) {
            Some("ON") => OutputState::On,
            Some("OFF") => OutputState::Off,
            _ => return Err(ParseError::LedBadState),
        };

        Ok(Command::SetOutput {
            id: OutputId(number),
            state,
        })
    }

    /// `<n> ON` or ` FREQUENCE<f>` after `CHENILLARD`.
    fn parse_chenillard(rest: &str) -> Result<Self, ParseError> {
        let bytes = rest.as_bytes();

        if bytes.len() == 4 && bytes[0].is_ascii_digit() && &bytes[1..] == b" ON" {
            let number = digit(bytes[0], PATTERN_COUNT).ok_or(ParseError::PatternBadNumber)?;
            return Ok(Command::StartPattern(PatternId(number)));
        }

        if let Some(tier) = rest.strip_prefix(FREQUENCE) {
            let &[byte] = tier.as_bytes() else {
                return Err(ParseError::FrequencyBadFormat);
            };
            return digit(byte, FrequencyTier::ALL.len())
                .and_then(FrequencyTier::from_number)
                .map(Command::SetFrequency)
                .ok_or(ParseError::FrequencyBadNumber);
        }

        Err(ParseError::Unknown)
    }

    /// `PAT<n>` or `FREQ<f>`.
    fn parse_shortcut(line: &str) -> Result<Self, ParseError> {
        match line.as_bytes() {
            [b'P', b'A', b'T', byte] => digit(*byte, PATTERN_COUNT)
                .map(|number| Command::StartPattern(PatternId(number)))
                .ok_or(ParseError::PatBadNumber),
            [b'F', b'R', b'E', b'Q', byte] => digit(*byte, FrequencyTier::ALL.len())
                .and_then(FrequencyTier::from_number)
                .map(Command::SetFrequency)
                .ok_or(ParseError::FreqBadNumber),
            _ => Err(ParseError::BadShortcut),
        }
    }
}
