//! Core identifiers, states and error types.

use crate::{OUTPUT_COUNT, PATTERN_COUNT};

/// A 1-based output identifier as written on the wire (`LED1` is `OutputId(1)`).
///
/// The range is only checked by the operations that use it, so any value can
/// be constructed and carried into an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputId(pub u8);

impl OutputId {
    /// Iterates over every valid output id in ascending order.
    pub fn all() -> impl Iterator<Item = OutputId> {
        (1..=OUTPUT_COUNT as u8).map(OutputId)
    }

    /// Returns the 0-based slot for a valid id.
    #[inline]
    pub fn index(self) -> Option<usize> {
        match self.0 as usize {
            n @ 1..=OUTPUT_COUNT => Some(n - 1),
            _ => None,
        }
    }

    /// Returns true if the id addresses an existing output.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.index().is_some()
    }
}

impl From<u8> for OutputId {
    fn from(id: u8) -> Self {
        OutputId(id)
    }
}

/// On/off state of a single output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputState {
    #[default]
    Off,
    On,
}

impl OutputState {
    #[inline]
    pub fn is_on(self) -> bool {
        self == OutputState::On
    }

    /// Returns the opposite state.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            OutputState::Off => OutputState::On,
            OutputState::On => OutputState::Off,
        }
    }

    /// Protocol token for this state.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputState::Off => "OFF",
            OutputState::On => "ON",
        }
    }
}

impl From<bool> for OutputState {
    fn from(on: bool) -> Self {
        if on { OutputState::On } else { OutputState::Off }
    }
}

impl core::fmt::Display for OutputState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 1-based chase pattern identifier (`PAT2` is `PatternId(2)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PatternId(pub u8);

impl PatternId {
    #[inline]
    pub fn is_valid(self) -> bool {
        (1..=PATTERN_COUNT as u8).contains(&self.0)
    }
}

impl From<u8> for PatternId {
    fn from(id: u8) -> Self {
        PatternId(id)
    }
}

/// Tick rate at which a running pattern advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrequencyTier {
    /// One step every 500 ms (`FREQ1`).
    Fast,

    /// One step every second (`FREQ2`).
    #[default]
    Normal,

    /// One step every 3 seconds (`FREQ3`).
    Slow,
}

impl FrequencyTier {
    /// All tiers in protocol order.
    pub const ALL: [FrequencyTier; 3] = [FrequencyTier::Fast, FrequencyTier::Normal, FrequencyTier::Slow];

    /// Looks up a tier by its 1-based protocol number.
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(FrequencyTier::Fast),
            2 => Some(FrequencyTier::Normal),
            3 => Some(FrequencyTier::Slow),
            _ => None,
        }
    }

    /// 1-based protocol number.
    pub fn number(self) -> u8 {
        match self {
            FrequencyTier::Fast => 1,
            FrequencyTier::Normal => 2,
            FrequencyTier::Slow => 3,
        }
    }

    /// Tick period in milliseconds.
    pub fn period_millis(self) -> u32 {
        match self {
            FrequencyTier::Fast => 500,
            FrequencyTier::Normal => 1_000,
            FrequencyTier::Slow => 3_000,
        }
    }

    /// Label used in responses and the status report.
    pub fn label(self) -> &'static str {
        match self {
            FrequencyTier::Fast => "500MS",
            FrequencyTier::Normal => "1S",
            FrequencyTier::Slow => "3S",
        }
    }
}

impl TryFrom<u8> for FrequencyTier {
    type Error = PatternError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        FrequencyTier::from_number(number).ok_or(PatternError::InvalidFrequency(number))
    }
}

impl core::fmt::Display for FrequencyTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors returned by output bank operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// The id does not address an existing output.
    InvalidId(OutputId),

    /// A pattern is running and owns the outputs.
    Interlocked,
}

impl core::fmt::Display for OutputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OutputError::InvalidId(id) => {
                write!(f, "output {} does not exist (valid: 1-{})", id.0, OUTPUT_COUNT)
            }
            OutputError::Interlocked => {
                write!(f, "outputs are driven by an active pattern")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutputError {}

/// Errors returned by pattern engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternError {
    /// The id does not name a known pattern.
    InvalidPattern(PatternId),

    /// The number does not name a frequency tier.
    InvalidFrequency(u8),

    /// Stop requested while no pattern is running.
    NotRunning,
}

impl core::fmt::Display for PatternError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PatternError::InvalidPattern(id) => {
                write!(f, "pattern {} does not exist (valid: 1-{})", id.0, PATTERN_COUNT)
            }
            PatternError::InvalidFrequency(number) => {
                write!(f, "frequency tier {} does not exist (valid: 1-3)", number)
            }
            PatternError::NotRunning => {
                write!(f, "no pattern is running")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PatternError {}
