//! Chase pattern definitions.
//!
//! Each pattern is a fixed, looping list of output masks. Bit `i` of a mask
//! is output `i + 1`.

use crate::types::{OutputId, OutputState, PatternId};

/// One of the built-in chase patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pattern {
    /// A single lit output walking from 1 to 3.
    Chase,
    /// Outputs 1 and 3 alternating with output 2.
    Alternate,
    /// Fills up from output 1, then empties from output 1, then a dark step.
    Fill,
}

const CHASE_MASKS: [u8; 3] = [0b001, 0b010, 0b100];
const ALTERNATE_MASKS: [u8; 2] = [0b101, 0b010];
const FILL_MASKS: [u8; 6] = [0b001, 0b011, 0b111, 0b110, 0b100, 0b000];

impl Pattern {
    /// All patterns in protocol order.
    pub const ALL: [Pattern; 3] = [Pattern::Chase, Pattern::Alternate, Pattern::Fill];

    /// Looks up a pattern by its 1-based protocol id.
    pub fn from_id(id: PatternId) -> Option<Self> {
        match id.0 {
            1 => Some(Pattern::Chase),
            2 => Some(Pattern::Alternate),
            3 => Some(Pattern::Fill),
            _ => None,
        }
    }

    pub fn id(self) -> PatternId {
        match self {
            Pattern::Chase => PatternId(1),
            Pattern::Alternate => PatternId(2),
            Pattern::Fill => PatternId(3),
        }
    }

    fn masks(self) -> &'static [u8] {
        match self {
            Pattern::Chase => &CHASE_MASKS,
            Pattern::Alternate => &ALTERNATE_MASKS,
            Pattern::Fill => &FILL_MASKS,
        }
    }

    /// Number of steps before the pattern repeats.
    pub fn sequence_len(self) -> u8 {
        self.masks().len() as u8
    }

    /// Output mask for `step`, wrapping past the end of the sequence.
    pub fn mask(self, step: u8) -> u8 {
        let masks = self.masks();
        masks[step as usize % masks.len()]
    }

    /// State of output `id` at `step`.
    pub fn state_at(self, step: u8, id: OutputId) -> OutputState {
        match id.index() {
            Some(index) => OutputState::from(self.mask(step) & (1 << index) != 0),
            None => OutputState::Off,
        }
    }
}
