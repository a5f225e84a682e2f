//! Command outcomes and their wire format.
//!
//! Executing a [`Command`](crate::Command) yields either a [`Reply`] or a
//! [`CommandError`]; both know how to write themselves as protocol lines.

use core::fmt::Write;

use crate::OUTPUT_COUNT;
use crate::command::ParseError;
use crate::types::{FrequencyTier, OutputError, OutputId, OutputState, PatternError, PatternId};

const LINE_END: &str = "\r\n";

/// Snapshot written by the `STATUS` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusReport {
    /// Output states, output 1 first.
    pub outputs: [OutputState; OUTPUT_COUNT],
    /// Running pattern, if any.
    pub active: Option<PatternId>,
    /// Selected frequency tier.
    pub frequency: FrequencyTier,
    /// Received bytes were dropped since the last report.
    pub rx_overflow: bool,
    /// A command line was truncated since the last report.
    pub truncated: bool,
}

impl StatusReport {
    /// Writes the multi-line status block.
    pub fn write_to<W: Write>(&self, out: &mut W) -> core::fmt::Result {
        write!(out, "--- Statut ---{LINE_END}")?;

        for (id, state) in OutputId::all().zip(self.outputs) {
            write!(out, "LED {}: {}{LINE_END}", id.0, state)?;
        }

        match self.active {
            None => write!(out, "Chenillard: INACTIF (Freq select: {}){LINE_END}", self.frequency)?,
            Some(id) => write!(
                out,
                "Chenillard: ACTIF (Pattern: {}, Freq: {}){LINE_END}",
                id.0, self.frequency
            )?,
        }

        if self.rx_overflow {
            write!(out, "Attention: Debordement buffer UART detecte!{LINE_END}")?;
        }
        if self.truncated {
            write!(out, "Attention: Commande tronquee detectee!{LINE_END}")?;
        }
        Ok(())
    }
}

/// Successful outcome of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    OutputSet { id: OutputId, state: OutputState },
    PatternStarted(PatternId),
    FrequencySet(FrequencyTier),
    PatternStopped,
    /// `STOP` with nothing running. Handled, not an error.
    NothingToStop,
    Status(StatusReport),
}

impl Reply {
    /// Writes the reply: an `[OK]` line, or the status block.
    pub fn write_to<W: Write>(&self, out: &mut W) -> core::fmt::Result {
        match self {
            Reply::OutputSet { id, state } => {
                write!(out, "[OK] LED {} mise a {}{LINE_END}", id.0, state)
            }
            Reply::PatternStarted(id) => write!(out, "[OK] Chenillard {} active{LINE_END}", id.0),
            Reply::FrequencySet(tier) => write!(out, "[OK] Frequence reglee a {}{LINE_END}", tier),
            Reply::PatternStopped => write!(out, "[OK] Chenillard arrete{LINE_END}"),
            Reply::NothingToStop => write!(out, "[OK] Aucun chenillard actif a arreter{LINE_END}"),
            Reply::Status(report) => report.write_to(out),
        }
    }
}

/// Why a command line was rejected.
///
/// `Display` gives the message sent back after `[ERR]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// The line did not parse.
    Parse(ParseError),
    /// The output bank refused the write.
    Output(OutputError),
    /// The pattern engine refused the request.
    Pattern(PatternError),
}

impl CommandError {
    /// Writes the `[ERR]` line.
    pub fn write_to<W: Write>(&self, out: &mut W) -> core::fmt::Result {
        write!(out, "[ERR] {}{LINE_END}", self)
    }
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommandError::Parse(err) => write!(f, "{}", err),
            CommandError::Output(OutputError::InvalidId(_)) => f.write_str("Numero LED invalide (1-3)"),
            CommandError::Output(OutputError::Interlocked) => {
                f.write_str("Impossible de changer LED (pattern actif?)")
            }
            CommandError::Pattern(PatternError::InvalidPattern(_)) => {
                f.write_str("Impossible de demarrer chenillard")
            }
            CommandError::Pattern(PatternError::InvalidFrequency(_)) => {
                f.write_str("Impossible de regler frequence")
            }
            CommandError::Pattern(PatternError::NotRunning) => {
                f.write_str("Aucun chenillard actif a arreter")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

impl From<ParseError> for CommandError {
    fn from(err: ParseError) -> Self {
        CommandError::Parse(err)
    }
}

impl From<OutputError> for CommandError {
    fn from(err: OutputError) -> Self {
        CommandError::Output(err)
    }
}

impl From<PatternError> for CommandError {
    fn from(err: PatternError) -> Self {
        CommandError::Pattern(err)
    }
}
