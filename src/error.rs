//! Error types
//!
//! Two classes of failure exist. [`ProfileError`] is raised once, when a board
//! profile is built from tables that cannot describe real hardware. [`Error`]
//! is raised by a calibration call whose inputs fall outside what the profile
//! characterizes. Both are integration defects: callers should surface them,
//! never substitute a default.
//!
//! Clamping a target power or a consumption query to a table edge is normal
//! control flow and never produces an error.

use core::fmt;

use crate::{LoraBandwidth, RegulatorMode};

/// Calibration call errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// No loss-compensation band contains the carrier frequency
    FrequencyOutOfRange {
        /// Requested carrier frequency in Hz
        frequency_hz: u32,
    },
    /// The board has no LoRa RX consumption entry for this bandwidth
    UncharacterizedBandwidth(LoraBandwidth),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrequencyOutOfRange { frequency_hz } => {
                write!(f, "no loss-compensation band covers {} Hz", frequency_hz)
            }
            Self::UncharacterizedBandwidth(bw) => {
                write!(f, "no LoRa RX consumption entry for {} Hz bandwidth", bw.hz())
            }
        }
    }
}

impl core::error::Error for Error {}

/// Board profile validation errors
///
/// Indices refer to the position of the offending entry in the table passed to
/// [`BoardProfile::new`](crate::BoardProfile::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfileError {
    /// Power grid is empty, outside the chip range or has a zero step
    InvalidPowerSteps,
    /// Loss-compensation table has no bands
    EmptyLossTable,
    /// Band has `start_hz >= end_hz`
    EmptyBand { index: usize },
    /// Band reaches outside the chip RF range
    BandOutsideChipRange { index: usize },
    /// Band does not start where the previous one ended
    DiscontiguousBands { index: usize },
    /// Ramp policy has no brackets
    EmptyRampPolicy,
    /// First ramp bracket starts above the lowest power step
    RampPolicyGap,
    /// Ramp bracket thresholds are not strictly ascending
    UnsortedRampPolicy { index: usize },
    /// CAD detection peak outside the chip's valid range
    CadThresholdOutOfRange { index: usize },
    /// Same (SF, BW, symbols) key appears twice in the CAD table
    DuplicateCadEntry { index: usize },
    /// No TX consumption samples for a regulator mode
    EmptyTxConsumption(RegulatorMode),
    /// TX consumption sample powers are not strictly ascending
    UnsortedTxConsumption { mode: RegulatorMode, index: usize },
    /// TX consumption sample outside the chip power range
    TxSampleOutOfRange { mode: RegulatorMode, index: usize },
    /// LoRa RX entry for a bandwidth the chip does not support
    UnsupportedLoraRxBandwidth { index: usize },
    /// Same bandwidth appears twice in the LoRa RX table
    DuplicateLoraRxEntry { index: usize },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPowerSteps => f.write_str("invalid power step grid"),
            Self::EmptyLossTable => f.write_str("loss-compensation table is empty"),
            Self::EmptyBand { index } => write!(f, "band {} is empty", index),
            Self::BandOutsideChipRange { index } => {
                write!(f, "band {} is outside the chip RF range", index)
            }
            Self::DiscontiguousBands { index } => {
                write!(f, "band {} does not continue the previous band", index)
            }
            Self::EmptyRampPolicy => f.write_str("ramp policy is empty"),
            Self::RampPolicyGap => {
                f.write_str("ramp policy does not cover the lowest power step")
            }
            Self::UnsortedRampPolicy { index } => {
                write!(f, "ramp bracket {} is not ascending", index)
            }
            Self::CadThresholdOutOfRange { index } => {
                write!(f, "CAD entry {} has an invalid detection peak", index)
            }
            Self::DuplicateCadEntry { index } => write!(f, "CAD entry {} is a duplicate", index),
            Self::EmptyTxConsumption(mode) => {
                write!(f, "no TX consumption samples for {:?}", mode)
            }
            Self::UnsortedTxConsumption { mode, index } => {
                write!(f, "{:?} TX consumption sample {} is not ascending", mode, index)
            }
            Self::TxSampleOutOfRange { mode, index } => {
                write!(f, "{:?} TX consumption sample {} is outside the chip power range", mode, index)
            }
            Self::UnsupportedLoraRxBandwidth { index } => {
                write!(f, "LoRa RX entry {} uses a bandwidth the chip does not support", index)
            }
            Self::DuplicateLoraRxEntry { index } => {
                write!(f, "LoRa RX entry {} is a duplicate", index)
            }
        }
    }
}

impl core::error::Error for ProfileError {}
