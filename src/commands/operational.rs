//! Operational mode types
//!
//! The only operational setting the calibration layer owns is the voltage
//! regulator topology the board is wired for. It feeds both the
//! `SetRegulatorMode` command and the current-consumption tables.

use core::convert::Infallible;

use crate::{Command, NoParameters, ToByteArray};

/// Regulator mode configuration
///
/// Selects voltage regulator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegulatorMode {
    /// Linear regulator (LDO) only
    /// - No external inductor needed
    /// - Higher current consumption
    Ldo = 0,

    /// Switched DC-DC converter
    /// - Requires external inductor
    /// - Roughly halves current in RX and TX
    DcDc = 1,
}

impl ToByteArray for RegulatorMode {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self as u8])
    }
}

/// SetRegulatorMode command (0x96)
///
/// Configures the voltage regulator mode.
///
/// # Important Notes
/// - Must be configured in STDBY_RC mode
/// - The mode must match the board wiring reported by
///   [`get_regulator_mode`](crate::get_regulator_mode)
#[derive(Debug, Clone)]
pub struct SetRegulatorMode {
    /// Regulator mode selection
    pub mode: RegulatorMode,
}

impl Command for SetRegulatorMode {
    type IdType = u8;
    type CommandParameters = RegulatorMode;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x96
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.mode
    }
}

impl From<RegulatorMode> for SetRegulatorMode {
    fn from(mode: RegulatorMode) -> Self {
        Self { mode }
    }
}
