//! RF and modulation types for the SX128x
//!
//! This module contains the chip-level values the calibration layer produces or
//! keys its tables on:
//! - TX output power range and PA ramp times
//! - The `SetTxParams` command the driver writes after calibration
//! - LoRa spreading factors and bandwidths
//! - CAD symbol count and the `SetCadParams` command
//!
//! Encodings follow the SX1280/SX1281 datasheet. The actual SPI transfer is the
//! job of the driver; these types only describe the payloads.

use core::convert::Infallible;
use core::ops::RangeInclusive;

use crate::{Command, NoParameters, ToByteArray};

/// Lowest output power the chip can be configured to, in dBm
pub const TX_POWER_MIN_DBM: i8 = -18;

/// Highest output power the chip can be configured to, in dBm
pub const TX_POWER_MAX_DBM: i8 = 13;

/// Lowest carrier frequency supported by the chip, in Hz
pub const RF_FREQUENCY_MIN_HZ: u32 = 2_400_000_000;

/// Highest carrier frequency supported by the chip, in Hz
pub const RF_FREQUENCY_MAX_HZ: u32 = 2_500_000_000;

/// Valid range for the LoRa CAD detection peak threshold
///
/// A threshold of zero would report activity on every CAD.
pub const CAD_DET_PEAK_RANGE: RangeInclusive<u8> = 1..=u8::MAX;

/// Power amplifier ramp time options
///
/// Discriminants are the register codes used by `SetTxParams`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampTime {
    /// 2 μs ramp time
    Micros2 = 0x00,
    /// 4 μs ramp time
    Micros4 = 0x20,
    /// 6 μs ramp time
    Micros6 = 0x40,
    /// 8 μs ramp time
    Micros8 = 0x60,
    /// 10 μs ramp time
    Micros10 = 0x80,
    /// 12 μs ramp time
    Micros12 = 0xA0,
    /// 16 μs ramp time
    Micros16 = 0xC0,
    /// 20 μs ramp time
    Micros20 = 0xE0,
}

impl RampTime {
    /// Ramp duration in microseconds
    pub const fn as_micros(self) -> u16 {
        match self {
            Self::Micros2 => 2,
            Self::Micros4 => 4,
            Self::Micros6 => 6,
            Self::Micros8 => 8,
            Self::Micros10 => 10,
            Self::Micros12 => 12,
            Self::Micros16 => 16,
            Self::Micros20 => 20,
        }
    }
}

/// TX parameters configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxParams {
    /// Chip output power in dBm, -18 to +13 dBm
    ///
    /// Sent to the chip as `power + 18`.
    pub power: i8,

    /// Power amplifier ramp time
    pub ramp_time: RampTime,
}

impl ToByteArray for TxParams {
    type Error = Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        let power = self.power.clamp(TX_POWER_MIN_DBM, TX_POWER_MAX_DBM) - TX_POWER_MIN_DBM;
        Ok([power as u8, self.ramp_time as u8])
    }
}

/// SetTxParams command (0x8E)
///
/// Sets the TX output power and PA ramp time.
///
/// # Important Notes
/// - Power is set in 1dB steps
/// - Values coming out of the calibration layer are always in range
#[derive(Debug, Clone)]
pub struct SetTxParams {
    /// TX parameters configuration
    pub params: TxParams,
}

impl Command for SetTxParams {
    type IdType = u8;
    type CommandParameters = TxParams;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x8E
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.params
    }
}

/// LoRa spreading factor
///
/// Discriminants are the SX128x modulation parameter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpreadingFactor {
    Sf5 = 0x50,
    Sf6 = 0x60,
    Sf7 = 0x70,
    Sf8 = 0x80,
    Sf9 = 0x90,
    Sf10 = 0xA0,
    Sf11 = 0xB0,
    Sf12 = 0xC0,
}

/// LoRa bandwidth as exposed by the radio abstraction layer
///
/// The abstraction layer is shared with sub-GHz radios, so it names bandwidths
/// this chip cannot use. Only the four 2.4 GHz bandwidths are supported by the
/// SX128x; see [`LoraBandwidth::is_supported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoraBandwidth {
    Bw7k8,
    Bw10k4,
    Bw15k6,
    Bw20k8,
    Bw31k25,
    Bw41k7,
    Bw62k5,
    Bw125k,
    Bw250k,
    Bw500k,
    /// 203.125 kHz
    Bw200k,
    /// 406.25 kHz
    Bw400k,
    /// 812.5 kHz
    Bw800k,
    /// 1625 kHz
    Bw1600k,
}

impl LoraBandwidth {
    /// Bandwidth in Hz, rounded down for the fractional ones
    pub const fn hz(self) -> u32 {
        match self {
            Self::Bw7k8 => 7_812,
            Self::Bw10k4 => 10_416,
            Self::Bw15k6 => 15_625,
            Self::Bw20k8 => 20_833,
            Self::Bw31k25 => 31_250,
            Self::Bw41k7 => 41_666,
            Self::Bw62k5 => 62_500,
            Self::Bw125k => 125_000,
            Self::Bw250k => 250_000,
            Self::Bw500k => 500_000,
            Self::Bw200k => 203_125,
            Self::Bw400k => 406_250,
            Self::Bw800k => 812_500,
            Self::Bw1600k => 1_625_000,
        }
    }

    /// SX128x modulation parameter code, if the chip supports this bandwidth
    pub const fn code(self) -> Option<u8> {
        match self {
            Self::Bw200k => Some(0x34),
            Self::Bw400k => Some(0x26),
            Self::Bw800k => Some(0x18),
            Self::Bw1600k => Some(0x0A),
            _ => None,
        }
    }

    pub const fn is_supported(self) -> bool {
        self.code().is_some()
    }
}

/// Number of symbols used for one Channel Activity Detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CadSymbols {
    /// 1 symbol (0x00)
    One = 0x00,
    /// 2 symbols (0x20)
    Two = 0x20,
    /// 4 symbols (0x40)
    Four = 0x40,
    /// 8 symbols (0x60)
    Eight = 0x60,
    /// 16 symbols (0x80)
    Sixteen = 0x80,
}

impl CadSymbols {
    pub const fn count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
            Self::Sixteen => 16,
        }
    }
}

impl ToByteArray for CadSymbols {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self as u8])
    }
}

/// SetCadParams command (0x88)
///
/// Sets the number of symbols on which a CAD operates. The detection peak
/// threshold itself comes from [`get_lora_cad_det_peak`](crate::get_lora_cad_det_peak).
#[derive(Debug, Clone)]
pub struct SetCadParams {
    /// Number of CAD symbols
    pub symbols: CadSymbols,
}

impl Command for SetCadParams {
    type IdType = u8;
    type CommandParameters = CadSymbols;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x88
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_params_payload_offsets_power() {
        let params = TxParams {
            power: 13,
            ramp_time: RampTime::Micros20,
        };
        assert_eq!(params.to_bytes(), Ok([31, 0xE0]));

        let params = TxParams {
            power: -18,
            ramp_time: RampTime::Micros2,
        };
        assert_eq!(params.to_bytes(), Ok([0, 0x00]));
    }

    #[test]
    fn set_tx_params_opcode() {
        assert_eq!(SetTxParams::id(), 0x8E);
        let cmd = SetTxParams {
            params: TxParams {
                power: 0,
                ramp_time: RampTime::Micros10,
            },
        };
        assert_eq!(cmd.invoking_parameters().to_bytes(), Ok([18, 0x80]));
    }

    #[test]
    fn cad_params_payload() {
        assert_eq!(SetCadParams::id(), 0x88);
        let cmd = SetCadParams {
            symbols: CadSymbols::Eight,
        };
        assert_eq!(cmd.invoking_parameters().to_bytes(), Ok([0x60]));
        assert_eq!(CadSymbols::Sixteen.count(), 16);
    }

    #[test]
    fn only_2g4_bandwidths_supported() {
        assert!(LoraBandwidth::Bw200k.is_supported());
        assert!(LoraBandwidth::Bw1600k.is_supported());
        assert!(!LoraBandwidth::Bw125k.is_supported());
        assert!(!LoraBandwidth::Bw500k.is_supported());
        assert_eq!(LoraBandwidth::Bw800k.code(), Some(0x18));
        assert_eq!(LoraBandwidth::Bw400k.hz(), 406_250);
    }

    #[test]
    fn ramp_times_ordered_by_duration() {
        assert!(RampTime::Micros2 < RampTime::Micros20);
        assert_eq!(RampTime::Micros16.as_micros(), 16);
    }
}
