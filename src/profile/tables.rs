//! Board characterization tables
//!
//! All tables are plain `Copy` records meant to be declared as `static` or
//! `const` slices by the board integrator and borrowed by a
//! [`BoardProfile`](super::BoardProfile).

use crate::{CadSymbols, LoraBandwidth, RampTime, RegulatorMode, SpreadingFactor};

/// Discrete chip-referred output power grid used by the board
///
/// Valid powers are `min_dbm + k * step_db` for every `k` that keeps the value
/// at or below `max_dbm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerSteps {
    /// Lowest chip output power in dBm
    pub min_dbm: i8,
    /// Highest chip output power in dBm the board may use
    pub max_dbm: i8,
    /// Grid spacing in dB
    pub step_db: u8,
}

impl PowerSteps {
    /// The full 1 dB grid of the chip, -18 to +13 dBm
    pub const CHIP: Self = Self {
        min_dbm: crate::TX_POWER_MIN_DBM,
        max_dbm: crate::TX_POWER_MAX_DBM,
        step_db: 1,
    };

    /// Highest grid step that does not exceed `max_dbm`
    pub const fn top_dbm(&self) -> i8 {
        let span = self.max_dbm as i16 - self.min_dbm as i16;
        let step = if self.step_db == 0 { 1 } else { self.step_db as i16 };
        (self.min_dbm as i16 + (span / step) * step) as i8
    }

    /// Snap a chip-referred power onto the grid, never rounding up
    ///
    /// Powers outside `min_dbm..=top_dbm()` saturate at the nearest end.
    pub fn snap_down(&self, dbm: i32) -> i8 {
        let min = i32::from(self.min_dbm);
        let clamped = dbm.clamp(min, i32::from(self.top_dbm()));
        let offset = clamped - min;
        (min + offset - offset % i32::from(self.step_db.max(1))) as i8
    }
}

impl Default for PowerSteps {
    fn default() -> Self {
        Self::CHIP
    }
}

/// Frequency band with a fixed chip-to-antenna loss
///
/// The band covers `start_hz..end_hz` (end exclusive). The compensation is the
/// number of tenths of a dB the chip must emit above the wanted antenna power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LossBand {
    pub start_hz: u32,
    pub end_hz: u32,
    pub compensation_tenth_db: i16,
}

impl LossBand {
    pub const fn contains(&self, frequency_hz: u32) -> bool {
        frequency_hz >= self.start_hz && frequency_hz < self.end_hz
    }
}

/// Ramp time used from `min_power_dbm` (chip-referred) up to the next bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampBracket {
    pub min_power_dbm: i8,
    pub ramp_time: RampTime,
}

/// Board-characterized CAD detection peak for one LoRa configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CadTuning {
    pub spreading_factor: SpreadingFactor,
    pub bandwidth: LoraBandwidth,
    pub symbols: CadSymbols,
    pub det_peak: u8,
}

impl CadTuning {
    pub(crate) fn matches(
        &self,
        spreading_factor: SpreadingFactor,
        bandwidth: LoraBandwidth,
        symbols: CadSymbols,
    ) -> bool {
        self.spreading_factor == spreading_factor
            && self.bandwidth == bandwidth
            && self.symbols == symbols
    }
}

/// Measured TX current at one chip output power
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerSample {
    pub power_dbm: i8,
    pub current_ua: u32,
}

/// RX current with and without boosted gain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxCurrents {
    pub normal_ua: u32,
    pub boosted_ua: u32,
}

impl RxCurrents {
    pub const fn select(&self, rx_boosted: bool) -> u32 {
        if rx_boosted {
            self.boosted_ua
        } else {
            self.normal_ua
        }
    }
}

/// A value measured once per regulator topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PerRegulator<T> {
    pub ldo: T,
    pub dcdc: T,
}

impl<T> PerRegulator<T> {
    pub const fn get(&self, mode: RegulatorMode) -> &T {
        match mode {
            RegulatorMode::Ldo => &self.ldo,
            RegulatorMode::DcDc => &self.dcdc,
        }
    }
}

/// LoRa RX currents for one bandwidth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoraRxCurrents {
    pub bandwidth: LoraBandwidth,
    pub currents: PerRegulator<RxCurrents>,
}

/// Current consumption tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumptionTables<'a> {
    /// TX samples, ascending by power
    pub tx: PerRegulator<&'a [PowerSample]>,
    pub gfsk_rx: PerRegulator<RxCurrents>,
    pub lora_rx: &'a [LoraRxCurrents],
}
