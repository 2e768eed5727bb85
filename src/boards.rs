//! Reference board profiles
//!
//! Characterization of a Semtech SX1280 development board with the on-board
//! chip antenna, DC-DC inductor fitted. Integrators with their own hardware
//! should build a [`BoardProfileConfig`] from their measurements instead.

use crate::{
    BoardProfile, BoardProfileConfig, CadSymbols, CadTuning, ConsumptionTables, LoraBandwidth,
    LoraRxCurrents, LossBand, PerRegulator, PowerSample, PowerSteps, ProfileError, RampBracket,
    RampTime, RegulatorMode, RxCurrents, SpreadingFactor,
};

const LOSS_BANDS: &[LossBand] = &[
    LossBand {
        start_hz: 2_400_000_000,
        end_hz: 2_450_000_000,
        compensation_tenth_db: 10,
    },
    LossBand {
        start_hz: 2_450_000_000,
        end_hz: 2_500_000_001,
        compensation_tenth_db: 13,
    },
];

const RAMP_POLICY: &[RampBracket] = &[
    RampBracket {
        min_power_dbm: -18,
        ramp_time: RampTime::Micros10,
    },
    RampBracket {
        min_power_dbm: 6,
        ramp_time: RampTime::Micros20,
    },
];

const CAD_TUNING: &[CadTuning] = &[
    CadTuning {
        spreading_factor: SpreadingFactor::Sf7,
        bandwidth: LoraBandwidth::Bw800k,
        symbols: CadSymbols::Four,
        det_peak: 24,
    },
    CadTuning {
        spreading_factor: SpreadingFactor::Sf9,
        bandwidth: LoraBandwidth::Bw800k,
        symbols: CadSymbols::Four,
        det_peak: 26,
    },
    CadTuning {
        spreading_factor: SpreadingFactor::Sf12,
        bandwidth: LoraBandwidth::Bw200k,
        symbols: CadSymbols::Eight,
        det_peak: 30,
    },
];

const TX_LDO: &[PowerSample] = &[
    PowerSample {
        power_dbm: -18,
        current_ua: 11_000,
    },
    PowerSample {
        power_dbm: -10,
        current_ua: 12_300,
    },
    PowerSample {
        power_dbm: 0,
        current_ua: 15_800,
    },
    PowerSample {
        power_dbm: 5,
        current_ua: 20_200,
    },
    PowerSample {
        power_dbm: 10,
        current_ua: 32_000,
    },
    PowerSample {
        power_dbm: 13,
        current_ua: 45_000,
    },
];

const TX_DCDC: &[PowerSample] = &[
    PowerSample {
        power_dbm: -18,
        current_ua: 5_800,
    },
    PowerSample {
        power_dbm: -10,
        current_ua: 6_500,
    },
    PowerSample {
        power_dbm: 0,
        current_ua: 8_200,
    },
    PowerSample {
        power_dbm: 5,
        current_ua: 11_000,
    },
    PowerSample {
        power_dbm: 10,
        current_ua: 17_500,
    },
    PowerSample {
        power_dbm: 13,
        current_ua: 24_000,
    },
];

const fn lora_rx(
    bandwidth: LoraBandwidth,
    ldo_ua: u32,
    dcdc_ua: u32,
    boost_ua: u32,
) -> LoraRxCurrents {
    LoraRxCurrents {
        bandwidth,
        currents: PerRegulator {
            ldo: RxCurrents {
                normal_ua: ldo_ua,
                boosted_ua: ldo_ua + boost_ua,
            },
            dcdc: RxCurrents {
                normal_ua: dcdc_ua,
                boosted_ua: dcdc_ua + boost_ua,
            },
        },
    }
}

const LORA_RX: &[LoraRxCurrents] = &[
    lora_rx(LoraBandwidth::Bw200k, 9_800, 4_800, 500),
    lora_rx(LoraBandwidth::Bw400k, 10_100, 5_000, 550),
    lora_rx(LoraBandwidth::Bw800k, 10_700, 5_500, 650),
    lora_rx(LoraBandwidth::Bw1600k, 12_000, 6_200, 800),
];

/// Configuration of the SX1280 development board
pub const SX1280_DEV_BOARD: BoardProfileConfig<'static> = BoardProfileConfig {
    regulator_mode: RegulatorMode::DcDc,
    tx_power_offset_db: 0,
    power_steps: PowerSteps::CHIP,
    loss_bands: LOSS_BANDS,
    ramp_policy: RAMP_POLICY,
    cad_tuning: CAD_TUNING,
    consumption: ConsumptionTables {
        tx: PerRegulator {
            ldo: TX_LDO,
            dcdc: TX_DCDC,
        },
        gfsk_rx: PerRegulator {
            ldo: RxCurrents {
                normal_ua: 10_000,
                boosted_ua: 11_000,
            },
            dcdc: RxCurrents {
                normal_ua: 5_300,
                boosted_ua: 5_800,
            },
        },
        lora_rx: LORA_RX,
    },
};

/// Validated profile of the SX1280 development board
pub fn sx1280_dev_board() -> Result<BoardProfile<'static>, ProfileError> {
    BoardProfile::new(SX1280_DEV_BOARD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_is_valid() {
        let profile = sx1280_dev_board().unwrap();
        assert_eq!(profile.regulator_mode(), RegulatorMode::DcDc);
        assert_eq!(profile.loss_bands().len(), 2);
    }

    #[test]
    fn every_chip_bandwidth_is_characterized() {
        for bw in [
            LoraBandwidth::Bw200k,
            LoraBandwidth::Bw400k,
            LoraBandwidth::Bw800k,
            LoraBandwidth::Bw1600k,
        ] {
            assert!(LORA_RX.iter().any(|entry| entry.bandwidth == bw));
        }
    }
}
