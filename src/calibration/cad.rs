//! CAD detection peak advisory

use crate::{BoardProfile, CadSymbols, LoraBandwidth, SpreadingFactor};

/// Returns the CAD detection peak threshold to program.
///
/// `proposed` is the generic value suggested by the radio abstraction layer.
/// If the board characterized this (SF, BW, symbols) combination, the board
/// value replaces it; otherwise `proposed` is returned unchanged.
pub fn get_lora_cad_det_peak(
    profile: &BoardProfile<'_>,
    spreading_factor: SpreadingFactor,
    bandwidth: LoraBandwidth,
    symbols: CadSymbols,
    proposed: u8,
) -> u8 {
    match profile
        .cad_tuning()
        .iter()
        .find(|entry| entry.matches(spreading_factor, bandwidth, symbols))
    {
        Some(entry) => {
            #[cfg(feature = "defmt")]
            defmt::trace!(
                "CAD {} {} {}: det peak {=u8} -> {=u8}",
                spreading_factor,
                bandwidth,
                symbols,
                proposed,
                entry.det_peak
            );
            entry.det_peak
        }
        None => proposed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        BoardProfileConfig, CadTuning, ConsumptionTables, LossBand, PerRegulator, PowerSample,
        PowerSteps, RampBracket, RampTime, RegulatorMode, RxCurrents,
    };

    const RX: RxCurrents = RxCurrents {
        normal_ua: 5_000,
        boosted_ua: 5_500,
    };

    const TUNING: &[CadTuning] = &[
        CadTuning {
            spreading_factor: SpreadingFactor::Sf7,
            bandwidth: LoraBandwidth::Bw800k,
            symbols: CadSymbols::Four,
            det_peak: 22,
        },
        CadTuning {
            spreading_factor: SpreadingFactor::Sf12,
            bandwidth: LoraBandwidth::Bw200k,
            symbols: CadSymbols::Eight,
            det_peak: 31,
        },
    ];

    fn profile() -> BoardProfile<'static> {
        BoardProfile::new(BoardProfileConfig {
            regulator_mode: RegulatorMode::Ldo,
            tx_power_offset_db: 0,
            power_steps: PowerSteps::CHIP,
            loss_bands: &[LossBand {
                start_hz: 2_400_000_000,
                end_hz: 2_500_000_001,
                compensation_tenth_db: 0,
            }],
            ramp_policy: &[RampBracket {
                min_power_dbm: -18,
                ramp_time: RampTime::Micros20,
            }],
            cad_tuning: TUNING,
            consumption: ConsumptionTables {
                tx: PerRegulator {
                    ldo: &[PowerSample {
                        power_dbm: 0,
                        current_ua: 10_000,
                    }],
                    dcdc: &[PowerSample {
                        power_dbm: 0,
                        current_ua: 6_000,
                    }],
                },
                gfsk_rx: PerRegulator { ldo: RX, dcdc: RX },
                lora_rx: &[],
            },
        })
        .unwrap()
    }

    #[test]
    fn board_value_overrides_proposal() {
        let profile = profile();
        assert_eq!(
            get_lora_cad_det_peak(
                &profile,
                SpreadingFactor::Sf7,
                LoraBandwidth::Bw800k,
                CadSymbols::Four,
                18
            ),
            22
        );
        assert_eq!(
            get_lora_cad_det_peak(
                &profile,
                SpreadingFactor::Sf12,
                LoraBandwidth::Bw200k,
                CadSymbols::Eight,
                0
            ),
            31
        );
    }

    #[test]
    fn partial_key_match_passes_through() {
        let profile = profile();
        // same SF and BW as an entry, different symbol count
        assert_eq!(
            get_lora_cad_det_peak(
                &profile,
                SpreadingFactor::Sf7,
                LoraBandwidth::Bw800k,
                CadSymbols::Two,
                18
            ),
            18
        );
        assert_eq!(
            get_lora_cad_det_peak(
                &profile,
                SpreadingFactor::Sf9,
                LoraBandwidth::Bw125k,
                CadSymbols::Four,
                0
            ),
            0
        );
    }
}
