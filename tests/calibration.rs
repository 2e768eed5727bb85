//! End-to-end calibration scenarios: request in, chip payloads and current
//! estimates out.

use sx128x_bsp::{
    boards, estimate_consumption, get_instantaneous_gfsk_rx_power_consumption,
    get_instantaneous_lora_rx_power_consumption, get_instantaneous_tx_power_consumption,
    get_lora_cad_det_peak, get_regulator_mode, get_tx_config, BoardProfile, BoardProfileConfig,
    CadSymbols, Command, ConsumptionQuery, Error, LoraBandwidth, LossBand, PowerAdjustments,
    RampTime, RegulatorMode, SetCadParams, SetRegulatorMode, SpreadingFactor, ToByteArray,
    TxPowerRequest,
};

const FLAT_2DB: &[LossBand] = &[LossBand {
    start_hz: 2_400_000_000,
    end_hz: 2_500_000_001,
    compensation_tenth_db: 20,
}];

fn flat_2db_board() -> BoardProfile<'static> {
    BoardProfile::new(BoardProfileConfig {
        loss_bands: FLAT_2DB,
        ..boards::SX1280_DEV_BOARD
    })
    .unwrap()
}

fn request(target_power_dbm: i8, frequency_hz: u32) -> TxPowerRequest {
    TxPowerRequest {
        target_power_dbm,
        frequency_hz,
    }
}

#[test]
fn two_db_band_exact_step() {
    let profile = flat_2db_board();
    let plan = get_tx_config(&profile, request(11, 2_450_000_000)).unwrap();
    assert_eq!(plan.configured_power_dbm, 13);
    assert_eq!(plan.expected_power_dbm, 11);
    assert!(plan.adjustments.is_empty());
}

#[test]
fn two_db_band_saturates() {
    let profile = flat_2db_board();
    let plan = get_tx_config(&profile, request(30, 2_450_000_000)).unwrap();
    assert_eq!(plan.configured_power_dbm, 13);
    assert_eq!(plan.expected_power_dbm, 11);
    assert!(plan.expected_power_dbm < 30);
    assert_eq!(plan.adjustments, PowerAdjustments::CLAMPED_HIGH);

    // 12 dBm needs a 14 dBm chip step, one above the chip maximum
    let plan = get_tx_config(&profile, request(12, 2_450_000_000)).unwrap();
    assert_eq!(plan.configured_power_dbm, 13);
    assert_eq!(plan.expected_power_dbm, 11);
    assert!(plan.is_clamped());
}

#[test]
fn reference_board_tx_plans() {
    let profile = boards::sx1280_dev_board().unwrap();

    // lower band, 1.0 dB loss
    let plan = get_tx_config(&profile, request(0, 2_402_000_000)).unwrap();
    assert_eq!(plan.configured_power_dbm, 1);
    assert_eq!(plan.expected_power_dbm, 0);
    assert_eq!(plan.ramp_time, RampTime::Micros10);

    // upper band, 1.3 dB loss: 11.3 dBm at the chip becomes 11
    let plan = get_tx_config(&profile, request(10, 2_480_000_000)).unwrap();
    assert_eq!(plan.configured_power_dbm, 11);
    assert_eq!(plan.expected_power_dbm, 9);
    assert_eq!(plan.ramp_time, RampTime::Micros20);
    assert_eq!(plan.adjustments, PowerAdjustments::QUANTIZED);

    // 2.5 GHz itself is covered by the last band
    assert!(get_tx_config(&profile, request(0, 2_500_000_000)).is_ok());
}

#[test]
fn low_clamp_reports_real_antenna_power() {
    let profile = boards::sx1280_dev_board().unwrap();
    // 1.3 dB loss: -18 dBm at the chip leaves -19.3 dBm at the antenna
    let plan = get_tx_config(&profile, request(-20, 2_480_000_000)).unwrap();
    assert_eq!(plan.configured_power_dbm, -18);
    assert_eq!(plan.adjustments, PowerAdjustments::CLAMPED_LOW);
    assert_eq!(plan.expected_power_dbm, -19);
    assert_ne!(plan.expected_power_dbm, -20);
}

#[test]
fn uncovered_frequency_is_an_error() {
    let profile = boards::sx1280_dev_board().unwrap();
    for frequency_hz in [0, 915_000_000, 2_399_999_999, 2_500_000_001, u32::MAX] {
        let err = get_tx_config(&profile, request(0, frequency_hz)).unwrap_err();
        assert_eq!(err, Error::FrequencyOutOfRange { frequency_hz });
    }
}

#[test]
fn plan_feeds_driver_and_consumption_model() {
    let profile = boards::sx1280_dev_board().unwrap();
    let mode = get_regulator_mode(&profile);
    assert_eq!(mode, RegulatorMode::DcDc);
    assert_eq!(SetRegulatorMode::from(mode).invoking_parameters().to_bytes(), Ok([0x01]));

    let plan = profile.tx_config(request(12, 2_440_000_000)).unwrap();
    assert_eq!(plan.configured_power_dbm, 13);
    assert_eq!(plan.tx_params().to_bytes(), Ok([31, 0xE0]));

    let current = get_instantaneous_tx_power_consumption(&profile, &plan, mode);
    assert_eq!(current, 24_000);
    assert_eq!(profile.consumption_ua(&profile.tx_query(plan)), Ok(24_000));

    // the same plan on an LDO build draws more
    let ldo = get_instantaneous_tx_power_consumption(&profile, &plan, RegulatorMode::Ldo);
    assert_eq!(ldo, 45_000);
}

#[test]
fn tx_consumption_interpolates_reference_table() {
    let profile = boards::sx1280_dev_board().unwrap();
    let plan = get_tx_config(&profile, request(6, 2_440_000_000)).unwrap();
    assert_eq!(plan.configured_power_dbm, 7);
    // DC-DC samples: 5 dBm 11.0 mA, 10 dBm 17.5 mA
    assert_eq!(
        get_instantaneous_tx_power_consumption(&profile, &plan, RegulatorMode::DcDc),
        13_600
    );
}

#[test]
fn rx_consumption_reference_table() {
    let profile = boards::sx1280_dev_board().unwrap();
    assert_eq!(
        get_instantaneous_gfsk_rx_power_consumption(&profile, RegulatorMode::DcDc, false),
        5_300
    );
    assert_eq!(
        get_instantaneous_lora_rx_power_consumption(
            &profile,
            RegulatorMode::DcDc,
            LoraBandwidth::Bw1600k,
            true
        ),
        Ok(7_000)
    );
    assert_eq!(
        estimate_consumption(
            &profile,
            &ConsumptionQuery::LoraRx {
                regulator_mode: RegulatorMode::Ldo,
                bandwidth: LoraBandwidth::Bw500k,
                rx_boosted: false,
            }
        ),
        Err(Error::UncharacterizedBandwidth(LoraBandwidth::Bw500k))
    );
}

#[test]
fn cad_threshold_and_symbols_payload() {
    let profile = boards::sx1280_dev_board().unwrap();
    let peak = get_lora_cad_det_peak(
        &profile,
        SpreadingFactor::Sf9,
        LoraBandwidth::Bw800k,
        CadSymbols::Four,
        20,
    );
    assert_eq!(peak, 26);
    assert_eq!(
        profile.lora_cad_det_peak(
            SpreadingFactor::Sf9,
            LoraBandwidth::Bw1600k,
            CadSymbols::Four,
            20
        ),
        20
    );

    let cmd = SetCadParams {
        symbols: CadSymbols::Four,
    };
    assert_eq!(cmd.invoking_parameters().to_bytes(), Ok([0x40]));
}

#[test]
fn profile_is_shared_across_threads() {
    fn assert_sync<T: Sync + Send>(_: &T) {}

    let profile = boards::sx1280_dev_board().unwrap();
    assert_sync(&profile);

    let expected = get_tx_config(&profile, request(8, 2_426_000_000)).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| get_tx_config(&profile, request(8, 2_426_000_000))))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(expected));
        }
    });
}

#[test]
fn errors_display() {
    assert_eq!(
        Error::FrequencyOutOfRange {
            frequency_hz: 868_000_000
        }
        .to_string(),
        "no loss-compensation band covers 868000000 Hz"
    );
    assert_eq!(
        Error::UncharacterizedBandwidth(LoraBandwidth::Bw125k).to_string(),
        "no LoRa RX consumption entry for 125000 Hz bandwidth"
    );
}
