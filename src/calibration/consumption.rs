//! Instantaneous current consumption model
//!
//! Estimates the supply current, in microamps, drawn by the radio for a fully
//! resolved TX or RX configuration. The MAC layer uses the estimates for
//! energy budgeting; they are never fed back into calibration.
//!
//! # Lookup rules
//! - TX: samples per regulator mode, linearly interpolated on the configured
//!   chip power. Powers outside the sampled range take the value of the
//!   nearest extreme sample; the model never extrapolates.
//! - GFSK RX: one value per regulator mode and gain setting.
//! - LoRa RX: one value per bandwidth, regulator mode and gain setting. A
//!   bandwidth the board did not characterize is an error.

use crate::{BoardProfile, Error, LoraBandwidth, PowerSample, RegulatorMode, TxPowerPlan};

/// Radio configuration to estimate the current for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsumptionQuery {
    /// Transmitting with a calibrated plan
    Tx {
        plan: TxPowerPlan,
        regulator_mode: RegulatorMode,
    },
    /// Receiving GFSK
    GfskRx {
        regulator_mode: RegulatorMode,
        rx_boosted: bool,
    },
    /// Receiving LoRa
    LoraRx {
        regulator_mode: RegulatorMode,
        bandwidth: LoraBandwidth,
        rx_boosted: bool,
    },
}

/// Estimates the instantaneous current for `query`, in microamps.
///
/// # Errors
/// * [`Error::UncharacterizedBandwidth`] - LoRa RX bandwidth missing from the
///   board tables
pub fn estimate_consumption(profile: &BoardProfile<'_>, query: &ConsumptionQuery) -> Result<u32, Error> {
    match *query {
        ConsumptionQuery::Tx {
            plan,
            regulator_mode,
        } => Ok(get_instantaneous_tx_power_consumption(
            profile,
            &plan,
            regulator_mode,
        )),
        ConsumptionQuery::GfskRx {
            regulator_mode,
            rx_boosted,
        } => Ok(get_instantaneous_gfsk_rx_power_consumption(
            profile,
            regulator_mode,
            rx_boosted,
        )),
        ConsumptionQuery::LoraRx {
            regulator_mode,
            bandwidth,
            rx_boosted,
        } => get_instantaneous_lora_rx_power_consumption(
            profile,
            regulator_mode,
            bandwidth,
            rx_boosted,
        ),
    }
}

/// Current drawn while transmitting with `plan`, in microamps
pub fn get_instantaneous_tx_power_consumption(
    profile: &BoardProfile<'_>,
    plan: &TxPowerPlan,
    regulator_mode: RegulatorMode,
) -> u32 {
    let current_ua = interpolate(
        profile.consumption().tx.get(regulator_mode),
        plan.configured_power_dbm,
    );

    #[cfg(feature = "defmt")]
    defmt::trace!(
        "TX {=i8} dBm {}: {=u32} uA",
        plan.configured_power_dbm,
        regulator_mode,
        current_ua
    );

    current_ua
}

/// Current drawn while receiving GFSK, in microamps
pub fn get_instantaneous_gfsk_rx_power_consumption(
    profile: &BoardProfile<'_>,
    regulator_mode: RegulatorMode,
    rx_boosted: bool,
) -> u32 {
    let current_ua = profile
        .consumption()
        .gfsk_rx
        .get(regulator_mode)
        .select(rx_boosted);

    #[cfg(feature = "defmt")]
    defmt::trace!(
        "GFSK RX {} boosted={=bool}: {=u32} uA",
        regulator_mode,
        rx_boosted,
        current_ua
    );

    current_ua
}

/// Current drawn while receiving LoRa, in microamps
///
/// # Errors
/// * [`Error::UncharacterizedBandwidth`] - `bandwidth` missing from the board
///   tables
pub fn get_instantaneous_lora_rx_power_consumption(
    profile: &BoardProfile<'_>,
    regulator_mode: RegulatorMode,
    bandwidth: LoraBandwidth,
    rx_boosted: bool,
) -> Result<u32, Error> {
    let Some(entry) = profile
        .consumption()
        .lora_rx
        .iter()
        .find(|entry| entry.bandwidth == bandwidth)
    else {
        #[cfg(feature = "defmt")]
        defmt::warn!("no LoRa RX consumption entry for {}", bandwidth);
        return Err(Error::UncharacterizedBandwidth(bandwidth));
    };
    let current_ua = entry.currents.get(regulator_mode).select(rx_boosted);

    #[cfg(feature = "defmt")]
    defmt::trace!(
        "LoRa RX {} {} boosted={=bool}: {=u32} uA",
        bandwidth,
        regulator_mode,
        rx_boosted,
        current_ua
    );

    Ok(current_ua)
}

/// Piecewise-linear lookup, clamped to the first and last sample
///
/// `samples` must be non-empty and strictly ascending by power, which
/// [`BoardProfile::new`] enforces.
fn interpolate(samples: &[PowerSample], power_dbm: i8) -> u32 {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return 0;
    };
    if power_dbm <= first.power_dbm {
        return first.current_ua;
    }
    if power_dbm >= last.power_dbm {
        return last.current_ua;
    }

    for pair in samples.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if power_dbm > hi.power_dbm {
            continue;
        }
        let span = i64::from(hi.power_dbm) - i64::from(lo.power_dbm);
        let offset = i64::from(power_dbm) - i64::from(lo.power_dbm);
        let delta = i64::from(hi.current_ua) - i64::from(lo.current_ua);
        // truncates toward lo, so the result stays between the two samples
        return (i64::from(lo.current_ua) + delta * offset / span) as u32;
    }
    last.current_ua
}
