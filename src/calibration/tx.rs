//! TX power calibration
//!
//! Converts a wanted antenna power at a carrier frequency into the chip power
//! and ramp time to program, and reports the power that will actually leave
//! the antenna.
//!
//! # Algorithm
//! 1. Find the loss band containing the carrier frequency
//! 2. Add the band compensation and the board offset to the target, giving the
//!    chip-referred target
//! 3. Snap it down onto the board's power grid, saturating at the grid ends
//! 4. Remove the same compensation from the chip power to get the expected
//!    antenna power
//! 5. Pick the ramp time bracket for the chip power
//!
//! Compensation is carried in tenths of a dB; every rounding step goes down so
//! the calibrated output never exceeds what was asked for, except when the
//! target is below the lowest achievable power. At the lowest grid step the
//! expected power rounds up, so a plan clamped there never understates what
//! leaves the antenna.

use bitflags::bitflags;

use crate::{BoardProfile, Error, RampBracket, RampTime, TxParams};

bitflags! {
    /// Adjustments applied while calibrating a TX power request
    ///
    /// An empty set means the expected antenna power equals the target.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PowerAdjustments: u8 {
        /// Target above the highest chip power, saturated at the top step
        const CLAMPED_HIGH = 1 << 0;
        /// Target below the lowest chip power, raised to the bottom step
        const CLAMPED_LOW = 1 << 1;
        /// Chip-referred target fell between grid steps and was rounded down
        const QUANTIZED = 1 << 2;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PowerAdjustments {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PowerAdjustments({=u8:#04x})", self.bits())
    }
}

/// TX power request in board (antenna) terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxPowerRequest {
    /// Wanted output power at the antenna in dBm
    pub target_power_dbm: i8,
    /// Carrier frequency in Hz
    pub frequency_hz: u32,
}

/// Calibrated TX configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxPowerPlan {
    /// PA ramp time to program
    pub ramp_time: RampTime,
    /// Chip output power to program, in dBm
    pub configured_power_dbm: i8,
    /// Power expected at the antenna once board losses are applied, in dBm
    pub expected_power_dbm: i8,
    /// How the request was adjusted to fit the hardware
    pub adjustments: PowerAdjustments,
}

impl TxPowerPlan {
    /// Parameters for the `SetTxParams` command
    pub fn tx_params(&self) -> TxParams {
        TxParams {
            power: self.configured_power_dbm,
            ramp_time: self.ramp_time,
        }
    }

    /// `true` if the target was outside the achievable power range
    pub fn is_clamped(&self) -> bool {
        self.adjustments
            .intersects(PowerAdjustments::CLAMPED_HIGH | PowerAdjustments::CLAMPED_LOW)
    }
}

/// Computes the chip TX configuration for `request`.
///
/// Targets outside the achievable range are clamped, never rejected; the
/// clamp shows in [`TxPowerPlan::expected_power_dbm`] and
/// [`TxPowerPlan::adjustments`].
///
/// # Errors
/// * [`Error::FrequencyOutOfRange`] - no loss band covers the frequency
pub fn get_tx_config(profile: &BoardProfile<'_>, request: TxPowerRequest) -> Result<TxPowerPlan, Error> {
    let Some(band) = profile.band_for(request.frequency_hz) else {
        #[cfg(feature = "defmt")]
        defmt::warn!("no loss band covers {=u32} Hz", request.frequency_hz);
        return Err(Error::FrequencyOutOfRange {
            frequency_hz: request.frequency_hz,
        });
    };

    // tenths of a dB
    let compensation =
        i32::from(band.compensation_tenth_db) + 10 * i32::from(profile.tx_power_offset_db());
    let chip_target = 10 * i32::from(request.target_power_dbm) + compensation;
    let chip_target_dbm = chip_target.div_euclid(10);

    let steps = profile.power_steps();
    let configured = steps.snap_down(chip_target_dbm);

    let mut adjustments = PowerAdjustments::empty();
    if chip_target_dbm > i32::from(steps.top_dbm()) {
        adjustments |= PowerAdjustments::CLAMPED_HIGH;
    } else if chip_target_dbm < i32::from(steps.min_dbm) {
        adjustments |= PowerAdjustments::CLAMPED_LOW;
    } else if 10 * i32::from(configured) != chip_target {
        adjustments |= PowerAdjustments::QUANTIZED;
    }

    let antenna = 10 * i32::from(configured) - compensation;
    let expected = if configured == steps.min_dbm {
        (antenna + 9).div_euclid(10)
    } else {
        antenna.div_euclid(10)
    };
    let expected = expected.clamp(i32::from(i8::MIN), i32::from(i8::MAX)) as i8;

    let plan = TxPowerPlan {
        ramp_time: ramp_time_for(profile.ramp_policy(), configured),
        configured_power_dbm: configured,
        expected_power_dbm: expected,
        adjustments,
    };

    #[cfg(feature = "defmt")]
    {
        if plan.is_clamped() {
            defmt::warn!(
                "TX target {=i8} dBm clamped, expecting {=i8} dBm",
                request.target_power_dbm,
                plan.expected_power_dbm
            );
        }
        defmt::trace!("{} -> {}", request, plan);
    }

    Ok(plan)
}

fn ramp_time_for(policy: &[RampBracket], configured_dbm: i8) -> RampTime {
    // The profile guarantees a non-empty policy starting at the lowest step
    policy
        .iter()
        .take_while(|bracket| bracket.min_power_dbm <= configured_dbm)
        .last()
        .or(policy.first())
        .map_or(RampTime::Micros20, |bracket| bracket.ramp_time)
}
