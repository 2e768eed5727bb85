//! Board profile
//!
//! A [`BoardProfile`] is the hardware-characterized dataset every calibration
//! function reads: regulator wiring, chip-to-antenna losses, PA ramp policy,
//! CAD tuning and current consumption. It is built once at board bring-up from
//! a [`BoardProfileConfig`], validated, and only borrowed afterwards.
//!
//! # Validation
//! [`BoardProfile::new`] rejects tables that cannot describe real hardware:
//! - Power grid outside -18..=13 dBm or with a zero step
//! - Loss bands that are empty, leave the 2.4 GHz range, overlap or leave gaps
//! - Ramp policy that is empty, unsorted or does not reach the lowest power
//! - CAD thresholds outside the valid range or duplicate CAD keys
//! - Empty, unsorted or out-of-range TX consumption samples
//! - LoRa RX entries for unsupported or duplicate bandwidths
//!
//! Once built, calibration calls can only fail for inputs the profile does not
//! cover (see [`Error`](crate::Error)).

mod tables;

pub use tables::*;

use crate::{
    ProfileError, RegulatorMode, CAD_DET_PEAK_RANGE, RF_FREQUENCY_MAX_HZ, RF_FREQUENCY_MIN_HZ,
    TX_POWER_MAX_DBM, TX_POWER_MIN_DBM,
};

/// Raw board description, validated by [`BoardProfile::new`]
#[derive(Debug, Clone, Copy)]
pub struct BoardProfileConfig<'a> {
    /// Regulator topology the board is wired for
    pub regulator_mode: RegulatorMode,
    /// Offset in dB added to every requested TX power, on top of band losses
    pub tx_power_offset_db: i8,
    /// Chip power grid the board uses
    pub power_steps: PowerSteps,
    /// Contiguous loss-compensation bands, ascending
    pub loss_bands: &'a [LossBand],
    /// Ramp time brackets, ascending by power
    pub ramp_policy: &'a [RampBracket],
    /// Board-specific CAD detection peaks
    pub cad_tuning: &'a [CadTuning],
    /// Current consumption tables
    pub consumption: ConsumptionTables<'a>,
}

/// Validated, immutable board profile
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardProfile<'a> {
    regulator_mode: RegulatorMode,
    tx_power_offset_db: i8,
    power_steps: PowerSteps,
    loss_bands: &'a [LossBand],
    ramp_policy: &'a [RampBracket],
    cad_tuning: &'a [CadTuning],
    consumption: ConsumptionTables<'a>,
}

impl<'a> BoardProfile<'a> {
    /// Validates `config` and builds the profile.
    ///
    /// # Errors
    /// The first table defect found, see [`ProfileError`].
    pub fn new(config: BoardProfileConfig<'a>) -> Result<Self, ProfileError> {
        validate_power_steps(&config.power_steps)?;
        validate_loss_bands(config.loss_bands)?;
        validate_ramp_policy(config.ramp_policy, &config.power_steps)?;
        validate_cad_tuning(config.cad_tuning)?;
        validate_consumption(&config.consumption)?;

        Ok(Self {
            regulator_mode: config.regulator_mode,
            tx_power_offset_db: config.tx_power_offset_db,
            power_steps: config.power_steps,
            loss_bands: config.loss_bands,
            ramp_policy: config.ramp_policy,
            cad_tuning: config.cad_tuning,
            consumption: config.consumption,
        })
    }

    pub fn regulator_mode(&self) -> RegulatorMode {
        self.regulator_mode
    }

    pub fn tx_power_offset_db(&self) -> i8 {
        self.tx_power_offset_db
    }

    pub fn power_steps(&self) -> &PowerSteps {
        &self.power_steps
    }

    pub fn loss_bands(&self) -> &'a [LossBand] {
        self.loss_bands
    }

    pub fn ramp_policy(&self) -> &'a [RampBracket] {
        self.ramp_policy
    }

    pub fn cad_tuning(&self) -> &'a [CadTuning] {
        self.cad_tuning
    }

    pub fn consumption(&self) -> &ConsumptionTables<'a> {
        &self.consumption
    }

    /// Band containing `frequency_hz`, if any
    pub fn band_for(&self, frequency_hz: u32) -> Option<&'a LossBand> {
        self.loss_bands.iter().find(|band| band.contains(frequency_hz))
    }
}

fn validate_power_steps(steps: &PowerSteps) -> Result<(), ProfileError> {
    if steps.step_db == 0
        || steps.min_dbm > steps.max_dbm
        || steps.min_dbm < TX_POWER_MIN_DBM
        || steps.max_dbm > TX_POWER_MAX_DBM
    {
        return Err(ProfileError::InvalidPowerSteps);
    }
    Ok(())
}

fn validate_loss_bands(bands: &[LossBand]) -> Result<(), ProfileError> {
    if bands.is_empty() {
        return Err(ProfileError::EmptyLossTable);
    }

    for (index, band) in bands.iter().enumerate() {
        if band.start_hz >= band.end_hz {
            return Err(ProfileError::EmptyBand { index });
        }
        // end is exclusive, so the last band may end one past the chip maximum
        if band.start_hz < RF_FREQUENCY_MIN_HZ || band.end_hz > RF_FREQUENCY_MAX_HZ + 1 {
            return Err(ProfileError::BandOutsideChipRange { index });
        }
        if index > 0 && bands[index - 1].end_hz != band.start_hz {
            return Err(ProfileError::DiscontiguousBands { index });
        }
    }
    Ok(())
}

fn validate_ramp_policy(policy: &[RampBracket], steps: &PowerSteps) -> Result<(), ProfileError> {
    let first = policy.first().ok_or(ProfileError::EmptyRampPolicy)?;
    if first.min_power_dbm > steps.min_dbm {
        return Err(ProfileError::RampPolicyGap);
    }

    for (index, pair) in policy.windows(2).enumerate() {
        if pair[0].min_power_dbm >= pair[1].min_power_dbm {
            return Err(ProfileError::UnsortedRampPolicy { index: index + 1 });
        }
    }
    Ok(())
}

fn validate_cad_tuning(tuning: &[CadTuning]) -> Result<(), ProfileError> {
    for (index, entry) in tuning.iter().enumerate() {
        if !CAD_DET_PEAK_RANGE.contains(&entry.det_peak) {
            return Err(ProfileError::CadThresholdOutOfRange { index });
        }
        if tuning[..index]
            .iter()
            .any(|prev| prev.matches(entry.spreading_factor, entry.bandwidth, entry.symbols))
        {
            return Err(ProfileError::DuplicateCadEntry { index });
        }
    }
    Ok(())
}

fn validate_tx_samples(mode: RegulatorMode, samples: &[PowerSample]) -> Result<(), ProfileError> {
    if samples.is_empty() {
        return Err(ProfileError::EmptyTxConsumption(mode));
    }

    for (index, sample) in samples.iter().enumerate() {
        if !(TX_POWER_MIN_DBM..=TX_POWER_MAX_DBM).contains(&sample.power_dbm) {
            return Err(ProfileError::TxSampleOutOfRange { mode, index });
        }
        if index > 0 && samples[index - 1].power_dbm >= sample.power_dbm {
            return Err(ProfileError::UnsortedTxConsumption { mode, index });
        }
    }
    Ok(())
}

fn validate_consumption(tables: &ConsumptionTables<'_>) -> Result<(), ProfileError> {
    validate_tx_samples(RegulatorMode::Ldo, tables.tx.ldo)?;
    validate_tx_samples(RegulatorMode::DcDc, tables.tx.dcdc)?;

    for (index, entry) in tables.lora_rx.iter().enumerate() {
        if !entry.bandwidth.is_supported() {
            return Err(ProfileError::UnsupportedLoraRxBandwidth { index });
        }
        if tables.lora_rx[..index]
            .iter()
            .any(|prev| prev.bandwidth == entry.bandwidth)
        {
            return Err(ProfileError::DuplicateLoraRxEntry { index });
        }
    }
    Ok(())
}
