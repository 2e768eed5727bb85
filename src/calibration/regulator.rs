//! Regulator mode selection

use crate::{BoardProfile, RegulatorMode};

/// Regulator topology the board is wired for
pub fn get_regulator_mode(profile: &BoardProfile<'_>) -> RegulatorMode {
    profile.regulator_mode()
}
