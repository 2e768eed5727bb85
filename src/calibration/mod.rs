//! Calibration and power modeling
//!
//! Four independent components, each a pure function of a [`BoardProfile`]
//! and its inputs:
//!
//! - [`regulator`]: which regulator topology the board uses
//! - [`tx`]: TX power calibration (chip power, ramp time, expected power)
//! - [`cad`]: CAD detection peak override
//! - [`consumption`]: instantaneous current estimates for TX and RX
//!
//! None of them calls another, holds state or blocks. They can be called
//! concurrently from any context, including interrupt handlers, as long as the
//! profile outlives the calls.

mod cad;
mod consumption;
mod regulator;
mod tx;

pub use cad::*;
pub use consumption::*;
pub use regulator::*;
pub use tx::*;

use crate::{BoardProfile, CadSymbols, Error, LoraBandwidth, SpreadingFactor};

/// Method forms of the calibration functions
impl BoardProfile<'_> {
    /// See [`get_tx_config`]
    pub fn tx_config(&self, request: TxPowerRequest) -> Result<TxPowerPlan, Error> {
        get_tx_config(self, request)
    }

    /// See [`get_lora_cad_det_peak`]
    pub fn lora_cad_det_peak(
        &self,
        spreading_factor: SpreadingFactor,
        bandwidth: LoraBandwidth,
        symbols: CadSymbols,
        proposed: u8,
    ) -> u8 {
        get_lora_cad_det_peak(self, spreading_factor, bandwidth, symbols, proposed)
    }

    /// See [`estimate_consumption`]
    pub fn consumption_ua(&self, query: &ConsumptionQuery) -> Result<u32, Error> {
        estimate_consumption(self, query)
    }

    /// Consumption query for transmitting `plan` with this board's regulator
    pub fn tx_query(&self, plan: TxPowerPlan) -> ConsumptionQuery {
        ConsumptionQuery::Tx {
            plan,
            regulator_mode: get_regulator_mode(self),
        }
    }
}
