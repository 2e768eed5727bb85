#![no_std]
//! SX128x Board Calibration Layer
//!
//! This crate sits between a generic radio abstraction layer and the driver of
//! a Semtech SX1280/SX1281 2.4 GHz transceiver. Upper layers ask for RF
//! behavior in physical units; this crate turns those requests into the
//! discrete values the chip accepts, compensating for the losses of a specific
//! board, and reports what the hardware will really do.
//!
//! # Features
//! - TX power calibration: target antenna power + carrier frequency to chip
//!   power, PA ramp time and expected antenna power
//! - CAD detection peak tuning per spreading factor, bandwidth and symbol count
//! - Instantaneous current estimates for TX, GFSK RX and LoRa RX
//! - Regulator topology (LDO or DC-DC) reporting
//! - `no_std`, allocation-free, optional `defmt` logging
//!
//! # Architecture
//! The crate is organized into several modules:
//!
//! - [`profile`]: The [`BoardProfile`] holding all board characterization
//!   - Loss-compensation bands, power grid, ramp policy
//!   - CAD tuning and consumption tables
//!   - Validation at construction time
//!
//! - [`calibration`]: Pure functions over a profile
//!   - [`get_regulator_mode`]
//!   - [`get_tx_config`]
//!   - [`get_lora_cad_det_peak`]
//!   - [`estimate_consumption`] and its TX / GFSK RX / LoRa RX entry points
//!
//! - [`commands`]: SX128x values and command payloads
//!   - `SetTxParams`, `SetRegulatorMode`, `SetCadParams`
//!
//! - [`boards`]: Reference profile for an SX1280 development board
//!
//! # Usage
//! Build the profile once at bring-up and borrow it for every call. Every
//! function is pure: no internal state, no blocking, bounded time.
//!
//! 1. Describe the board in a [`BoardProfileConfig`]
//! 2. Validate it with [`BoardProfile::new`]
//! 3. Call [`get_tx_config`] before each transmission and hand
//!    [`TxPowerPlan::tx_params`] to the driver
//! 4. Call [`get_lora_cad_det_peak`] before each CAD
//! 5. Query [`estimate_consumption`] for energy accounting
//!
//! # Important Notes
//! - A carrier frequency outside every loss band is an error, never defaulted
//! - Targets outside the achievable power range are clamped; check
//!   [`TxPowerPlan::expected_power_dbm`] and [`TxPowerPlan::adjustments`]
//! - Consumption estimates never extrapolate beyond the measured samples
//!
//! # Example
//! ```
//! use sx128x_bsp::{boards, get_tx_config, ToByteArray, TxPowerRequest};
//!
//! let profile = boards::sx1280_dev_board()?;
//! let plan = get_tx_config(
//!     &profile,
//!     TxPowerRequest {
//!         target_power_dbm: 10,
//!         frequency_hz: 2_425_000_000,
//!     },
//! )?;
//!
//! assert_eq!(plan.configured_power_dbm, 11);
//! assert_eq!(plan.expected_power_dbm, 10);
//! let payload = plan.tx_params().to_bytes().unwrap();
//! assert_eq!(payload, [29, 0xE0]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use regiface::{Command, NoParameters, ToByteArray};

pub mod boards;
pub mod calibration;
pub mod commands;
pub mod error;
pub mod profile;

pub use calibration::*;
pub use commands::*;
pub use error::{Error, ProfileError};
pub use profile::*;
