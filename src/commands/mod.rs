//! SX128x command and parameter types
//!
//! This module describes the chip-side values produced by the calibration
//! layer and the command payloads a driver writes to apply them:
//!
//! - [`rf`]: TX power range, PA ramp times, LoRa modulation and CAD settings
//!   - `SetTxParams` (0x8E)
//!   - `SetCadParams` (0x88)
//!
//! - [`operational`]: regulator topology
//!   - `SetRegulatorMode` (0x96)
//!
//! # Command Execution
//! Commands implement `regiface::Command` with an 8-bit opcode. Serializing the
//! parameters with `ToByteArray` yields exactly the bytes that follow the
//! opcode on the SPI bus. Transport, BUSY handling and sequencing belong to the
//! driver.

mod operational;
mod rf;

pub use operational::*;
pub use rf::*;
