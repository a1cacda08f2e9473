/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! A steady-state heat balance module for estimating floor-heating setpoints
//!
//! It balances the heat lost through the envelope of a room (and through its
//! ventilation) against the heat supplied by a floor-heating panel and the
//! internal loads, and solves that balance either for the room temperature
//! reached with a given panel setpoint, or for the panel setpoint needed to
//! reach a target room temperature.

pub mod climate;
pub mod coefficients;
pub mod config;
pub mod error;
pub mod heat_balance;
pub mod nelder_mead;
pub mod recommendation;
pub mod room;
pub mod solver;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

#[cfg(not(feature = "float"))]
pub type Float = f64;

/// The volumetric heat capacity of air, in $`Wh/m^3K`$. Multiplied by a
/// flow in $`m^3/h`$ it gives a conductance in $`W/K`$
pub const AIR_VOLUMETRIC_HEAT_CAPACITY: Float = 0.33;

/// The default efficiency of the heat-recovery ventilation
pub const DEFAULT_SENSIBLE_HEAT_EXCHANGE_EFFICIENCY: Float = 0.9;

/// The fraction of the bathtub that is exposed to the exterior
pub const BATHTUB_EXPOSURE_FACTOR: Float = 0.6;

pub use climate::{DayNightSplit, MonthlyClimate, TemperatureRecord};
pub use coefficients::{EnvelopeElement, HeatTransferCoefficients};
pub use config::{BuildingConfig, SolverOptions};
pub use error::{FloorHeatingError, FloorHeatingResult};
pub use heat_balance::{HeatBalance, HeatFlows};
pub use recommendation::{CurvePoint, MonthlySetpoints, RoomRecommendation};
pub use room::RoomThermalProfile;
pub use solver::{SetpointSolver, SolveStrategy};
