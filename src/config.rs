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

use crate::coefficients::HeatTransferCoefficients;
use crate::error::{FloorHeatingError, FloorHeatingResult};
use crate::room::RoomThermalProfile;
use crate::{Float, DEFAULT_SENSIBLE_HEAT_EXCHANGE_EFFICIENCY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

fn default_efficiency() -> Float {
    DEFAULT_SENSIBLE_HEAT_EXCHANGE_EFFICIENCY
}

/// Everything the heat balance needs to know about a building:
/// the coefficients shared by all rooms, the efficiency of the
/// heat-recovery ventilation and the rooms themselves.
///
/// It is loaded once, validated, and then only read.
///
/// ```json
/// {
///     "sensible_heat_exchange_efficiency": 0.9,
///     "coefficients": {
///         "wall": 0.24, "hinged_window": 0.8, "sliding_window": 1.0,
///         "ceiling": 0.15, "entry_door": 1.6, "entry_floor": 0.4,
///         "bathtub": 0.8, "floor_heating": 2.7
///     },
///     "rooms": {
///         "living": { "wall_area": 27.6, ... }
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildingConfig {
    /// The fraction of the sensible heat recovered by the
    /// ventilation system. Must be in $`(0, 1]`$
    #[serde(default = "default_efficiency")]
    pub sensible_heat_exchange_efficiency: Float,

    /// The heat transfer coefficients of the building elements
    pub coefficients: HeatTransferCoefficients,

    /// The rooms, by name
    #[serde(default)]
    pub rooms: BTreeMap<String, RoomThermalProfile>,
}

impl BuildingConfig {
    /// Creates a configuration with no rooms and the default
    /// ventilation efficiency
    pub fn new(coefficients: HeatTransferCoefficients) -> Self {
        Self {
            sensible_heat_exchange_efficiency: DEFAULT_SENSIBLE_HEAT_EXCHANGE_EFFICIENCY,
            coefficients,
            rooms: BTreeMap::new(),
        }
    }

    /// Adds a room, replacing any other room with the same name
    pub fn with_room<S: Into<String>>(mut self, name: S, profile: RoomThermalProfile) -> Self {
        self.rooms.insert(name.into(), profile);
        self
    }

    /// Parses and validates a configuration written in JSON
    pub fn from_json(json: &str) -> FloorHeatingResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            FloorHeatingError::invalid_profile("configuration", format!("JSON parse error: {e}"))
        })?;
        config.validate()?;
        log::info!(
            "Loaded floor-heating configuration with {} rooms",
            config.rooms.len()
        );
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> FloorHeatingResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            FloorHeatingError::invalid_profile(
                "configuration",
                format!("could not read '{}': {e}", path.display()),
            )
        })?;
        Self::from_json(&json)
    }

    /// Checks the efficiency, the coefficients and every room
    pub fn validate(&self) -> FloorHeatingResult<()> {
        self.validate_envelope()?;
        for (name, room) in self.rooms.iter() {
            room.validate(name)?;
        }
        Ok(())
    }

    /// Checks what is shared by every room: the efficiency
    /// and the coefficients
    pub fn validate_envelope(&self) -> FloorHeatingResult<()> {
        let eta = self.sensible_heat_exchange_efficiency;
        if !(eta > 0. && eta <= 1.) {
            return Err(FloorHeatingError::invalid_profile(
                "configuration",
                format!(
                    "sensible_heat_exchange_efficiency must be in (0, 1]... found {}",
                    eta
                ),
            ));
        }
        self.coefficients.validate()
    }

    /// Borrows a room by name
    pub fn room(&self, name: &str) -> FloorHeatingResult<&RoomThermalProfile> {
        self.rooms
            .get(name)
            .ok_or_else(|| FloorHeatingError::UnknownRoom(name.to_string()))
    }
}

/// Tolerances and budget of the direct search.
///
/// The defaults are tighter than the usual Nelder-Mead setup
/// ($`10^{-4}`$), since the heat balance is cheap to evaluate. With the
/// `float` feature they are loosened to what `f32` can resolve: around
/// $`25 C`$ one ulp is already $`2 \times 10^{-6}`$.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Absolute tolerance on the unknown, in $`C`$
    pub x_tolerance: Float,

    /// Absolute tolerance on the residual, in $`W`$
    pub f_tolerance: Float,

    /// Maximum number of iterations
    pub max_iterations: usize,

    /// Maximum number of evaluations of the heat balance
    pub max_evaluations: usize,
}

#[cfg(not(feature = "float"))]
const DEFAULT_X_TOLERANCE: Float = 1e-8;
#[cfg(not(feature = "float"))]
const DEFAULT_F_TOLERANCE: Float = 1e-8;

#[cfg(feature = "float")]
const DEFAULT_X_TOLERANCE: Float = 1e-4;
#[cfg(feature = "float")]
const DEFAULT_F_TOLERANCE: Float = 1e-2;

impl std::default::Default for SolverOptions {
    fn default() -> Self {
        Self {
            x_tolerance: DEFAULT_X_TOLERANCE,
            f_tolerance: DEFAULT_F_TOLERANCE,
            max_iterations: 400,
            max_evaluations: 800,
        }
    }
}

impl SolverOptions {
    /// Checks that tolerances are positive and budgets are not zero
    pub fn validate(&self) -> FloorHeatingResult<()> {
        if !(self.x_tolerance > 0.) || !(self.f_tolerance > 0.) {
            return Err(FloorHeatingError::invalid_profile(
                "solver options",
                format!(
                    "tolerances must be positive... found x = {}, f = {}",
                    self.x_tolerance, self.f_tolerance
                ),
            ));
        }
        if self.max_iterations == 0 || self.max_evaluations == 0 {
            return Err(FloorHeatingError::invalid_profile(
                "solver options",
                "iteration and evaluation budgets must be greater than zero",
            ));
        }
        Ok(())
    }
}

/***********/
/* TESTING */
/***********/
