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
use crate::config::BuildingConfig;
use crate::room::RoomThermalProfile;
use crate::{Float, AIR_VOLUMETRIC_HEAT_CAPACITY, BATHTUB_EXPOSURE_FACTOR};

/// The heat flows of a room at a certain state, in $`W`$
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatFlows {
    /// Heat lost through walls, windows, ceiling, door,
    /// entrance slab and bathtub. Negative when the room
    /// is colder than the exterior.
    pub envelope_loss: Float,

    /// Heat lost through ventilation, after heat recovery
    pub ventilation_loss: Float,

    /// Heat delivered by the floor-heating panel. Never negative.
    pub floor_heating_supply: Float,

    /// Heat released by people and appliances
    pub internal_heat_load: Float,
}

impl HeatFlows {
    /// Everything that goes into the room
    pub fn heat_supply(&self) -> Float {
        self.internal_heat_load + self.floor_heating_supply
    }

    /// Supply minus losses. Zero at equilibrium.
    pub fn balance(&self) -> Float {
        self.heat_supply() - self.envelope_loss - self.ventilation_loss
    }

    /// The magnitude of the imbalance
    pub fn residual(&self) -> Float {
        self.balance().abs()
    }
}

/// The steady-state heat balance of a single room.
///
/// # The math
///
/// With $`T_r`$ the room temperature, $`T_o`$ the outdoor temperature and
/// $`T_s`$ the setpoint of the floor-heating panel:
///
/// ```math
/// Q_{env} = \left(\sum_i A_i U_i + L_{entry} U_{entry} + 0.6 A_{bath} U_{bath}\right)(T_r - T_o)
/// ```
///
/// ```math
/// Q_{vent} = 0.33 \dot{V} \eta (T_r - T_o)
/// ```
///
/// ```math
/// Q_{sup} = Q_{int} + A_{fh} U_{fh} \max(T_s - T_r, 0)
/// ```
///
/// and the residual is $`|Q_{sup} - Q_{env} - Q_{vent}|`$.
#[derive(Debug, Clone, Copy)]
pub struct HeatBalance<'a> {
    profile: &'a RoomThermalProfile,
    coefficients: &'a HeatTransferCoefficients,
    efficiency: Float,
}

impl<'a> HeatBalance<'a> {
    /// Creates the heat balance of a room
    pub fn new(
        profile: &'a RoomThermalProfile,
        coefficients: &'a HeatTransferCoefficients,
        sensible_heat_exchange_efficiency: Float,
    ) -> Self {
        Self {
            profile,
            coefficients,
            efficiency: sensible_heat_exchange_efficiency,
        }
    }

    /// Creates the heat balance of a room using the coefficients
    /// and efficiency of a [`BuildingConfig`]
    pub fn from_config(profile: &'a RoomThermalProfile, config: &'a BuildingConfig) -> Self {
        Self::new(
            profile,
            &config.coefficients,
            config.sensible_heat_exchange_efficiency,
        )
    }

    /// The profile of the room being balanced
    pub fn profile(&self) -> &RoomThermalProfile {
        self.profile
    }

    /// The conductance between the room and the exterior through
    /// the envelope, in $`W/K`$
    pub fn envelope_conductance(&self) -> Float {
        let p = self.profile;
        let c = self.coefficients;
        p.wall_area * c.wall
            + p.hinged_window_area * c.hinged_window
            + p.sliding_window_area * c.sliding_window
            + p.ceiling_area * c.ceiling
            + p.entry_door_area * c.entry_door
            + p.entry_floor_perimeter * c.entry_floor
            + p.bathtub_area * c.bathtub * BATHTUB_EXPOSURE_FACTOR
    }

    /// The conductance between the room and the exterior through
    /// ventilation, in $`W/K`$
    pub fn ventilation_conductance(&self) -> Float {
        AIR_VOLUMETRIC_HEAT_CAPACITY * self.profile.ventilation_flow * self.efficiency
    }

    /// Envelope plus ventilation conductance, in $`W/K`$
    pub fn loss_conductance(&self) -> Float {
        self.envelope_conductance() + self.ventilation_conductance()
    }

    /// The conductance between the floor-heating pipes and
    /// the room, in $`W/K`$
    pub fn panel_conductance(&self) -> Float {
        self.profile.floor_heating_area * self.coefficients.floor_heating
    }

    /// Heat delivered by the panel. The panel only heats: when the
    /// room is at or above the setpoint it delivers exactly nothing.
    pub fn floor_heating_supply(&self, heating_setpoint: Float, room_temp: Float) -> Float {
        let delta = heating_setpoint - room_temp;
        if delta > 0. {
            self.panel_conductance() * delta
        } else {
            0.
        }
    }

    /// Calculates every heat flow of the room
    pub fn heat_flows(
        &self,
        outdoor_temp: Float,
        heating_setpoint: Float,
        room_temp: Float,
    ) -> HeatFlows {
        let delta_t = room_temp - outdoor_temp;
        HeatFlows {
            envelope_loss: self.envelope_conductance() * delta_t,
            ventilation_loss: self.ventilation_conductance() * delta_t,
            floor_heating_supply: self.floor_heating_supply(heating_setpoint, room_temp),
            internal_heat_load: self.profile.internal_heat_load,
        }
    }

    /// The magnitude of the mismatch between the heat supplied to the
    /// room and the heat it loses, in $`W`$. Never negative.
    pub fn residual(
        &self,
        outdoor_temp: Float,
        heating_setpoint: Float,
        room_temp: Float,
    ) -> Float {
        self.heat_flows(outdoor_temp, heating_setpoint, room_temp).residual()
    }
}

/// Evaluates the residual of the heat balance of a room in a
/// certain state, in $`W`$.
pub fn evaluate(
    profile: &RoomThermalProfile,
    config: &BuildingConfig,
    outdoor_temp: Float,
    heating_setpoint: Float,
    room_temp: Float,
) -> Float {
    HeatBalance::from_config(profile, config).residual(outdoor_temp, heating_setpoint, room_temp)
}

/***********/
/* TESTING */
/***********/
