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

use crate::error::{FloorHeatingError, FloorHeatingResult};
use crate::Float;
use serde::{Deserialize, Serialize};

/// The geometry and loads of a room, as seen by the heat balance.
///
/// The floor itself is not here: it is assumed to be warmed by the
/// floor-heating panel, so it does not lose heat to the outside.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomThermalProfile {
    /// Area of the walls facing the exterior, excluding
    /// windows and doors, in $`m^2`$
    pub wall_area: Float,

    /// Area of the hinged windows, in $`m^2`$
    pub hinged_window_area: Float,

    /// Area of the sliding windows, in $`m^2`$
    pub sliding_window_area: Float,

    /// Area of the ceiling exposed to the exterior, in $`m^2`$
    pub ceiling_area: Float,

    /// Area of the entrance door, in $`m^2`$
    pub entry_door_area: Float,

    /// Perimeter of the entrance floor slab, in $`m`$
    pub entry_floor_perimeter: Float,

    /// Area of the bathtub, in $`m^2`$
    pub bathtub_area: Float,

    /// Ventilation flow, in $`m^3/h`$
    pub ventilation_flow: Float,

    /// Heat released by people and appliances, in $`W`$
    pub internal_heat_load: Float,

    /// Area covered by the floor-heating panel, in $`m^2`$
    pub floor_heating_area: Float,

    /// The room temperature we want to keep, in $`C`$
    pub target_temperature: Float,
}

impl RoomThermalProfile {
    /// Calculates the opaque area of a wall whose gross area
    /// (in $`m^2`$) includes its `openings`.
    pub fn net_wall_area(gross_area: Float, openings: &[Float]) -> FloorHeatingResult<Float> {
        let net = gross_area - openings.iter().sum::<Float>();
        if net < 0. {
            return Err(FloorHeatingError::invalid_profile(
                "wall",
                format!(
                    "openings are larger than the wall they are in ({} m2 gross, {} m2 net)",
                    gross_area, net
                ),
            ));
        }
        Ok(net)
    }

    /// Checks that all areas, lengths, flows and loads are finite and
    /// non-negative, and that the target temperature is finite.
    pub fn validate(&self, name: &str) -> FloorHeatingResult<()> {
        let fields = [
            ("wall_area", self.wall_area),
            ("hinged_window_area", self.hinged_window_area),
            ("sliding_window_area", self.sliding_window_area),
            ("ceiling_area", self.ceiling_area),
            ("entry_door_area", self.entry_door_area),
            ("entry_floor_perimeter", self.entry_floor_perimeter),
            ("bathtub_area", self.bathtub_area),
            ("ventilation_flow", self.ventilation_flow),
            ("internal_heat_load", self.internal_heat_load),
            ("floor_heating_area", self.floor_heating_area),
        ];
        for (field, v) in fields {
            if !v.is_finite() || v < 0. {
                return Err(FloorHeatingError::invalid_profile(
                    name,
                    format!("'{}' must be finite and non-negative... found {}", field, v),
                ));
            }
        }
        if !self.target_temperature.is_finite() {
            return Err(FloorHeatingError::invalid_profile(
                name,
                format!(
                    "'target_temperature' must be finite... found {}",
                    self.target_temperature
                ),
            ));
        }
        Ok(())
    }
}
