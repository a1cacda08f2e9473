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
use std::collections::HashMap;
use std::str::FromStr;

/// The kinds of element through which a room exchanges heat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvelopeElement {
    /// Opaque wall, excluding its openings
    Wall,

    /// Window that opens on hinges
    HingedWindow,

    /// Sliding window
    SlidingWindow,

    /// Ceiling towards an unheated space or the roof
    Ceiling,

    /// The entrance door
    EntryDoor,

    /// The slab of the entrance floor. Its coefficient
    /// is per metre of perimeter, in $`W/mK`$
    EntryFloor,

    /// The bathtub
    Bathtub,

    /// The pipes of the floor-heating panel
    FloorHeating,
}

impl EnvelopeElement {
    /// All the elements, in the order they are listed in a
    /// configuration file
    pub const ALL: [EnvelopeElement; 8] = [
        Self::Wall,
        Self::HingedWindow,
        Self::SlidingWindow,
        Self::Ceiling,
        Self::EntryDoor,
        Self::EntryFloor,
        Self::Bathtub,
        Self::FloorHeating,
    ];

    /// The key used for this element in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::HingedWindow => "hinged_window",
            Self::SlidingWindow => "sliding_window",
            Self::Ceiling => "ceiling",
            Self::EntryDoor => "entry_door",
            Self::EntryFloor => "entry_floor",
            Self::Bathtub => "bathtub",
            Self::FloorHeating => "floor_heating",
        }
    }
}

impl FromStr for EnvelopeElement {
    type Err = FloorHeatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|e| e.name() == s)
            .copied()
            .ok_or_else(|| {
                FloorHeatingError::invalid_profile(
                    "coefficients",
                    format!("unknown envelope element '{}'", s),
                )
            })
    }
}

impl std::fmt::Display for EnvelopeElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The heat transfer coefficients (i.e., U-values) of the
/// elements of the building, in $`W/m^2K`$.
///
/// These are shared by all the rooms.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeatTransferCoefficients {
    /// Opaque walls
    pub wall: Float,

    /// Hinged windows
    pub hinged_window: Float,

    /// Sliding windows
    pub sliding_window: Float,

    /// Ceilings
    pub ceiling: Float,

    /// Entrance doors
    pub entry_door: Float,

    /// Entrance floor slab, in $`W/mK`$ (i.e., per metre of perimeter)
    pub entry_floor: Float,

    /// Bathtubs
    pub bathtub: Float,

    /// From the floor-heating pipes into the room
    pub floor_heating: Float,
}

impl HeatTransferCoefficients {
    /// Builds the coefficients from a map keyed by the
    /// [`EnvelopeElement`] names. Every element must be there.
    pub fn from_map(map: &HashMap<String, Float>) -> FloorHeatingResult<Self> {
        let mut ret = Self::default();
        for (key, value) in map.iter() {
            let element = EnvelopeElement::from_str(key)?;
            *ret.get_mut(element) = *value;
        }
        for element in EnvelopeElement::ALL {
            if !map.contains_key(element.name()) {
                return Err(FloorHeatingError::invalid_profile(
                    "coefficients",
                    format!("missing heat transfer coefficient for '{}'", element),
                ));
            }
        }
        ret.validate()?;
        Ok(ret)
    }

    /// Gets the coefficient of an element
    pub fn get(&self, element: EnvelopeElement) -> Float {
        match element {
            EnvelopeElement::Wall => self.wall,
            EnvelopeElement::HingedWindow => self.hinged_window,
            EnvelopeElement::SlidingWindow => self.sliding_window,
            EnvelopeElement::Ceiling => self.ceiling,
            EnvelopeElement::EntryDoor => self.entry_door,
            EnvelopeElement::EntryFloor => self.entry_floor,
            EnvelopeElement::Bathtub => self.bathtub,
            EnvelopeElement::FloorHeating => self.floor_heating,
        }
    }

    fn get_mut(&mut self, element: EnvelopeElement) -> &mut Float {
        match element {
            EnvelopeElement::Wall => &mut self.wall,
            EnvelopeElement::HingedWindow => &mut self.hinged_window,
            EnvelopeElement::SlidingWindow => &mut self.sliding_window,
            EnvelopeElement::Ceiling => &mut self.ceiling,
            EnvelopeElement::EntryDoor => &mut self.entry_door,
            EnvelopeElement::EntryFloor => &mut self.entry_floor,
            EnvelopeElement::Bathtub => &mut self.bathtub,
            EnvelopeElement::FloorHeating => &mut self.floor_heating,
        }
    }

    /// Checks that all coefficients are finite and non-negative
    pub fn validate(&self) -> FloorHeatingResult<()> {
        for element in EnvelopeElement::ALL {
            let v = self.get(element);
            if !v.is_finite() || v < 0. {
                return Err(FloorHeatingError::invalid_profile(
                    "coefficients",
                    format!(
                        "heat transfer coefficient of '{}' must be finite and non-negative... found {}",
                        element, v
                    ),
                ));
            }
        }
        Ok(())
    }
}

/***********/
/* TESTING */
/***********/
