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

use crate::Float;
use thiserror::Error;

/// Everything that can go wrong when loading a configuration
/// or when solving a heat balance.
///
/// The heat balance itself never fails; only the
/// solvers and the loaders around them do.
#[derive(Error, Debug)]
pub enum FloorHeatingError {
    /// A room profile, a coefficient mapping or the ventilation
    /// efficiency is missing a value or has one out of range.
    #[error("invalid profile '{subject}': {reason}")]
    InvalidProfile { subject: String, reason: String },

    /// The direct search did not converge within its budget, or
    /// a solve produced a non-finite value.
    #[error("solver did not converge after {iterations} iterations (last value {last_value}, residual {residual} W)")]
    ConvergenceFailure {
        iterations: usize,
        last_value: Float,
        residual: Float,
    },

    /// The residual does not depend on the unknown, so any value
    /// would be a solution.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// A room name that is not in the configuration
    #[error("unknown room '{0}'")]
    UnknownRoom(String),

    /// A malformed line in an hourly temperature series
    #[error("invalid temperature record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    /// No temperature records fall in the requested period
    #[error("no temperature records for {0}")]
    EmptyPeriod(String),

    /// A solve failed for a specific room and outdoor temperature
    #[error("could not solve room '{room}' at an outdoor temperature of {outdoor_temperature} C: {source}")]
    Room {
        room: String,
        outdoor_temperature: Float,
        #[source]
        source: Box<FloorHeatingError>,
    },
}

impl FloorHeatingError {
    /// Wraps an error with the room and outdoor temperature
    /// it happened at.
    pub fn in_room(self, room: &str, outdoor_temperature: Float) -> Self {
        Self::Room {
            room: room.to_string(),
            outdoor_temperature,
            source: Box::new(self),
        }
    }

    pub(crate) fn invalid_profile<S: Into<String>, R: Into<String>>(subject: S, reason: R) -> Self {
        Self::InvalidProfile {
            subject: subject.into(),
            reason: reason.into(),
        }
    }
}

pub type FloorHeatingResult<T> = Result<T, FloorHeatingError>;
