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

use crate::config::{BuildingConfig, SolverOptions};
use crate::error::{FloorHeatingError, FloorHeatingResult};
use crate::heat_balance::HeatBalance;
use crate::nelder_mead;
use crate::room::RoomThermalProfile;
use crate::Float;

/// Half the width of the range, in $`C`$, over which the residual is
/// probed before solving
const PROBE_SPAN: Float = 50.;

/// Number of probes on each side of the initial guess
const PROBE_STEPS: usize = 20;

/// How to find the unknown of the heat balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolveStrategy {
    /// Solves the balance directly. The residual is piecewise linear
    /// on either unknown, with a single kink where the setpoint equals
    /// the room temperature, so each piece can be solved exactly.
    #[default]
    ClosedForm,

    /// Minimizes the residual with a Nelder-Mead simplex search
    DirectSearch,
}

/// Which of the two temperatures is being solved for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unknown {
    RoomTemperature,
    HeatingSetpoint,
}

impl std::fmt::Display for Unknown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoomTemperature => write!(f, "room temperature"),
            Self::HeatingSetpoint => write!(f, "heating setpoint"),
        }
    }
}

/// Solves the heat balance of rooms for their room temperature or
/// for the setpoint of their floor-heating panel.
///
/// It only borrows the [`BuildingConfig`], which is never modified, so
/// a single solver can be shared by several threads.
#[derive(Debug, Clone, Copy)]
pub struct SetpointSolver<'a> {
    config: &'a BuildingConfig,
    strategy: SolveStrategy,
    options: SolverOptions,
}

impl<'a> SetpointSolver<'a> {
    /// Creates a solver using the [`SolveStrategy::ClosedForm`] strategy
    pub fn new(config: &'a BuildingConfig) -> Self {
        Self {
            config,
            strategy: SolveStrategy::default(),
            options: SolverOptions::default(),
        }
    }

    /// Changes the strategy
    pub fn with_strategy(mut self, strategy: SolveStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Changes the options of the direct search
    pub fn with_options(mut self, options: SolverOptions) -> FloorHeatingResult<Self> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }

    /// The configuration this solver reads from
    pub fn config(&self) -> &'a BuildingConfig {
        self.config
    }

    /// The strategy in use
    pub fn strategy(&self) -> SolveStrategy {
        self.strategy
    }

    /// The heat balance of a room, built with this solver's configuration
    pub fn heat_balance<'b>(&self, profile: &'b RoomThermalProfile) -> HeatBalance<'b>
    where
        'a: 'b,
    {
        HeatBalance::from_config(profile, self.config)
    }

    /// Finds the temperature a room reaches when its floor-heating
    /// panel is set to `heating_setpoint` and it is `outdoor_temp`
    /// outside. The result is not rounded.
    pub fn solve_room_temperature(
        &self,
        profile: &RoomThermalProfile,
        outdoor_temp: Float,
        heating_setpoint: Float,
    ) -> FloorHeatingResult<Float> {
        self.check_inputs(profile)?;
        let hb = self.heat_balance(profile);
        let objective = |room_temp: Float| hb.residual(outdoor_temp, heating_setpoint, room_temp);

        // Start as if the room had not been heated yet
        let initial_guess = outdoor_temp;
        check_not_degenerate(&objective, initial_guess, Unknown::RoomTemperature)?;

        let h = hb.loss_conductance();
        if h <= 0. {
            log::warn!("Room has no heat path to the exterior; its temperature is undetermined");
            return Err(FloorHeatingError::DegenerateInput(
                "the room exchanges no heat with the exterior, so its temperature is undetermined"
                    .to_string(),
            ));
        }

        let room_temp = match self.strategy {
            SolveStrategy::ClosedForm => {
                let p = hb.panel_conductance();
                let q = profile.internal_heat_load;
                // The balance when the room sits exactly at the setpoint
                let idle_balance = q - h * (heating_setpoint - outdoor_temp);
                if idle_balance >= 0. {
                    // Internal loads keep the room at or above the setpoint,
                    // so the panel does nothing
                    outdoor_temp + q / h
                } else {
                    (q + p * heating_setpoint + h * outdoor_temp) / (p + h)
                }
            }
            SolveStrategy::DirectSearch => {
                self.direct_search(&objective, initial_guess, Unknown::RoomTemperature)?
            }
        };
        let room_temp = check_finite(room_temp, objective(room_temp))?;

        log::debug!(
            "Room temperature = {:.3} C (outdoor = {} C, setpoint = {} C, {:?})",
            room_temp,
            outdoor_temp,
            heating_setpoint,
            self.strategy
        );
        Ok(room_temp)
    }

    /// Finds the setpoint the floor-heating panel needs for the room to
    /// reach `room_setpoint` when it is `outdoor_temp` outside.
    ///
    /// The result is rounded up to the next whole degree: a setpoint
    /// slightly too high is preferred over one slightly too low.
    pub fn solve_heating_setpoint(
        &self,
        profile: &RoomThermalProfile,
        room_setpoint: Float,
        outdoor_temp: Float,
    ) -> FloorHeatingResult<Float> {
        self.check_inputs(profile)?;
        let hb = self.heat_balance(profile);
        let objective =
            |heating_setpoint: Float| hb.residual(outdoor_temp, heating_setpoint, room_setpoint);

        let initial_guess = room_setpoint;
        check_not_degenerate(&objective, initial_guess, Unknown::HeatingSetpoint)?;

        let heating_setpoint = match self.strategy {
            SolveStrategy::ClosedForm => {
                let h = hb.loss_conductance();
                let p = hb.panel_conductance();
                let q = profile.internal_heat_load;
                // What the panel needs to deliver
                let demand = h * (room_setpoint - outdoor_temp) - q;
                if demand > 0. {
                    room_setpoint + demand / p
                } else {
                    log::debug!(
                        "No heating needed for {} C at an outdoor temperature of {} C",
                        room_setpoint,
                        outdoor_temp
                    );
                    room_setpoint
                }
            }
            SolveStrategy::DirectSearch => {
                self.direct_search(&objective, initial_guess, Unknown::HeatingSetpoint)?
            }
        };
        let heating_setpoint = check_finite(heating_setpoint, objective(heating_setpoint))?;

        log::debug!(
            "Heating setpoint = {:.3} C (room = {} C, outdoor = {} C, {:?})",
            heating_setpoint,
            room_setpoint,
            outdoor_temp,
            self.strategy
        );
        Ok(heating_setpoint.ceil())
    }

    /// Finds the setpoint a configured room needs in order to reach its
    /// own target temperature. Failures name the room and the
    /// outdoor temperature.
    pub fn solve_room(&self, room_name: &str, outdoor_temp: Float) -> FloorHeatingResult<Float> {
        let profile = self.config.room(room_name)?;
        self.solve_heating_setpoint(profile, profile.target_temperature, outdoor_temp)
            .map_err(|e| e.in_room(room_name, outdoor_temp))
    }

    /// Rejects negative or non-finite areas, flows and coefficients
    fn check_inputs(&self, profile: &RoomThermalProfile) -> FloorHeatingResult<()> {
        self.config.validate_envelope()?;
        profile.validate("room")
    }

    fn direct_search<F: Fn(Float) -> Float>(
        &self,
        objective: &F,
        initial_guess: Float,
        unknown: Unknown,
    ) -> FloorHeatingResult<Float> {
        let result = nelder_mead::minimize(objective, initial_guess, &self.options);
        if !result.converged {
            log::warn!(
                "Direct search for the {} did not converge after {} iterations",
                unknown,
                result.iterations
            );
            return Err(FloorHeatingError::ConvergenceFailure {
                iterations: result.iterations,
                last_value: result.x,
                residual: result.f_min,
            });
        }
        Ok(result.x)
    }
}

/// Checks that the residual actually depends on the unknown. If it
/// does not, any value would be a solution.
fn check_not_degenerate<F: Fn(Float) -> Float>(
    objective: &F,
    center: Float,
    unknown: Unknown,
) -> FloorHeatingResult<()> {
    let step = PROBE_SPAN / PROBE_STEPS as Float;
    let n = PROBE_STEPS as i32;
    let mut min = Float::INFINITY;
    let mut max = Float::NEG_INFINITY;
    for k in -n..=n {
        let f = objective(center + k as Float * step);
        if !f.is_finite() {
            // Let the solver report it
            return Ok(());
        }
        min = min.min(f);
        max = max.max(f);
    }

    if max - min <= Float::EPSILON * max.abs().max(1.) {
        log::warn!("The residual does not depend on the {}", unknown);
        return Err(FloorHeatingError::DegenerateInput(format!(
            "the residual is {} W for any {}, so there is no single solution",
            max, unknown
        )));
    }
    Ok(())
}

/// Turns non-finite solutions (or solutions where the residual
/// cannot be evaluated) into convergence failures
fn check_finite(value: Float, residual: Float) -> FloorHeatingResult<Float> {
    if value.is_finite() && residual.is_finite() {
        Ok(value)
    } else {
        Err(FloorHeatingError::ConvergenceFailure {
            iterations: 0,
            last_value: value,
            residual,
        })
    }
}

/***********/
/* TESTING */
/***********/
