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

//! Tables of setpoints built on top of the [`SetpointSolver`]: the
//! heating curve of a room, its monthly day and night setpoints,
//! and the setpoints of every room of a building.
//!
//! With the `parallel` feature each table is computed with `rayon`.

use crate::climate::{monthly_climates, DayNightSplit, MonthlyClimate, TemperatureRecord};
use crate::error::FloorHeatingResult;
use crate::room::RoomThermalProfile;
use crate::solver::SetpointSolver;
use crate::Float;
use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A point of the heating curve of a room
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    /// in $`C`$
    pub outdoor_temperature: Float,

    /// in $`C`$, already rounded up
    pub heating_setpoint: Float,
}

/// The setpoints recommended for a month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlySetpoints {
    /// The month, from 1 to 12
    pub month: u8,

    /// The outdoor temperatures the setpoints were sized for
    pub climate: MonthlyClimate,

    /// Setpoint for the coldest night of the month
    pub normal_setpoint: Float,

    /// Setpoint for an average day of the month
    pub save_setpoint: Float,
}

/// The setpoint a room needs to reach its target temperature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomRecommendation {
    /// The name of the room
    pub room: String,

    /// in $`C`$
    pub target_temperature: Float,

    /// in $`C`$, already rounded up
    pub heating_setpoint: Float,
}

/// The largest number of temperatures [`outdoor_range`] returns
pub const MAX_OUTDOOR_POINTS: usize = 10_000;

/// Outdoor temperatures from `start` (inclusive) to `end` (exclusive)
/// every `step` degrees, rounded to one decimal.
///
/// The range is empty if `step` is not positive, if `end` is not
/// after `start`, or if it would hold more than [`MAX_OUTDOOR_POINTS`]
/// temperatures.
pub fn outdoor_range(start: Float, end: Float, step: Float) -> Vec<Float> {
    if !(step > 0.) || !(end > start) {
        return Vec::new();
    }
    let n = ((end - start) / step).ceil();
    if !(n <= MAX_OUTDOOR_POINTS as Float) {
        log::warn!(
            "Outdoor range from {} to {} every {} has too many points",
            start,
            end,
            step
        );
        return Vec::new();
    }
    let n = n as usize;
    (0..n)
        .map(|i| ((start + i as Float * step) * 10.).round() / 10.)
        .filter(|t| *t < end)
        .collect()
}

/// Calculates the setpoint needed to keep a room at `room_setpoint`
/// for each of the `outdoor_temperatures`
pub fn heating_curve(
    solver: &SetpointSolver,
    profile: &RoomThermalProfile,
    room_setpoint: Float,
    outdoor_temperatures: &[Float],
) -> FloorHeatingResult<Vec<CurvePoint>> {
    #[cfg(not(feature = "parallel"))]
    let iter = outdoor_temperatures.iter();
    #[cfg(feature = "parallel")]
    let iter = outdoor_temperatures.par_iter();

    iter.map(|outdoor| {
        let heating_setpoint = solver.solve_heating_setpoint(profile, room_setpoint, *outdoor)?;
        Ok(CurvePoint {
            outdoor_temperature: *outdoor,
            heating_setpoint,
        })
    })
    .collect()
}

/// Calculates the normal (night) and save (day) setpoints of a room
/// for each of the `months`, based on historical outdoor temperatures.
pub fn monthly_setpoints(
    solver: &SetpointSolver,
    profile: &RoomThermalProfile,
    room_setpoint: Float,
    records: &[TemperatureRecord],
    months: &[u8],
    split: &DayNightSplit,
) -> FloorHeatingResult<Vec<MonthlySetpoints>> {
    let climates = monthly_climates(records, months, split)?;

    #[cfg(not(feature = "parallel"))]
    let iter = climates.iter();
    #[cfg(feature = "parallel")]
    let iter = climates.par_iter();

    iter.map(|climate| {
        let normal_setpoint =
            solver.solve_heating_setpoint(profile, room_setpoint, climate.night_minimum)?;
        let save_setpoint =
            solver.solve_heating_setpoint(profile, room_setpoint, climate.day_mean)?;
        Ok(MonthlySetpoints {
            month: climate.month,
            climate: *climate,
            normal_setpoint,
            save_setpoint,
        })
    })
    .collect()
}

/// Calculates the setpoint every room of the building needs in order
/// to reach its own target temperature. Rooms are solved independently
/// and returned in alphabetical order.
pub fn recommend_all_rooms(
    solver: &SetpointSolver,
    outdoor_temp: Float,
) -> FloorHeatingResult<Vec<RoomRecommendation>> {
    let rooms: Vec<(&String, &RoomThermalProfile)> = solver.config().rooms.iter().collect();

    #[cfg(not(feature = "parallel"))]
    let iter = rooms.iter();
    #[cfg(feature = "parallel")]
    let iter = rooms.par_iter();

    iter.map(|(name, profile)| {
        let heating_setpoint = solver.solve_room(name, outdoor_temp)?;
        Ok(RoomRecommendation {
            room: name.to_string(),
            target_temperature: profile.target_temperature,
            heating_setpoint,
        })
    })
    .collect()
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;
    use crate::coefficients::HeatTransferCoefficients;
    use crate::config::BuildingConfig;
    use crate::error::FloorHeatingError;
    use calendar::Date;

    fn config() -> BuildingConfig {
        let coefficients = HeatTransferCoefficients {
            wall: 0.24,
            hinged_window: 0.8,
            sliding_window: 1.0,
            ceiling: 0.15,
            entry_door: 1.6,
            entry_floor: 0.4,
            bathtub: 0.8,
            floor_heating: 2.7,
        };
        BuildingConfig::new(coefficients)
            .with_room(
                "living",
                RoomThermalProfile {
                    wall_area: 27.6,
                    hinged_window_area: 2.1,
                    sliding_window_area: 5.4,
                    floor_heating_area: 21.8,
                    target_temperature: 23.,
                    ..RoomThermalProfile::default()
                },
            )
            .with_room(
                "bedroom",
                RoomThermalProfile {
                    wall_area: 14.,
                    hinged_window_area: 1.8,
                    ceiling_area: 11.,
                    ventilation_flow: 20.,
                    internal_heat_load: 60.,
                    floor_heating_area: 9.,
                    target_temperature: 20.,
                    ..RoomThermalProfile::default()
                },
            )
    }

    #[test]
    fn test_outdoor_range() {
        let r = outdoor_range(-5., 15., 1.);
        assert_eq!(r.len(), 20);
        assert!((r[0] + 5.).abs() < 1e-12);
        assert!((r[19] - 14.).abs() < 1e-12);

        let r = outdoor_range(0., 1., 0.1);
        assert_eq!(r.len(), 10);
        assert!((r[3] - 0.3).abs() < 1e-12, "found {}", r[3]);

        assert!(outdoor_range(0., 1., 0.).is_empty());
        assert!(outdoor_range(1., 0., 1.).is_empty());

        // Far too many points
        assert!(outdoor_range(-5., 15., 1e-30).is_empty());
        assert!(outdoor_range(-5., Float::INFINITY, 1.).is_empty());
        assert_eq!(outdoor_range(0., 5000., 0.5).len(), MAX_OUTDOOR_POINTS);
    }

    #[test]
    fn test_heating_curve() {
        let config = config();
        let solver = SetpointSolver::new(&config);
        let living = config.room("living").unwrap();
        let outdoors = outdoor_range(-5., 15., 1.);
        let curve = heating_curve(&solver, living, 23., &outdoors).unwrap();
        assert_eq!(curve.len(), outdoors.len());

        // Order is kept and the curve never goes up
        for (p, t) in curve.iter().zip(outdoors.iter()) {
            assert!((p.outdoor_temperature - t).abs() < 1e-12);
        }
        for w in curve.windows(2) {
            assert!(w[1].heating_setpoint <= w[0].heating_setpoint, "{:?}", w);
        }
        // at zero degrees
        assert!((curve[5].heating_setpoint - 29.).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_setpoints() {
        let config = config();
        let solver = SetpointSolver::new(&config);
        let living = config.room("living").unwrap();

        let mut records = Vec::new();
        for (month, base) in [(12, 6.), (1, 3.)] {
            for day in 1..=3 {
                for hour in 0..24 {
                    // colder at night
                    let angle = (hour as Float - 3.) / 24. * 2. * std::f64::consts::PI as Float;
                    let t = base + 4. * angle.sin();
                    records.push(TemperatureRecord {
                        date: Date {
                            month,
                            day,
                            hour: hour as Float,
                        },
                        temperature: t,
                    });
                }
            }
        }

        let table = monthly_setpoints(
            &solver,
            living,
            23.,
            &records,
            &[12, 1],
            &DayNightSplit::default(),
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].month, 12);
        assert_eq!(table[1].month, 1);
        for m in table.iter() {
            assert!(m.climate.night_minimum < m.climate.day_mean);
            assert!(m.normal_setpoint >= m.save_setpoint, "{:?}", m);
        }
        // January is colder
        assert!(table[1].normal_setpoint >= table[0].normal_setpoint);

        assert!(matches!(
            monthly_setpoints(&solver, living, 23., &records, &[2], &DayNightSplit::default()),
            Err(FloorHeatingError::EmptyPeriod(_))
        ));
    }

    #[test]
    fn test_recommend_all_rooms() {
        let config = config();
        let solver = SetpointSolver::new(&config);
        let all = recommend_all_rooms(&solver, 0.).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].room, "bedroom");
        assert_eq!(all[1].room, "living");
        assert!((all[1].heating_setpoint - 29.).abs() < 1e-9);
        for r in all.iter() {
            assert!(r.heating_setpoint >= r.target_temperature);
        }

        // A broken room names itself
        let config = config.with_room("attic", RoomThermalProfile::default());
        let solver = SetpointSolver::new(&config);
        let e = recommend_all_rooms(&solver, -4.).unwrap_err();
        assert!(e.to_string().contains("attic"), "found {e}");
    }
}
