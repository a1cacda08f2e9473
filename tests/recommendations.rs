use approx::assert_relative_eq;
use floor_heating::climate::{monthly_climates, parse_hourly_records, HEATING_SEASON};
use floor_heating::recommendation::{
    heating_curve, monthly_setpoints, outdoor_range, recommend_all_rooms,
};
use floor_heating::{BuildingConfig, DayNightSplit, FloorHeatingError, SetpointSolver};

#[cfg(feature = "float")]
type Float = f32;
#[cfg(not(feature = "float"))]
type Float = f64;

#[cfg(feature = "float")]
const TOLERANCE: Float = 1e-4;
#[cfg(not(feature = "float"))]
const TOLERANCE: Float = 1e-9;

const BUILDING: &str = r#"{
    "sensible_heat_exchange_efficiency": 0.8,
    "coefficients": {
        "wall": 0.24,
        "hinged_window": 0.8,
        "sliding_window": 1.0,
        "ceiling": 0.15,
        "entry_door": 1.6,
        "entry_floor": 0.4,
        "bathtub": 0.8,
        "floor_heating": 2.7
    },
    "rooms": {
        "living": {
            "wall_area": 27.6,
            "hinged_window_area": 2.1,
            "sliding_window_area": 5.4,
            "ceiling_area": 0.0,
            "entry_door_area": 0.0,
            "entry_floor_perimeter": 0.0,
            "bathtub_area": 0.0,
            "ventilation_flow": 40.0,
            "internal_heat_load": 120.0,
            "floor_heating_area": 21.8,
            "target_temperature": 23.0
        },
        "bathroom": {
            "wall_area": 6.2,
            "hinged_window_area": 0.5,
            "sliding_window_area": 0.0,
            "ceiling_area": 3.3,
            "entry_door_area": 0.0,
            "entry_floor_perimeter": 0.0,
            "bathtub_area": 1.4,
            "ventilation_flow": 20.0,
            "internal_heat_load": 0.0,
            "floor_heating_area": 2.0,
            "target_temperature": 22.0
        },
        "entrance": {
            "wall_area": 4.0,
            "hinged_window_area": 0.0,
            "sliding_window_area": 0.0,
            "ceiling_area": 0.0,
            "entry_door_area": 1.9,
            "entry_floor_perimeter": 2.6,
            "bathtub_area": 0.0,
            "ventilation_flow": 0.0,
            "internal_heat_load": 0.0,
            "floor_heating_area": 3.0,
            "target_temperature": 18.0
        }
    }
}"#;

/// The setpoint of a room, worked out by hand
fn expected_setpoint(config: &BuildingConfig, room: &str, outdoor: Float) -> Float {
    let p = config.room(room).unwrap();
    let c = &config.coefficients;
    let envelope = p.wall_area * c.wall
        + p.hinged_window_area * c.hinged_window
        + p.sliding_window_area * c.sliding_window
        + p.ceiling_area * c.ceiling
        + p.entry_door_area * c.entry_door
        + p.entry_floor_perimeter * c.entry_floor
        + p.bathtub_area * c.bathtub * 0.6;
    let ventilation = 0.33 * p.ventilation_flow * config.sensible_heat_exchange_efficiency;
    let demand = (envelope + ventilation) * (p.target_temperature - outdoor) - p.internal_heat_load;
    let setpoint = if demand > 0. {
        p.target_temperature + demand / (p.floor_heating_area * c.floor_heating)
    } else {
        p.target_temperature
    };
    setpoint.ceil()
}

/// An hourly series for December and January: colder at night,
/// and January colder than December
fn hourly_series() -> String {
    let mut text = String::from("Downloaded at: 2023/02/01 10:00:00\ndate,temperature(C)\n");
    for (year, month, base) in [(2021, 12, 7.), (2022, 1, 4.)] {
        for day in 1..=5 {
            for hour in 0..24 {
                let swing: Float = if (9..18).contains(&hour) { 4. } else { -3. };
                let t = base + swing + (day as Float) * 0.1;
                text.push_str(&format!("{year}/{month}/{day} {hour}:00:00,{t:.1}\n"));
            }
        }
    }
    text
}

#[test]
fn test_load_building() {
    let config = BuildingConfig::from_json(BUILDING).unwrap();
    assert_relative_eq!(config.sensible_heat_exchange_efficiency, 0.8);
    assert_eq!(config.rooms.len(), 3);

    let e = config.room("kitchen").unwrap_err();
    assert!(matches!(e, FloorHeatingError::UnknownRoom(_)));

    // From a file
    let path = std::env::temp_dir().join(format!("floor_heating_{}.json", std::process::id()));
    std::fs::write(&path, BUILDING).unwrap();
    let from_file = BuildingConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(from_file.rooms.len(), 3);
    assert_relative_eq!(
        from_file.room("living").unwrap().wall_area,
        config.room("living").unwrap().wall_area
    );

    let e = BuildingConfig::from_file(&path).unwrap_err();
    assert!(matches!(e, FloorHeatingError::InvalidProfile { .. }), "found {e}");
}

#[test]
fn test_recommend_all_rooms() {
    let config = BuildingConfig::from_json(BUILDING).unwrap();
    let solver = SetpointSolver::new(&config);

    for outdoor in [-3., 2., 8.] {
        let all = recommend_all_rooms(&solver, outdoor).unwrap();
        let names: Vec<&str> = all.iter().map(|r| r.room.as_str()).collect();
        assert_eq!(names, vec!["bathroom", "entrance", "living"]);

        for r in all.iter() {
            let exp = expected_setpoint(&config, &r.room, outdoor);
            assert_relative_eq!(r.heating_setpoint, exp);
            assert!(r.heating_setpoint >= r.target_temperature);

            // The same as solving the room on its own
            let alone = solver.solve_room(&r.room, outdoor).unwrap();
            assert_relative_eq!(r.heating_setpoint, alone);
        }
    }
}

#[test]
fn test_heating_curve() {
    let config = BuildingConfig::from_json(BUILDING).unwrap();
    let solver = SetpointSolver::new(&config);
    let bathroom = config.room("bathroom").unwrap();

    let outdoors = outdoor_range(-5., 15., 1.);
    assert_eq!(outdoors.len(), 20);
    let curve = heating_curve(&solver, bathroom, 22., &outdoors).unwrap();
    for point in curve.iter() {
        let exp = expected_setpoint(&config, "bathroom", point.outdoor_temperature);
        assert_relative_eq!(point.heating_setpoint, exp);
    }
    assert!(curve.first().unwrap().heating_setpoint > curve.last().unwrap().heating_setpoint);
}

#[test]
fn test_climate_to_monthly_setpoints() {
    let config = BuildingConfig::from_json(BUILDING).unwrap();
    let solver = SetpointSolver::new(&config);
    let living = config.room("living").unwrap();

    let records = parse_hourly_records(&hourly_series()).unwrap();
    assert_eq!(records.len(), 2 * 5 * 24);

    let split = DayNightSplit::default();
    let climates = monthly_climates(&records, &[12, 1], &split).unwrap();
    // December, coldest night on the 1st
    assert_relative_eq!(climates[0].night_minimum, 4.1, epsilon = TOLERANCE);
    assert_relative_eq!(climates[0].day_mean, 11.3, epsilon = TOLERANCE);
    // January
    assert_relative_eq!(climates[1].night_minimum, 1.1, epsilon = TOLERANCE);
    assert_relative_eq!(climates[1].day_mean, 8.3, epsilon = TOLERANCE);

    let table = monthly_setpoints(&solver, living, 23., &records, &[12, 1], &split).unwrap();
    assert_eq!(table.len(), 2);
    for (m, c) in table.iter().zip(climates.iter()) {
        assert_eq!(m.month, c.month);
        let normal = expected_setpoint(&config, "living", c.night_minimum);
        let save = expected_setpoint(&config, "living", c.day_mean);
        assert_relative_eq!(m.normal_setpoint, normal);
        assert_relative_eq!(m.save_setpoint, save);
        assert!(m.normal_setpoint >= m.save_setpoint);
    }

    // Only two months of data in the whole season
    let e = monthly_setpoints(&solver, living, 23., &records, &HEATING_SEASON, &split).unwrap_err();
    assert!(matches!(e, FloorHeatingError::EmptyPeriod(_)), "found {e}");
}
