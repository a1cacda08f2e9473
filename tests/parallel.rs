//! Run with `cargo test --features parallel`
#![cfg(feature = "parallel")]

use floor_heating::recommendation::{heating_curve, outdoor_range, recommend_all_rooms};
use floor_heating::{
    BuildingConfig, Float, HeatTransferCoefficients, RoomThermalProfile, SetpointSolver,
    SolveStrategy,
};

fn building() -> BuildingConfig {
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
    let mut config = BuildingConfig::new(coefficients);
    for i in 0..40 {
        let size = 1. + i as Float / 10.;
        config = config.with_room(
            format!("room_{:02}", i),
            RoomThermalProfile {
                wall_area: 12. * size,
                hinged_window_area: 1.5 * size,
                ceiling_area: 8. * size,
                ventilation_flow: 25. * size,
                internal_heat_load: 50.,
                floor_heating_area: 8. * size,
                target_temperature: 20. + (i % 4) as Float,
                ..RoomThermalProfile::default()
            },
        );
    }
    config
}

#[test]
fn test_parallel_tables_keep_order() {
    let config = building();
    for strategy in [SolveStrategy::ClosedForm, SolveStrategy::DirectSearch] {
        let solver = SetpointSolver::new(&config).with_strategy(strategy);

        let all = recommend_all_rooms(&solver, -2.).unwrap();
        assert_eq!(all.len(), config.rooms.len());
        for (r, name) in all.iter().zip(config.rooms.keys()) {
            assert_eq!(&r.room, name);
            let alone = solver.solve_room(name, -2.).unwrap();
            assert_eq!(r.heating_setpoint, alone, "{strategy:?}: {name}");
        }

        let profile = config.room("room_10").unwrap();
        let outdoors = outdoor_range(-10., 15., 0.5);
        let curve = heating_curve(&solver, profile, 22., &outdoors).unwrap();
        assert_eq!(curve.len(), outdoors.len());
        for (p, t) in curve.iter().zip(outdoors.iter()) {
            assert_eq!(p.outdoor_temperature, *t);
            let alone = solver.solve_heating_setpoint(profile, 22., *t).unwrap();
            assert_eq!(p.heating_setpoint, alone);
        }
    }
}
