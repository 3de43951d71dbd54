//! Reference payloads parse, validate and price cleanly

use std::path::PathBuf;

use merit_core::{Fleet, LoadRequest, Megawatts, PlantKind, PlantType};

fn payload(name: &str) -> LoadRequest {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test_data/payloads")
        .join(name);
    LoadRequest::from_path(&path).unwrap()
}

#[test]
fn reference_payloads_build_fleets() {
    for name in ["payload1.json", "payload2.json", "payload3.json"] {
        let request = payload(name);
        request.validate().unwrap();
        let fleet = Fleet::from_request(&request).unwrap();
        assert_eq!(fleet.len(), 6, "{name}");
        assert_eq!(fleet.plants()[3].plant_type(), PlantType::TurboJet);
    }
}

#[test]
fn payload2_wind_parks_are_becalmed() {
    let fleet = Fleet::from_request(&payload("payload2.json")).unwrap();
    let wind: Vec<_> = fleet
        .iter()
        .filter(|plant| matches!(plant.kind, PlantKind::WindTurbine { .. }))
        .collect();
    assert_eq!(wind.len(), 2);
    for plant in wind {
        assert_eq!(plant.max_power_when_on(), Megawatts::ZERO);
    }
}

#[test]
fn payload1_gas_costs_rank_big_units_first() {
    let fleet = Fleet::from_request(&payload("payload1.json")).unwrap();
    let big = fleet.plants()[0].cost_per_mwh();
    let smaller = fleet.plants()[2].cost_per_mwh();
    let turbojet = fleet.plants()[3].cost_per_mwh();
    assert!(big < smaller);
    assert!(smaller < turbojet);
    assert!((big.value() - (13.4 / 0.53 + 0.3 * 20.0)).abs() < 1e-9);
}
