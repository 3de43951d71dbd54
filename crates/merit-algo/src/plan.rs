//! Production plans: the request-level entry point and its output records.

use serde::Serialize;
use tracing::{info, warn};
use web_time::Instant;

use merit_core::{ErrorKind, Euros, Fleet, LoadRequest, Megawatts, MeritResult};

use crate::dispatch::{DispatchConfig, DispatchEngine, DispatchSolution};
use crate::merit_order::fleet_merit_order;

/// Output of one plant in a production plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantOutput {
    pub name: String,
    /// Allocated load in MW, 0 when the plant stays off
    pub load: Megawatts,
}

/// One record per plant, in the fleet's input order.
pub fn format_production_plan(fleet: &Fleet, solution: &DispatchSolution) -> Vec<PlantOutput> {
    fleet
        .iter()
        .map(|plant| PlantOutput {
            name: plant.name.clone(),
            load: solution.load_of(plant.id),
        })
        .collect()
}

/// Production plan for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionPlan {
    pub outputs: Vec<PlantOutput>,
    /// Load after truncation to whole megawatts
    pub requested_load: Megawatts,
    pub total_load: Megawatts,
    pub total_cost: Euros,
    pub solve_time_ms: f64,
}

impl ProductionPlan {
    /// The plan as the wire format expects it: a bare array of records.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.outputs)
    }
}

/// Validate a request, dispatch its fleet and format the result.
pub fn plan_production(
    request: &LoadRequest,
    config: &DispatchConfig,
) -> MeritResult<ProductionPlan> {
    let start = Instant::now();
    let fleet = Fleet::from_request(request)?;
    let load = request.load_mw();
    info!(
        load = load.value(),
        plants = fleet.len(),
        "planning production"
    );

    let ordered = fleet_merit_order(&fleet);
    let solution = match DispatchEngine::new(config.clone()).solve(load, &ordered) {
        Ok(solution) => solution,
        Err(err) => {
            if matches!(err.kind(), ErrorKind::Infeasible | ErrorKind::Timeout) {
                warn!(load = load.value(), error = %err, "no production plan");
            }
            return Err(err);
        }
    };

    let total_cost = solution.total_cost(&ordered)?;
    let plan = ProductionPlan {
        outputs: format_production_plan(&fleet, &solution),
        requested_load: load,
        total_load: solution.total(),
        total_cost,
        solve_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };
    info!(
        load = plan.total_load.value(),
        cost = plan.total_cost.value(),
        running = solution.len(),
        "production plan ready"
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use merit_core::{MeritError, PlantSpec, PlantType};

    fn request(load: f64) -> LoadRequest {
        LoadRequest::new(load)
            .with_fuel("gas(euro/MWh)", 13.4)
            .with_fuel("kerosine(euro/MWh)", 50.8)
            .with_fuel("co2(euro/ton)", 20.0)
            .with_fuel("wind(%)", 60.0)
            .with_plant(PlantSpec::new("gasfiredbig1", PlantType::GasFired, 0.53, 100.0, 460.0))
            .with_plant(PlantSpec::new("tj1", PlantType::TurboJet, 0.3, 0.0, 16.0))
            .with_plant(PlantSpec::new("windpark1", PlantType::WindTurbine, 1.0, 0.0, 150.0))
    }

    #[test]
    fn records_follow_input_order_with_zeros() {
        let plan = plan_production(&request(200.0), &DispatchConfig::default()).unwrap();
        let names: Vec<&str> = plan.outputs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["gasfiredbig1", "tj1", "windpark1"]);

        assert!((plan.outputs[0].load.value() - 110.0).abs() < 1e-6);
        assert_eq!(plan.outputs[1].load, Megawatts::ZERO);
        assert!((plan.outputs[2].load.value() - 90.0).abs() < 1e-6);
        assert!((plan.total_load.value() - 200.0).abs() < 1e-2);
    }

    #[test]
    fn fractional_load_is_truncated() {
        let plan = plan_production(&request(200.9), &DispatchConfig::default()).unwrap();
        assert_eq!(plan.requested_load, Megawatts(200.0));
    }

    #[test]
    fn json_is_bare_record_array() {
        let plan = plan_production(&request(90.0), &DispatchConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2]["name"], "windpark1");
        assert_eq!(records[0]["load"], 0.0);
    }

    #[test]
    fn invalid_request_is_validation_error() {
        let err = plan_production(&request(-1.0), &DispatchConfig::default()).unwrap_err();
        assert!(matches!(err, MeritError::Validation { .. }));
    }

    #[test]
    fn loose_tolerance_plan_is_priced() {
        // Wind covers 99 MW and leaves 50, just under the turbojet's floor.
        let request = LoadRequest::new(149.0)
            .with_fuel("kerosine(euro/MWh)", 50.8)
            .with_fuel("wind(%)", 60.0)
            .with_plant(PlantSpec::new("windpark1", PlantType::WindTurbine, 1.0, 0.0, 165.0))
            .with_plant(PlantSpec::new("tj1", PlantType::TurboJet, 0.3, 50.3, 200.0));
        let config = DispatchConfig::default().with_tolerance(Megawatts(0.5));

        let plan = plan_production(&request, &config).unwrap();
        assert_eq!(plan.outputs[1].load, Megawatts(50.3));
        assert!((plan.total_load.value() - 149.0).abs() <= 0.5);
        assert!((plan.total_cost.value() - 50.3 * 50.8 / 0.3).abs() < 1e-6);
    }

    #[test]
    fn oversized_load_is_infeasible() {
        let err = plan_production(&request(10_000.0), &DispatchConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Infeasible);
    }
}
