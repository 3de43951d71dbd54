//! Merit-order sorting
//!
//! Ranks plants from cheapest to most expensive marginal cost. The sort is
//! stable: plants with equal cost keep their input order, which keeps every
//! dispatch deterministic.

use merit_core::{Fleet, Plant};

/// Plants in ascending marginal cost, ties in input order.
///
/// The input slice is left untouched; the engine indexes into the returned
/// sequence, so callers pass the same ordering to every recursive solve.
pub fn merit_order(plants: &[Plant]) -> Vec<&Plant> {
    let mut ordered: Vec<&Plant> = plants.iter().collect();
    ordered.sort_by(|a, b| a.merit_cmp(b));
    ordered
}

/// Merit order of a whole fleet
pub fn fleet_merit_order(fleet: &Fleet) -> Vec<&Plant> {
    merit_order(fleet.plants())
}

#[cfg(test)]
mod tests {
    use super::*;
    use merit_core::{EurosPerMegawattHour, Megawatts, Percent, PlantId, PlantKind};

    fn turbojet(id: usize, price: f64) -> Plant {
        Plant::new(
            PlantId::new(id),
            format!("tj{id}"),
            1.0,
            Megawatts(0.0),
            Megawatts(10.0),
            PlantKind::TurboJet {
                fuel_price: EurosPerMegawattHour(price),
            },
        )
        .unwrap()
    }

    fn wind(id: usize) -> Plant {
        Plant::new(
            PlantId::new(id),
            format!("wind{id}"),
            1.0,
            Megawatts(0.0),
            Megawatts(10.0),
            PlantKind::WindTurbine {
                availability: Percent(50.0),
            },
        )
        .unwrap()
    }

    fn ids(plants: &[&Plant]) -> Vec<usize> {
        plants.iter().map(|p| p.id.value()).collect()
    }

    #[test]
    fn sorts_by_cost_per_mwh() {
        let plants = vec![turbojet(0, 30.0), turbojet(1, 10.0), wind(2), turbojet(3, 20.0)];
        assert_eq!(ids(&merit_order(&plants)), vec![2, 1, 3, 0]);
    }

    #[test]
    fn ties_keep_input_order() {
        let plants = vec![turbojet(0, 10.0), wind(1), turbojet(2, 10.0), wind(3)];
        assert_eq!(ids(&merit_order(&plants)), vec![1, 3, 0, 2]);
    }

    #[test]
    fn input_is_not_reordered() {
        let plants = vec![turbojet(0, 30.0), turbojet(1, 10.0)];
        let _ = merit_order(&plants);
        assert_eq!(plants[0].id, PlantId::new(0));
        assert_eq!(plants[1].id, PlantId::new(1));
    }

    #[test]
    fn empty_fleet_gives_empty_order() {
        assert!(merit_order(&[]).is_empty());
    }
}
