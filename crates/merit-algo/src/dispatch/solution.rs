use std::collections::BTreeMap;

use serde::Serialize;

use merit_core::{Euros, Megawatts, MeritResult, Plant, PlantId};

/// Load allocated to each running plant.
///
/// Only plants with a nonzero allocation appear. Every branch of the
/// transition search builds its own value; nothing is shared between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DispatchSolution {
    allocations: BTreeMap<PlantId, Megawatts>,
}

impl DispatchSolution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the load of a plant, replacing any previous value
    pub fn insert(&mut self, plant: PlantId, load: Megawatts) {
        self.allocations.insert(plant, load);
    }

    pub fn get(&self, plant: PlantId) -> Option<Megawatts> {
        self.allocations.get(&plant).copied()
    }

    /// Allocated load, zero for plants that stay off
    pub fn load_of(&self, plant: PlantId) -> Megawatts {
        self.get(plant).unwrap_or(Megawatts::ZERO)
    }

    pub fn contains(&self, plant: PlantId) -> bool {
        self.allocations.contains_key(&plant)
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlantId, Megawatts)> + '_ {
        self.allocations.iter().map(|(id, load)| (*id, *load))
    }

    /// Sum of all allocations
    pub fn total(&self) -> Megawatts {
        self.allocations.values().sum()
    }

    /// Hourly cost of the allocation.
    ///
    /// Fails if any allocated load lies outside its plant's envelope.
    pub fn total_cost(&self, plants: &[&Plant]) -> MeritResult<Euros> {
        plants
            .iter()
            .filter_map(|plant| self.get(plant.id).map(|load| plant.cost_for_load(load)))
            .sum()
    }
}
