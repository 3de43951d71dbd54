//! Fleet construction
//!
//! Turns the plant specs of a [`LoadRequest`] into priced [`Plant`]s. Each
//! spec is priced through [`PlantType::apply_fuel_pricing`], so every plant
//! leaves the builder with its fuel, CO2 or wind inputs already fixed.

use crate::error::MeritResult;
use crate::fuel::FuelPrices;
use crate::plant::Plant;
use crate::request::{LoadRequest, PlantSpec};
use crate::units::Megawatts;
use crate::PlantId;

/// Priced plants of a single request, in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fleet {
    plants: Vec<Plant>,
}

impl Fleet {
    /// Validate the request and price its plants.
    pub fn from_request(request: &LoadRequest) -> MeritResult<Self> {
        request.validate()?;
        let fuels = FuelPrices::from_raw(&request.fuels)?;
        Self::from_specs(&request.plants, &fuels)
    }

    /// Price plant specs against an already parsed fuel table.
    pub fn from_specs(specs: &[PlantSpec], fuels: &FuelPrices) -> MeritResult<Self> {
        let plants = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let id = PlantId::new(index);
                let field = id.field();
                let kind = spec.parsed_type(&field)?.apply_fuel_pricing(fuels, &field)?;
                Plant::new(
                    id,
                    spec.name.clone(),
                    spec.efficiency,
                    Megawatts(spec.pmin),
                    Megawatts(spec.pmax),
                    kind,
                )
            })
            .collect::<MeritResult<Vec<_>>>()?;
        Ok(Self { plants })
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Plant> {
        self.plants.iter()
    }

    pub fn get(&self, id: PlantId) -> Option<&Plant> {
        self.plants.get(id.value())
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Combined effective capacity of every plant
    pub fn total_capacity(&self) -> Megawatts {
        self.plants.iter().map(Plant::max_power_when_on).sum()
    }
}

impl<'a> IntoIterator for &'a Fleet {
    type Item = &'a Plant;
    type IntoIter = std::slice::Iter<'a, Plant>;

    fn into_iter(self) -> Self::IntoIter {
        self.plants.iter()
    }
}
