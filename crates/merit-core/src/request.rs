//! Production-plan request payload
//!
//! The JSON shape is:
//!
//! ```json
//! {
//!   "load": 480,
//!   "fuels": {"gas(euro/MWh)": 13.4, "kerosine(euro/MWh)": 50.8, "co2(euro/ton)": 20, "wind(%)": 60},
//!   "powerplants": [
//!     {"name": "gasfiredbig1", "type": "gasfired", "efficiency": 0.53, "pmin": 100, "pmax": 460}
//!   ]
//! }
//! ```
//!
//! [`LoadRequest::validate`] applies the schema rules of the service boundary
//! and reports the first offending field.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MeritError, MeritResult};
use crate::fuel::FuelPrices;
use crate::plant::PlantType;
use crate::units::Megawatts;

/// One plant as submitted, before pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSpec {
    pub name: String,
    /// Technology name: `gasfired`, `turbojet` or `windturbine`
    #[serde(rename = "type")]
    pub plant_type: String,
    pub efficiency: f64,
    pub pmin: f64,
    pub pmax: f64,
}

impl PlantSpec {
    pub fn new(
        name: impl Into<String>,
        plant_type: PlantType,
        efficiency: f64,
        pmin: f64,
        pmax: f64,
    ) -> Self {
        Self {
            name: name.into(),
            plant_type: plant_type.as_str().to_string(),
            efficiency,
            pmin,
            pmax,
        }
    }

    /// Parse the technology name
    pub fn parsed_type(&self, field: &str) -> MeritResult<PlantType> {
        self.plant_type.parse::<PlantType>().map_err(|msg| {
            MeritError::validation(
                format!("{field}.type"),
                format!("{msg}; expected gasfired, turbojet or windturbine"),
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadRequest {
    /// Requested load in MW
    pub load: f64,
    /// Fuel table, keyed by wire name
    #[serde(default)]
    pub fuels: BTreeMap<String, f64>,
    #[serde(rename = "powerplants", default)]
    pub plants: Vec<PlantSpec>,
}

impl LoadRequest {
    pub fn new(load: f64) -> Self {
        Self {
            load,
            fuels: BTreeMap::new(),
            plants: Vec::new(),
        }
    }

    /// Add a fuel table entry, builder style
    pub fn with_fuel(mut self, key: impl Into<String>, value: f64) -> Self {
        self.fuels.insert(key.into(), value);
        self
    }

    /// Add a plant, builder style
    pub fn with_plant(mut self, spec: PlantSpec) -> Self {
        self.plants.push(spec);
        self
    }

    pub fn from_json_str(json: &str) -> MeritResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> MeritResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Requested load in whole megawatts
    pub fn load_mw(&self) -> Megawatts {
        Megawatts(self.load).whole()
    }

    /// Check the payload against the request schema.
    pub fn validate(&self) -> MeritResult<()> {
        if !self.load.is_finite() || self.load < 0.0 {
            return Err(MeritError::validation(
                "load",
                format!("the load to distribute cannot be less than 0, got {}", self.load),
            ));
        }

        if self.fuels.is_empty() {
            return Err(MeritError::validation(
                "fuels",
                "at least one fuel entry is required",
            ));
        }
        FuelPrices::from_raw(&self.fuels)?;

        if self.plants.is_empty() {
            return Err(MeritError::validation(
                "powerplants",
                "at least one power plant is required",
            ));
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (index, spec) in self.plants.iter().enumerate() {
            let field = format!("powerplants[{index}]");

            if spec.name.trim().is_empty() {
                return Err(MeritError::validation(
                    format!("{field}.name"),
                    "name must not be empty",
                ));
            }
            if let Some(first) = seen.insert(spec.name.as_str(), index) {
                return Err(MeritError::validation(
                    format!("{field}.name"),
                    format!("duplicate plant name '{}' (also powerplants[{first}])", spec.name),
                ));
            }
            spec.parsed_type(&field)?;
            if !spec.efficiency.is_finite() || spec.efficiency > 1.0 {
                return Err(MeritError::validation(
                    format!("{field}.efficiency"),
                    format!("must be <= 1, got {}", spec.efficiency),
                ));
            }
            if !spec.pmin.is_finite() || spec.pmin < 0.0 {
                return Err(MeritError::validation(
                    format!("{field}.pmin"),
                    format!("must be >= 0, got {}", spec.pmin),
                ));
            }
            if !spec.pmax.is_finite() || spec.pmax < spec.pmin {
                return Err(MeritError::validation(
                    format!("{field}.pmax"),
                    format!("must be >= pmin ({}), got {}", spec.pmin, spec.pmax),
                ));
            }
        }

        Ok(())
    }
}
