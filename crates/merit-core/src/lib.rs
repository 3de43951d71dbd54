//! # merit-core: Production Planning Domain Model
//!
//! Data structures shared by every merit crate: typed units, the error
//! taxonomy, the power plant model with its cost functions, and the request
//! types that a production-plan payload deserializes into.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use merit_core::*;
//!
//! let request = LoadRequest::from_json_str(r#"{
//!     "load": 130,
//!     "fuels": {"gas(euro/MWh)": 13.4, "co2(euro/ton)": 20, "wind(%)": 60},
//!     "powerplants": [
//!         {"name": "gas1", "type": "gasfired", "efficiency": 0.5, "pmin": 20, "pmax": 100},
//!         {"name": "wind1", "type": "windturbine", "efficiency": 1, "pmin": 0, "pmax": 150}
//!     ]
//! }"#)?;
//!
//! let fleet = Fleet::from_request(&request)?;
//! for plant in fleet.iter() {
//!     println!("{}: {}", plant.name, plant.cost_per_mwh());
//! }
//! # Ok::<(), MeritError>(())
//! ```
//!
//! ## Core Data Structures
//!
//! - [`Plant`] - one generation unit, its envelope and cost function
//! - [`PlantKind`] - priced technology (gas-fired, turbojet, wind)
//! - [`Fleet`] - the priced plants of one request, in input order
//! - [`LoadRequest`] - the raw payload: load, fuel table, plant specs
//! - [`PlantId`] - position of a plant in the request; the key of a dispatch
//!
//! ## Modules
//!
//! - [`units`] - `Megawatts`, `EurosPerMegawattHour`, `Euros`, `Percent`
//! - [`error`] - [`MeritError`] and its [`ErrorKind`] classification
//! - [`fuel`] - the fuel price table
//! - [`plant`] - plant model
//! - [`request`] - payload types and schema validation
//! - [`fleet`] - fleet construction

use serde::{Deserialize, Serialize};

pub mod error;
pub mod fleet;
pub mod fuel;
pub mod plant;
pub mod request;
pub mod units;

pub use error::{ErrorKind, MeritError, MeritResult};
pub use fleet::Fleet;
pub use fuel::{FuelKind, FuelPrices};
pub use plant::{Plant, PlantKind, PlantType, CO2_TONS_PER_MWH, ENVELOPE_TOLERANCE};
pub use request::{LoadRequest, PlantSpec};
pub use units::{Euros, EurosPerMegawattHour, Megawatts, Percent};

// Newtype wrapper for plant IDs for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(usize);

impl PlantId {
    #[inline]
    pub fn new(value: usize) -> Self {
        PlantId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }

    /// Path of this plant inside a request payload, for error reporting
    pub fn field(&self) -> String {
        format!("powerplants[{}]", self.0)
    }
}

impl std::fmt::Display for PlantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Plant#{}", self.0)
    }
}
