//! Power plant model and cost functions
//!
//! A [`Plant`] is either off or running inside its operating envelope
//! `[min_power_when_on, max_power_when_on]`. The envelope and the marginal
//! cost depend on the plant's [`PlantKind`]:
//!
//! | Kind | Envelope | Cost per MWh |
//! |------|----------|--------------|
//! | [`PlantKind::GasFired`] | `[pmin, pmax]` | `fuel / efficiency + 0.3 × co2` |
//! | [`PlantKind::TurboJet`] | `[pmin, pmax]` | `fuel / efficiency` |
//! | [`PlantKind::WindTurbine`] | `[pmax × wind%, pmax × wind%]` | `0` |
//!
//! A wind turbine runs at exactly its available output or not at all.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MeritError, MeritResult};
use crate::fuel::{FuelKind, FuelPrices};
use crate::units::{Euros, EurosPerMegawattHour, Megawatts, Percent};
use crate::PlantId;

/// Tons of CO2 emitted per MWh generated by a gas-fired plant
pub const CO2_TONS_PER_MWH: f64 = 0.3;

/// Slack allowed when checking a load against a plant envelope
pub const ENVELOPE_TOLERANCE: Megawatts = Megawatts(1e-2);

/// Plant technology as named in request payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantType {
    GasFired,
    TurboJet,
    WindTurbine,
}

impl PlantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlantType::GasFired => "gasfired",
            PlantType::TurboJet => "turbojet",
            PlantType::WindTurbine => "windturbine",
        }
    }

    /// Whether output cost depends on fuel efficiency
    pub fn burns_fuel(&self) -> bool {
        !matches!(self, PlantType::WindTurbine)
    }

    /// Price this technology from the request's fuel table.
    ///
    /// `field` is the path of the plant in the request, used in errors.
    pub fn apply_fuel_pricing(&self, fuels: &FuelPrices, field: &str) -> MeritResult<PlantKind> {
        match self {
            PlantType::GasFired => Ok(PlantKind::GasFired {
                fuel_price: EurosPerMegawattHour(fuels.require(FuelKind::Gas, field)?),
                co2_price: fuels.require(FuelKind::Co2, field)?,
            }),
            PlantType::TurboJet => Ok(PlantKind::TurboJet {
                fuel_price: EurosPerMegawattHour(fuels.require(FuelKind::Kerosine, field)?),
            }),
            PlantType::WindTurbine => Ok(PlantKind::WindTurbine {
                availability: Percent(fuels.require(FuelKind::Wind, field)?),
            }),
        }
    }
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlantType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gasfired" => Ok(PlantType::GasFired),
            "turbojet" => Ok(PlantType::TurboJet),
            "windturbine" => Ok(PlantType::WindTurbine),
            _ => Err(format!("unexpected power plant type {s}")),
        }
    }
}

/// Priced plant technology
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlantKind {
    /// Gas turbine: pays for fuel and for CO2 allowances (€/ton)
    GasFired {
        fuel_price: EurosPerMegawattHour,
        co2_price: f64,
    },
    /// Kerosine turbojet: pays for fuel only
    TurboJet { fuel_price: EurosPerMegawattHour },
    /// Wind park: output capped by availability, free to run
    WindTurbine { availability: Percent },
}

impl PlantKind {
    pub fn plant_type(&self) -> PlantType {
        match self {
            PlantKind::GasFired { .. } => PlantType::GasFired,
            PlantKind::TurboJet { .. } => PlantType::TurboJet,
            PlantKind::WindTurbine { .. } => PlantType::WindTurbine,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    /// Fuel-to-power conversion ratio (ignored for wind)
    pub efficiency: f64,
    /// Minimum stable output when running
    pub pmin: Megawatts,
    /// Installed capacity
    pub pmax: Megawatts,
    pub kind: PlantKind,
}

impl Plant {
    /// Create a plant, checking its static parameters.
    ///
    /// Fuel-burning plants need `0 < efficiency <= 1`; wind availability must
    /// lie in 0–100 %.
    pub fn new(
        id: PlantId,
        name: impl Into<String>,
        efficiency: f64,
        pmin: Megawatts,
        pmax: Megawatts,
        kind: PlantKind,
    ) -> MeritResult<Self> {
        let name = name.into();
        let field = id.field();

        if name.trim().is_empty() {
            return Err(MeritError::validation(
                format!("{field}.name"),
                "name must not be empty",
            ));
        }
        if !pmin.is_finite() || pmin < Megawatts::ZERO {
            return Err(MeritError::validation(
                format!("{field}.pmin"),
                format!("must be a finite value >= 0, got {}", pmin.value()),
            ));
        }
        if !pmax.is_finite() || pmax < pmin {
            return Err(MeritError::validation(
                format!("{field}.pmax"),
                format!(
                    "must be a finite value >= pmin ({}), got {}",
                    pmin.value(),
                    pmax.value()
                ),
            ));
        }
        if kind.plant_type().burns_fuel() && !(efficiency > 0.0 && efficiency <= 1.0) {
            return Err(MeritError::validation(
                format!("{field}.efficiency"),
                format!("must be in (0, 1] for fuel-burning plants, got {efficiency}"),
            ));
        }
        match kind {
            PlantKind::GasFired {
                fuel_price,
                co2_price,
            } => {
                if !fuel_price.is_finite() || !co2_price.is_finite() {
                    return Err(MeritError::validation(field, "fuel prices must be finite"));
                }
            }
            PlantKind::TurboJet { fuel_price } => {
                if !fuel_price.is_finite() {
                    return Err(MeritError::validation(field, "fuel price must be finite"));
                }
            }
            PlantKind::WindTurbine { availability } => {
                if !(0.0..=100.0).contains(&availability.value()) {
                    return Err(MeritError::validation(
                        format!("fuels.{}", FuelKind::Wind),
                        format!(
                            "wind availability must be within 0-100 %, got {}",
                            availability.value()
                        ),
                    ));
                }
            }
        }

        Ok(Self {
            id,
            name,
            efficiency,
            pmin,
            pmax,
            kind,
        })
    }

    pub fn plant_type(&self) -> PlantType {
        self.kind.plant_type()
    }

    /// Marginal cost of one more MWh
    pub fn cost_per_mwh(&self) -> EurosPerMegawattHour {
        match self.kind {
            PlantKind::GasFired {
                fuel_price,
                co2_price,
            } => fuel_price / self.efficiency + EurosPerMegawattHour(CO2_TONS_PER_MWH * co2_price),
            PlantKind::TurboJet { fuel_price } => fuel_price / self.efficiency,
            PlantKind::WindTurbine { .. } => EurosPerMegawattHour::ZERO,
        }
    }

    /// Lowest output the plant can run at
    pub fn min_power_when_on(&self) -> Megawatts {
        match self.kind {
            PlantKind::WindTurbine { availability } => availability.of(self.pmax),
            _ => self.pmin,
        }
    }

    /// Highest output the plant can run at
    pub fn max_power_when_on(&self) -> Megawatts {
        match self.kind {
            PlantKind::WindTurbine { availability } => availability.of(self.pmax),
            _ => self.pmax,
        }
    }

    /// Whether `load` lies inside the operating envelope, give or take `tolerance`
    pub fn admits(&self, load: Megawatts, tolerance: Megawatts) -> bool {
        load + tolerance >= self.min_power_when_on() && load <= self.max_power_when_on() + tolerance
    }

    /// Cost of running one hour at `load`.
    ///
    /// Loads outside the envelope are rejected rather than priced.
    pub fn cost_for_load(&self, load: Megawatts) -> MeritResult<Euros> {
        if !self.admits(load, ENVELOPE_TOLERANCE) {
            return Err(MeritError::validation(
                format!("{}.load", self.id.field()),
                format!(
                    "{} cannot operate at {:.3} MW (envelope {:.3}-{:.3} MW)",
                    self.name,
                    load.value(),
                    self.min_power_when_on().value(),
                    self.max_power_when_on().value()
                ),
            ));
        }
        Ok(load * self.cost_per_mwh())
    }

    /// Merit-order comparison: cheaper first, input order on ties
    pub fn merit_cmp(&self, other: &Plant) -> Ordering {
        self.cost_per_mwh()
            .total_cmp(&other.cost_per_mwh())
            .then_with(|| self.id.cmp(&other.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gas(id: usize, efficiency: f64, pmin: f64, pmax: f64) -> Plant {
        Plant::new(
            PlantId::new(id),
            format!("gas{id}"),
            efficiency,
            Megawatts(pmin),
            Megawatts(pmax),
            PlantKind::GasFired {
                fuel_price: EurosPerMegawattHour(13.4),
                co2_price: 20.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn gas_fired_cost_includes_co2() {
        let plant = gas(0, 0.53, 100.0, 460.0);
        let expected = 13.4 / 0.53 + 0.3 * 20.0;
        assert!((plant.cost_per_mwh().value() - expected).abs() < 1e-9);
    }

    #[test]
    fn turbojet_cost_has_no_co2() {
        let plant = Plant::new(
            PlantId::new(0),
            "tj1",
            0.3,
            Megawatts(0.0),
            Megawatts(16.0),
            PlantKind::TurboJet {
                fuel_price: EurosPerMegawattHour(50.8),
            },
        )
        .unwrap();
        assert!((plant.cost_per_mwh().value() - 50.8 / 0.3).abs() < 1e-9);
    }

    #[test]
    fn wind_envelope_is_capped_output() {
        let plant = Plant::new(
            PlantId::new(0),
            "windpark1",
            1.0,
            Megawatts(0.0),
            Megawatts(150.0),
            PlantKind::WindTurbine {
                availability: Percent(60.0),
            },
        )
        .unwrap();
        assert!((plant.min_power_when_on().value() - 90.0).abs() < 1e-9);
        assert!((plant.max_power_when_on().value() - 90.0).abs() < 1e-9);
        assert_eq!(plant.cost_per_mwh(), EurosPerMegawattHour::ZERO);
        assert_eq!(plant.cost_for_load(Megawatts(90.0)).unwrap(), Euros::ZERO);
    }

    #[test]
    fn zero_efficiency_rejected_at_construction() {
        let err = Plant::new(
            PlantId::new(3),
            "broken",
            0.0,
            Megawatts(0.0),
            Megawatts(10.0),
            PlantKind::TurboJet {
                fuel_price: EurosPerMegawattHour(50.8),
            },
        )
        .unwrap_err();
        match err {
            MeritError::Validation { field, .. } => assert_eq!(field, "powerplants[3].efficiency"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn pmax_below_pmin_rejected() {
        let err = Plant::new(
            PlantId::new(0),
            "inverted",
            0.5,
            Megawatts(50.0),
            Megawatts(10.0),
            PlantKind::TurboJet {
                fuel_price: EurosPerMegawattHour(50.8),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("pmax"));
    }

    #[test]
    fn wind_availability_out_of_range_rejected() {
        let err = Plant::new(
            PlantId::new(0),
            "windpark",
            1.0,
            Megawatts(0.0),
            Megawatts(10.0),
            PlantKind::WindTurbine {
                availability: Percent(-1.0),
            },
        )
        .unwrap_err();
        assert!(matches!(err, MeritError::Validation { .. }));
    }

    #[test]
    fn cost_for_load_rejects_out_of_envelope() {
        let plant = gas(0, 0.5, 100.0, 200.0);
        assert!(plant.cost_for_load(Megawatts(50.0)).is_err());
        assert!(plant.cost_for_load(Megawatts(250.0)).is_err());

        let cost = plant.cost_for_load(Megawatts(150.0)).unwrap();
        let expected = 150.0 * (13.4 / 0.5 + 6.0);
        assert!((cost.value() - expected).abs() < 1e-9);
    }

    #[test]
    fn merit_cmp_breaks_ties_by_input_order() {
        let first = gas(0, 0.53, 100.0, 460.0);
        let second = gas(1, 0.53, 100.0, 460.0);
        assert_eq!(first.merit_cmp(&second), Ordering::Less);
        assert_eq!(second.merit_cmp(&first), Ordering::Greater);
    }

    #[test]
    fn plant_type_parses_payload_names() {
        assert_eq!("gasfired".parse::<PlantType>().unwrap(), PlantType::GasFired);
        assert_eq!("turbojet".parse::<PlantType>().unwrap(), PlantType::TurboJet);
        assert_eq!("windturbine".parse::<PlantType>().unwrap(), PlantType::WindTurbine);
        assert!("nuclear".parse::<PlantType>().is_err());
    }

    #[test]
    fn apply_fuel_pricing_requires_co2_for_gas() {
        let fuels = FuelPrices::new().with(FuelKind::Gas, 13.4);
        let err = PlantType::GasFired
            .apply_fuel_pricing(&fuels, "powerplants[0]")
            .unwrap_err();
        assert!(err.to_string().contains("co2"));

        let kind = PlantType::TurboJet
            .apply_fuel_pricing(&fuels.with(FuelKind::Kerosine, 50.8), "powerplants[1]")
            .unwrap();
        assert_eq!(
            kind,
            PlantKind::TurboJet {
                fuel_price: EurosPerMegawattHour(50.8)
            }
        );
    }
}
