//! Fuel price table
//!
//! A request carries a small map of market inputs: fuel prices, the CO2
//! allowance price and the current wind availability. Only four keys are
//! recognized; each accepts the wire spelling used by the production-plan
//! payloads as well as a descriptive name.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{MeritError, MeritResult};

/// Recognized entries of the fuel table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FuelKind {
    /// Natural gas, €/MWh
    Gas,
    /// Kerosine, €/MWh
    Kerosine,
    /// CO2 emission allowance, €/ton
    Co2,
    /// Wind availability, percent of installed capacity
    Wind,
}

impl FuelKind {
    pub const ALL: [FuelKind; 4] = [
        FuelKind::Gas,
        FuelKind::Kerosine,
        FuelKind::Co2,
        FuelKind::Wind,
    ];

    /// Key as it appears in request payloads
    pub fn wire_key(&self) -> &'static str {
        match self {
            FuelKind::Gas => "gas(euro/MWh)",
            FuelKind::Kerosine => "kerosine(euro/MWh)",
            FuelKind::Co2 => "co2(euro/ton)",
            FuelKind::Wind => "wind(%)",
        }
    }

    /// Descriptive alias accepted in place of the wire key
    pub fn descriptive_key(&self) -> &'static str {
        match self {
            FuelKind::Gas => "gas price",
            FuelKind::Kerosine => "kerosine price",
            FuelKind::Co2 => "co2 price",
            FuelKind::Wind => "wind availability percent",
        }
    }
}

impl fmt::Display for FuelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_key())
    }
}

impl FromStr for FuelKind {
    type Err = MeritError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        FuelKind::ALL
            .into_iter()
            .find(|kind| {
                kind.wire_key().eq_ignore_ascii_case(key)
                    || kind.descriptive_key().eq_ignore_ascii_case(key)
            })
            .ok_or_else(|| {
                MeritError::validation(
                    format!("fuels.{key}"),
                    format!(
                        "unrecognized fuel key; expected one of {}",
                        FuelKind::ALL
                            .iter()
                            .map(FuelKind::wire_key)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                )
            })
    }
}

/// Parsed fuel table keyed by [`FuelKind`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuelPrices {
    entries: BTreeMap<FuelKind, f64>,
}

impl FuelPrices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the raw key/value table of a request.
    ///
    /// Unknown keys, keys given twice under different spellings and
    /// non-finite values are rejected.
    pub fn from_raw(raw: &BTreeMap<String, f64>) -> MeritResult<Self> {
        let mut entries = BTreeMap::new();
        for (key, value) in raw {
            let kind: FuelKind = key.parse()?;
            if !value.is_finite() {
                return Err(MeritError::validation(
                    format!("fuels.{key}"),
                    "value must be a finite number",
                ));
            }
            if entries.insert(kind, *value).is_some() {
                return Err(MeritError::validation(
                    format!("fuels.{key}"),
                    format!("{kind} given more than once"),
                ));
            }
        }
        Ok(Self { entries })
    }

    /// Set a value, builder style
    pub fn with(mut self, kind: FuelKind, value: f64) -> Self {
        self.entries.insert(kind, value);
        self
    }

    pub fn get(&self, kind: FuelKind) -> Option<f64> {
        self.entries.get(&kind).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fetch a value a plant depends on, failing with the plant's field path
    pub fn require(&self, kind: FuelKind, field: &str) -> MeritResult<f64> {
        self.get(kind).ok_or_else(|| {
            MeritError::validation(
                field,
                format!("fuel table has no '{kind}' entry required by this plant type"),
            )
        })
    }
}
