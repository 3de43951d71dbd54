//! Compile-time unit safety for dispatch quantities.
//!
//! Keeps power, prices and money from being mixed by accident.
//!
//! # Design Philosophy
//!
//! A production plan touches three kinds of numbers:
//! - Power (MW): requested load, plant limits, allocations
//! - Prices (€/MWh): fuel prices divided by efficiency give marginal costs
//! - Money (€): the cost of running a plant at a given load
//!
//! With raw `f64` values it is easy to subtract a price from a load or to sum
//! a marginal cost as if it were a total cost. The newtypes below make those
//! mistakes compile errors, and the one meaningful cross-unit product
//! (`Megawatts × EurosPerMegawattHour = Euros`) is spelled out explicitly.
//!
//! # Zero Runtime Overhead
//!
//! All types use `#[repr(transparent)]` and have the layout of `f64`.
//!
//! # Usage
//!
//! ```
//! use merit_core::units::{Euros, EurosPerMegawattHour, Megawatts};
//!
//! let load = Megawatts(40.0);
//! let price = EurosPerMegawattHour(20.0);
//!
//! let cost: Euros = load * price;
//! assert_eq!(cost.value(), 800.0);
//!
//! // This would NOT compile - different units
//! // let wrong = load + price;
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Macro to implement common arithmetic operations for unit types
macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl AddAssign for $type {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl SubAssign for $type {
            fn sub_assign(&mut self, rhs: Self) {
                self.0 -= rhs.0;
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Mul<$type> for f64 {
            type Output = $type;
            fn mul(self, rhs: $type) -> Self::Output {
                <$type>::new(self * rhs.0)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.4} {}", self.0, $unit_name)
            }
        }

        impl $type {
            /// Zero value
            pub const ZERO: Self = Self(0.0);

            /// Create a new value
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Absolute value
            #[inline]
            pub fn abs(self) -> Self {
                Self(self.0.abs())
            }

            /// Check if value is finite
            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// Minimum of two values
            #[inline]
            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0))
            }

            /// Maximum of two values
            #[inline]
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }

            /// Total ordering on the raw value (NaN sorts last)
            #[inline]
            pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }

        impl<'a> std::iter::Sum<&'a $type> for $type {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }
    };
}

// =============================================================================
// Power Units
// =============================================================================

/// Active power in megawatts (MW)
///
/// Used for the requested load, plant limits and allocated output alike.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Megawatts(pub f64);

impl_unit_ops!(Megawatts, "MW");

impl Megawatts {
    /// Drop the fractional part, rounding toward zero.
    ///
    /// Requested loads are compared in whole megawatts.
    #[inline]
    pub fn whole(self) -> Self {
        Self(self.0.trunc())
    }
}

// =============================================================================
// Price Units
// =============================================================================

/// Energy price in euros per megawatt-hour (€/MWh)
///
/// Fuel prices and plant marginal costs are both expressed in this unit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct EurosPerMegawattHour(pub f64);

impl_unit_ops!(EurosPerMegawattHour, "€/MWh");

/// Money in euros (€)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Euros(pub f64);

impl_unit_ops!(Euros, "€");

// One hour of operation at the given power and price
impl Mul<EurosPerMegawattHour> for Megawatts {
    type Output = Euros;
    fn mul(self, rhs: EurosPerMegawattHour) -> Self::Output {
        Euros(self.0 * rhs.0)
    }
}

impl Mul<Megawatts> for EurosPerMegawattHour {
    type Output = Euros;
    fn mul(self, rhs: Megawatts) -> Self::Output {
        Euros(self.0 * rhs.0)
    }
}

// =============================================================================
// Ratios
// =============================================================================

/// A percentage in the 0–100 range
///
/// Wind availability arrives as a percentage of installed capacity.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Percent(pub f64);

impl_unit_ops!(Percent, "%");

impl Percent {
    /// Convert to a fraction in 0–1
    #[inline]
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }

    /// Apply the percentage to a power value
    #[inline]
    pub fn of(self, power: Megawatts) -> Megawatts {
        Megawatts(power.0 * self.fraction())
    }
}

// =============================================================================
// Tests
// =============================================================================
