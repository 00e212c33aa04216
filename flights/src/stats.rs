//! Flight statistics.
//!

use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::Add;

use serde::Serialize;

/// Landings and takeoffs are counted independently, a flight can be both.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FlightStats {
    /// Number of flights
    pub total: usize,
    /// Flights classified as landing
    pub landings: usize,
    /// Flights classified as takeoff
    pub takeoffs: usize,
}

impl FlightStats {
    pub fn new(total: usize, landings: usize, takeoffs: usize) -> Self {
        FlightStats {
            total,
            landings,
            takeoffs,
        }
    }
}

impl Add for FlightStats {
    type Output = Self;

    /// Add two statistics
    ///
    fn add(self, rhs: Self) -> Self::Output {
        FlightStats {
            total: self.total + rhs.total,
            landings: self.landings + rhs.landings,
            takeoffs: self.takeoffs + rhs.takeoffs,
        }
    }
}

impl Sum for FlightStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(FlightStats::default(), |a, b| a + b)
    }
}

impl Display for FlightStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} flights, {} landings, {} takeoffs",
            self.total, self.landings, self.takeoffs
        )
    }
}
