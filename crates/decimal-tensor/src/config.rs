use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Rounding applied whenever a quotient has to be cut to a fixed scale.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    Up,
    Down,
    Ceiling,
    Floor,
    #[default]
    HalfUp,
    HalfDown,
    HalfEven,
}

impl Rounding {
    pub fn mode(self) -> RoundingMode {
        match self {
            Rounding::Up => RoundingMode::Up,
            Rounding::Down => RoundingMode::Down,
            Rounding::Ceiling => RoundingMode::Ceiling,
            Rounding::Floor => RoundingMode::Floor,
            Rounding::HalfUp => RoundingMode::HalfUp,
            Rounding::HalfDown => RoundingMode::HalfDown,
            Rounding::HalfEven => RoundingMode::HalfEven,
        }
    }
}

impl FromStr for Rounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "up" => Ok(Rounding::Up),
            "down" => Ok(Rounding::Down),
            "ceiling" => Ok(Rounding::Ceiling),
            "floor" => Ok(Rounding::Floor),
            "half_up" => Ok(Rounding::HalfUp),
            "half_down" => Ok(Rounding::HalfDown),
            "half_even" => Ok(Rounding::HalfEven),
            _ => Err(format!(
                "Unknown rounding mode: {}. Expected one of up, down, ceiling, floor, half_up, half_down, half_even",
                s
            )),
        }
    }
}

/// Scale and rounding used by every operation that divides.
///
/// Exact decimals cannot represent quotients such as 1/3, so RREF pivot
/// normalisation and the inverse's division by the determinant are cut to
/// a fixed number of fractional digits. Everything else (add, multiply,
/// determinant) stays exact.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DecimalPolicy {
    /// Fractional digits kept when RREF divides a row by its pivot.
    pub division_scale: i64,
    /// Fractional digits kept when the inverse divides by the determinant.
    pub inverse_scale: i64,
    /// Fractional digits kept for randomly drawn scalars.
    pub random_scale: i64,
    pub rounding: Rounding,
}

impl DecimalPolicy {
    pub fn new(division_scale: i64, inverse_scale: i64, rounding: Rounding) -> Self {
        Self {
            division_scale,
            inverse_scale,
            rounding,
            ..Self::default()
        }
    }

    pub fn round(&self, value: &BigDecimal, scale: i64) -> BigDecimal {
        value.with_scale_round(scale, self.rounding.mode())
    }
}

impl Default for DecimalPolicy {
    fn default() -> Self {
        Self {
            division_scale: 10,
            inverse_scale: 20,
            random_scale: 10,
            rounding: Rounding::HalfUp,
        }
    }
}
