use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use num_traits::{One, Zero};
use rand::Rng;

use crate::config::DecimalPolicy;
use crate::error::{Result, TensorError};

/// A single arbitrary-precision decimal value.
///
/// Equality and ordering are numeric, so `2.0` and `2` compare equal even
/// though their decimal scales differ.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Scalar {
    value: BigDecimal,
}

impl Scalar {
    pub fn new(value: BigDecimal) -> Self {
        Self { value }
    }

    pub fn zero() -> Self {
        Self::new(BigDecimal::zero())
    }

    pub fn one() -> Self {
        Self::new(BigDecimal::one())
    }

    /// Parse a decimal literal such as `"-3.25"` or `"1e3"`.
    pub fn parse(literal: &str) -> Result<Self> {
        let trimmed = literal.trim();
        BigDecimal::from_str(trimmed)
            .map(Self::new)
            .map_err(|_| TensorError::Parse {
                input: literal.to_string(),
            })
    }

    /// Convert through the shortest decimal rendering of `value`, so `0.1`
    /// becomes exactly `0.1` rather than its binary expansion.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(TensorError::Parse {
                input: value.to_string(),
            });
        }
        Self::parse(&value.to_string())
    }

    /// A value drawn uniformly from `[lo, hi)` using the thread-local RNG.
    pub fn random(lo: f64, hi: f64) -> Result<Self> {
        Self::random_with(&mut rand::thread_rng(), lo, hi, &DecimalPolicy::default())
    }

    /// A value drawn uniformly from `[lo, hi)`, rounded to
    /// `policy.random_scale` fractional digits.
    pub fn random_with<R: Rng>(
        rng: &mut R,
        lo: f64,
        hi: f64,
        policy: &DecimalPolicy,
    ) -> Result<Self> {
        if !lo.is_finite() || !hi.is_finite() || !(hi - lo).is_finite() {
            return Err(TensorError::InvalidRange {
                reason: format!("bounds [{}, {}) must be finite", lo, hi),
            });
        }
        if lo >= hi {
            return Err(TensorError::InvalidRange {
                reason: format!("lower bound {} must be less than upper bound {}", lo, hi),
            });
        }

        let scale = policy.random_scale;
        let lower = Self::from_f64(lo)?.value;
        let upper = Self::from_f64(hi)?.value;
        // smallest and largest values with `scale` fractional digits inside [lo, hi)
        let first = lower.with_scale_round(scale, RoundingMode::Ceiling);
        let mut last = upper.with_scale_round(scale, RoundingMode::Floor);
        if last >= upper {
            last -= BigDecimal::new(1.into(), scale);
        }
        if first > last {
            return Err(TensorError::InvalidRange {
                reason: format!(
                    "no value with {} fractional digits lies in [{}, {})",
                    scale, lo, hi
                ),
            });
        }

        let sample = Self::from_f64(rng.gen_range(lo..hi))?.value;
        let value = policy.round(&sample, scale).clamp(first, last);
        Ok(Self::new(value))
    }

    pub fn value(&self) -> &BigDecimal {
        &self.value
    }

    pub fn set_value(&mut self, value: BigDecimal) {
        self.value = value;
    }

    pub fn into_value(self) -> BigDecimal {
        self.value
    }

    /// `self += other`
    pub fn add(&mut self, other: &Scalar) -> &mut Self {
        self.value = &self.value + &other.value;
        self
    }

    /// `self *= other`
    pub fn multiply(&mut self, other: &Scalar) -> &mut Self {
        self.value = &self.value * &other.value;
        self
    }

    pub fn negated(&self) -> Scalar {
        Scalar::new(-self.value.clone())
    }

    /// `1 / self` cut to `scale` fractional digits, or `None` for zero.
    pub fn reciprocal(&self, scale: i64, policy: &DecimalPolicy) -> Option<Scalar> {
        Scalar::one().quotient(self, scale, policy)
    }

    /// `self / divisor` cut to `scale` fractional digits, or `None` when
    /// `divisor` is zero.
    pub fn quotient(&self, divisor: &Scalar, scale: i64, policy: &DecimalPolicy) -> Option<Scalar> {
        if divisor.is_zero() {
            return None;
        }
        let quotient = &self.value / &divisor.value;
        Some(Scalar::new(policy.round(&quotient, scale)))
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.value == BigDecimal::one()
    }

    /// Absolute difference `|self - other|`.
    pub fn distance(&self, other: &Scalar) -> BigDecimal {
        (&self.value - &other.value).abs()
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for Scalar {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self> {
        Scalar::parse(s)
    }
}

impl From<BigDecimal> for Scalar {
    fn from(value: BigDecimal) -> Self {
        Scalar::new(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::new(BigDecimal::from(value))
    }
}

/// Values whose decimal exponent exceeds this in magnitude render as
/// `<digits>e<exponent>` instead of a plain decimal.
const PLAIN_EXPONENT_LIMIT: i64 = 64;

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.normalized();
        let (digits, scale) = value.as_bigint_and_exponent();
        if scale.abs() > PLAIN_EXPONENT_LIMIT {
            write!(f, "{}e{}", digits, -scale)
        } else {
            write!(f, "{}", value.to_plain_string())
        }
    }
}
