use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// A quantity or money value as the client sent it. Whole numbers stay exact;
/// fractions, and integer results that no longer fit in `i64`, are carried
/// as `f64`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Int(i64),
    Float(f64),
}

impl Amount {
    pub const ZERO: Amount = Amount::Int(0);

    pub fn as_f64(self) -> f64 {
        match self {
            Amount::Int(v) => v as f64,
            Amount::Float(v) => v,
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::ZERO
    }
}

impl From<i64> for Amount {
    fn from(v: i64) -> Self {
        Amount::Int(v)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Int(v) => write!(f, "{v}"),
            Amount::Float(v) => write!(f, "{v}"),
        }
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Amount::Int(a), Amount::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        match (self, rhs) {
            (Amount::Int(a), Amount::Int(b)) => a
                .checked_add(b)
                .map_or_else(|| Amount::Float(a as f64 + b as f64), Amount::Int),
            _ => Amount::Float(self.as_f64() + rhs.as_f64()),
        }
    }
}

impl Mul for Amount {
    type Output = Amount;

    fn mul(self, rhs: Amount) -> Amount {
        match (self, rhs) {
            (Amount::Int(a), Amount::Int(b)) => a
                .checked_mul(b)
                .map_or_else(|| Amount::Float(a as f64 * b as f64), Amount::Int),
            _ => Amount::Float(self.as_f64() * rhs.as_f64()),
        }
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}
