use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Errors arising from interest rate comparisons and kind parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    #[error("cannot compare rates of different kinds: {left} vs {right}")]
    KindMismatch { left: RateKind, right: RateKind },
    #[error("invalid rate kind '{tag}', expected 'fixed' or 'floating'")]
    InvalidKind { tag: String },
}

/// The market a rate is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateKind {
    /// A contractually fixed annual rate.
    Fixed,
    /// A spread over an external benchmark rate.
    Floating,
}

impl RateKind {
    /// Permissive tag lookup: `"fixed"` maps to [`RateKind::Fixed`], every
    /// other tag (including unknown ones) maps to [`RateKind::Floating`].
    ///
    /// Party and swap rate lookups go through this; use [`str::parse`] when
    /// the tag has to be validated.
    pub fn from_tag(tag: &str) -> Self {
        if tag == "fixed" {
            RateKind::Fixed
        } else {
            RateKind::Floating
        }
    }

    /// The other market.
    pub fn opposite(self) -> Self {
        match self {
            RateKind::Fixed => RateKind::Floating,
            RateKind::Floating => RateKind::Fixed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RateKind::Fixed => "fixed",
            RateKind::Floating => "floating",
        }
    }
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateKind {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(RateKind::Fixed),
            "floating" => Ok(RateKind::Floating),
            other => Err(RateError::InvalidKind {
                tag: other.to_string(),
            }),
        }
    }
}

/// An immutable interest rate tagged with the market it belongs to.
///
/// `value` is a decimal fraction (`0.095` is 9.5%). Arithmetic produces new
/// rates following the kind rules of the comparative-advantage model:
///
/// - rate + rate is floating if either side is floating, else fixed
/// - rate − rate of the same kind is a fixed differential
/// - rate − rate of different kinds is floating
/// - rate ± scalar keeps the original kind
///
/// Rates of different kinds cannot be ordered or compared for equality.
///
/// # Examples
///
/// ```
/// use swap_analyzer::core::rate::{InterestRate, RateKind};
/// use rust_decimal_macros::dec;
///
/// let a = InterestRate::floating(dec!(0.0075));
/// let b = InterestRate::floating(dec!(0.0025));
/// let spread = a - b;
/// assert_eq!(spread.kind(), RateKind::Fixed);
/// assert_eq!(spread.value(), dec!(0.0050));
/// assert_eq!(b.to_string(), "S+25");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InterestRate {
    value: Decimal,
    kind: RateKind,
}

impl InterestRate {
    pub fn new(value: Decimal, kind: RateKind) -> Self {
        Self { value, kind }
    }

    pub fn fixed(value: Decimal) -> Self {
        Self::new(value, RateKind::Fixed)
    }

    pub fn floating(value: Decimal) -> Self {
        Self::new(value, RateKind::Floating)
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn kind(&self) -> RateKind {
        self.kind
    }

    /// Order two rates of the same kind.
    pub fn try_cmp(&self, other: &InterestRate) -> Result<Ordering, RateError> {
        if self.kind != other.kind {
            return Err(RateError::KindMismatch {
                left: self.kind,
                right: other.kind,
            });
        }
        Ok(self.value.cmp(&other.value))
    }

    /// Equality between two rates of the same kind.
    pub fn try_eq(&self, other: &InterestRate) -> Result<bool, RateError> {
        self.try_cmp(other).map(|o| o == Ordering::Equal)
    }

    pub fn try_ne(&self, other: &InterestRate) -> Result<bool, RateError> {
        self.try_cmp(other).map(|o| o != Ordering::Equal)
    }

    pub fn try_lt(&self, other: &InterestRate) -> Result<bool, RateError> {
        self.try_cmp(other).map(|o| o == Ordering::Less)
    }

    pub fn try_le(&self, other: &InterestRate) -> Result<bool, RateError> {
        self.try_cmp(other).map(|o| o != Ordering::Greater)
    }

    pub fn try_gt(&self, other: &InterestRate) -> Result<bool, RateError> {
        self.try_cmp(other).map(|o| o == Ordering::Greater)
    }

    pub fn try_ge(&self, other: &InterestRate) -> Result<bool, RateError> {
        self.try_cmp(other).map(|o| o != Ordering::Less)
    }
}

impl Add for InterestRate {
    type Output = InterestRate;

    fn add(self, rhs: InterestRate) -> InterestRate {
        let kind = if self.kind == RateKind::Floating || rhs.kind == RateKind::Floating {
            RateKind::Floating
        } else {
            RateKind::Fixed
        };
        InterestRate::new(self.value + rhs.value, kind)
    }
}

impl Add<Decimal> for InterestRate {
    type Output = InterestRate;

    fn add(self, rhs: Decimal) -> InterestRate {
        InterestRate::new(self.value + rhs, self.kind)
    }
}

impl Sub for InterestRate {
    type Output = InterestRate;

    fn sub(self, rhs: InterestRate) -> InterestRate {
        // A difference between two quotes of the same market is a pure spread.
        let kind = if self.kind == rhs.kind {
            RateKind::Fixed
        } else {
            RateKind::Floating
        };
        InterestRate::new(self.value - rhs.value, kind)
    }
}

impl Sub<Decimal> for InterestRate {
    type Output = InterestRate;

    fn sub(self, rhs: Decimal) -> InterestRate {
        InterestRate::new(self.value - rhs, self.kind)
    }
}

impl PartialEq<Decimal> for InterestRate {
    fn eq(&self, other: &Decimal) -> bool {
        self.value == *other
    }
}

impl PartialOrd<Decimal> for InterestRate {
    fn partial_cmp(&self, other: &Decimal) -> Option<Ordering> {
        Some(self.value.cmp(other))
    }
}

impl fmt::Display for InterestRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RateKind::Fixed => f.write_str(&format_percent(self.value)),
            RateKind::Floating => {
                let sign = if self.value >= Decimal::ZERO { '+' } else { '-' };
                let bps = (self.value * dec!(10_000)).trunc().abs().normalize();
                write!(f, "S{}{}", sign, bps)
            }
        }
    }
}

/// Render a decimal fraction as a percentage with two decimals (`0.095` → `9.50%`).
pub fn format_percent(value: Decimal) -> String {
    let pct = (value * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}%", pct)
}
