use crate::core::rate::{InterestRate, RateKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Opaque identity handle for a party.
///
/// Two parties with identical names and quotes are still different
/// counterparties; the handle is what the engine keys its tables on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(Uuid);

impl PartyId {
    /// Mint a fresh, unique handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PartyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The market a party would rather end up paying in.
///
/// Declared intent only; the engine does not act on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Fixed,
    Floating,
}

impl From<Preference> for RateKind {
    fn from(p: Preference) -> Self {
        match p {
            Preference::Fixed => RateKind::Fixed,
            Preference::Floating => RateKind::Floating,
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&RateKind::from(*self), f)
    }
}

/// A market participant with its direct borrowing quotes.
///
/// # Examples
///
/// ```
/// use swap_analyzer::core::party::{Party, Preference};
/// use swap_analyzer::core::rate::RateKind;
/// use rust_decimal_macros::dec;
///
/// let a = Party::new("Party A", dec!(0.1045), dec!(0.0075), Preference::Fixed);
/// let twin = Party::new("Party A", dec!(0.1045), dec!(0.0075), Preference::Fixed);
///
/// assert_ne!(a, twin);
/// assert_eq!(a.rate(RateKind::Fixed).to_string(), "10.45%");
/// assert_eq!(a.get_rate("floating").to_string(), "S+75");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Party {
    id: PartyId,
    name: String,
    /// Quote in the fixed-rate market.
    fixed_rate: InterestRate,
    /// Spread over the benchmark in the floating-rate market.
    floating_rate_delta: InterestRate,
    preference: Preference,
}

impl Party {
    pub fn new(
        name: impl Into<String>,
        fixed_rate: Decimal,
        floating_rate_delta: Decimal,
        preference: Preference,
    ) -> Self {
        Self::with_id(
            PartyId::new(),
            name,
            fixed_rate,
            floating_rate_delta,
            preference,
        )
    }

    /// Create a party with a specific handle (useful for testing / determinism).
    pub fn with_id(
        id: PartyId,
        name: impl Into<String>,
        fixed_rate: Decimal,
        floating_rate_delta: Decimal,
        preference: Preference,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            fixed_rate: InterestRate::fixed(fixed_rate),
            floating_rate_delta: InterestRate::floating(floating_rate_delta),
            preference,
        }
    }

    pub fn id(&self) -> PartyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fixed_rate(&self) -> InterestRate {
        self.fixed_rate
    }

    pub fn floating_rate_delta(&self) -> InterestRate {
        self.floating_rate_delta
    }

    pub fn preference(&self) -> Preference {
        self.preference
    }

    /// The party's quote in the given market.
    pub fn rate(&self, kind: RateKind) -> InterestRate {
        match kind {
            RateKind::Fixed => self.fixed_rate,
            RateKind::Floating => self.floating_rate_delta,
        }
    }

    /// Tag-based lookup. Anything other than `"fixed"` resolves to the
    /// floating spread, see [`RateKind::from_tag`].
    pub fn get_rate(&self, tag: &str) -> InterestRate {
        self.rate(RateKind::from_tag(tag))
    }

    /// All-in floating rate for a given benchmark fixing.
    pub fn floating_rate(&self, benchmark_rate: Decimal) -> Decimal {
        benchmark_rate + self.floating_rate_delta.value()
    }
}

impl PartialEq for Party {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Party {}

impl Hash for Party {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn party_a() -> Party {
        Party::new("Party A", dec!(0.1045), dec!(0.0075), Preference::Fixed)
    }

    #[test]
    fn test_party_identity() {
        let a = party_a();
        let twin = party_a();
        assert_ne!(a, twin);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_party_with_id() {
        let id = PartyId::new();
        let a = Party::with_id(id, "A", dec!(0.05), dec!(0.01), Preference::Floating);
        let b = Party::with_id(id, "B", dec!(0.07), dec!(0.02), Preference::Fixed);
        assert_eq!(a, b);
        assert_eq!(a.id(), id);
    }

    #[test]
    fn test_party_rates_are_tagged() {
        let a = party_a();
        assert_eq!(a.fixed_rate().kind(), RateKind::Fixed);
        assert_eq!(a.floating_rate_delta().kind(), RateKind::Floating);
        assert_eq!(a.rate(RateKind::Fixed).value(), dec!(0.1045));
        assert_eq!(a.rate(RateKind::Floating).value(), dec!(0.0075));
    }

    #[test]
    fn test_get_rate_falls_back_to_floating() {
        let a = party_a();
        assert_eq!(a.get_rate("fixed").value(), dec!(0.1045));
        assert_eq!(a.get_rate("floating").value(), dec!(0.0075));
        assert_eq!(a.get_rate("none").value(), dec!(0.0075));
        assert_eq!(a.get_rate("FIXED").kind(), RateKind::Floating);
    }

    #[test]
    fn test_floating_rate_over_benchmark() {
        assert_eq!(party_a().floating_rate(dec!(0.05)), dec!(0.0575));
    }

    #[test]
    fn test_party_display() {
        assert_eq!(format!("{}", party_a()), "Party A");
        assert_eq!(Preference::Floating.to_string(), "floating");
    }
}
