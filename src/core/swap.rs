use crate::core::party::Party;
use crate::core::rate::{InterestRate, RateKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors arising from swap construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapError {
    #[error("swap notional must be positive, got {notional}")]
    InvalidNotional { notional: Decimal },
    #[error("'{party}' cannot be both the fixed-rate and the floating-rate payer")]
    IdenticalPayers { party: String },
}

/// Leg payments for one semi-annual period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestPayments {
    /// Owed by the fixed-rate payer.
    pub fixed_leg: Decimal,
    /// Owed by the floating-rate payer.
    pub floating_leg: Decimal,
    /// Floating leg minus fixed leg.
    pub fixed_leg_net: Decimal,
    /// Fixed leg minus floating leg.
    pub floating_leg_net: Decimal,
}

/// A negotiated fixed-for-floating interest rate swap.
///
/// The swap's own rates are independent of either party's market quotes.
/// Payments follow a semi-annual convention: each leg pays half its annual
/// rate on the notional per period.
///
/// # Examples
///
/// ```
/// use swap_analyzer::core::party::{Party, Preference};
/// use swap_analyzer::core::swap::Swap;
/// use swap_analyzer::core::rate::RateKind;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let a = Party::new("Party A", dec!(0.1045), dec!(0.0075), Preference::Fixed);
/// let b = Party::new("Party B", dec!(0.0965), dec!(0.0025), Preference::Floating);
///
/// let swap = Swap::new(
///     dec!(0.096),
///     dec!(0.001),
///     dec!(1_000_000),
///     b.clone(),
///     a.clone(),
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
/// ).unwrap();
///
/// assert_eq!(swap.calculate_fixed_leg_payment(), dec!(48_000));
/// assert_eq!(swap.receiving_position(&a), Some(RateKind::Fixed));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Swap {
    fixed_rate: InterestRate,
    floating_rate_delta: InterestRate,
    notional: Decimal,
    fixed_rate_payer: Party,
    floating_rate_payer: Party,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl Swap {
    /// Create a new swap.
    ///
    /// The notional must be positive and the two payers must be different
    /// parties. Start and end dates are taken as given.
    pub fn new(
        fixed_rate: Decimal,
        floating_rate_delta: Decimal,
        notional: Decimal,
        fixed_rate_payer: Party,
        floating_rate_payer: Party,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, SwapError> {
        if notional <= Decimal::ZERO {
            return Err(SwapError::InvalidNotional { notional });
        }
        if fixed_rate_payer == floating_rate_payer {
            return Err(SwapError::IdenticalPayers {
                party: fixed_rate_payer.name().to_string(),
            });
        }
        Ok(Self {
            fixed_rate: InterestRate::fixed(fixed_rate),
            floating_rate_delta: InterestRate::floating(floating_rate_delta),
            notional,
            fixed_rate_payer,
            floating_rate_payer,
            start_date,
            end_date,
        })
    }

    // --- Accessors ---

    pub fn fixed_rate(&self) -> InterestRate {
        self.fixed_rate
    }

    pub fn floating_rate_delta(&self) -> InterestRate {
        self.floating_rate_delta
    }

    pub fn notional(&self) -> Decimal {
        self.notional
    }

    pub fn fixed_rate_payer(&self) -> &Party {
        &self.fixed_rate_payer
    }

    pub fn floating_rate_payer(&self) -> &Party {
        &self.floating_rate_payer
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Calendar days between start and end (negative if the dates are reversed).
    pub fn tenor_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    // --- Payments ---

    pub fn calculate_fixed_leg_payment(&self) -> Decimal {
        self.notional * self.fixed_rate.value() / Decimal::TWO
    }

    pub fn calculate_floating_leg_payment(&self, benchmark_rate: Decimal) -> Decimal {
        let floating_rate = benchmark_rate + self.floating_rate_delta.value();
        self.notional * floating_rate / Decimal::TWO
    }

    pub fn calculate_interest_payments(&self, benchmark_rate: Decimal) -> InterestPayments {
        let fixed_leg = self.calculate_fixed_leg_payment();
        let floating_leg = self.calculate_floating_leg_payment(benchmark_rate);
        InterestPayments {
            fixed_leg,
            floating_leg,
            fixed_leg_net: floating_leg - fixed_leg,
            floating_leg_net: fixed_leg - floating_leg,
        }
    }

    // --- Positions ---

    /// The leg `party` pays. Any party that is not the fixed-rate payer,
    /// including one that is not on this swap at all, is reported as paying
    /// floating.
    pub fn paying_position(&self, party: &Party) -> RateKind {
        if *party == self.fixed_rate_payer {
            RateKind::Fixed
        } else {
            RateKind::Floating
        }
    }

    /// The leg `party` receives, or `None` if it is not a counterparty.
    pub fn receiving_position(&self, party: &Party) -> Option<RateKind> {
        if *party == self.fixed_rate_payer {
            Some(RateKind::Floating)
        } else if *party == self.floating_rate_payer {
            Some(RateKind::Fixed)
        } else {
            None
        }
    }

    /// The swap's contractual rate for the given leg.
    pub fn rate(&self, kind: RateKind) -> InterestRate {
        match kind {
            RateKind::Fixed => self.fixed_rate,
            RateKind::Floating => self.floating_rate_delta,
        }
    }

    /// Tag-based lookup with the same fallback as [`Party::get_rate`].
    pub fn get_rate(&self, tag: &str) -> InterestRate {
        self.rate(RateKind::from_tag(tag))
    }
}
