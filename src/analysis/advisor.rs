use crate::analysis::engine::{AdvantageKind, PartyComparatives};
use crate::core::party::Party;
use crate::core::swap::{Swap, SwapError};
use chrono::NaiveDate;
use log::{info, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Why a party was recommended as fixed-rate payer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationBasis {
    /// The recommended party is comparatively cheaper in the fixed market.
    ComparativeAdvantage,
    /// Neither party has a strict fixed advantage; the first party was taken.
    Tie,
}

impl RecommendationBasis {
    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationBasis::ComparativeAdvantage => "comparative_advantage",
            RecommendationBasis::Tie => "tie",
        }
    }
}

impl fmt::Display for RecommendationBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedPayerRecommendation {
    pub fixed_rate_payer: Party,
    pub floating_rate_payer: Party,
    pub basis: RecommendationBasis,
}

/// Recommends swap positions from comparative advantage alone.
///
/// The party with a fixed-market advantage borrows fixed and pays fixed on
/// the swap. With two parties the differentials mirror each other, so at
/// most one of them can hold that advantage; when neither does, the first
/// argument is recommended.
pub struct OpportunityAdvisor;

impl OpportunityAdvisor {
    pub fn find_fixed_rate_payer(party_a: &Party, party_b: &Party) -> FixedPayerRecommendation {
        let a_advantage = PartyComparatives::between(party_a, party_b).advantage().kind;
        let b_advantage = PartyComparatives::between(party_b, party_a).advantage().kind;

        let (fixed, floating, basis) = match (a_advantage, b_advantage) {
            (AdvantageKind::Fixed, b) if b != AdvantageKind::Fixed => {
                (party_a, party_b, RecommendationBasis::ComparativeAdvantage)
            }
            (a, AdvantageKind::Fixed) if a != AdvantageKind::Fixed => {
                (party_b, party_a, RecommendationBasis::ComparativeAdvantage)
            }
            _ => {
                warn!(
                    "No strict fixed-market advantage between {} ({}) and {} ({}); defaulting to {}",
                    party_a, a_advantage, party_b, b_advantage, party_a
                );
                (party_a, party_b, RecommendationBasis::Tie)
            }
        };
        info!("Recommending {} as fixed-rate payer", fixed);

        FixedPayerRecommendation {
            fixed_rate_payer: fixed.clone(),
            floating_rate_payer: floating.clone(),
            basis,
        }
    }

    /// Build a swap with the recommended payers and the given terms.
    pub fn propose_swap(
        party_a: &Party,
        party_b: &Party,
        fixed_rate: Decimal,
        floating_rate_delta: Decimal,
        notional: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Swap, SwapError> {
        let recommendation = Self::find_fixed_rate_payer(party_a, party_b);
        Swap::new(
            fixed_rate,
            floating_rate_delta,
            notional,
            recommendation.fixed_rate_payer,
            recommendation.floating_rate_payer,
            start_date,
            end_date,
        )
    }
}
