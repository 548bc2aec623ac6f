//! Tabular projections of a [`SwapSummary`] for presentation layers, plus
//! the plain-text analysis report.
//!
//! Nothing here computes new analysis figures; every row is derived from the
//! summary and the engine's rate objects.

use crate::analysis::engine::{
    AbsoluteAdvantages, AdvantageKind, AnalysisError, ComparativeAdvantageEngine,
    SwapAnalysisResult, SwapSummary,
};
use crate::core::party::Party;
use crate::core::rate::{format_percent, RateKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A party's direct market quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketRatesRow {
    pub party: String,
    pub fixed_rate: String,
    pub floating_rate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpportunityRow {
    pub party: String,
    pub comparative_advantage: AdvantageKind,
    pub net_benefit: Decimal,
    pub market_improvement: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapDetails {
    pub fixed_rate: String,
    pub floating_rate: String,
    pub notional: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_arbitrage: String,
}

/// One party's position on the swap against its market alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyPositionRow {
    pub party: String,
    pub swap_paying_rate: String,
    pub swap_receiving_rate: String,
    /// The party's quote in its advantage market.
    pub market_position: String,
    pub benefit: String,
    /// Swap paying rate minus benefit, in the paying leg's market.
    pub net_position: String,
    /// Quote in the market opposite the advantage market minus net position.
    pub net_market_benefit: String,
}

/// Presentation view over one analysis run.
pub struct SwapReport<'a> {
    engine: &'a ComparativeAdvantageEngine,
    summary: &'a SwapSummary,
    absolute: AbsoluteAdvantages,
    disadvantages: [AdvantageKind; 2],
}

impl<'a> SwapReport<'a> {
    pub fn new(
        engine: &'a ComparativeAdvantageEngine,
        summary: &'a SwapSummary,
    ) -> Result<Self, AnalysisError> {
        let disadvantages = [
            engine
                .comparative_disadvantage(&summary.party_a_analysis.party)?
                .kind,
            engine
                .comparative_disadvantage(&summary.party_b_analysis.party)?
                .kind,
        ];
        Ok(Self {
            engine,
            summary,
            absolute: engine.absolute_advantages()?,
            disadvantages,
        })
    }

    fn analyses(&self) -> [&'a SwapAnalysisResult; 2] {
        [&self.summary.party_a_analysis, &self.summary.party_b_analysis]
    }

    pub fn market_rates(&self) -> Vec<MarketRatesRow> {
        self.engine
            .parties()
            .iter()
            .map(|p| MarketRatesRow {
                party: p.name().to_string(),
                fixed_rate: p.fixed_rate().to_string(),
                floating_rate: p.floating_rate_delta().to_string(),
            })
            .collect()
    }

    pub fn opportunity_summary(&self) -> Vec<OpportunityRow> {
        self.analyses()
            .iter()
            .map(|a| OpportunityRow {
                party: a.party.name().to_string(),
                comparative_advantage: a.comparative_advantage.kind,
                net_benefit: a.market_paying_vs_swap_receiving_benefit,
                market_improvement: a.market_improvement,
            })
            .collect()
    }

    pub fn swap_details(&self) -> SwapDetails {
        let swap = self.engine.swap();
        SwapDetails {
            fixed_rate: swap.fixed_rate().to_string(),
            floating_rate: swap.floating_rate_delta().to_string(),
            notional: swap.notional(),
            start_date: swap.start_date(),
            end_date: swap.end_date(),
            total_arbitrage: format_percent(self.summary.total_arbitrage),
        }
    }

    pub fn party_positions(&self) -> Vec<PartyPositionRow> {
        let swap = self.engine.swap();
        self.analyses()
            .iter()
            .map(|a| {
                let paying_rate = swap.rate(a.paying_position);
                let receiving_rate = swap.rate(a.receiving_leg());
                let advantage = a.comparative_advantage.kind;
                let market_rate = a.party.rate(advantage.rate_kind());
                // A neutral advantage counts as "not fixed" here.
                let opposite = if advantage == AdvantageKind::Fixed {
                    RateKind::Floating
                } else {
                    RateKind::Fixed
                };
                let opposite_rate = a.party.rate(opposite);

                let benefit = a.market_paying_vs_swap_receiving_benefit;
                let net_position = paying_rate - benefit;
                let net_market_benefit = opposite_rate.value() - net_position.value();

                PartyPositionRow {
                    party: a.party.name().to_string(),
                    swap_paying_rate: paying_rate.to_string(),
                    swap_receiving_rate: receiving_rate.to_string(),
                    market_position: market_rate.to_string(),
                    benefit: format_percent(benefit),
                    net_position: net_position.to_string(),
                    net_market_benefit: format_percent(net_market_benefit),
                }
            })
            .collect()
    }
}

fn or_none(party: Option<&Party>) -> String {
    party.map_or_else(|| "None".to_string(), |p| p.name().to_string())
}

impl fmt::Display for SwapReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let swap = self.engine.swap();

        writeln!(f, "=== Market Rates ===")?;
        for row in self.market_rates() {
            writeln!(
                f,
                "  {:<15} fixed {:>8}   floating {:>6}",
                row.party, row.fixed_rate, row.floating_rate
            )?;
        }

        writeln!(f, "\n=== Absolute Advantages ===")?;
        writeln!(f, "  Fixed:    {}", or_none(self.absolute.fixed.as_ref()))?;
        writeln!(f, "  Floating: {}", or_none(self.absolute.floating.as_ref()))?;

        writeln!(f, "\n=== Comparative Advantages (smaller is better) ===")?;
        for a in self.analyses() {
            writeln!(
                f,
                "  {} has a comparative advantage in the {} market",
                a.party, a.comparative_advantage.kind
            )?;
        }

        writeln!(
            f,
            "\nTotal arbitrage available: {}",
            format_percent(self.summary.total_arbitrage)
        )?;

        writeln!(f, "\n=== Swap Details ===")?;
        writeln!(f, "  Fixed leg rate:    {}", swap.fixed_rate())?;
        writeln!(f, "  Floating leg rate: {}", swap.floating_rate_delta())?;
        writeln!(f, "  Notional:          {}", swap.notional())?;
        writeln!(
            f,
            "  Tenor:             {} to {}",
            swap.start_date(),
            swap.end_date()
        )?;

        for (a, disadvantage) in self.analyses().iter().zip(self.disadvantages) {
            let advantage = a.comparative_advantage.kind;
            let paying = swap.rate(a.paying_position);
            let bypassed = a.party.rate(disadvantage.rate_kind());
            writeln!(f, "\n--- Actions for {} ---", a.party)?;
            writeln!(
                f,
                "* borrow from {} rate market at {}",
                advantage,
                a.party.rate(advantage.rate_kind())
            )?;
            writeln!(
                f,
                "* receives {} rate of {} from swap",
                a.receiving_leg(),
                swap.rate(a.receiving_leg())
            )?;
            writeln!(
                f,
                "* this is a net benefit of {}",
                format_percent(a.market_paying_vs_swap_receiving_benefit)
            )?;
            writeln!(
                f,
                "* has {} rate position in swap paying {}",
                a.paying_position, paying
            )?;
            writeln!(
                f,
                "* net position is {} + {} = {}",
                paying,
                format_percent(a.market_paying_vs_swap_receiving_benefit),
                format_percent(a.total_cost)
            )?;
            writeln!(
                f,
                "* ({} better than the {} available on the open market)",
                format_percent(a.market_improvement),
                bypassed
            )?;
        }
        Ok(())
    }
}
