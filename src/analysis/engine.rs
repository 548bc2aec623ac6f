use crate::core::party::{Party, PartyId};
use crate::core::rate::{InterestRate, RateError, RateKind};
use crate::core::swap::{Swap, SwapError};
use log::{debug, error, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors arising from constructing or running a comparative-advantage analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("missing required input: {input}")]
    MissingInput { input: &'static str },
    #[error("'{party}' was supplied as both parties; the analysis needs two distinct counterparties")]
    DuplicateParty { party: String },
    #[error("'{party}' is not one of the two parties under analysis")]
    UnknownParty { party: String },
    #[error(transparent)]
    Rate(#[from] RateError),
    #[error(transparent)]
    Swap(#[from] SwapError),
}

/// The market a party is comparatively better (or worse) off in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvantageKind {
    Fixed,
    Floating,
    /// Both differentials are equal.
    #[serde(rename = "none")]
    Neutral,
}

impl AdvantageKind {
    /// The market to look a rate up in. [`AdvantageKind::Neutral`] resolves
    /// to floating, the same fallback as [`RateKind::from_tag`].
    pub fn rate_kind(self) -> RateKind {
        match self {
            AdvantageKind::Fixed => RateKind::Fixed,
            AdvantageKind::Floating | AdvantageKind::Neutral => RateKind::Floating,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AdvantageKind::Fixed => "fixed",
            AdvantageKind::Floating => "floating",
            AdvantageKind::Neutral => "none",
        }
    }
}

impl fmt::Display for AdvantageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A party's quote differentials against its counterparty, per market.
///
/// A smaller differential means the party is relatively cheaper in that market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyComparatives {
    pub fixed: Decimal,
    pub floating: Decimal,
}

impl PartyComparatives {
    pub fn between(party: &Party, counterparty: &Party) -> Self {
        let fixed = party.fixed_rate() - counterparty.fixed_rate();
        let floating = party.floating_rate_delta() - counterparty.floating_rate_delta();
        Self {
            fixed: fixed.value(),
            floating: floating.value(),
        }
    }

    /// The market with the smaller differential.
    pub fn advantage(&self) -> ComparativeAnalysis {
        match self.fixed.cmp(&self.floating) {
            Ordering::Less => ComparativeAnalysis::new(AdvantageKind::Fixed, self.fixed),
            Ordering::Greater => ComparativeAnalysis::new(AdvantageKind::Floating, self.floating),
            Ordering::Equal => ComparativeAnalysis::neutral(),
        }
    }

    /// The market with the larger differential.
    pub fn disadvantage(&self) -> ComparativeAnalysis {
        match self.fixed.cmp(&self.floating) {
            Ordering::Greater => ComparativeAnalysis::new(AdvantageKind::Fixed, self.fixed),
            Ordering::Less => ComparativeAnalysis::new(AdvantageKind::Floating, self.floating),
            Ordering::Equal => ComparativeAnalysis::neutral(),
        }
    }
}

/// Which market a party is (dis)advantaged in, and the differential there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparativeAnalysis {
    #[serde(rename = "type")]
    pub kind: AdvantageKind,
    pub rate: Decimal,
}

impl ComparativeAnalysis {
    pub fn new(kind: AdvantageKind, rate: Decimal) -> Self {
        Self { kind, rate }
    }

    pub fn neutral() -> Self {
        Self::new(AdvantageKind::Neutral, Decimal::ZERO)
    }
}

/// Which party quotes strictly lower in each market, if either.
#[derive(Debug, Clone, Serialize)]
pub struct AbsoluteAdvantages {
    pub fixed: Option<Party>,
    pub floating: Option<Party>,
}

/// Analysis of the swap from one party's point of view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapAnalysisResult {
    pub party: Party,
    pub comparative_advantage: ComparativeAnalysis,
    /// Swap receiving rate minus the party's rate in its advantage market.
    /// Positive means the swap leg more than covers the direct borrowing.
    pub market_paying_vs_swap_receiving_benefit: Decimal,
    pub paying_position: RateKind,
    /// `None` when the party is on neither side of the swap.
    pub receiving_position: Option<RateKind>,
    pub market_improvement: Decimal,
    pub total_cost: Decimal,
}

impl SwapAnalysisResult {
    /// The swap leg the benefit was priced against. A missing receiving
    /// position resolves to floating.
    pub fn receiving_leg(&self) -> RateKind {
        resolve_leg(self.receiving_position)
    }
}

fn resolve_leg(position: Option<RateKind>) -> RateKind {
    position.unwrap_or(RateKind::Floating)
}

/// Swap-wide analysis summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapSummary {
    pub total_arbitrage: Decimal,
    pub fixed_rate: Decimal,
    pub floating_rate: Decimal,
    pub party_a_analysis: SwapAnalysisResult,
    pub party_b_analysis: SwapAnalysisResult,
}

#[derive(Debug, Clone, Copy)]
struct PartyTables {
    comparatives: PartyComparatives,
    advantage: ComparativeAnalysis,
    disadvantage: ComparativeAnalysis,
}

impl PartyTables {
    fn between(party: &Party, counterparty: &Party) -> Self {
        let comparatives = PartyComparatives::between(party, counterparty);
        Self {
            comparatives,
            advantage: comparatives.advantage(),
            disadvantage: comparatives.disadvantage(),
        }
    }
}

/// Builder that reports which input is missing.
///
/// # Examples
///
/// ```
/// use swap_analyzer::analysis::engine::{AnalysisError, ComparativeAdvantageEngine};
/// use swap_analyzer::core::party::{Party, Preference};
/// use rust_decimal_macros::dec;
///
/// let a = Party::new("Party A", dec!(0.1045), dec!(0.0075), Preference::Fixed);
/// let b = Party::new("Party B", dec!(0.0965), dec!(0.0025), Preference::Floating);
///
/// let err = ComparativeAdvantageEngine::builder()
///     .party_a(a)
///     .party_b(b)
///     .build()
///     .unwrap_err();
/// assert_eq!(err, AnalysisError::MissingInput { input: "swap" });
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    party_a: Option<Party>,
    party_b: Option<Party>,
    swap: Option<Swap>,
}

impl EngineBuilder {
    pub fn party_a(mut self, party: Party) -> Self {
        self.party_a = Some(party);
        self
    }

    pub fn party_b(mut self, party: Party) -> Self {
        self.party_b = Some(party);
        self
    }

    pub fn swap(mut self, swap: Swap) -> Self {
        self.swap = Some(swap);
        self
    }

    pub fn build(self) -> Result<ComparativeAdvantageEngine, AnalysisError> {
        let party_a = self
            .party_a
            .ok_or(AnalysisError::MissingInput { input: "party_a" })?;
        let party_b = self
            .party_b
            .ok_or(AnalysisError::MissingInput { input: "party_b" })?;
        let swap = self.swap.ok_or(AnalysisError::MissingInput { input: "swap" })?;
        ComparativeAdvantageEngine::new(party_a, party_b, swap)
    }
}

/// Derives comparative advantage, arbitrage and per-party benefit for a
/// two-party swap.
///
/// Comparatives, advantages and disadvantages depend only on the two
/// parties' quotes, so they are computed once at construction. Every other
/// figure is recomputed on demand from immutable inputs.
///
/// # Examples
///
/// ```
/// use swap_analyzer::analysis::engine::{AdvantageKind, ComparativeAdvantageEngine};
/// use swap_analyzer::core::party::{Party, Preference};
/// use swap_analyzer::core::swap::Swap;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let a = Party::new("Party A", dec!(0.1045), dec!(0.0075), Preference::Fixed);
/// let b = Party::new("Party B", dec!(0.0965), dec!(0.0025), Preference::Floating);
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
/// let engine = ComparativeAdvantageEngine::new(a.clone(), b.clone(), swap).unwrap();
/// assert_eq!(engine.comparative_advantage(&a).unwrap().kind, AdvantageKind::Floating);
/// assert_eq!(engine.comparative_advantage(&b).unwrap().kind, AdvantageKind::Fixed);
/// assert_eq!(engine.total_arbitrage(), dec!(0.013));
/// ```
#[derive(Debug, Clone)]
pub struct ComparativeAdvantageEngine {
    party_a: Party,
    party_b: Party,
    swap: Swap,
    tables: HashMap<PartyId, PartyTables>,
    total_arbitrage: Decimal,
}

impl ComparativeAdvantageEngine {
    pub fn new(party_a: Party, party_b: Party, swap: Swap) -> Result<Self, AnalysisError> {
        if party_a == party_b {
            return Err(AnalysisError::DuplicateParty {
                party: party_a.name().to_string(),
            });
        }
        info!(
            "Initializing swap analysis between {} and {}",
            party_a, party_b
        );

        let a_tables = PartyTables::between(&party_a, &party_b);
        let b_tables = PartyTables::between(&party_b, &party_a);
        let total_arbitrage = a_tables.advantage.rate.abs() + b_tables.advantage.rate.abs();

        let mut tables = HashMap::with_capacity(2);
        tables.insert(party_a.id(), a_tables);
        tables.insert(party_b.id(), b_tables);

        Ok(Self {
            party_a,
            party_b,
            swap,
            tables,
            total_arbitrage,
        })
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    // --- Accessors ---

    pub fn party_a(&self) -> &Party {
        &self.party_a
    }

    pub fn party_b(&self) -> &Party {
        &self.party_b
    }

    pub fn parties(&self) -> [&Party; 2] {
        [&self.party_a, &self.party_b]
    }

    pub fn swap(&self) -> &Swap {
        &self.swap
    }

    /// The other of the two configured parties.
    pub fn counterparty(&self, party: &Party) -> Result<&Party, AnalysisError> {
        if *party == self.party_a {
            Ok(&self.party_b)
        } else if *party == self.party_b {
            Ok(&self.party_a)
        } else {
            Err(unknown(party))
        }
    }

    fn tables(&self, party: &Party) -> Result<&PartyTables, AnalysisError> {
        self.tables.get(&party.id()).ok_or_else(|| unknown(party))
    }

    // --- Comparative advantage ---

    /// `party`'s quotes minus its counterparty's quotes, per market.
    pub fn comparatives_for_party(&self, party: &Party) -> Result<PartyComparatives, AnalysisError> {
        Ok(self.tables(party)?.comparatives)
    }

    pub fn comparative_advantage(&self, party: &Party) -> Result<ComparativeAnalysis, AnalysisError> {
        Ok(self.tables(party)?.advantage)
    }

    pub fn comparative_disadvantage(
        &self,
        party: &Party,
    ) -> Result<ComparativeAnalysis, AnalysisError> {
        Ok(self.tables(party)?.disadvantage)
    }

    /// Total saving available to split between the two parties: the sum of
    /// both parties' advantage differentials, taken as magnitudes.
    pub fn total_arbitrage(&self) -> Decimal {
        self.total_arbitrage
    }

    /// Which party quotes strictly lower in each market.
    pub fn absolute_advantages(&self) -> Result<AbsoluteAdvantages, AnalysisError> {
        let (a, b) = (&self.party_a, &self.party_b);
        let lower = |ord: Ordering| match ord {
            Ordering::Less => Some(a.clone()),
            Ordering::Greater => Some(b.clone()),
            Ordering::Equal => None,
        };
        Ok(AbsoluteAdvantages {
            fixed: lower(a.fixed_rate().try_cmp(&b.fixed_rate())?),
            floating: lower(a.floating_rate_delta().try_cmp(&b.floating_rate_delta())?),
        })
    }

    // --- Benefit metrics ---

    /// The leg `party` receives from the swap, if it is a counterparty.
    pub fn receiving_position(&self, party: &Party) -> Option<RateKind> {
        self.swap.receiving_position(party)
    }

    /// The swap rate `party` receives. A party on neither side of the swap
    /// is priced against the floating leg, like any other unknown tag.
    pub fn receiving_rate(&self, party: &Party) -> InterestRate {
        let position = self.receiving_position(party);
        if position.is_none() {
            debug!("{} is not on the swap; using the floating leg", party);
        }
        self.swap.rate(resolve_leg(position))
    }

    /// Swap receiving rate minus the party's own rate in its advantage market.
    pub fn market_paying_vs_swap_receiving_benefit(
        &self,
        party: &Party,
    ) -> Result<Decimal, AnalysisError> {
        let advantage = self.comparative_advantage(party)?;
        let market_rate = party.rate(advantage.kind.rate_kind());
        Ok(self.receiving_rate(party).value() - market_rate.value())
    }

    /// Swap paying rate plus net benefit.
    pub fn total_cost(&self, party: &Party) -> Result<Decimal, AnalysisError> {
        let paying = self.swap.rate(self.swap.paying_position(party));
        Ok(paying.value() + self.market_paying_vs_swap_receiving_benefit(party)?)
    }

    /// How much cheaper the swap package is than borrowing directly in the
    /// party's disadvantaged market.
    pub fn market_improvement(&self, party: &Party) -> Result<Decimal, AnalysisError> {
        let disadvantage = self.comparative_disadvantage(party)?;
        let bypassed = party.rate(disadvantage.kind.rate_kind());
        Ok(bypassed.value() - self.total_cost(party)?)
    }

    // --- Full analysis ---

    pub fn analyze(&self) -> Result<SwapSummary, AnalysisError> {
        let run = || -> Result<SwapSummary, AnalysisError> {
            Ok(SwapSummary {
                total_arbitrage: self.total_arbitrage(),
                fixed_rate: self.swap.fixed_rate().value(),
                floating_rate: self.swap.floating_rate_delta().value(),
                party_a_analysis: self.analyze_party(&self.party_a)?,
                party_b_analysis: self.analyze_party(&self.party_b)?,
            })
        };
        run().map_err(|e| {
            error!("Error analyzing swap: {}", e);
            e
        })
    }

    fn analyze_party(&self, party: &Party) -> Result<SwapAnalysisResult, AnalysisError> {
        let result = SwapAnalysisResult {
            party: party.clone(),
            comparative_advantage: self.comparative_advantage(party)?,
            market_paying_vs_swap_receiving_benefit: self
                .market_paying_vs_swap_receiving_benefit(party)?,
            paying_position: self.swap.paying_position(party),
            receiving_position: self.receiving_position(party),
            market_improvement: self.market_improvement(party)?,
            total_cost: self.total_cost(party)?,
        };
        debug!(
            "{}: advantage {} ({}), benefit {}, total cost {}",
            party,
            result.comparative_advantage.kind,
            result.comparative_advantage.rate,
            result.market_paying_vs_swap_receiving_benefit,
            result.total_cost
        );
        Ok(result)
    }
}

fn unknown(party: &Party) -> AnalysisError {
    AnalysisError::UnknownParty {
        party: party.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::party::Preference;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn parties() -> (Party, Party) {
        (
            Party::new("Party A", dec!(0.1045), dec!(0.0075), Preference::Fixed),
            Party::new("Party B", dec!(0.0965), dec!(0.0025), Preference::Floating),
        )
    }

    fn swap(fixed_payer: &Party, floating_payer: &Party) -> Swap {
        Swap::new(
            dec!(0.096),
            dec!(0.001),
            dec!(1_000_000),
            fixed_payer.clone(),
            floating_payer.clone(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        )
        .unwrap()
    }

    fn default_engine() -> (ComparativeAdvantageEngine, Party, Party) {
        let (a, b) = parties();
        let engine = ComparativeAdvantageEngine::new(a.clone(), b.clone(), swap(&b, &a)).unwrap();
        (engine, a, b)
    }

    #[test]
    fn test_comparatives() {
        let (engine, a, b) = default_engine();
        assert_eq!(
            engine.comparatives_for_party(&a).unwrap(),
            PartyComparatives {
                fixed: dec!(0.008),
                floating: dec!(0.005)
            }
        );
        assert_eq!(
            engine.comparatives_for_party(&b).unwrap(),
            PartyComparatives {
                fixed: dec!(-0.008),
                floating: dec!(-0.005)
            }
        );
    }

    #[test]
    fn test_advantages() {
        let (engine, a, b) = default_engine();
        assert_eq!(
            engine.comparative_advantage(&a).unwrap(),
            ComparativeAnalysis::new(AdvantageKind::Floating, dec!(0.005))
        );
        assert_eq!(
            engine.comparative_advantage(&b).unwrap(),
            ComparativeAnalysis::new(AdvantageKind::Fixed, dec!(-0.008))
        );
        assert_eq!(
            engine.comparative_disadvantage(&a).unwrap(),
            ComparativeAnalysis::new(AdvantageKind::Fixed, dec!(0.008))
        );
        assert_eq!(
            engine.comparative_disadvantage(&b).unwrap(),
            ComparativeAnalysis::new(AdvantageKind::Floating, dec!(-0.005))
        );
    }

    #[test]
    fn test_equal_differentials_are_neutral() {
        let a = Party::new("A", dec!(0.05), dec!(0.01), Preference::Fixed);
        let b = Party::new("B", dec!(0.06), dec!(0.02), Preference::Floating);
        let engine = ComparativeAdvantageEngine::new(a.clone(), b.clone(), swap(&a, &b)).unwrap();
        assert_eq!(engine.comparative_advantage(&a).unwrap(), ComparativeAnalysis::neutral());
        assert_eq!(engine.comparative_disadvantage(&b).unwrap(), ComparativeAnalysis::neutral());
        assert_eq!(engine.total_arbitrage(), Decimal::ZERO);
    }

    #[test]
    fn test_total_arbitrage() {
        let (engine, _, _) = default_engine();
        assert_eq!(engine.total_arbitrage(), dec!(0.013));
    }

    #[test]
    fn test_benefit_metrics() {
        let (engine, a, b) = default_engine();

        // A receives the 9.60% fixed leg and borrows floating at S+75.
        assert_eq!(engine.market_paying_vs_swap_receiving_benefit(&a).unwrap(), dec!(0.0885));
        assert_eq!(engine.total_cost(&a).unwrap(), dec!(0.0895));
        assert_eq!(engine.market_improvement(&a).unwrap(), dec!(0.0150));

        // B receives S+10 and borrows fixed at 9.65%.
        assert_eq!(engine.market_paying_vs_swap_receiving_benefit(&b).unwrap(), dec!(-0.0955));
        assert_eq!(engine.total_cost(&b).unwrap(), dec!(0.0005));
        assert_eq!(engine.market_improvement(&b).unwrap(), dec!(0.0020));
    }

    #[test]
    fn test_analyze() {
        let (engine, a, b) = default_engine();
        let summary = engine.analyze().unwrap();
        assert_eq!(summary.total_arbitrage, dec!(0.013));
        assert_eq!(summary.fixed_rate, dec!(0.096));
        assert_eq!(summary.floating_rate, dec!(0.001));
        assert_eq!(summary.party_a_analysis.party, a);
        assert_eq!(summary.party_a_analysis.paying_position, RateKind::Floating);
        assert_eq!(summary.party_a_analysis.receiving_position, Some(RateKind::Fixed));
        assert_eq!(summary.party_b_analysis.party, b);
        assert_eq!(summary.party_b_analysis.paying_position, RateKind::Fixed);
        assert_eq!(summary.party_b_analysis.receiving_position, Some(RateKind::Floating));
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let (engine, _, _) = default_engine();
        assert_eq!(engine.analyze().unwrap(), engine.analyze().unwrap());
    }

    #[test]
    fn test_duplicate_party_rejected() {
        let (a, b) = parties();
        let err = ComparativeAdvantageEngine::new(a.clone(), a.clone(), swap(&a, &b)).unwrap_err();
        assert!(matches!(err, AnalysisError::DuplicateParty { .. }));
    }

    #[test]
    fn test_builder_missing_inputs() {
        let (a, b) = parties();
        let err = ComparativeAdvantageEngine::builder()
            .party_b(b.clone())
            .swap(swap(&a, &b))
            .build()
            .unwrap_err();
        assert_eq!(err, AnalysisError::MissingInput { input: "party_a" });

        let err = ComparativeAdvantageEngine::builder()
            .party_a(a.clone())
            .build()
            .unwrap_err();
        assert_eq!(err, AnalysisError::MissingInput { input: "party_b" });

        let engine = ComparativeAdvantageEngine::builder()
            .party_a(a.clone())
            .party_b(b.clone())
            .swap(swap(&a, &b))
            .build();
        assert!(engine.is_ok());
    }

    #[test]
    fn test_unknown_party() {
        let (engine, _, _) = default_engine();
        let stranger = Party::new("Party C", dec!(0.09), dec!(0.002), Preference::Fixed);
        assert!(matches!(
            engine.comparative_advantage(&stranger),
            Err(AnalysisError::UnknownParty { .. })
        ));
        assert!(engine.counterparty(&stranger).is_err());
    }

    #[test]
    fn test_party_off_swap_receives_floating_leg() {
        let (a, b) = parties();
        let c = Party::new("Party C", dec!(0.09), dec!(0.002), Preference::Fixed);
        // Swap between B and C, analysed for A and B.
        let engine = ComparativeAdvantageEngine::new(a.clone(), b.clone(), swap(&b, &c)).unwrap();
        assert_eq!(engine.receiving_position(&a), None);
        assert_eq!(engine.receiving_rate(&a).value(), dec!(0.001));

        // S+10 received against A's S+75 floating quote.
        assert_eq!(engine.market_paying_vs_swap_receiving_benefit(&a).unwrap(), dec!(-0.0065));
        // A is not the fixed payer, so it pays the S+10 floating leg.
        assert_eq!(engine.total_cost(&a).unwrap(), dec!(-0.0055));
        assert_eq!(engine.market_improvement(&a).unwrap(), dec!(0.1100));

        let summary = engine.analyze().unwrap();
        assert_eq!(summary.party_a_analysis.receiving_position, None);
        assert_eq!(summary.party_a_analysis.receiving_leg(), RateKind::Floating);
        assert_eq!(summary.party_b_analysis.receiving_position, Some(RateKind::Floating));
    }

    #[test]
    fn test_absolute_advantages() {
        let (engine, _, b) = default_engine();
        let abs = engine.absolute_advantages().unwrap();
        assert_eq!(abs.fixed, Some(b.clone()));
        assert_eq!(abs.floating, Some(b));
    }

    #[test]
    fn test_neutral_advantage_uses_floating_quote() {
        let a = Party::new("A", dec!(0.05), dec!(0.01), Preference::Fixed);
        let b = Party::new("B", dec!(0.06), dec!(0.02), Preference::Floating);
        let engine = ComparativeAdvantageEngine::new(a.clone(), b.clone(), swap(&b, &a)).unwrap();
        // A receives fixed 9.60%; the neutral advantage resolves to its S+100 quote.
        assert_eq!(
            engine.market_paying_vs_swap_receiving_benefit(&a).unwrap(),
            dec!(0.086)
        );
    }
}
