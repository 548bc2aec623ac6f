use crate::analysis::advisor::{FixedPayerRecommendation, OpportunityAdvisor};
use crate::analysis::engine::{AnalysisError, ComparativeAdvantageEngine};
use crate::core::party::{Party, Preference};
use crate::core::swap::{Swap, SwapError};
use chrono::{NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors arising from loading or building a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fixed_rate_payer '{name}' does not match either party")]
    UnknownPayer { name: String },
    #[error(transparent)]
    Swap(#[from] SwapError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// One party's market quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyConfig {
    pub name: String,
    pub fixed_rate: Decimal,
    pub floating_rate_delta: Decimal,
    #[serde(default = "default_preference")]
    pub preference: Preference,
}

fn default_preference() -> Preference {
    Preference::Fixed
}

impl PartyConfig {
    pub fn to_party(&self) -> Party {
        Party::new(
            self.name.clone(),
            self.fixed_rate,
            self.floating_rate_delta,
            self.preference,
        )
    }
}

/// Negotiated swap terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapConfig {
    pub fixed_rate: Decimal,
    pub floating_rate_delta: Decimal,
    #[serde(default = "default_notional")]
    pub notional: Decimal,
    /// Name of the fixed-rate payer. When absent the advisor picks one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_rate_payer: Option<String>,
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    #[serde(default = "default_end_date")]
    pub end_date: NaiveDate,
}

fn default_notional() -> Decimal {
    dec!(1_000_000)
}

fn default_start_date() -> NaiveDate {
    Utc::now().date_naive()
}

fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// A complete analysis input, as read from JSON.
///
/// Rates are decimal fractions written as JSON strings, so no precision is
/// lost in parsing:
///
/// ```json
/// {
///   "party_a": { "name": "Party A", "fixed_rate": "0.1045", "floating_rate_delta": "0.0075" },
///   "party_b": { "name": "Party B", "fixed_rate": "0.0965", "floating_rate_delta": "0.0025",
///                "preference": "floating" },
///   "swap": { "fixed_rate": "0.096", "floating_rate_delta": "0.001", "notional": "1000000",
///             "start_date": "2025-01-01", "end_date": "2030-01-01" },
///   "benchmark_rate": "0.05"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub party_a: PartyConfig,
    pub party_b: PartyConfig,
    pub swap: SwapConfig,
    /// Benchmark fixing for leg payment figures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark_rate: Option<Decimal>,
}

impl Default for ScenarioConfig {
    /// The shipped default scenario.
    fn default() -> Self {
        Self {
            party_a: PartyConfig {
                name: "Party A".to_string(),
                fixed_rate: dec!(0.1045),
                floating_rate_delta: dec!(0.0075),
                preference: Preference::Fixed,
            },
            party_b: PartyConfig {
                name: "Party B".to_string(),
                fixed_rate: dec!(0.0965),
                floating_rate_delta: dec!(0.0025),
                preference: Preference::Floating,
            },
            swap: SwapConfig {
                fixed_rate: dec!(0.096),
                floating_rate_delta: dec!(0.001),
                notional: default_notional(),
                fixed_rate_payer: None,
                start_date: default_start_date(),
                end_date: default_end_date(),
            },
            benchmark_rate: None,
        }
    }
}

/// Parties and swap built from a [`ScenarioConfig`].
#[derive(Debug, Clone)]
pub struct Scenario {
    pub party_a: Party,
    pub party_b: Party,
    pub swap: Swap,
    /// Present when the advisor chose the fixed-rate payer.
    pub recommendation: Option<FixedPayerRecommendation>,
    pub benchmark_rate: Option<Decimal>,
}

impl Scenario {
    pub fn engine(&self) -> Result<ComparativeAdvantageEngine, AnalysisError> {
        ComparativeAdvantageEngine::new(
            self.party_a.clone(),
            self.party_b.clone(),
            self.swap.clone(),
        )
    }
}

impl ScenarioConfig {
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Create the parties and the swap, asking the advisor for the payers
    /// unless the configuration names one.
    pub fn build(&self) -> Result<Scenario, ScenarioError> {
        let party_a = self.party_a.to_party();
        let party_b = self.party_b.to_party();

        let (fixed_payer, floating_payer, recommendation) = match &self.swap.fixed_rate_payer {
            Some(name) if *name == party_a.name() => (party_a.clone(), party_b.clone(), None),
            Some(name) if *name == party_b.name() => (party_b.clone(), party_a.clone(), None),
            Some(name) => return Err(ScenarioError::UnknownPayer { name: name.clone() }),
            None => {
                let rec = OpportunityAdvisor::find_fixed_rate_payer(&party_a, &party_b);
                (
                    rec.fixed_rate_payer.clone(),
                    rec.floating_rate_payer.clone(),
                    Some(rec),
                )
            }
        };
        debug!(
            "Scenario swap: {} pays fixed, {} pays floating",
            fixed_payer, floating_payer
        );

        let swap = Swap::new(
            self.swap.fixed_rate,
            self.swap.floating_rate_delta,
            self.swap.notional,
            fixed_payer,
            floating_payer,
            self.swap.start_date,
            self.swap.end_date,
        )?;

        Ok(Scenario {
            party_a,
            party_b,
            swap,
            recommendation,
            benchmark_rate: self.benchmark_rate,
        })
    }
}
