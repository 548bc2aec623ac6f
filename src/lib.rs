//! # swap-analyzer
//!
//! Comparative-advantage analysis for interest rate swaps.
//!
//! Given two parties' direct borrowing quotes in the fixed and floating
//! markets and a negotiated swap between them, this engine works out which
//! market each party is comparatively cheaper in, how much arbitrage the swap
//! unlocks, and what each party gains versus borrowing directly.
//!
//! ## Architecture
//!
//! - **core** — Value types: interest rates, parties, the swap contract
//! - **analysis** — Comparative-advantage engine, payer advisor, report projections
//! - **scenario** — JSON scenario configuration and random quote generation

pub mod analysis;
pub mod core;
pub mod scenario;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::analysis::advisor::{FixedPayerRecommendation, OpportunityAdvisor};
    pub use crate::analysis::engine::{
        AdvantageKind, AnalysisError, ComparativeAdvantageEngine, ComparativeAnalysis,
        SwapAnalysisResult, SwapSummary,
    };
    pub use crate::analysis::report::SwapReport;
    pub use crate::core::party::{Party, PartyId, Preference};
    pub use crate::core::rate::{InterestRate, RateError, RateKind};
    pub use crate::core::swap::{InterestPayments, Swap, SwapError};
    pub use crate::scenario::config::{Scenario, ScenarioConfig, ScenarioError};
}
