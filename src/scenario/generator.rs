use crate::core::party::Preference;
use crate::scenario::config::{PartyConfig, ScenarioConfig, SwapConfig};
use chrono::{Months, Utc};
use rand::Rng;
use rust_decimal::Decimal;

/// Ranges for generating random market quotes, in basis points.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Fixed-rate quotes are drawn from `min_fixed_bps..=max_fixed_bps`.
    pub min_fixed_bps: i64,
    pub max_fixed_bps: i64,
    /// Floating spreads are drawn from `min_spread_bps..=max_spread_bps`.
    pub min_spread_bps: i64,
    pub max_spread_bps: i64,
    pub notional: Decimal,
    pub tenor_years: u32,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            min_fixed_bps: 300,
            max_fixed_bps: 1_200,
            min_spread_bps: 0,
            max_spread_bps: 150,
            notional: Decimal::from(1_000_000),
            tenor_years: 5,
        }
    }
}

fn bps(value: i64) -> Decimal {
    Decimal::new(value, 4)
}

/// Generate a random two-party scenario with the thread-local RNG.
pub fn generate_random_scenario(config: &QuoteConfig) -> ScenarioConfig {
    generate_scenario_with(&mut rand::thread_rng(), config)
}

/// Generate a random two-party scenario from the given RNG.
///
/// The swap's fixed rate lies between the two parties' fixed quotes and its
/// spread below the smaller of their floating spreads, as a dealer would
/// price it. The fixed-rate payer is left to the advisor.
pub fn generate_scenario_with<R: Rng + ?Sized>(rng: &mut R, config: &QuoteConfig) -> ScenarioConfig {
    let mut party = |name: &str, preference| PartyConfig {
        name: name.to_string(),
        fixed_rate: bps(rng.gen_range(config.min_fixed_bps..=config.max_fixed_bps)),
        floating_rate_delta: bps(rng.gen_range(config.min_spread_bps..=config.max_spread_bps)),
        preference,
    };
    let party_a = party("Party A", Preference::Fixed);
    let party_b = party("Party B", Preference::Floating);

    let (low, high) = ordered(party_a.fixed_rate, party_b.fixed_rate);
    let fixed_rate = bps(rng.gen_range(to_bps(low)..=to_bps(high)));
    let max_swap_spread = to_bps(party_a.floating_rate_delta.min(party_b.floating_rate_delta));
    let floating_rate_delta = bps(rng.gen_range(0..=max_swap_spread));

    let start_date = Utc::now().date_naive();
    let end_date = config
        .tenor_years
        .checked_mul(12)
        .and_then(|months| start_date.checked_add_months(Months::new(months)))
        .unwrap_or(start_date);

    ScenarioConfig {
        party_a,
        party_b,
        swap: SwapConfig {
            fixed_rate,
            floating_rate_delta,
            notional: config.notional,
            fixed_rate_payer: None,
            start_date,
            end_date,
        },
        benchmark_rate: None,
    }
}

fn ordered(a: Decimal, b: Decimal) -> (Decimal, Decimal) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn to_bps(rate: Decimal) -> i64 {
    // Quotes are generated on a whole basis-point grid.
    let scaled = (rate * Decimal::from(10_000)).trunc();
    scaled.mantissa() as i64 / 10_i64.pow(scaled.scale())
}
