use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use swap_analyzer::analysis::advisor::{OpportunityAdvisor, RecommendationBasis};
use swap_analyzer::analysis::engine::{AdvantageKind, ComparativeAdvantageEngine};
use swap_analyzer::core::party::{Party, Preference};
use swap_analyzer::core::rate::{InterestRate, RateError, RateKind};
use swap_analyzer::core::swap::Swap;

/// A rate between -5% and 20% on a whole basis-point grid.
fn arb_value() -> impl Strategy<Value = Decimal> {
    (-500i64..2_000i64).prop_map(|bps| Decimal::new(bps, 4))
}

fn arb_kind() -> impl Strategy<Value = RateKind> {
    prop_oneof![Just(RateKind::Fixed), Just(RateKind::Floating)]
}

fn arb_rate() -> impl Strategy<Value = InterestRate> {
    (arb_value(), arb_kind()).prop_map(|(v, k)| InterestRate::new(v, k))
}

/// A party with fixed quotes of 3%-12% and spreads of 0-150bp.
fn arb_party(name: &'static str) -> impl Strategy<Value = Party> {
    (300i64..1_200i64, 0i64..150i64).prop_map(move |(fixed, spread)| {
        Party::new(
            name,
            Decimal::new(fixed, 4),
            Decimal::new(spread, 4),
            Preference::Fixed,
        )
    })
}

fn arb_engine() -> impl Strategy<Value = (ComparativeAdvantageEngine, Party, Party)> {
    (arb_party("A"), arb_party("B"), arb_value(), 0i64..50i64).prop_map(
        |(a, b, fixed_rate, spread)| {
            let rec = OpportunityAdvisor::find_fixed_rate_payer(&a, &b);
            let swap = Swap::new(
                fixed_rate,
                Decimal::new(spread, 4),
                Decimal::from(1_000_000),
                rec.fixed_rate_payer,
                rec.floating_rate_payer,
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            )
            .unwrap();
            let engine = ComparativeAdvantageEngine::new(a.clone(), b.clone(), swap).unwrap();
            (engine, a, b)
        },
    )
}

proptest! {
    // ===================================================================
    // Same-kind differences are zero-valued fixed differentials.
    // ===================================================================
    #[test]
    fn self_difference_is_fixed_zero(rate in arb_rate()) {
        let diff = rate - rate;
        prop_assert_eq!(diff.value(), Decimal::ZERO);
        prop_assert_eq!(diff.kind(), RateKind::Fixed);
    }

    // ===================================================================
    // Comparing rates of different kinds is always an error.
    // ===================================================================
    #[test]
    fn cross_kind_comparison_fails(a in arb_value(), b in arb_value()) {
        let fixed = InterestRate::fixed(a);
        let floating = InterestRate::floating(b);
        let mismatch = |r: Result<bool, RateError>| matches!(r, Err(RateError::KindMismatch { .. }));
        prop_assert!(mismatch(fixed.try_eq(&floating)));
        prop_assert!(mismatch(fixed.try_lt(&floating)));
        prop_assert!(mismatch(floating.try_gt(&fixed)));
        prop_assert!(mismatch(fixed.try_ne(&floating)));
        prop_assert!(mismatch(fixed.try_le(&floating)));
        prop_assert!(mismatch(floating.try_ge(&fixed)));
        prop_assert!(fixed.try_cmp(&floating).is_err());
    }

    // ===================================================================
    // Advantage and disadvantage never point at the same market, except
    // when both are neutral on equal differentials.
    // ===================================================================
    #[test]
    fn advantage_and_disadvantage_differ((engine, a, b) in arb_engine()) {
        for party in [&a, &b] {
            let adv = engine.comparative_advantage(party).unwrap();
            let dis = engine.comparative_disadvantage(party).unwrap();
            let cmp = engine.comparatives_for_party(party).unwrap();
            if cmp.fixed == cmp.floating {
                prop_assert_eq!(adv.kind, AdvantageKind::Neutral);
                prop_assert_eq!(dis.kind, AdvantageKind::Neutral);
            } else {
                prop_assert_ne!(adv.kind, dis.kind);
                prop_assert_ne!(adv.kind, AdvantageKind::Neutral);
            }
        }
    }

    // ===================================================================
    // Total arbitrage is the sum of the advantage magnitudes, and does not
    // depend on which party is labelled A.
    // ===================================================================
    #[test]
    fn arbitrage_is_symmetric((engine, a, b) in arb_engine()) {
        let sum = engine.comparative_advantage(&a).unwrap().rate.abs()
            + engine.comparative_advantage(&b).unwrap().rate.abs();
        prop_assert_eq!(engine.total_arbitrage(), sum);

        let reversed = ComparativeAdvantageEngine::new(b, a, engine.swap().clone()).unwrap();
        prop_assert_eq!(engine.total_arbitrage(), reversed.total_arbitrage());
    }

    // ===================================================================
    // analyze() is referentially transparent.
    // ===================================================================
    #[test]
    fn analyze_is_idempotent((engine, _a, _b) in arb_engine()) {
        let first = engine.analyze().unwrap();
        let second = engine.analyze().unwrap();
        prop_assert_eq!(first, second);
    }

    // ===================================================================
    // The advisor's pick has a fixed advantage unless it reports a tie.
    // ===================================================================
    #[test]
    fn advisor_picks_fixed_advantaged((engine, a, b) in arb_engine()) {
        let rec = OpportunityAdvisor::find_fixed_rate_payer(&a, &b);
        let kind = engine.comparative_advantage(&rec.fixed_rate_payer).unwrap().kind;
        match rec.basis {
            RecommendationBasis::ComparativeAdvantage => prop_assert_eq!(kind, AdvantageKind::Fixed),
            RecommendationBasis::Tie => {
                prop_assert_eq!(kind, AdvantageKind::Neutral);
                prop_assert_eq!(rec.fixed_rate_payer, a);
            }
        }
    }

    // ===================================================================
    // Total cost and market improvement add back to the bypassed quote.
    // ===================================================================
    #[test]
    fn improvement_plus_cost_is_bypassed_rate((engine, a, b) in arb_engine()) {
        for party in [&a, &b] {
            let dis = engine.comparative_disadvantage(party).unwrap();
            let bypassed = party.rate(dis.kind.rate_kind()).value();
            let total = engine.market_improvement(party).unwrap() + engine.total_cost(party).unwrap();
            prop_assert_eq!(total, bypassed);
        }
    }

    // ===================================================================
    // Net leg payments mirror each other for any benchmark.
    // ===================================================================
    #[test]
    fn net_payments_mirror((engine, _a, _b) in arb_engine(), benchmark in arb_value()) {
        let p = engine.swap().calculate_interest_payments(benchmark);
        prop_assert_eq!(p.fixed_leg_net, -p.floating_leg_net);
        prop_assert_eq!(p.fixed_leg_net, p.floating_leg - p.fixed_leg);
    }
}
