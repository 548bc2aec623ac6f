//! Default comparative-advantage scenario.
//!
//! Party A borrows at 10.45% fixed or S+75; Party B at 9.65% fixed or S+25.
//! B is cheaper in both markets, but comparatively cheaper in fixed, so the
//! advisor puts B on the fixed leg and the swap splits the arbitrage.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use swap_analyzer::analysis::advisor::OpportunityAdvisor;
use swap_analyzer::analysis::engine::ComparativeAdvantageEngine;
use swap_analyzer::analysis::report::SwapReport;
use swap_analyzer::core::party::{Party, Preference};

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  swap-analyzer: Default Scenario Example     ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let party_a = Party::new("Party A", dec!(0.1045), dec!(0.0075), Preference::Fixed);
    let party_b = Party::new("Party B", dec!(0.0965), dec!(0.0025), Preference::Floating);

    // --- Step 1: Who should pay fixed? ---
    println!("━━━ Step 1: Fixed-Rate Payer ━━━\n");

    let recommendation = OpportunityAdvisor::find_fixed_rate_payer(&party_a, &party_b);
    println!("Fixed-rate payer:    {}", recommendation.fixed_rate_payer);
    println!("Floating-rate payer: {}", recommendation.floating_rate_payer);
    println!("Basis:               {}\n", recommendation.basis);

    let swap = OpportunityAdvisor::propose_swap(
        &party_a,
        &party_b,
        dec!(0.096),
        dec!(0.001),
        dec!(1_000_000),
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
    )
    .unwrap();

    // --- Step 2: Full analysis ---
    println!("━━━ Step 2: Analysis ━━━\n");

    let engine = ComparativeAdvantageEngine::new(party_a, party_b, swap).unwrap();
    let summary = engine.analyze().unwrap();
    let report = SwapReport::new(&engine, &summary).unwrap();
    println!("{}", report);

    // --- Step 3: Position table ---
    println!("━━━ Step 3: Positions ━━━\n");
    println!(
        "  {:<10} {:>8} {:>10} {:>8} {:>8} {:>8} {:>10}",
        "Party", "Pays", "Receives", "Market", "Benefit", "Net", "vs Market"
    );
    for row in report.party_positions() {
        println!(
            "  {:<10} {:>8} {:>10} {:>8} {:>8} {:>8} {:>10}",
            row.party,
            row.swap_paying_rate,
            row.swap_receiving_rate,
            row.market_position,
            row.benefit,
            row.net_position,
            row.net_market_benefit
        );
    }

    // --- Step 4: Payments ---
    println!("\n━━━ Step 4: Semi-Annual Payments at 5.00% Benchmark ━━━\n");
    let payments = engine.swap().calculate_interest_payments(dec!(0.05));
    println!("Fixed leg:    {}", payments.fixed_leg);
    println!("Floating leg: {}", payments.floating_leg);
    println!("Net (fixed payer receives): {}", payments.fixed_leg_net);
}
