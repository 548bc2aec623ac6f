//! swap-analyzer CLI
//!
//! Run comparative-advantage analysis on a two-party interest rate swap.
//!
//! # Usage
//!
//! ```bash
//! # Analyze the shipped default scenario
//! swap-analyzer analyze
//!
//! # Analyze a scenario file, output as JSON
//! swap-analyzer analyze --input scenario.json --format json
//!
//! # Semi-annual leg payments at a benchmark fixing
//! swap-analyzer payments --input scenario.json --benchmark 0.05
//!
//! # Generate a random scenario for testing
//! swap-analyzer generate --output random.json
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use std::fs;
use std::process;
use swap_analyzer::analysis::advisor::FixedPayerRecommendation;
use swap_analyzer::analysis::engine::SwapSummary;
use swap_analyzer::analysis::report::{
    MarketRatesRow, OpportunityRow, PartyPositionRow, SwapDetails, SwapReport,
};
use swap_analyzer::core::swap::InterestPayments;
use swap_analyzer::scenario::config::{Scenario, ScenarioConfig};
use swap_analyzer::scenario::generator::{generate_random_scenario, QuoteConfig};

fn print_usage() {
    eprintln!(
        r#"swap-analyzer — comparative-advantage analysis for interest rate swaps

USAGE:
    swap-analyzer <COMMAND> [OPTIONS]

COMMANDS:
    analyze     Analyze a two-party swap
    payments    Show semi-annual leg payments at a benchmark rate
    defaults    Print the default scenario as JSON
    generate    Generate a random scenario (for testing)
    help        Show this message

OPTIONS (analyze, payments):
    --input <FILE>        Path to JSON scenario file (default: built-in scenario)
    --fixed-payer <NAME>  Override the fixed-rate payer by party name

OPTIONS (analyze):
    --format <FORMAT>     Output format: text (default) or json

OPTIONS (payments):
    --benchmark <RATE>    Benchmark fixing as a fraction, e.g. 0.05

OPTIONS (generate):
    --tenor <YEARS>       Swap tenor in years (default: 5)
    --output <FILE>       Write to file instead of stdout

ENVIRONMENT:
    RUST_LOG              Log filter, e.g. RUST_LOG=swap_analyzer=debug

EXAMPLES:
    swap-analyzer analyze
    swap-analyzer analyze --input scenario.json --format json
    swap-analyzer payments --benchmark 0.0525
    swap-analyzer generate --tenor 10 --output random.json"#
    );
}

/// JSON output schema for an analysis run.
#[derive(Serialize)]
struct AnalysisOutput<'a> {
    summary: &'a SwapSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendation: Option<&'a FixedPayerRecommendation>,
    market_rates: Vec<MarketRatesRow>,
    opportunities: Vec<OpportunityRow>,
    swap_details: SwapDetails,
    party_positions: Vec<PartyPositionRow>,
}

#[derive(Default)]
struct CommonArgs {
    input: Option<String>,
    fixed_payer: Option<String>,
    format: Option<String>,
    benchmark: Option<String>,
}

fn take_value(args: &[String], i: usize, flag: &str, what: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{} requires {}", flag, what);
        process::exit(1);
    })
}

fn parse_common(args: &[String], allowed: &[&str]) -> CommonArgs {
    let mut parsed = CommonArgs::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        if !allowed.contains(&flag) {
            eprintln!("Unknown option: {}", flag);
            process::exit(1);
        }
        i += 1;
        match flag {
            "--input" => parsed.input = Some(take_value(args, i, flag, "a file path")),
            "--fixed-payer" => parsed.fixed_payer = Some(take_value(args, i, flag, "a party name")),
            "--format" => parsed.format = Some(take_value(args, i, flag, "'text' or 'json'")),
            "--benchmark" => parsed.benchmark = Some(take_value(args, i, flag, "a rate")),
            _ => unreachable!("flag checked against allowed list"),
        }
        i += 1;
    }
    parsed
}

fn load_scenario(args: &CommonArgs) -> Scenario {
    let mut config = match &args.input {
        Some(path) => ScenarioConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            eprintln!("Run `swap-analyzer defaults` to see the expected format.");
            process::exit(1);
        }),
        None => ScenarioConfig::default(),
    };
    if let Some(name) = &args.fixed_payer {
        config.swap.fixed_rate_payer = Some(name.clone());
    }
    config.build().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    })
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing output: {}", e);
        process::exit(1);
    })
}

fn cmd_analyze(args: &[String]) {
    let args = parse_common(args, &["--input", "--fixed-payer", "--format"]);
    let scenario = load_scenario(&args);

    let engine = scenario.engine().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    let summary = engine.analyze().unwrap_or_else(|e| {
        eprintln!("Error analyzing swap: {}", e);
        process::exit(1);
    });
    let report = SwapReport::new(&engine, &summary).unwrap_or_else(|e| {
        eprintln!("Error building report: {}", e);
        process::exit(1);
    });

    match args.format.as_deref().unwrap_or("text") {
        "json" => {
            let output = AnalysisOutput {
                summary: &summary,
                recommendation: scenario.recommendation.as_ref(),
                market_rates: report.market_rates(),
                opportunities: report.opportunity_summary(),
                swap_details: report.swap_details(),
                party_positions: report.party_positions(),
            };
            println!("{}", to_json(&output));
        }
        "text" => {
            if let Some(rec) = &scenario.recommendation {
                println!(
                    "Fixed-rate payer: {} (recommended, {})\n",
                    rec.fixed_rate_payer, rec.basis
                );
            }
            print!("{}", report);
        }
        other => {
            eprintln!("Unknown format '{}', expected 'text' or 'json'", other);
            process::exit(1);
        }
    }
}

fn cmd_payments(args: &[String]) {
    let args = parse_common(args, &["--input", "--fixed-payer", "--benchmark"]);
    let scenario = load_scenario(&args);

    let benchmark: Decimal = match args.benchmark.as_deref().map(str::parse::<Decimal>) {
        Some(Ok(rate)) => rate,
        Some(Err(e)) => {
            eprintln!("Invalid benchmark rate: {}", e);
            process::exit(1);
        }
        None => scenario.benchmark_rate.unwrap_or_else(|| {
            eprintln!("Error: --benchmark <RATE> is required (or set benchmark_rate in the scenario)");
            process::exit(1);
        }),
    };

    let swap = &scenario.swap;
    let InterestPayments {
        fixed_leg,
        floating_leg,
        fixed_leg_net,
        floating_leg_net,
    } = swap.calculate_interest_payments(benchmark);

    println!("=== Semi-Annual Payments (benchmark {}) ===", benchmark);
    println!("Notional:            {}", swap.notional());
    println!(
        "Fixed leg ({}):       {}  paid by {}",
        swap.fixed_rate(),
        fixed_leg.round_dp(2),
        swap.fixed_rate_payer()
    );
    println!(
        "Floating leg ({}):     {}  paid by {}",
        swap.floating_rate_delta(),
        floating_leg.round_dp(2),
        swap.floating_rate_payer()
    );
    println!("Net to fixed payer:    {}", fixed_leg_net.round_dp(2));
    println!("Net to floating payer: {}", floating_leg_net.round_dp(2));
}

fn cmd_defaults() {
    println!("{}", to_json(&ScenarioConfig::default()));
}

fn cmd_generate(args: &[String]) {
    let mut config = QuoteConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--tenor" => {
                i += 1;
                config.tenor_years = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--tenor requires a number of years");
                        process::exit(1);
                    });
            }
            "--output" => {
                i += 1;
                output_path = Some(take_value(args, i, "--output", "a file path"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let scenario = generate_random_scenario(&config);
    let json = to_json(&scenario);

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Generated scenario → {}", path);
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "analyze" => cmd_analyze(rest),
        "payments" => cmd_payments(rest),
        "defaults" => cmd_defaults(),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
