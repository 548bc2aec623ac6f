//! Scenario inputs: JSON configuration and random market-quote generation.

pub mod config;
pub mod generator;
