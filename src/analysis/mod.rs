//! Comparative-advantage analysis over two parties and a swap.

pub mod advisor;
pub mod engine;
pub mod report;
