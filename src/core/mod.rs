//! Value types: interest rates, parties and the swap contract.

pub mod party;
pub mod rate;
pub mod swap;
