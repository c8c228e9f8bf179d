//! Core types and contracts for the smallholder GHG mitigation accounting
//! engine.
//!
//! The engine simulates annual carbon emissions and removals for a baseline
//! and an intervention land-management scenario over a fixed accounting
//! period and reports their difference. This crate holds the shared
//! vocabulary: the annual series type, the site and scenario value objects,
//! the error types, the sub-model trait seam, and the TOML project loader.
//!
//! The numerical sub-models themselves live in `agmit-models`.

pub mod component;
pub mod config;
pub mod errors;
pub mod scenario;
pub mod series;
pub mod site;
