//! Emissions sub-models and mitigation accounting.
//!
//! Sub-models are organised by domain:
//! - `soil`: soil organic carbon stock dynamics
//! - `tree`: tree cohort biomass growth and stock change
//! - `litter`: organic input decomposition and fertilizer nitrogen
//! - `fire`: biomass-burning emissions including non-CO2 gases
//!
//! `accounting` orchestrates the four sub-models into a per-scenario
//! emissions series; `mitigation` pairs a baseline with an intervention and
//! reports the net difference.
//!
//! Each sub-model has an associated parameters struct in the `parameters`
//! module with defaults matching the Plan Vivo / IPCC 2006 coefficients.

pub mod accounting;
pub mod constants;
pub mod fire;
pub mod litter;
pub mod mitigation;
pub mod parameters;
pub mod soil;
pub mod tree;

pub use accounting::{evaluate_scenarios, ScenarioEmissions};
pub use fire::FireEmissionModel;
pub use litter::LitterDecompositionModel;
pub use mitigation::{MitigationEngine, MitigationResult};
pub use soil::SoilCarbonModel;
pub use tree::{TreeGrowthModel, TreeGrowthOutput};
