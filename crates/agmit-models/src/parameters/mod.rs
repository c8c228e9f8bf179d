//! Sub-model parameters.
//!
//! Each sub-model has an associated parameters struct with defaults drawn
//! from the accounting methodology (IPCC 2006 GHG Inventory tables and the
//! Plan Vivo technical specification). All structs serialize, so a project
//! may carry a calibrated parameter set alongside its scenario data.

mod fire;
mod litter;
mod soil;

pub use fire::FireParameters;
pub use litter::LitterParameters;
pub use soil::SoilCarbonParameters;
