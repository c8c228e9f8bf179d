//! Biomass-burning parameters.
//!
//! Emission factors are from table 2.5 of the IPCC 2006 GHG Inventory
//! (AFOLU volume); combustion factors from the AFOLU burning tables.

use agmit_core::series::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters for fire emissions from scheduled burns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireParameters {
    /// Combustion factor for woody (tree) biomass.
    /// unit: dimensionless
    /// default: 0.74
    pub woody_combustion_factor: FloatValue,

    /// Combustion factor for herbaceous fuel (crop residue, grass).
    /// unit: dimensionless
    /// default: 0.80
    pub herbaceous_combustion_factor: FloatValue,

    /// Fraction of combusted carbon released as CO2.
    /// unit: dimensionless
    /// default: 1.0
    pub co2_emission_factor: FloatValue,

    /// CH4 emission factor for woody fuel.
    /// unit: g CH4 / kg DM burned
    /// default: 6.8
    pub ch4_woody: FloatValue,

    /// N2O emission factor for woody fuel.
    /// unit: g N2O / kg DM burned
    /// default: 0.2
    pub n2o_woody: FloatValue,

    /// CH4 emission factor for herbaceous fuel.
    /// unit: g CH4 / kg DM burned
    /// default: 2.7
    pub ch4_herbaceous: FloatValue,

    /// N2O emission factor for herbaceous fuel.
    /// unit: g N2O / kg DM burned
    /// default: 0.07
    pub n2o_herbaceous: FloatValue,

    /// Carbon fraction of fuel dry matter, used to express the carbon at
    /// risk as dry matter for the non-CO2 factors.
    /// unit: t C / t DM
    /// default: 0.5
    pub fuel_carbon_fraction: FloatValue,
}

impl Default for FireParameters {
    fn default() -> Self {
        Self {
            woody_combustion_factor: 0.74,
            herbaceous_combustion_factor: 0.80,
            co2_emission_factor: 1.0,
            ch4_woody: 6.8,
            n2o_woody: 0.2,
            ch4_herbaceous: 2.7,
            n2o_herbaceous: 0.07,
            fuel_carbon_fraction: 0.5,
        }
    }
}

impl FireParameters {
    /// Parameters with the non-CO2 factors zeroed. Used when only the CO2
    /// term of a burn is of interest.
    pub fn co2_only() -> Self {
        Self {
            ch4_woody: 0.0,
            n2o_woody: 0.0,
            ch4_herbaceous: 0.0,
            n2o_herbaceous: 0.0,
            ..Self::default()
        }
    }
}
