//! Litter and fertilizer parameters.

use agmit_core::series::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters for organic input decomposition and fertilizer nitrogen.
///
/// Organic matter applied in year $s$ releases its carbon over the following
/// years with the fraction $e^{-\lambda j} - e^{-\lambda (j+1)}$ emitted in
/// the $j$-th year after application, where $\lambda = \ln 2 / H$ and $H$ is
/// the half-life. Nitrogen terms are direct, single-year emissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LitterParameters {
    /// Decomposition half-life of applied organic matter.
    /// unit: yr
    /// default: 3.0
    pub half_life: FloatValue,

    /// Fraction of organic nitrogen volatilized before nitrification.
    /// unit: dimensionless
    /// default: 0.2
    pub organic_volatile_fraction: FloatValue,

    /// Fraction of synthetic nitrogen volatilized before nitrification.
    /// unit: dimensionless
    /// default: 0.1
    pub synthetic_volatile_fraction: FloatValue,

    /// Direct N2O emission factor for nitrogen reaching the soil.
    /// unit: kg N2O-N / kg N
    /// default: 0.01 (IPCC 2006 Tier 1)
    pub n2o_emission_factor: FloatValue,
}

impl Default for LitterParameters {
    fn default() -> Self {
        Self {
            half_life: 3.0,
            organic_volatile_fraction: 0.2,
            synthetic_volatile_fraction: 0.1,
            n2o_emission_factor: 0.01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_methodology() {
        let params = LitterParameters::default();
        assert!((params.n2o_emission_factor - 0.01).abs() < 1e-12);
        assert!(params.organic_volatile_fraction > params.synthetic_volatile_fraction);
    }
}
