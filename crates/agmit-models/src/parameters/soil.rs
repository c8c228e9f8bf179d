//! Soil carbon parameters.
//!
//! The soil model is a single-pool reduction of RothC: instead of tracking
//! the four active pools with monthly rate-modifying factors, the total SOC
//! stock relaxes toward a management-defined equilibrium at an annual rate
//! set by soil texture and climate zone. The texture rates below bracket the
//! decade-scale turnover the RothC pool constants produce for tropical
//! cropland once the fast pools are aggregated away.

use agmit_core::series::FloatValue;
use agmit_core::site::{ClimateZone, SoilTexture};
use serde::{Deserialize, Serialize};

/// Parameters for soil organic carbon stock dynamics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilCarbonParameters {
    /// Annual approach rate toward equilibrium for sandy topsoil.
    /// unit: 1/yr
    /// default: 0.12
    pub rate_sandy: FloatValue,

    /// Annual approach rate for loamy topsoil.
    /// unit: 1/yr
    /// default: 0.085
    pub rate_loamy: FloatValue,

    /// Annual approach rate for clayey topsoil. Clay protects organic
    /// matter, slowing both loss and recovery.
    /// unit: 1/yr
    /// default: 0.055
    pub rate_clayey: FloatValue,

    /// Annual approach rate for organic soils.
    /// unit: 1/yr
    /// default: 0.035
    pub rate_organic: FloatValue,

    /// Decomposition-rate modifier for the tropical moist zone.
    /// unit: dimensionless
    /// default: 1.2
    pub factor_tropical_moist: FloatValue,

    /// Modifier for the tropical dry zone.
    /// unit: dimensionless
    /// default: 0.8
    pub factor_tropical_dry: FloatValue,

    /// Modifier for the tropical montane zone.
    /// unit: dimensionless
    /// default: 0.9
    pub factor_tropical_montane: FloatValue,

    /// Modifier for the warm temperate moist zone.
    /// unit: dimensionless
    /// default: 1.0
    pub factor_warm_temperate_moist: FloatValue,

    /// Modifier for the warm temperate dry zone.
    /// unit: dimensionless
    /// default: 0.7
    pub factor_warm_temperate_dry: FloatValue,

    /// Equilibrium-stock shift per unit of sustained organic carbon input.
    /// A field receiving 1 t C/ha/yr of retained organic input supports an
    /// equilibrium stock this much higher than the unamended one.
    /// unit: yr
    /// default: 12.0
    pub organic_input_response: FloatValue,

    /// Combustion factor applied to organic inputs in burn years; the
    /// burned fraction of that year's input never reaches the soil.
    /// unit: dimensionless
    /// default: 0.8 (IPCC herbaceous residue combustion factor)
    pub input_combustion_factor: FloatValue,
}

impl Default for SoilCarbonParameters {
    fn default() -> Self {
        Self {
            rate_sandy: 0.12,
            rate_loamy: 0.085,
            rate_clayey: 0.055,
            rate_organic: 0.035,
            factor_tropical_moist: 1.2,
            factor_tropical_dry: 0.8,
            factor_tropical_montane: 0.9,
            factor_warm_temperate_moist: 1.0,
            factor_warm_temperate_dry: 0.7,
            organic_input_response: 12.0,
            input_combustion_factor: 0.8,
        }
    }
}

impl SoilCarbonParameters {
    /// Base approach rate for a texture class (1/yr).
    pub fn texture_rate(&self, texture: SoilTexture) -> FloatValue {
        match texture {
            SoilTexture::Sandy => self.rate_sandy,
            SoilTexture::Loamy => self.rate_loamy,
            SoilTexture::Clayey => self.rate_clayey,
            SoilTexture::Organic => self.rate_organic,
        }
    }

    /// Climate modifier applied to the texture rate.
    pub fn climate_factor(&self, zone: ClimateZone) -> FloatValue {
        match zone {
            ClimateZone::TropicalMoist => self.factor_tropical_moist,
            ClimateZone::TropicalDry => self.factor_tropical_dry,
            ClimateZone::TropicalMontane => self.factor_tropical_montane,
            ClimateZone::WarmTemperateMoist => self.factor_warm_temperate_moist,
            ClimateZone::WarmTemperateDry => self.factor_warm_temperate_dry,
        }
    }

    /// Effective annual approach rate, capped below 1 so a stock never
    /// overshoots its equilibrium within a single year.
    pub fn approach_rate(&self, texture: SoilTexture, zone: ClimateZone) -> FloatValue {
        (self.texture_rate(texture) * self.climate_factor(zone)).min(1.0)
    }
}
