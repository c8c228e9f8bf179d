//! General project parameters shared by all scenarios.

use crate::errors::{EngineError, EngineResult};
use crate::series::FloatValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Climate classification resolved for the project location.
///
/// A raster- or table-backed lookup service is expected to resolve the zone
/// from the location; the engine only consumes the resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateZone {
    TropicalMoist,
    TropicalDry,
    TropicalMontane,
    WarmTemperateMoist,
    WarmTemperateDry,
}

impl FromStr for ClimateZone {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s {
            "tropical_moist" => Ok(ClimateZone::TropicalMoist),
            "tropical_dry" => Ok(ClimateZone::TropicalDry),
            "tropical_montane" => Ok(ClimateZone::TropicalMontane),
            "warm_temperate_moist" => Ok(ClimateZone::WarmTemperateMoist),
            "warm_temperate_dry" => Ok(ClimateZone::WarmTemperateDry),
            other => Err(EngineError::configuration(format!(
                "unknown climate zone '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClimateZone::TropicalMoist => "tropical_moist",
            ClimateZone::TropicalDry => "tropical_dry",
            ClimateZone::TropicalMontane => "tropical_montane",
            ClimateZone::WarmTemperateMoist => "warm_temperate_moist",
            ClimateZone::WarmTemperateDry => "warm_temperate_dry",
        };
        f.write_str(name)
    }
}

/// Soil texture class of the field's topsoil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilTexture {
    Sandy,
    Loamy,
    Clayey,
    Organic,
}

impl FromStr for SoilTexture {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s {
            "sandy" => Ok(SoilTexture::Sandy),
            "loamy" => Ok(SoilTexture::Loamy),
            "clayey" => Ok(SoilTexture::Clayey),
            "organic" => Ok(SoilTexture::Organic),
            other => Err(EngineError::configuration(format!(
                "unknown soil texture class '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for SoilTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SoilTexture::Sandy => "sandy",
            SoilTexture::Loamy => "loamy",
            SoilTexture::Clayey => "clayey",
            SoilTexture::Organic => "organic",
        };
        f.write_str(name)
    }
}

/// Immutable general project parameters.
///
/// Built once per project from validated user input and shared read-only
/// (by `Arc`) across every scenario. The engine assumes ranges were checked
/// by the project builder; construction re-checks the invariants the models
/// themselves rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContext {
    /// Decimal degrees, positive north.
    pub latitude: FloatValue,
    /// Decimal degrees, positive east.
    pub longitude: FloatValue,
    pub climate: ClimateZone,
    pub soil_texture: SoilTexture,
    /// Reference SOC stock for the soil/climate stratum (t C/ha).
    pub soil_reference_stock: FloatValue,
    /// Measured SOC stock at the project start, year 0 (t C/ha).
    pub initial_soil_stock: FloatValue,
    /// Accounting period N in years.
    pub n_years: usize,
    /// Field area in hectares.
    pub area_ha: FloatValue,
}

impl SiteContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        latitude: FloatValue,
        longitude: FloatValue,
        climate: ClimateZone,
        soil_texture: SoilTexture,
        soil_reference_stock: FloatValue,
        initial_soil_stock: FloatValue,
        n_years: usize,
        area_ha: FloatValue,
    ) -> EngineResult<Self> {
        if n_years == 0 {
            return Err(EngineError::configuration(
                "accounting period must be at least 1 year",
            ));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(EngineError::configuration(format!(
                "latitude {} outside [-90, 90]",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(EngineError::configuration(format!(
                "longitude {} outside [-180, 180]",
                longitude
            )));
        }
        for (name, value) in [
            ("soil reference stock", soil_reference_stock),
            ("initial soil stock", initial_soil_stock),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::configuration(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        if !area_ha.is_finite() || area_ha <= 0.0 {
            return Err(EngineError::configuration(format!(
                "field area must be positive, got {}",
                area_ha
            )));
        }
        Ok(Self {
            latitude,
            longitude,
            climate,
            soil_texture,
            soil_reference_stock,
            initial_soil_stock,
            n_years,
            area_ha,
        })
    }
}
