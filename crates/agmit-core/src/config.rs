//! TOML project configuration.
//!
//! This is the data contract between the engine and the (out-of-scope)
//! project/scenario builders: a single TOML document describing the site
//! and its scenarios. Loading validates everything up front and yields
//! immutable `SiteContext`/`Scenario` values; the engine itself holds no
//! process-wide configuration.
//!
//! ```toml
//! [site]
//! latitude = -6.8
//! longitude = 39.2
//! climate = "tropical_dry"
//! soil_texture = "loamy"
//! soil_reference_stock = 45.0
//! initial_soil_stock = 30.0
//! n_years = 20
//! area_ha = 1.5
//!
//! [[scenario]]
//! name = "business-as-usual"
//! role = "baseline"
//! soil_equilibrium_stock = 26.0
//!
//! [[scenario.cohort]]
//! species = "grevillea"
//! max_biomass = 80.0
//! growth_rate = 0.11
//! planting_year = 1
//!
//! [[scenario.year]]
//! organic_input = 1.0
//! synthetic_n = 25.0
//! ```
//!
//! A scenario with no `year` tables gets a no-management sequence spanning
//! the accounting period. If any `year` tables are given, their count must
//! equal `n_years` exactly.

use crate::errors::{EngineError, EngineResult};
use crate::scenario::{ManagementEvents, Scenario, ScenarioRole, TreeCohort, YearEvents};
use crate::series::FloatValue;
use crate::site::{ClimateZone, SiteContext, SoilTexture};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    site: SiteConfig,
    #[serde(default, rename = "scenario")]
    scenarios: Vec<ScenarioConfig>,
}

#[derive(Debug, Deserialize)]
struct SiteConfig {
    latitude: FloatValue,
    longitude: FloatValue,
    climate: String,
    soil_texture: String,
    soil_reference_stock: FloatValue,
    initial_soil_stock: FloatValue,
    n_years: i64,
    area_ha: FloatValue,
}

#[derive(Debug, Deserialize)]
struct ScenarioConfig {
    name: String,
    role: ScenarioRole,
    soil_equilibrium_stock: FloatValue,
    #[serde(default, rename = "cohort")]
    cohorts: Vec<CohortConfig>,
    #[serde(default, rename = "year")]
    years: Vec<YearEvents>,
}

#[derive(Debug, Deserialize)]
struct CohortConfig {
    species: String,
    max_biomass: FloatValue,
    growth_rate: FloatValue,
    #[serde(default)]
    planting_year: usize,
    harvest_year: Option<usize>,
    #[serde(default)]
    annual_mortality: FloatValue,
    root_to_shoot: Option<FloatValue>,
    carbon_fraction: Option<FloatValue>,
}

impl CohortConfig {
    fn into_cohort(self) -> TreeCohort {
        let mut cohort = TreeCohort::new(
            self.species,
            self.max_biomass,
            self.growth_rate,
            self.planting_year,
        );
        cohort.annual_mortality = self.annual_mortality;
        cohort.harvest_year = self.harvest_year;
        if let Some(ratio) = self.root_to_shoot {
            cohort.root_to_shoot = ratio;
        }
        if let Some(fraction) = self.carbon_fraction {
            cohort.carbon_fraction = fraction;
        }
        cohort
    }
}

impl ProjectConfig {
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        toml::from_str(text)
            .map_err(|e| EngineError::configuration(format!("invalid project document: {}", e)))
    }

    /// Validate the document and produce the engine's value objects.
    pub fn build(self) -> EngineResult<(Arc<SiteContext>, Vec<Scenario>)> {
        let raw = self.site;
        if raw.n_years <= 0 {
            return Err(EngineError::configuration(format!(
                "accounting period must be positive, got {}",
                raw.n_years
            )));
        }
        let climate: ClimateZone = raw.climate.parse()?;
        let soil_texture: SoilTexture = raw.soil_texture.parse()?;
        let site = Arc::new(SiteContext::new(
            raw.latitude,
            raw.longitude,
            climate,
            soil_texture,
            raw.soil_reference_stock,
            raw.initial_soil_stock,
            raw.n_years as usize,
            raw.area_ha,
        )?);

        let mut scenarios = Vec::with_capacity(self.scenarios.len());
        for sc in self.scenarios {
            let events = if sc.years.is_empty() {
                ManagementEvents::no_management(site.n_years)
            } else {
                ManagementEvents::new(sc.years)
            };
            let cohorts = sc.cohorts.into_iter().map(CohortConfig::into_cohort).collect();
            scenarios.push(Scenario::new(
                sc.name,
                sc.role,
                Arc::clone(&site),
                cohorts,
                events,
                sc.soil_equilibrium_stock,
            )?);
        }
        log::debug!(
            "loaded project: {} scenario(s) over {} years",
            scenarios.len(),
            site.n_years
        );
        Ok((site, scenarios))
    }
}
