//! Land-management scenario descriptions.
//!
//! A scenario bundles everything a sub-model may consume: the shared site
//! context, zero or more tree cohorts, and a per-year management event
//! sequence of exactly the accounting-period length. Scenarios are value
//! objects; once built they are never mutated, so evaluations of different
//! scenarios share nothing and can run concurrently.

use crate::errors::{EngineError, EngineResult};
use crate::series::FloatValue;
use crate::site::SiteContext;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Whether a scenario describes the land use assumed in absence of the
/// project (baseline) or the alternative being evaluated (intervention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioRole {
    Baseline,
    Intervention,
}

/// A group of trees of uniform species and age class, modelled with one
/// growth curve.
///
/// Above-ground biomass carbon follows the saturating form
/// $B(a) = B_{max}(1 - e^{-k a})$ with age $a$ in years since planting.
/// Below-ground biomass is added via the root-to-shoot ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeCohort {
    pub species: String,
    /// Asymptotic above-ground biomass carbon of the stand (t C/ha).
    pub max_biomass: FloatValue,
    /// Growth-rate constant k (1/yr).
    pub growth_rate: FloatValue,
    /// Year (zero-based, from project start) the cohort is planted. The
    /// cohort contributes no biomass through the start of that year.
    pub planting_year: usize,
    /// Year the stand is harvested; biomass is zero from that year on.
    pub harvest_year: Option<usize>,
    /// Fraction of the live stand lost per year.
    pub annual_mortality: FloatValue,
    /// Below-ground to above-ground biomass ratio.
    pub root_to_shoot: FloatValue,
    /// Carbon fraction of dry matter (t C / t DM).
    pub carbon_fraction: FloatValue,
}

impl TreeCohort {
    /// A cohort with the ancillary parameters at methodology defaults.
    pub fn new(
        species: impl Into<String>,
        max_biomass: FloatValue,
        growth_rate: FloatValue,
        planting_year: usize,
    ) -> Self {
        Self {
            species: species.into(),
            max_biomass,
            growth_rate,
            planting_year,
            harvest_year: None,
            annual_mortality: 0.0,
            root_to_shoot: 0.27,
            carbon_fraction: 0.47,
        }
    }

    pub fn validate(&self, n_years: usize) -> EngineResult<()> {
        if self.planting_year > n_years {
            return Err(EngineError::configuration(format!(
                "cohort '{}' planted in year {} but the accounting period is {} years",
                self.species, self.planting_year, n_years
            )));
        }
        if let Some(harvest) = self.harvest_year {
            if harvest <= self.planting_year {
                return Err(EngineError::configuration(format!(
                    "cohort '{}' harvested in year {} before it is planted (year {})",
                    self.species, harvest, self.planting_year
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.annual_mortality) {
            return Err(EngineError::configuration(format!(
                "cohort '{}' annual mortality {} outside [0, 1]",
                self.species, self.annual_mortality
            )));
        }
        if !(0.0..=1.0).contains(&self.carbon_fraction) || self.carbon_fraction == 0.0 {
            return Err(EngineError::configuration(format!(
                "cohort '{}' carbon fraction {} outside (0, 1]",
                self.species, self.carbon_fraction
            )));
        }
        Ok(())
    }
}

/// Management inputs and disturbances for a single year.
///
/// A zero value for any quantity is a valid, explicitly supported input
/// meaning "none applied that year" — distinct from an omitted year, which
/// fails length validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearEvents {
    /// Organic residue/litter/manure applied (t DM/ha).
    pub organic_input: FloatValue,
    /// Carbon fraction of the organic input (t C / t DM).
    pub organic_carbon_fraction: FloatValue,
    /// Nitrogen fraction of the organic input (t N / t DM).
    pub organic_nitrogen_fraction: FloatValue,
    /// Synthetic fertilizer nitrogen applied (kg N/ha).
    pub synthetic_n: FloatValue,
    /// Whether a burn occurs this year.
    pub burn: bool,
    /// Fraction of the biomass at risk that is exposed to the burn.
    pub fraction_burned: FloatValue,
    /// Non-tree fuel load present at the burn (t C/ha).
    pub fuel_load: FloatValue,
}

impl Default for YearEvents {
    fn default() -> Self {
        Self {
            organic_input: 0.0,
            organic_carbon_fraction: 0.5,
            organic_nitrogen_fraction: 0.018,
            synthetic_n: 0.0,
            burn: false,
            fraction_burned: 0.0,
            fuel_load: 0.0,
        }
    }
}

impl YearEvents {
    fn validate(&self, year: usize) -> EngineResult<()> {
        for (name, value) in [
            ("organic input", self.organic_input),
            ("synthetic N", self.synthetic_n),
            ("fuel load", self.fuel_load),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::configuration(format!(
                    "year {}: {} must be finite and non-negative, got {}",
                    year, name, value
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.fraction_burned) {
            return Err(EngineError::configuration(format!(
                "year {}: fraction burned {} outside [0, 1]",
                year, self.fraction_burned
            )));
        }
        Ok(())
    }
}

/// Per-year management record spanning the whole accounting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagementEvents {
    years: Vec<YearEvents>,
}

impl ManagementEvents {
    pub fn new(years: Vec<YearEvents>) -> Self {
        Self { years }
    }

    /// A sequence of N years with no inputs and no burns.
    pub fn no_management(n_years: usize) -> Self {
        Self {
            years: vec![YearEvents::default(); n_years],
        }
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn year(&self, t: usize) -> &YearEvents {
        &self.years[t]
    }

    pub fn year_mut(&mut self, t: usize) -> &mut YearEvents {
        &mut self.years[t]
    }

    pub fn iter(&self) -> impl Iterator<Item = &YearEvents> {
        self.years.iter()
    }

    /// Reject sequences whose length differs from the accounting period.
    pub fn check_length(&self, n_years: usize) -> EngineResult<()> {
        if self.years.len() != n_years {
            return Err(EngineError::configuration(format!(
                "management events cover {} years, expected {}",
                self.years.len(),
                n_years
            )));
        }
        Ok(())
    }
}

/// A named land-use/management scenario, tied to a shared site context.
///
/// Immutable after construction; numerically evaluating it produces a
/// `ScenarioEmissions` and re-evaluation with different inputs requires a
/// new `Scenario`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub role: ScenarioRole,
    pub site: Arc<SiteContext>,
    pub cohorts: Vec<TreeCohort>,
    pub events: ManagementEvents,
    /// Equilibrium SOC stock under this scenario's management (t C/ha).
    /// Baseline and intervention are parameterized independently; an
    /// intervention never derives this from the paired baseline.
    pub soil_equilibrium_stock: FloatValue,
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        role: ScenarioRole,
        site: Arc<SiteContext>,
        cohorts: Vec<TreeCohort>,
        events: ManagementEvents,
        soil_equilibrium_stock: FloatValue,
    ) -> EngineResult<Self> {
        let scenario = Self {
            name: name.into(),
            role,
            site,
            cohorts,
            events,
            soil_equilibrium_stock,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check the invariants the sub-models rely on.
    pub fn validate(&self) -> EngineResult<()> {
        self.events.check_length(self.site.n_years)?;
        for (year, events) in self.events.iter().enumerate() {
            events.validate(year)?;
        }
        for cohort in &self.cohorts {
            cohort.validate(self.site.n_years)?;
        }
        if !self.soil_equilibrium_stock.is_finite() || self.soil_equilibrium_stock < 0.0 {
            return Err(EngineError::configuration(format!(
                "scenario '{}': soil equilibrium stock must be finite and non-negative, got {}",
                self.name, self.soil_equilibrium_stock
            )));
        }
        Ok(())
    }

    pub fn n_years(&self) -> usize {
        self.site.n_years
    }
}
