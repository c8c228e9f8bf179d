//! Tree cohort biomass growth.
//!
//! Computes per-year biomass carbon for every cohort in a scenario and the
//! resulting stock-change emission series. The stock series is also needed
//! by the fire model as the woody carbon at risk in a burn year.
//!
//! # Algorithm
//!
//! Above-ground biomass carbon of one cohort follows the saturating curve
//!
//! $$B(a) = B_{max} \left(1 - e^{-k a}\right)$$
//!
//! with age $a$ in years since planting, zero before planting and zero
//! again from the harvest year on. Below-ground biomass adds
//! $r_{rs} \times B$ via the root-to-shoot ratio, and annual mortality
//! scales the surviving stand as $(1 - m)^a$. Cohorts sum. The emission
//! series is the year-on-year stock change converted to CO2e:
//!
//! $$E_t = -(S_{t+1} - S_t) \times \frac{44}{12}$$
//!
//! so a growing stand is a removal (negative) and a harvest or die-back is
//! an emission (positive).

use agmit_core::component::EmissionModel;
use agmit_core::errors::{EngineError, EngineResult};
use agmit_core::scenario::{Scenario, TreeCohort};
use agmit_core::series::{AnnualSeries, FloatValue, CO2_PER_C};
use agmit_core::site::SiteContext;
use ndarray::Array1;

const MODEL_NAME: &str = "tree growth";

/// Biomass output for one scenario's cohorts.
#[derive(Debug, Clone)]
pub struct TreeGrowthOutput {
    /// Total biomass carbon stock at the start of each year (t C/ha),
    /// length `n_years + 1`.
    pub stock: Array1<FloatValue>,
    /// Stock-change emission series (t CO2e/ha/yr), length `n_years`.
    pub emissions: AnnualSeries,
}

/// Biomass growth model for zero or more tree cohorts.
///
/// A scenario with no cohorts is valid and yields the all-zero series; a
/// grass- or crop-only baseline is an ordinary case, not an error.
#[derive(Debug, Clone, Default)]
pub struct TreeGrowthModel;

impl TreeGrowthModel {
    pub fn new() -> Self {
        Self
    }

    /// Biomass carbon stock of one cohort at the start of year `t` (t C/ha).
    fn cohort_stock(&self, cohort: &TreeCohort, t: usize) -> FloatValue {
        if let Some(harvest) = cohort.harvest_year {
            if t >= harvest {
                return 0.0;
            }
        }
        if t <= cohort.planting_year {
            return 0.0;
        }
        let age = (t - cohort.planting_year) as FloatValue;
        let survival = (1.0 - cohort.annual_mortality).powf(age);
        let above = cohort.max_biomass * (1.0 - (-cohort.growth_rate * age).exp());
        above * (1.0 + cohort.root_to_shoot) * survival
    }

    fn check_curve(&self, cohort: &TreeCohort) -> EngineResult<()> {
        for (name, value) in [
            ("max biomass", cohort.max_biomass),
            ("growth rate", cohort.growth_rate),
            ("root-to-shoot ratio", cohort.root_to_shoot),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::model(
                    MODEL_NAME,
                    format!(
                        "cohort '{}': degenerate {} {}",
                        cohort.species, name, value
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Compute biomass stock and stock-change series for a set of cohorts.
    pub fn compute_growth(
        &self,
        site: &SiteContext,
        cohorts: &[TreeCohort],
    ) -> EngineResult<TreeGrowthOutput> {
        let n = site.n_years;
        let mut stock = Array1::zeros(n + 1);
        for cohort in cohorts {
            self.check_curve(cohort)?;
            for t in 0..=n {
                stock[t] += self.cohort_stock(cohort, t);
            }
        }
        if stock.iter().any(|v: &FloatValue| !v.is_finite()) {
            return Err(EngineError::model(MODEL_NAME, "non-finite biomass stock"));
        }

        let emissions = AnnualSeries::from_values(Array1::from_shape_fn(n, |t| {
            -(stock[t + 1] - stock[t]) * CO2_PER_C
        }));
        emissions.ensure_finite(MODEL_NAME)?;
        log::debug!(
            "tree growth: {} cohort(s), final stock {:.2} t C/ha",
            cohorts.len(),
            stock[n]
        );
        Ok(TreeGrowthOutput { stock, emissions })
    }
}

impl EmissionModel for TreeGrowthModel {
    fn name(&self) -> &'static str {
        MODEL_NAME
    }

    fn compute(&self, scenario: &Scenario) -> EngineResult<AnnualSeries> {
        self.compute_growth(&scenario.site, &scenario.cohorts)
            .map(|output| output.emissions)
    }
}
