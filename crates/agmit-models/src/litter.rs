//! Organic input decomposition and fertilizer nitrogen emissions.
//!
//! # Algorithm
//!
//! Two terms per year:
//!
//! 1. **Carbon carry-over**: organic matter applied in year $s$ releases
//!    its carbon over the following years. With half-life $H$ and
//!    $\lambda = \ln 2 / H$, the fraction emitted in the $j$-th year after
//!    application is $e^{-\lambda j} - e^{-\lambda (j+1)}$. The annual
//!    emission is the convolution of yearly carbon inputs with this kernel,
//!    truncated at the accounting horizon, times 44/12.
//!
//! 2. **Direct nitrogen**: nitrogen reaching the soil in year $t$ — organic
//!    N reduced by its volatile fraction plus synthetic N reduced by its
//!    own — emits N2O that same year via the Tier-1 emission factor,
//!    converted N2O-N → N2O and weighted by GWP. No multi-year carry-over.
//!
//! A zero input in any year is valid management and contributes nothing
//! that year; prior years' carry-over is unaffected. An omitted year, by
//! contrast, fails length validation before the model runs.

use crate::constants::{GWP_N2O, N2O_N_TO_N2O};
use crate::parameters::LitterParameters;
use agmit_core::component::EmissionModel;
use agmit_core::errors::{EngineError, EngineResult};
use agmit_core::scenario::{ManagementEvents, Scenario};
use agmit_core::series::{AnnualSeries, FloatValue, CO2_PER_C};
use agmit_core::site::SiteContext;
use ndarray::Array1;

const MODEL_NAME: &str = "litter decomposition";

/// Litter, residue, and fertilizer emission model.
#[derive(Debug, Clone, Default)]
pub struct LitterDecompositionModel {
    parameters: LitterParameters,
}

impl LitterDecompositionModel {
    pub fn new() -> Self {
        Self::from_parameters(LitterParameters::default())
    }

    pub fn from_parameters(parameters: LitterParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &LitterParameters {
        &self.parameters
    }

    /// Fraction of an application's carbon emitted in the j-th year after
    /// application, for j = 0..n-1.
    pub fn decomposition_kernel(&self, n_years: usize) -> EngineResult<Vec<FloatValue>> {
        let half_life = self.parameters.half_life;
        if !half_life.is_finite() || half_life <= 0.0 {
            return Err(EngineError::model(
                MODEL_NAME,
                format!("half-life must be positive, got {}", half_life),
            ));
        }
        let lambda = FloatValue::ln(2.0) / half_life;
        Ok((0..n_years)
            .map(|j| {
                let j = j as FloatValue;
                (-lambda * j).exp() - (-lambda * (j + 1.0)).exp()
            })
            .collect())
    }

    /// Direct N2O term for one year's nitrogen inputs (t CO2e/ha).
    fn nitrogen_term(&self, events: &ManagementEvents, t: usize) -> FloatValue {
        let year = events.year(t);
        let organic_n = year.organic_input
            * year.organic_nitrogen_fraction
            * (1.0 - self.parameters.organic_volatile_fraction);
        // Synthetic N is given in kg N/ha.
        let synthetic_n =
            year.synthetic_n / 1000.0 * (1.0 - self.parameters.synthetic_volatile_fraction);
        (organic_n + synthetic_n) * self.parameters.n2o_emission_factor * N2O_N_TO_N2O * GWP_N2O
    }

    pub fn compute_for(
        &self,
        site: &SiteContext,
        events: &ManagementEvents,
    ) -> EngineResult<AnnualSeries> {
        let n = site.n_years;
        events.check_length(n)?;
        let kernel = self.decomposition_kernel(n)?;

        let mut out = Array1::zeros(n);
        for s in 0..n {
            let carbon_in =
                events.year(s).organic_input * events.year(s).organic_carbon_fraction;
            if carbon_in > 0.0 {
                for t in s..n {
                    out[t] += carbon_in * kernel[t - s] * CO2_PER_C;
                }
            }
        }
        for t in 0..n {
            out[t] += self.nitrogen_term(events, t);
        }

        let series = AnnualSeries::from_values(out);
        series.ensure_finite(MODEL_NAME)?;
        Ok(series)
    }
}

impl EmissionModel for LitterDecompositionModel {
    fn name(&self) -> &'static str {
        MODEL_NAME
    }

    fn compute(&self, scenario: &Scenario) -> EngineResult<AnnualSeries> {
        self.compute_for(&scenario.site, &scenario.events)
    }
}
