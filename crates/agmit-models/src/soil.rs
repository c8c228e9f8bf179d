//! Soil organic carbon stock dynamics.
//!
//! # Algorithm
//!
//! The SOC stock relaxes toward the scenario's management equilibrium:
//!
//! $$\Delta C_t = (C^{eq}_t - C_{t-1}) \times k$$
//!
//! where $k$ is the annual approach rate for the site's texture class and
//! climate zone. Retained organic inputs raise the year's equilibrium by a
//! per-tonne response factor; in burn years the input is first reduced by
//! the burned fraction times the combustion factor, since burned residue
//! never enters the soil. Synthetic fertilizer carries no carbon and never
//! shifts the equilibrium — its direct N2O term is accounted once, in the
//! litter model.
//!
//! The emission series is $-\Delta C_t \times 44/12$: a recovering stock is
//! a removal, a degrading one an emission.
//!
//! Baseline and intervention scenarios are parameterized independently.
//! Both start from the site's measured year-0 stock, but each carries its
//! own equilibrium; neither ever derives state from the other.

use crate::parameters::SoilCarbonParameters;
use agmit_core::component::EmissionModel;
use agmit_core::errors::{EngineError, EngineResult};
use agmit_core::scenario::Scenario;
use agmit_core::series::{AnnualSeries, FloatValue, CO2_PER_C};
use ndarray::Array1;

const MODEL_NAME: &str = "soil carbon";

/// Annual soil organic carbon model.
#[derive(Debug, Clone, Default)]
pub struct SoilCarbonModel {
    parameters: SoilCarbonParameters,
}

impl SoilCarbonModel {
    pub fn new() -> Self {
        Self::from_parameters(SoilCarbonParameters::default())
    }

    pub fn from_parameters(parameters: SoilCarbonParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &SoilCarbonParameters {
        &self.parameters
    }

    /// Organic carbon reaching the soil in year `t` (t C/ha), after any
    /// burn that year consumes part of the input.
    fn retained_organic_carbon(&self, scenario: &Scenario, t: usize) -> FloatValue {
        let events = scenario.events.year(t);
        let mut carbon = events.organic_input * events.organic_carbon_fraction;
        if events.burn {
            carbon *= 1.0 - events.fraction_burned * self.parameters.input_combustion_factor;
        }
        carbon
    }

    /// SOC stock at the start of each year (t C/ha), length `n_years + 1`.
    pub fn stock_series(&self, scenario: &Scenario) -> EngineResult<Array1<FloatValue>> {
        let site = &scenario.site;
        scenario.events.check_length(site.n_years)?;

        let rate = self.parameters.approach_rate(site.soil_texture, site.climate);
        if !(rate > 0.0 && rate <= 1.0) {
            return Err(EngineError::model(
                MODEL_NAME,
                format!("approach rate {} outside (0, 1]", rate),
            ));
        }

        let mut stock = Array1::zeros(site.n_years + 1);
        stock[0] = site.initial_soil_stock;
        for t in 0..site.n_years {
            let equilibrium = scenario.soil_equilibrium_stock
                + self.parameters.organic_input_response * self.retained_organic_carbon(scenario, t);
            let delta = (equilibrium - stock[t]) * rate;
            stock[t + 1] = stock[t] + delta;
        }
        if stock.iter().any(|v: &FloatValue| !v.is_finite()) {
            return Err(EngineError::model(MODEL_NAME, "non-finite SOC stock"));
        }
        Ok(stock)
    }
}

impl EmissionModel for SoilCarbonModel {
    fn name(&self) -> &'static str {
        MODEL_NAME
    }

    fn compute(&self, scenario: &Scenario) -> EngineResult<AnnualSeries> {
        let stock = self.stock_series(scenario)?;
        let n = scenario.n_years();
        let emissions = AnnualSeries::from_values(Array1::from_shape_fn(n, |t| {
            -(stock[t + 1] - stock[t]) * CO2_PER_C
        }));
        emissions.ensure_finite(MODEL_NAME)?;
        Ok(emissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agmit_core::scenario::{ManagementEvents, ScenarioRole};
    use agmit_core::site::{ClimateZone, SoilTexture};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn site(initial_stock: FloatValue, n_years: usize) -> Arc<agmit_core::site::SiteContext> {
        Arc::new(
            agmit_core::site::SiteContext::new(
                -6.8,
                39.2,
                ClimateZone::TropicalDry,
                SoilTexture::Loamy,
                45.0,
                initial_stock,
                n_years,
                1.0,
            )
            .unwrap(),
        )
    }

    fn scenario(
        name: &str,
        initial_stock: FloatValue,
        equilibrium: FloatValue,
        n_years: usize,
    ) -> Scenario {
        Scenario::new(
            name,
            ScenarioRole::Baseline,
            site(initial_stock, n_years),
            vec![],
            ManagementEvents::no_management(n_years),
            equilibrium,
        )
        .unwrap()
    }

    #[test]
    fn stock_approaches_equilibrium_from_below() {
        let sc = scenario("recovering", 20.0, 40.0, 50);
        let stock = SoilCarbonModel::new().stock_series(&sc).unwrap();
        assert!(stock[1] > stock[0]);
        assert!(
            (stock[50] - 40.0).abs() < 1.0,
            "stock should be near equilibrium after 50 years, got {}",
            stock[50]
        );
        // Monotone approach, never overshooting.
        for t in 0..50 {
            assert!(stock[t + 1] <= 40.0 + 1e-9);
        }
    }

    #[test]
    fn degrading_stock_emits() {
        let sc = scenario("degrading", 40.0, 25.0, 10);
        let emissions = SoilCarbonModel::new().compute(&sc).unwrap();
        assert!(
            emissions.values().iter().all(|v| *v > 0.0),
            "falling SOC stock should be a positive emission"
        );
    }

    #[test]
    fn recovering_stock_removes() {
        let sc = scenario("recovering", 25.0, 40.0, 10);
        let emissions = SoilCarbonModel::new().compute(&sc).unwrap();
        assert!(
            emissions.values().iter().all(|v| *v < 0.0),
            "rising SOC stock should be a negative emission"
        );
    }

    #[test]
    fn at_equilibrium_nothing_happens() {
        let sc = scenario("stable", 30.0, 30.0, 10);
        let emissions = SoilCarbonModel::new().compute(&sc).unwrap();
        for t in 0..10 {
            assert_relative_eq!(emissions.get(t), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn organic_input_raises_equilibrium() {
        let n = 20;
        let base = scenario("unamended", 30.0, 30.0, n);

        let mut events = ManagementEvents::no_management(n);
        for t in 0..n {
            events.year_mut(t).organic_input = 2.0;
        }
        let amended = Scenario::new(
            "amended",
            ScenarioRole::Intervention,
            site(30.0, n),
            vec![],
            events,
            30.0,
        )
        .unwrap();

        let model = SoilCarbonModel::new();
        let base_stock = model.stock_series(&base).unwrap();
        let amended_stock = model.stock_series(&amended).unwrap();
        assert!(
            amended_stock[n] > base_stock[n],
            "sustained organic input should build SOC: {} vs {}",
            amended_stock[n],
            base_stock[n]
        );
    }

    #[test]
    fn burn_year_reduces_retained_input() {
        let n = 5;
        let mut events = ManagementEvents::no_management(n);
        for t in 0..n {
            events.year_mut(t).organic_input = 2.0;
        }
        events.year_mut(2).burn = true;
        events.year_mut(2).fraction_burned = 1.0;

        let burned = Scenario::new(
            "burned",
            ScenarioRole::Baseline,
            site(30.0, n),
            vec![],
            events,
            30.0,
        )
        .unwrap();
        let model = SoilCarbonModel::new();
        let retained_burn_year = model.retained_organic_carbon(&burned, 2);
        let retained_normal_year = model.retained_organic_carbon(&burned, 1);
        assert!(
            retained_burn_year < retained_normal_year,
            "burning should reduce the input reaching the soil: {} vs {}",
            retained_burn_year,
            retained_normal_year
        );
    }

    #[test]
    fn zero_approach_rate_is_model_error() {
        let mut params = SoilCarbonParameters::default();
        params.rate_loamy = 0.0;
        let sc = scenario("frozen", 30.0, 40.0, 10);
        let err = SoilCarbonModel::from_parameters(params)
            .stock_series(&sc)
            .unwrap_err();
        match err {
            EngineError::ModelComputation { model, .. } => assert_eq!(model, "soil carbon"),
            other => panic!("expected ModelComputation, got {:?}", other),
        }
    }

    #[test]
    fn zero_fertilizer_is_valid_management() {
        let sc = scenario("no inputs", 30.0, 28.0, 10);
        let result = SoilCarbonModel::new().compute(&sc);
        assert!(result.is_ok());
    }

    #[test]
    fn independent_equilibria_from_identical_start() {
        // Same year-0 stock, different management equilibria: the two
        // scenarios must diverge without sharing any state.
        let a = scenario("baseline", 30.0, 25.0, 15);
        let b = scenario("intervention", 30.0, 40.0, 15);
        let model = SoilCarbonModel::new();
        let stock_a = model.stock_series(&a).unwrap();
        let stock_b = model.stock_series(&b).unwrap();
        assert_eq!(stock_a[0], stock_b[0]);
        assert!(stock_a[15] < 30.0);
        assert!(stock_b[15] > 30.0);
    }

    #[test]
    fn output_length_equals_accounting_period() {
        for n in [1, 30, 120] {
            let sc = scenario("length", 30.0, 30.0, n);
            let emissions = SoilCarbonModel::new().compute(&sc).unwrap();
            assert_eq!(emissions.len(), n);
        }
    }
}
