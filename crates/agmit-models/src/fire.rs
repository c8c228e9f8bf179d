//! Emissions from scheduled biomass burns.
//!
//! # Algorithm
//!
//! For a year flagged as a burn year, the carbon at risk is the woody
//! biomass standing at the start of the year (from the tree growth model)
//! plus the scenario's non-tree fuel load. Each fuel class burns with its
//! own combustion factor:
//!
//! $$E_{CO2} = C_{risk} \times f_{burned} \times CF \times EF_{CO2} \times \frac{44}{12}$$
//!
//! Non-CO2 gases are emitted per kilogram of dry matter combusted and
//! weighted by their global-warming potentials:
//!
//! $$E_{non\text{-}CO2} = \frac{DM_{burned} \times (EF_{CH4} \cdot GWP_{CH4} + EF_{N2O} \cdot GWP_{N2O})}{1000}$$
//!
//! Burn schedules are strictly per-scenario inputs. Nothing here reads or
//! infers another scenario's fire years; a baseline and an intervention
//! burn independently even on the same site.

use crate::constants::{GWP_CH4, GWP_N2O};
use crate::parameters::FireParameters;
use crate::tree::TreeGrowthModel;
use agmit_core::component::EmissionModel;
use agmit_core::errors::{EngineError, EngineResult};
use agmit_core::scenario::{ManagementEvents, Scenario};
use agmit_core::series::{AnnualSeries, FloatValue, CO2_PER_C};
use agmit_core::site::SiteContext;
use ndarray::Array1;

const MODEL_NAME: &str = "fire emissions";

/// Biomass-burning emission model.
#[derive(Debug, Clone, Default)]
pub struct FireEmissionModel {
    parameters: FireParameters,
}

impl FireEmissionModel {
    pub fn new() -> Self {
        Self::from_parameters(FireParameters::default())
    }

    pub fn from_parameters(parameters: FireParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &FireParameters {
        &self.parameters
    }

    /// Emission from one fuel class in one burn (t CO2e/ha).
    ///
    /// `carbon_at_risk` is in t C/ha; `combustion_factor`, `ch4` and `n2o`
    /// are the class-specific coefficients.
    fn class_emission(
        &self,
        carbon_at_risk: FloatValue,
        fraction_burned: FloatValue,
        combustion_factor: FloatValue,
        ch4: FloatValue,
        n2o: FloatValue,
    ) -> FloatValue {
        let combusted_carbon = carbon_at_risk * fraction_burned * combustion_factor;
        let co2 = combusted_carbon * self.parameters.co2_emission_factor * CO2_PER_C;
        // g/kg DM factors against dry matter in tonnes: the 1000 kg/t and
        // 1e6 g/t conversions collapse to a single /1000.
        let dry_matter = combusted_carbon / self.parameters.fuel_carbon_fraction;
        let non_co2 = dry_matter * (ch4 * GWP_CH4 + n2o * GWP_N2O) / 1000.0;
        co2 + non_co2
    }

    /// Compute the fire series given the tree biomass stock at the start of
    /// each year (length `n_years + 1`, t C/ha).
    pub fn compute_with_stock(
        &self,
        site: &SiteContext,
        events: &ManagementEvents,
        tree_stock: &Array1<FloatValue>,
    ) -> EngineResult<AnnualSeries> {
        let n = site.n_years;
        events.check_length(n)?;
        if tree_stock.len() != n + 1 {
            return Err(EngineError::configuration(format!(
                "tree stock series has {} entries, expected {}",
                tree_stock.len(),
                n + 1
            )));
        }
        if self.parameters.fuel_carbon_fraction <= 0.0 {
            return Err(EngineError::model(
                MODEL_NAME,
                format!(
                    "fuel carbon fraction must be positive, got {}",
                    self.parameters.fuel_carbon_fraction
                ),
            ));
        }

        let mut out = Array1::zeros(n);
        for t in 0..n {
            let year = events.year(t);
            if !year.burn {
                continue;
            }
            let woody = self.class_emission(
                tree_stock[t],
                year.fraction_burned,
                self.parameters.woody_combustion_factor,
                self.parameters.ch4_woody,
                self.parameters.n2o_woody,
            );
            let herbaceous = self.class_emission(
                year.fuel_load,
                year.fraction_burned,
                self.parameters.herbaceous_combustion_factor,
                self.parameters.ch4_herbaceous,
                self.parameters.n2o_herbaceous,
            );
            out[t] = woody + herbaceous;
            log::debug!(
                "burn in year {}: {:.3} t CO2e/ha ({:.1} t C/ha at risk)",
                t,
                out[t],
                tree_stock[t] + year.fuel_load
            );
        }

        let series = AnnualSeries::from_values(out);
        series.ensure_finite(MODEL_NAME)?;
        Ok(series)
    }
}

impl EmissionModel for FireEmissionModel {
    fn name(&self) -> &'static str {
        MODEL_NAME
    }

    fn compute(&self, scenario: &Scenario) -> EngineResult<AnnualSeries> {
        let growth = TreeGrowthModel::new().compute_growth(&scenario.site, &scenario.cohorts)?;
        self.compute_with_stock(&scenario.site, &scenario.events, &growth.stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agmit_core::scenario::{ScenarioRole, TreeCohort};
    use agmit_core::site::{ClimateZone, SoilTexture};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn site(n_years: usize) -> SiteContext {
        SiteContext::new(
            -6.8,
            39.2,
            ClimateZone::TropicalDry,
            SoilTexture::Loamy,
            45.0,
            30.0,
            n_years,
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn no_burns_no_emissions() {
        let site = site(10);
        let events = ManagementEvents::no_management(10);
        let stock = Array1::zeros(11);
        let series = FireEmissionModel::new()
            .compute_with_stock(&site, &events, &stock)
            .unwrap();
        assert!(series.values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn burn_of_known_fuel_load_matches_hand_calculation() {
        // 20 t C/ha fuel, half exposed, 90% combustion, CO2 factor 1.0 and
        // trace gases off: 20 x 0.5 x 0.9 x 44/12 at year 5, zero elsewhere.
        let site = site(12);
        let mut events = ManagementEvents::no_management(12);
        events.year_mut(5).burn = true;
        events.year_mut(5).fraction_burned = 0.5;
        events.year_mut(5).fuel_load = 20.0;

        let mut params = FireParameters::co2_only();
        params.herbaceous_combustion_factor = 0.9;
        let model = FireEmissionModel::from_parameters(params);

        let stock = Array1::zeros(13);
        let series = model.compute_with_stock(&site, &events, &stock).unwrap();
        assert_relative_eq!(series.get(5), 20.0 * 0.5 * 0.9 * CO2_PER_C, epsilon = 1e-9);
        for t in (0..12).filter(|t| *t != 5) {
            assert_eq!(series.get(t), 0.0);
        }
        assert!(series.get(5) > 0.0, "a burn is a positive emission");
    }

    #[test]
    fn trace_gases_add_to_the_co2_term() {
        let site = site(6);
        let mut events = ManagementEvents::no_management(6);
        events.year_mut(2).burn = true;
        events.year_mut(2).fraction_burned = 1.0;
        events.year_mut(2).fuel_load = 10.0;

        let stock = Array1::zeros(7);
        let with_trace = FireEmissionModel::new()
            .compute_with_stock(&site, &events, &stock)
            .unwrap();
        let co2_only = FireEmissionModel::from_parameters(FireParameters::co2_only())
            .compute_with_stock(&site, &events, &stock)
            .unwrap();
        assert!(
            with_trace.get(2) > co2_only.get(2),
            "CH4 and N2O should add to the burn emission: {} vs {}",
            with_trace.get(2),
            co2_only.get(2)
        );
    }

    #[test]
    fn standing_trees_contribute_carbon_at_risk() {
        let site = site(8);
        let mut events = ManagementEvents::no_management(8);
        events.year_mut(4).burn = true;
        events.year_mut(4).fraction_burned = 0.3;

        let mut stock = Array1::zeros(9);
        stock[4] = 25.0;

        let series = FireEmissionModel::new()
            .compute_with_stock(&site, &events, &stock)
            .unwrap();
        assert!(series.get(4) > 0.0);
    }

    #[test]
    fn schedules_do_not_leak_between_scenarios() {
        // Two scenarios on the same site with different burn years: each
        // model run sees only its own schedule.
        let site = Arc::new(site(10));
        let cohort = TreeCohort::new("acacia", 50.0, 0.15, 0);

        let mut burn_events = ManagementEvents::no_management(10);
        burn_events.year_mut(6).burn = true;
        burn_events.year_mut(6).fraction_burned = 0.4;

        let burning = Scenario::new(
            "burning baseline",
            ScenarioRole::Baseline,
            Arc::clone(&site),
            vec![cohort.clone()],
            burn_events,
            28.0,
        )
        .unwrap();
        let fire_free = Scenario::new(
            "fire-free intervention",
            ScenarioRole::Intervention,
            Arc::clone(&site),
            vec![cohort],
            ManagementEvents::no_management(10),
            28.0,
        )
        .unwrap();

        let model = FireEmissionModel::new();
        let burning_series = model.compute(&burning).unwrap();
        let fire_free_series = model.compute(&fire_free).unwrap();

        assert!(burning_series.get(6) > 0.0);
        assert!(
            fire_free_series.values().iter().all(|v| *v == 0.0),
            "the fire-free scenario must not inherit the other's schedule"
        );
    }

    #[test]
    fn stock_of_wrong_length_rejected() {
        let site = site(5);
        let events = ManagementEvents::no_management(5);
        let stock = Array1::zeros(5);
        let err = FireEmissionModel::new()
            .compute_with_stock(&site, &events, &stock)
            .unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }
}
