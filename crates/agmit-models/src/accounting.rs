//! Per-scenario emission accounting.
//!
//! Runs the four sub-models against one scenario and assembles their series
//! into a [`ScenarioEmissions`] bundle. The tree growth model runs once; its
//! stock series feeds the fire model so a burn sees the same woody carbon
//! the biomass accounting does.
//!
//! Assembly is atomic: if any sub-model fails, the whole scenario fails with
//! the sub-model named in the error and no partial bundle is returned.

use crate::fire::FireEmissionModel;
use crate::litter::LitterDecompositionModel;
use crate::soil::SoilCarbonModel;
use crate::tree::TreeGrowthModel;
use agmit_core::component::EmissionModel;
use agmit_core::errors::{EngineError, EngineResult};
use agmit_core::scenario::{Scenario, ScenarioRole};
use agmit_core::series::AnnualSeries;
use serde::{Deserialize, Serialize};

/// Complete emission accounting for one scenario.
///
/// All series share the sign convention of the engine: positive values are
/// emissions to the atmosphere, negative values are removals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioEmissions {
    pub name: String,
    pub role: ScenarioRole,
    pub n_years: usize,
    /// Soil organic carbon stock change (t CO2e/ha/yr).
    pub soil: AnnualSeries,
    /// Tree biomass stock change (t CO2e/ha/yr).
    pub biomass: AnnualSeries,
    /// Litter decomposition and fertilizer N2O (t CO2e/ha/yr).
    pub litter: AnnualSeries,
    /// Biomass burning (t CO2e/ha/yr).
    pub fire: AnnualSeries,
    /// Sum of the four sub-model series.
    pub annual: AnnualSeries,
    /// Running total of `annual`.
    pub cumulative: AnnualSeries,
}

impl ScenarioEmissions {
    /// Run all sub-models for `scenario` and assemble the bundle.
    pub fn build(scenario: &Scenario) -> EngineResult<Self> {
        let growth = TreeGrowthModel::new().compute_growth(&scenario.site, &scenario.cohorts)?;
        let soil = SoilCarbonModel::new().compute(scenario)?;
        let litter = LitterDecompositionModel::new().compute(scenario)?;
        let fire = FireEmissionModel::new().compute_with_stock(
            &scenario.site,
            &scenario.events,
            &growth.stock,
        )?;

        let annual = AnnualSeries::sum_of(&[&soil, &growth.emissions, &litter, &fire])?;
        let cumulative = AnnualSeries::from_values(annual.cumulative());
        log::info!(
            "scenario '{}': {:.2} t CO2e/ha over {} years",
            scenario.name,
            annual.total(),
            scenario.n_years()
        );

        Ok(Self {
            name: scenario.name.clone(),
            role: scenario.role,
            n_years: scenario.n_years(),
            soil,
            biomass: growth.emissions,
            litter,
            fire,
            annual,
            cumulative,
        })
    }

    /// Net accounting over the whole period (t CO2e/ha).
    pub fn total(&self) -> agmit_core::series::FloatValue {
        self.annual.total()
    }
}

/// Evaluate several scenarios concurrently, one thread per scenario.
///
/// Results come back in input order. The first sub-model failure aborts the
/// whole evaluation.
pub fn evaluate_scenarios(scenarios: &[Scenario]) -> EngineResult<Vec<ScenarioEmissions>> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = scenarios
            .iter()
            .map(|scenario| scope.spawn(move || ScenarioEmissions::build(scenario)))
            .collect();
        handles
            .into_iter()
            .zip(scenarios)
            .map(|(handle, scenario)| match handle.join() {
                Ok(result) => result,
                Err(_) => Err(EngineError::model(
                    "scenario evaluation",
                    format!("worker for scenario '{}' panicked", scenario.name),
                )),
            })
            .collect()
    })
}
