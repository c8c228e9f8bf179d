//! Baseline-vs-intervention mitigation accounting.
//!
//! The headline quantity of the engine: the net series is the intervention's
//! annual emissions minus the baseline's, year by year. Under the engine's
//! sign convention a **negative** net value is desirable — the intervention
//! put less into the atmosphere (or removed more) than business as usual
//! would have.

use crate::accounting::ScenarioEmissions;
use agmit_core::errors::{EngineError, EngineResult};
use agmit_core::scenario::{Scenario, ScenarioRole};
use agmit_core::series::{AnnualSeries, FloatValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Outcome of comparing one intervention against one baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MitigationResult {
    /// Full accounting for the baseline scenario.
    pub baseline: ScenarioEmissions,
    /// Full accounting for the intervention scenario.
    pub intervention: ScenarioEmissions,
    /// Intervention minus baseline, per year (t CO2e/ha/yr). Negative is a
    /// net benefit.
    pub net_annual: AnnualSeries,
    /// Running total of `net_annual` (t CO2e/ha).
    pub cumulative_net: AnnualSeries,
}

impl MitigationResult {
    /// Net mitigation over the whole accounting period (t CO2e/ha).
    /// Negative means the intervention out-performed the baseline.
    pub fn total_net(&self) -> FloatValue {
        self.net_annual.total()
    }
}

/// Compares scenario pairs, memoizing evaluated pairs by scenario name.
///
/// Repeating a comparison returns the cached [`Arc`] without re-running any
/// sub-model. The cache is internally synchronized, so one engine can be
/// shared across threads.
#[derive(Debug, Default)]
pub struct MitigationEngine {
    cache: Mutex<HashMap<(String, String), Arc<MitigationResult>>>,
}

impl MitigationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_roles(baseline: &Scenario, intervention: &Scenario) -> EngineResult<()> {
        if baseline.role != ScenarioRole::Baseline {
            return Err(EngineError::configuration(format!(
                "scenario '{}' has role {:?}, expected a baseline",
                baseline.name, baseline.role
            )));
        }
        if intervention.role != ScenarioRole::Intervention {
            return Err(EngineError::configuration(format!(
                "scenario '{}' has role {:?}, expected an intervention",
                intervention.name, intervention.role
            )));
        }
        if baseline.n_years() != intervention.n_years() {
            return Err(EngineError::configuration(format!(
                "accounting periods differ: '{}' runs {} years, '{}' runs {}",
                baseline.name,
                baseline.n_years(),
                intervention.name,
                intervention.n_years()
            )));
        }
        Ok(())
    }

    /// Evaluate both scenarios and difference them.
    pub fn mitigation(
        &self,
        baseline: &Scenario,
        intervention: &Scenario,
    ) -> EngineResult<Arc<MitigationResult>> {
        Self::check_roles(baseline, intervention)?;

        let key = (baseline.name.clone(), intervention.name.clone());
        {
            let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(result) = cache.get(&key) {
                log::debug!("cache hit for '{}' vs '{}'", key.0, key.1);
                return Ok(Arc::clone(result));
            }
        }

        let baseline_emissions = ScenarioEmissions::build(baseline)?;
        let intervention_emissions = ScenarioEmissions::build(intervention)?;
        let net_annual = intervention_emissions
            .annual
            .minus(&baseline_emissions.annual)?;
        let cumulative_net = AnnualSeries::from_values(net_annual.cumulative());
        log::info!(
            "'{}' vs '{}': net {:.2} t CO2e/ha",
            key.1,
            key.0,
            net_annual.total()
        );

        let result = Arc::new(MitigationResult {
            baseline: baseline_emissions,
            intervention: intervention_emissions,
            net_annual,
            cumulative_net,
        });
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        Ok(Arc::clone(cache.entry(key).or_insert(result)))
    }

    /// Compare two scenarios from a pool, looked up by name.
    pub fn mitigation_from(
        &self,
        scenarios: &[Scenario],
        baseline_name: &str,
        intervention_name: &str,
    ) -> EngineResult<Arc<MitigationResult>> {
        let find = |name: &str| {
            scenarios.iter().find(|s| s.name == name).ok_or_else(|| {
                EngineError::configuration(format!("no scenario named '{}'", name))
            })
        };
        self.mitigation(find(baseline_name)?, find(intervention_name)?)
    }
}
