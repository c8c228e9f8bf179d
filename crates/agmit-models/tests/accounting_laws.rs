//! Accounting-law tests for the mitigation engine.
//!
//! These exercise the invariants the whole engine rests on:
//! - the annual series is the exact sum of its sub-model series
//! - signs follow the convention (positive = emission, negative = removal)
//! - scenarios are evaluated independently, sharing no state
//! - comparisons are deterministic and memoized

use agmit_core::config::ProjectConfig;
use agmit_core::scenario::{ManagementEvents, Scenario, ScenarioRole, TreeCohort};
use agmit_core::series::FloatValue;
use agmit_core::site::{ClimateZone, SiteContext, SoilTexture};
use agmit_models::{evaluate_scenarios, MitigationEngine, ScenarioEmissions};
use approx::assert_relative_eq;
use std::sync::Arc;

fn tanzanian_site(n_years: usize) -> Arc<SiteContext> {
    Arc::new(
        SiteContext::new(
            -6.8,
            39.2,
            ClimateZone::TropicalDry,
            SoilTexture::Loamy,
            45.0,
            30.0,
            n_years,
            2.5,
        )
        .unwrap(),
    )
}

/// Degrading cropland with a biennial residue burn.
fn business_as_usual(site: &Arc<SiteContext>) -> Scenario {
    let n = site.n_years;
    let mut events = ManagementEvents::no_management(n);
    for t in (0..n).step_by(2) {
        events.year_mut(t).burn = true;
        events.year_mut(t).fraction_burned = 0.6;
        events.year_mut(t).fuel_load = 3.0;
    }
    Scenario::new(
        "business as usual",
        ScenarioRole::Baseline,
        Arc::clone(site),
        vec![],
        events,
        24.0,
    )
    .unwrap()
}

/// Agroforestry with mulching instead of burning.
fn agroforestry(site: &Arc<SiteContext>) -> Scenario {
    let n = site.n_years;
    let mut events = ManagementEvents::no_management(n);
    for t in 0..n {
        events.year_mut(t).organic_input = 1.2;
    }
    Scenario::new(
        "agroforestry",
        ScenarioRole::Intervention,
        Arc::clone(site),
        vec![TreeCohort::new("grevillea robusta", 75.0, 0.13, 1)],
        events,
        33.0,
    )
    .unwrap()
}

mod additivity {
    use super::*;

    /// The annual series is the exact elementwise sum of the four
    /// sub-model series, and the cumulative series its running total.
    #[test]
    fn annual_decomposes_into_sub_models() {
        let site = tanzanian_site(25);
        for scenario in [business_as_usual(&site), agroforestry(&site)] {
            let result = ScenarioEmissions::build(&scenario).unwrap();
            let mut running = 0.0;
            for t in 0..25 {
                let parts = result.soil.get(t)
                    + result.biomass.get(t)
                    + result.litter.get(t)
                    + result.fire.get(t);
                assert_relative_eq!(result.annual.get(t), parts, epsilon = 1e-9);
                running += result.annual.get(t);
                assert_relative_eq!(result.cumulative.get(t), running, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn net_series_is_intervention_minus_baseline() {
        let site = tanzanian_site(20);
        let engine = MitigationEngine::new();
        let result = engine
            .mitigation(&business_as_usual(&site), &agroforestry(&site))
            .unwrap();
        for t in 0..20 {
            assert_relative_eq!(
                result.net_annual.get(t),
                result.intervention.annual.get(t) - result.baseline.annual.get(t),
                epsilon = 1e-9
            );
        }
    }
}

mod sign_convention {
    use super::*;

    /// Burning residue on a degrading soil is a net source.
    #[test]
    fn degrading_burned_baseline_emits() {
        let site = tanzanian_site(30);
        let result = ScenarioEmissions::build(&business_as_usual(&site)).unwrap();
        assert!(
            result.total() > 0.0,
            "the baseline should be a net emitter, got {}",
            result.total()
        );
        for t in (0..30).step_by(2) {
            assert!(result.fire.get(t) > 0.0, "burn year {} should emit", t);
        }
    }

    /// Planting trees and building soil carbon is a net sink.
    #[test]
    fn growing_intervention_removes() {
        let site = tanzanian_site(30);
        let result = ScenarioEmissions::build(&agroforestry(&site)).unwrap();
        assert!(
            result.total() < 0.0,
            "the intervention should be a net removal, got {}",
            result.total()
        );
    }

    /// A sink intervention against a source baseline yields a negative
    /// net mitigation outcome.
    #[test]
    fn mitigation_outcome_is_negative() {
        let site = tanzanian_site(30);
        let result = MitigationEngine::new()
            .mitigation(&business_as_usual(&site), &agroforestry(&site))
            .unwrap();
        assert!(result.total_net() < 0.0);
        // The cumulative net series ends at the total.
        assert_relative_eq!(
            result.cumulative_net.get(29),
            result.total_net(),
            epsilon = 1e-9
        );
    }
}

mod scenario_independence {
    use super::*;

    /// The baseline's burn schedule must not bleed into the fire-free
    /// intervention evaluated alongside it.
    #[test]
    fn burn_schedules_stay_per_scenario() {
        let site = tanzanian_site(20);
        let results =
            evaluate_scenarios(&[business_as_usual(&site), agroforestry(&site)]).unwrap();
        assert!(results[0].fire.total() > 0.0);
        assert!(
            results[1].fire.values().iter().all(|v| *v == 0.0),
            "the intervention schedules no burns and must show none"
        );
    }

    /// Evaluating a scenario alone and in a batch gives identical series.
    #[test]
    fn batch_evaluation_matches_individual() {
        let site = tanzanian_site(15);
        let scenarios = [business_as_usual(&site), agroforestry(&site)];
        let batch = evaluate_scenarios(&scenarios).unwrap();
        for (scenario, from_batch) in scenarios.iter().zip(&batch) {
            let alone = ScenarioEmissions::build(scenario).unwrap();
            assert_eq!(alone.annual, from_batch.annual);
            assert_eq!(alone.cumulative, from_batch.cumulative);
        }
    }
}

mod determinism {
    use super::*;

    /// Same inputs, same result, bit for bit.
    #[test]
    fn comparison_is_idempotent() {
        let site = tanzanian_site(20);
        let base = business_as_usual(&site);
        let inter = agroforestry(&site);

        let first = MitigationEngine::new().mitigation(&base, &inter).unwrap();
        let second = MitigationEngine::new().mitigation(&base, &inter).unwrap();
        assert_eq!(first.net_annual, second.net_annual);
        assert_eq!(first.cumulative_net, second.cumulative_net);
    }

    /// One engine memoizes: the repeat call hands back the same allocation.
    #[test]
    fn engine_caches_by_scenario_pair() {
        let site = tanzanian_site(20);
        let base = business_as_usual(&site);
        let inter = agroforestry(&site);

        let engine = MitigationEngine::new();
        let first = engine.mitigation(&base, &inter).unwrap();
        let second = engine.mitigation(&base, &inter).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}

mod end_to_end {
    use super::*;

    const PROJECT: &str = r#"
        [site]
        latitude = -6.8
        longitude = 39.2
        climate = "tropical_dry"
        soil_texture = "loamy"
        soil_reference_stock = 45.0
        initial_soil_stock = 30.0
        n_years = 20
        area_ha = 2.5

        [[scenario]]
        name = "business-as-usual"
        role = "baseline"
        soil_equilibrium_stock = 24.0

        [[scenario]]
        name = "agroforestry"
        role = "intervention"
        soil_equilibrium_stock = 33.0

        [[scenario.cohort]]
        species = "grevillea robusta"
        max_biomass = 75.0
        growth_rate = 0.13
        planting_year = 1
    "#;

    /// From TOML document to a signed mitigation number.
    #[test]
    fn project_document_drives_the_whole_engine() {
        let (site, scenarios) = ProjectConfig::from_toml_str(PROJECT)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(site.n_years, 20);

        let engine = MitigationEngine::new();
        let result = engine
            .mitigation_from(&scenarios, "business-as-usual", "agroforestry")
            .unwrap();

        assert_eq!(result.net_annual.len(), 20);
        assert!(
            result.total_net() < 0.0,
            "planting on a degrading baseline should mitigate, got {}",
            result.total_net()
        );

        // Per-project totals scale with area without touching the per-ha series.
        let project_total: FloatValue = result.total_net() * site.area_ha;
        assert!(project_total < result.total_net());
    }

    #[test]
    fn missing_scenario_name_is_a_configuration_error() {
        let (_, scenarios) = ProjectConfig::from_toml_str(PROJECT)
            .unwrap()
            .build()
            .unwrap();
        let err = MitigationEngine::new()
            .mitigation_from(&scenarios, "business-as-usual", "no such plan")
            .unwrap_err();
        assert!(err.to_string().contains("no such plan"));
    }
}
