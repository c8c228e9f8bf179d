//! The sub-model trait seam.

use crate::errors::EngineResult;
use crate::scenario::Scenario;
use crate::series::AnnualSeries;

/// Contract implemented by every emissions sub-model.
///
/// A sub-model is a pure function over an immutable scenario description:
/// it holds only its own parameterization, reads the scenario's site,
/// cohorts, and management events, and produces a fresh annual series on
/// every call. No state is shared between scenarios, so evaluations are
/// independent and may run concurrently.
///
/// The returned series is always exactly `scenario.n_years()` long with the
/// crate-wide sign convention (positive = emission, negative = removal).
pub trait EmissionModel {
    /// Short identifier used when attributing a failure to a sub-model.
    fn name(&self) -> &'static str;

    /// Compute the per-year emission series (t CO2e/ha/yr).
    fn compute(&self, scenario: &Scenario) -> EngineResult<AnnualSeries>;
}
