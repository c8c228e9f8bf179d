//! Annual emission series over the accounting period.

use crate::errors::{EngineError, EngineResult};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Precision used for all model calculations.
pub type FloatValue = f64;

/// Molar-mass ratio converting a carbon stock change to CO2 equivalent.
pub const CO2_PER_C: FloatValue = 44.0 / 12.0;

/// A per-hectare annual series spanning the accounting period.
///
/// Values are in t CO2e / ha / yr unless stated otherwise. The sign
/// convention used end to end: **positive = emission to the atmosphere,
/// negative = removal from it**. Entry `t` covers the flux between the start
/// of year `t` and the start of year `t + 1`.
///
/// The length of the series always equals the accounting period of the site
/// it was computed for; a missing year is an error during construction, not
/// a silently zero-filled value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSeries {
    values: Array1<FloatValue>,
}

impl AnnualSeries {
    /// An all-zero series of the given length.
    pub fn zeros(n_years: usize) -> Self {
        Self {
            values: Array1::zeros(n_years),
        }
    }

    pub fn from_values(values: Array1<FloatValue>) -> Self {
        Self { values }
    }

    /// Build from a vector, enforcing the expected accounting-period length.
    pub fn from_vec(values: Vec<FloatValue>, n_years: usize) -> EngineResult<Self> {
        if values.len() != n_years {
            return Err(EngineError::configuration(format!(
                "annual series has {} entries, expected {}",
                values.len(),
                n_years
            )));
        }
        Ok(Self {
            values: Array1::from_vec(values),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &Array1<FloatValue> {
        &self.values
    }

    /// Value for year `t` (zero-based).
    pub fn get(&self, year: usize) -> FloatValue {
        self.values[year]
    }

    /// Running sum of the series, same length.
    pub fn cumulative(&self) -> Array1<FloatValue> {
        let mut acc = 0.0;
        self.values.mapv(|v| {
            acc += v;
            acc
        })
    }

    /// Sum over the whole accounting period.
    pub fn total(&self) -> FloatValue {
        self.values.sum()
    }

    /// Elementwise sum of several series of identical length.
    pub fn sum_of(series: &[&AnnualSeries]) -> EngineResult<AnnualSeries> {
        let n = match series.first() {
            Some(s) => s.len(),
            None => return Err(EngineError::configuration("cannot sum zero series")),
        };
        let mut out = Array1::zeros(n);
        for s in series {
            if s.len() != n {
                return Err(EngineError::configuration(format!(
                    "series length mismatch when summing: {} vs {}",
                    s.len(),
                    n
                )));
            }
            out += &s.values;
        }
        Ok(AnnualSeries { values: out })
    }

    /// Elementwise difference `self − other`.
    pub fn minus(&self, other: &AnnualSeries) -> EngineResult<AnnualSeries> {
        if self.len() != other.len() {
            return Err(EngineError::configuration(format!(
                "series length mismatch when differencing: {} vs {}",
                self.len(),
                other.len()
            )));
        }
        Ok(AnnualSeries {
            values: &self.values - &other.values,
        })
    }

    /// Fail with a sub-model error if any entry is non-finite.
    pub fn ensure_finite(&self, model: &'static str) -> EngineResult<()> {
        match self.values.iter().position(|v| !v.is_finite()) {
            Some(year) => Err(EngineError::model(
                model,
                format!("non-finite value at year {}", year),
            )),
            None => Ok(()),
        }
    }
}
