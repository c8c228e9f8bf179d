//! Gas-species constants from the accounting methodology.
//!
//! Global-warming potentials are the IPCC Second Assessment Report values
//! used by the Plan Vivo technical specification, not the most recent AR
//! values; changing them would change issued-credit accounting.

use agmit_core::series::FloatValue;

/// 100-year global-warming potential of methane (t CO2e / t CH4).
pub const GWP_CH4: FloatValue = 21.0;

/// 100-year global-warming potential of nitrous oxide (t CO2e / t N2O).
pub const GWP_N2O: FloatValue = 310.0;

/// Molar-mass ratio converting N2O-N to N2O.
pub const N2O_N_TO_N2O: FloatValue = 44.0 / 28.0;
