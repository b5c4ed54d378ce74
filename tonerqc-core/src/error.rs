//! Engine error types.
//!
//! Every failure mode has a named variant. All of these describe bad
//! reference (catalog) data, not bad operator input: a weigh-in can be
//! any number, but a toner model with a non-positive fill mass is a
//! configuration error that must abort the calculation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidReference {
    #[error("empty weight must be positive, got {empty_weight_g}g")]
    EmptyWeightNotPositive { empty_weight_g: f64 },

    #[error("full weight ({full_weight_g}g) must exceed empty weight ({empty_weight_g}g)")]
    FullWeightNotAboveEmpty {
        full_weight_g: f64,
        empty_weight_g: f64,
    },

    #[error("sheet capacity must be positive")]
    ZeroSheetCapacity,

    #[error("unit price must not be negative, got {unit_price}")]
    NegativeUnitPrice { unit_price: f64 },

    #[error("total fill mass must be positive, got {total_fill_mass_g}g")]
    NonPositiveFillMass { total_fill_mass_g: f64 },

    #[error("toner model name must not be empty")]
    EmptyModel,
}
