//! Toner reference attributes with factory-derived fields.
//!
//! `total_fill_mass_g`, `fill_mass_per_sheet_g` and `price_per_sheet`
//! are always recomputed together from the primary inputs. They are not
//! settable on their own, so an edit can never leave a subset of them
//! stale.

use serde::{Deserialize, Serialize};

use crate::error::InvalidReference;

/// Per-model reference attributes the classification and valuation
/// consume. Fields are private; construction and edits go through the
/// validating factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TonerReference {
    model: String,
    empty_weight_g: f64,
    full_weight_g: f64,
    sheet_capacity: u32,
    unit_price: f64,

    // Derived as a unit; see `derive_fields`.
    total_fill_mass_g: f64,
    fill_mass_per_sheet_g: f64,
    price_per_sheet: f64,
}

impl TonerReference {
    /// Build a reference from primary inputs, deriving the dependent
    /// fields.
    pub fn new(
        model: impl Into<String>,
        empty_weight_g: f64,
        full_weight_g: f64,
        sheet_capacity: u32,
        unit_price: f64,
    ) -> Result<Self, InvalidReference> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(InvalidReference::EmptyModel);
        }
        if empty_weight_g <= 0.0 {
            return Err(InvalidReference::EmptyWeightNotPositive { empty_weight_g });
        }
        if full_weight_g <= empty_weight_g {
            return Err(InvalidReference::FullWeightNotAboveEmpty {
                full_weight_g,
                empty_weight_g,
            });
        }
        if sheet_capacity == 0 {
            return Err(InvalidReference::ZeroSheetCapacity);
        }
        if unit_price < 0.0 {
            return Err(InvalidReference::NegativeUnitPrice { unit_price });
        }

        let mut reference = Self {
            model,
            empty_weight_g,
            full_weight_g,
            sheet_capacity,
            unit_price,
            total_fill_mass_g: 0.0,
            fill_mass_per_sheet_g: 0.0,
            price_per_sheet: 0.0,
        };
        reference.derive_fields();
        Ok(reference)
    }

    /// Replace the primary inputs and re-derive every dependent field.
    /// The previous value is untouched on error.
    pub fn update(
        &self,
        empty_weight_g: f64,
        full_weight_g: f64,
        sheet_capacity: u32,
        unit_price: f64,
    ) -> Result<Self, InvalidReference> {
        Self::new(
            self.model.clone(),
            empty_weight_g,
            full_weight_g,
            sheet_capacity,
            unit_price,
        )
    }

    fn derive_fields(&mut self) {
        self.total_fill_mass_g = self.full_weight_g - self.empty_weight_g;
        self.fill_mass_per_sheet_g = self.total_fill_mass_g / self.sheet_capacity as f64;
        self.price_per_sheet = self.unit_price / self.sheet_capacity as f64;
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn empty_weight_g(&self) -> f64 {
        self.empty_weight_g
    }

    pub fn full_weight_g(&self) -> f64 {
        self.full_weight_g
    }

    pub fn sheet_capacity(&self) -> u32 {
        self.sheet_capacity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// Gramatura: the mass of toner powder a full cartridge holds.
    pub fn total_fill_mass_g(&self) -> f64 {
        self.total_fill_mass_g
    }

    pub fn fill_mass_per_sheet_g(&self) -> f64 {
        self.fill_mass_per_sheet_g
    }

    pub fn price_per_sheet(&self) -> f64 {
        self.price_per_sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_derives_all_dependent_fields() {
        let r = TonerReference::new("HP CF283A", 50.0, 900.0, 1600, 80.0).unwrap();
        assert!((r.total_fill_mass_g() - 850.0).abs() < 1e-9);
        assert!((r.fill_mass_per_sheet_g() - 850.0 / 1600.0).abs() < 1e-9);
        assert!((r.price_per_sheet() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn update_recomputes_derived_fields_as_a_unit() {
        let r = TonerReference::new("HP CF283A", 50.0, 900.0, 1600, 80.0).unwrap();
        // Only the price changes, but the whole derived set is rebuilt.
        let edited = r.update(50.0, 900.0, 1600, 96.0).unwrap();
        assert!((edited.price_per_sheet() - 0.06).abs() < 1e-9);
        assert!((edited.total_fill_mass_g() - 850.0).abs() < 1e-9);

        // Weight change flows into both mass-derived fields.
        let edited = r.update(60.0, 860.0, 1600, 80.0).unwrap();
        assert!((edited.total_fill_mass_g() - 800.0).abs() < 1e-9);
        assert!((edited.fill_mass_per_sheet_g() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn update_failure_leaves_original_untouched() {
        let r = TonerReference::new("HP CF283A", 50.0, 900.0, 1600, 80.0).unwrap();
        let err = r.update(900.0, 50.0, 1600, 80.0).unwrap_err();
        assert!(matches!(err, InvalidReference::FullWeightNotAboveEmpty { .. }));
        assert!((r.total_fill_mass_g() - 850.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_primary_inputs() {
        assert!(matches!(
            TonerReference::new("X", 0.0, 900.0, 1600, 80.0),
            Err(InvalidReference::EmptyWeightNotPositive { .. })
        ));
        assert!(matches!(
            TonerReference::new("X", 50.0, 50.0, 1600, 80.0),
            Err(InvalidReference::FullWeightNotAboveEmpty { .. })
        ));
        assert!(matches!(
            TonerReference::new("X", 50.0, 900.0, 0, 80.0),
            Err(InvalidReference::ZeroSheetCapacity)
        ));
        assert!(matches!(
            TonerReference::new("X", 50.0, 900.0, 1600, -1.0),
            Err(InvalidReference::NegativeUnitPrice { .. })
        ));
        assert!(matches!(
            TonerReference::new("  ", 50.0, 900.0, 1600, 80.0),
            Err(InvalidReference::EmptyModel)
        ));
    }
}
