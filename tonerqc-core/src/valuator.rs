//! Recovered-value estimate for units returning to stock.
//!
//! The money recoverable from a returned unit is the sheets' worth of
//! toner still inside it. Sheets are rounded to a whole count BEFORE the
//! price multiplication; the resulting currency value is left unrounded
//! (display rounding is a presentation concern).

/// Estimate the value recoverable from a unit sent back to stock.
///
/// `fill_percentage` is expected in [0, 100] but not enforced here; the
/// workflow only valuates units whose disposition is stock. A zero
/// `sheet_capacity` is a caller contract violation (the reference
/// factory rejects it) and simply yields zero.
pub fn recovered_value(fill_percentage: i32, sheet_capacity: u32, price_per_sheet: f64) -> f64 {
    let remaining_sheets = (fill_percentage as f64 / 100.0 * sheet_capacity as f64).round();
    remaining_sheets * price_per_sheet
}
