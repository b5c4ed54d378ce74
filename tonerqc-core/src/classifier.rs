//! Fill classification from a weigh-in.
//!
//! Maps a returned cartridge's measured weight to a fill percentage and
//! a disposition recommendation. The bands are an ordered table of
//! closed integer ranges scanned first-match-wins; weigh-ins that land
//! outside [0, 100] percent hit an explicit out-of-range row instead of
//! falling through silently.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidReference;
use crate::reference::TonerReference;

// ---------------------------------------------------------------------------
// Recommendation bands
// ---------------------------------------------------------------------------

struct Band {
    lower: i32,
    upper: i32,
    category: PresentationCategory,
    text: &'static str,
}

/// Closed, contiguous, exhaustive over [0, 100]. Scanned in order.
const BANDS: [Band; 4] = [
    Band {
        lower: 0,
        upper: 5,
        category: PresentationCategory::Critical,
        text: "Discard the toner.",
    },
    Band {
        lower: 6,
        upper: 40,
        category: PresentationCategory::Caution,
        text: "Test the toner. If quality is good, use internally; otherwise discard.",
    },
    Band {
        lower: 41,
        upper: 80,
        category: PresentationCategory::Conditional,
        text: "Test the toner. If quality is good, send to stock as semi-new with the \
               percentage marked on the box and send to warranty.",
    },
    Band {
        lower: 81,
        upper: 100,
        category: PresentationCategory::Good,
        text: "Test the toner. If quality is good, send to stock as new; otherwise send \
               to warranty.",
    },
];

/// Catch-all for percentages below 0 or above 100: a unit weighing less
/// than an empty cartridge or more than a full one is a measurement (or
/// catalog) problem, not a disposition signal.
const OUT_OF_RANGE_TEXT: &str = "Recheck the measurement. The weighed value is outside \
                                 the plausible range for this toner model.";

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Severity bucket the recommendation renders under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationCategory {
    Critical,
    Caution,
    Conditional,
    Good,
    OutOfRange,
}

impl PresentationCategory {
    /// Fixed display style each category maps to, for any front end
    /// rendering the recommendation.
    pub fn style(self) -> &'static str {
        match self {
            PresentationCategory::Critical => "error",
            PresentationCategory::Caution => "warning",
            PresentationCategory::Conditional => "info",
            PresentationCategory::Good => "success",
            PresentationCategory::OutOfRange => "neutral",
        }
    }

    /// CSS classes the returns screen renders the badge with.
    pub fn css_class(self) -> &'static str {
        match self {
            PresentationCategory::Critical => "bg-red-100 text-red-800 border-red-200",
            PresentationCategory::Caution => "bg-yellow-100 text-yellow-800 border-yellow-200",
            PresentationCategory::Conditional => "bg-blue-100 text-blue-800 border-blue-200",
            PresentationCategory::Good => "bg-green-100 text-green-800 border-green-200",
            PresentationCategory::OutOfRange => "bg-gray-100 text-gray-800 border-gray-200",
        }
    }
}

impl fmt::Display for PresentationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentationCategory::Critical => write!(f, "Critical"),
            PresentationCategory::Caution => write!(f, "Caution"),
            PresentationCategory::Conditional => write!(f, "Conditional"),
            PresentationCategory::Good => write!(f, "Good"),
            PresentationCategory::OutOfRange => write!(f, "Out of range"),
        }
    }
}

/// Outcome of classifying one weigh-in. Derived, never mutated: always
/// recomputed from the inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillClassification {
    /// Toner mass still in the cartridge, exact (no rounding).
    pub present_fill_mass_g: f64,
    /// Rounded percentage of the total fill mass. Signed and unclamped:
    /// can be negative or above 100.
    pub fill_percentage: i32,
    pub recommendation: String,
    pub category: PresentationCategory,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a weigh-in against raw reference numbers.
///
/// `total_fill_mass_g` must be positive; a zero or negative value is a
/// catalog configuration error and aborts before any arithmetic.
pub fn classify(
    returned_weight_g: f64,
    empty_weight_g: f64,
    total_fill_mass_g: f64,
) -> Result<FillClassification, InvalidReference> {
    if total_fill_mass_g <= 0.0 {
        return Err(InvalidReference::NonPositiveFillMass { total_fill_mass_g });
    }

    let present_fill_mass_g = returned_weight_g - empty_weight_g;
    // Round half away from zero, matching the convention used everywhere
    // else in the system.
    let fill_percentage = (present_fill_mass_g / total_fill_mass_g * 100.0).round() as i32;

    let (category, text) = match BANDS
        .iter()
        .find(|band| band.lower <= fill_percentage && fill_percentage <= band.upper)
    {
        Some(band) => (band.category, band.text),
        None => (PresentationCategory::OutOfRange, OUT_OF_RANGE_TEXT),
    };

    Ok(FillClassification {
        present_fill_mass_g,
        fill_percentage,
        recommendation: text.to_string(),
        category,
    })
}

/// Classify against a catalog reference.
pub fn classify_against(
    returned_weight_g: f64,
    reference: &TonerReference,
) -> Result<FillClassification, InvalidReference> {
    classify(
        returned_weight_g,
        reference.empty_weight_g(),
        reference.total_fill_mass_g(),
    )
}
