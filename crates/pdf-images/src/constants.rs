//! Shared constants for image-to-PDF conversion

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Margins
// =============================================================================

/// Frame width for `MarginMode::Default` (mm)
pub const MARGIN_DEFAULT_MM: f32 = 10.0;

/// Frame width for `MarginMode::Minimum` (mm)
pub const MARGIN_MINIMUM_MM: f32 = 5.0;

// =============================================================================
// Output
// =============================================================================

/// chrono format for the optional filename timestamp (ddMMyyyy_HHmmss)
pub const TIMESTAMP_FORMAT: &str = "%d%m%Y_%H%M%S";

/// Written to the document's Info dictionary
pub const PRODUCER: &str = concat!("pdf-images ", env!("CARGO_PKG_VERSION"));

/// Resource name of the image on every page
pub const IMAGE_RESOURCE_NAME: &str = "Im0";
