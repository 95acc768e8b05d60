//! Currency arithmetic shared by report validation and stats derivation.

/// Goods and services tax applied to a forecast subtotal.
pub const GST_RATE: f64 = 0.18;

/// Smallest tolerance used when comparing currency amounts (one paisa).
pub const CURRENCY_TOLERANCE: f64 = 1e-2;

/// Relative tolerance applied to large amounts, where accumulated
/// floating-point error exceeds one paisa.
const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Absolute tolerance for comparing amounts of the given magnitude.
pub fn tolerance_for(magnitude: f64) -> f64 {
    CURRENCY_TOLERANCE.max(magnitude.abs() * RELATIVE_TOLERANCE)
}

/// Whether two currency amounts agree within [`tolerance_for`] their magnitude.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= tolerance_for(a.abs().max(b.abs()))
}

/// GST due on a subtotal, rounded to whole currency units.
pub fn gst_for(subtotal: f64) -> f64 {
    (subtotal * GST_RATE).round()
}
