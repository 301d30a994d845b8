//! Palette library: hue offsets per shape index.

use rosefield_spec::PaletteKind;

/// Returns the hue (degrees, unbounded) for shape `index` out of `total`.
///
/// Callers reduce the result mod 360. A `total` of 0 or 1 makes every ratio
/// term 0.
pub fn hue_offset(kind: PaletteKind, base_hue: f64, index: usize, total: usize) -> f64 {
    let ratio = if total <= 1 {
        0.0
    } else {
        index as f64 / total as f64
    };

    match kind {
        PaletteKind::Analogous => base_hue + ratio * 60.0 - 30.0,
        PaletteKind::Complementary => {
            if index % 2 == 0 {
                base_hue
            } else {
                base_hue + 180.0
            }
        }
        PaletteKind::Triadic => base_hue + (index % 3) as f64 * 120.0,
        PaletteKind::Warm => ratio * 60.0,
        PaletteKind::Cool => 180.0 + ratio * 60.0,
        PaletteKind::Sunset => ratio * 90.0,
        PaletteKind::Ocean => 180.0 + ratio * 100.0,
        PaletteKind::Forest => 90.0 + ratio * 80.0,
        PaletteKind::Monochrome => base_hue,
    }
}
