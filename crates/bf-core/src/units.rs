// bf-core/src/units.rs

use uom::si::f64::{Area as UomArea, Length as UomLength};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Length = UomLength;

#[inline]
pub fn ha(v: f64) -> Area {
    use uom::si::area::hectare;
    Area::new::<hectare>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

/// Plants that fit in `area` on a rectangular grid of `row_spacing` by
/// `plant_spacing`, evaluated left to right as `area / row / plant` so the
/// floating point result is reproducible.
pub fn grid_density(area: Area, row_spacing: Length, plant_spacing: Length) -> f64 {
    use uom::si::area::square_meter;
    use uom::si::length::meter;
    area.get::<square_meter>() / row_spacing.get::<meter>() / plant_spacing.get::<meter>()
}
