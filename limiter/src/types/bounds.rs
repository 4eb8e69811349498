use serde::{Deserialize, Serialize};

use super::GeoPosition;

/// Represents a rectangle in latitude/longitude space, defined by its
/// north-east and south-west corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north_east: GeoPosition,
    pub south_west: GeoPosition,
}

impl GeoBounds {
    pub fn new(north_east: GeoPosition, south_west: GeoPosition) -> Self {
        Self {
            north_east,
            south_west,
        }
    }

    /// Checks whether a given position is within the bounds. Positions on an
    /// edge count as inside.
    pub fn contains(&self, pos: &GeoPosition) -> bool {
        pos.lat() >= self.south_west.lat()
            && pos.lat() <= self.north_east.lat()
            && pos.lon() >= self.south_west.lon()
            && pos.lon() <= self.north_east.lon()
    }

    /// Checks whether both corners of `other` lie within these bounds.
    pub fn contains_bounds(&self, other: &GeoBounds) -> bool {
        self.contains(&other.north_east) && self.contains(&other.south_west)
    }
}

/// Per-edge offsets for a pair of bounds. A value > 0 means the inner bounds
/// stick out past the outer bounds on that edge; when all four values are
/// <= 0 the inner bounds are a true subset of the outer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsOffsets {
    pub north: f64,
    pub east: f64,
    pub south: f64,
    pub west: f64,
}

impl BoundsOffsets {
    /// Calculates the offsets in every direction for the given pair of
    /// bounds. Pure subtraction, no clamping.
    pub fn between(inner: &GeoBounds, outer: &GeoBounds) -> Self {
        Self {
            north: inner.north_east.lat() - outer.north_east.lat(),
            east: inner.north_east.lon() - outer.north_east.lon(),
            south: outer.south_west.lat() - inner.south_west.lat(),
            west: outer.south_west.lon() - inner.south_west.lon(),
        }
    }

    pub fn all_inside(&self) -> bool {
        self.north <= 0.0 && self.east <= 0.0 && self.south <= 0.0 && self.west <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(ne_lat: f64, ne_lon: f64, sw_lat: f64, sw_lon: f64) -> GeoBounds {
        GeoBounds::new(
            GeoPosition::from_lat_lon(ne_lat, ne_lon),
            GeoPosition::from_lat_lon(sw_lat, sw_lon),
        )
    }

    #[test]
    fn contains_is_inclusive_on_edges() {
        let outer = bounds(10.0, 10.0, -10.0, -10.0);

        assert!(outer.contains(&GeoPosition::from_lat_lon(10.0, 10.0)));
        assert!(outer.contains(&GeoPosition::from_lat_lon(-10.0, -10.0)));
        assert!(outer.contains(&GeoPosition::from_lat_lon(0.0, 0.0)));
        assert!(!outer.contains(&GeoPosition::from_lat_lon(10.1, 0.0)));
        assert!(!outer.contains(&GeoPosition::from_lat_lon(0.0, -10.1)));
    }

    #[test]
    fn contains_bounds_checks_both_corners() {
        let outer = bounds(10.0, 10.0, -10.0, -10.0);

        assert!(outer.contains_bounds(&bounds(5.0, 5.0, -5.0, -5.0)));
        assert!(outer.contains_bounds(&bounds(10.0, 10.0, -10.0, -10.0)));
        assert!(!outer.contains_bounds(&bounds(11.0, 5.0, -5.0, -5.0)));
        assert!(!outer.contains_bounds(&bounds(5.0, 5.0, -5.0, -11.0)));
    }

    #[test]
    fn offsets_are_negative_for_inner_strictly_inside() {
        let outer = bounds(10.0, 10.0, -10.0, -10.0);
        let inner = bounds(5.0, 4.0, -3.0, -2.0);

        let offsets = BoundsOffsets::between(&inner, &outer);

        assert!(offsets.north < 0.0);
        assert!(offsets.east < 0.0);
        assert!(offsets.south < 0.0);
        assert!(offsets.west < 0.0);
        assert!(offsets.all_inside());
    }

    #[test]
    fn offsets_are_zero_on_touching_corner() {
        let outer = bounds(10.0, 10.0, -10.0, -10.0);
        let inner = bounds(10.0, 10.0, -3.0, -2.0);

        let offsets = BoundsOffsets::between(&inner, &outer);

        assert_eq!(offsets.north, 0.0);
        assert_eq!(offsets.east, 0.0);
        assert!(offsets.all_inside());
    }

    #[test]
    fn offsets_are_positive_where_inner_protrudes() {
        let outer = bounds(10.0, 10.0, -10.0, -10.0);
        let inner = bounds(12.0, 9.0, -8.0, -11.0);

        let offsets = BoundsOffsets::between(&inner, &outer);

        assert_eq!(offsets.north, 2.0);
        assert_eq!(offsets.east, -1.0);
        assert_eq!(offsets.south, -2.0);
        assert_eq!(offsets.west, 1.0);
        assert!(!offsets.all_inside());
    }
}
