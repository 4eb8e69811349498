mod position;
pub use position::GeoPosition;

mod bounds;
pub use bounds::{BoundsOffsets, GeoBounds};
