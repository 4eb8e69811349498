use std::rc::Rc;

mod limiter;
mod map;
pub mod types;

pub use limiter::BoundaryLimiter;
pub use map::{DeferredTask, Listener, MapEvent, MapHandle, TILE_SIZE};

use types::GeoBounds;

/// Keeps the visible area of `map` inside `max_bounds` for the rest of the
/// map's life, and stops the user from zooming out far enough to see tiles
/// outside it.
///
/// The map must already be initialized with a queryable viewport. One call
/// per map instance.
pub fn limit_map<M: MapHandle + 'static>(
    map: &Rc<M>,
    max_bounds: GeoBounds,
) -> Rc<BoundaryLimiter<M>> {
    BoundaryLimiter::attach(map, max_bounds)
}
