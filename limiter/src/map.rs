use crate::types::{GeoBounds, GeoPosition};

/// Edge length of a map tile, in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Viewport events a map widget notifies about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    CenterChanged,
    ZoomChanged,
    Resized,
}

/// A fire-and-forget listener for a named viewport event.
pub type Listener = Box<dyn FnMut()>;

/// A one-shot task to run on a later turn of the event loop.
pub type DeferredTask = Box<dyn FnOnce()>;

/// The operations the limiter needs from a map widget.
///
/// Methods take `&self`: a map handle is a shared reference to a widget that
/// manages its own interior state, and listeners registered on it may call
/// back into it. Getters and setters are assumed non-failing.
pub trait MapHandle {
    /// Current center of the visible area.
    fn center(&self) -> GeoPosition;

    /// Moves the visible area so it is centered on `center`.
    fn set_center(&self, center: GeoPosition);

    /// The geographical rectangle currently visible on screen.
    fn viewport_bounds(&self) -> GeoBounds;

    /// Current zoom level.
    fn zoom(&self) -> f64;

    /// Lowest zoom level the widget should allow from now on.
    fn set_min_zoom(&self, min_zoom: f64);

    /// Rendered height of the map's display element, in pixels.
    fn viewport_height(&self) -> f64;

    /// Subscribes `listener` to `event` for the lifetime of the map. There
    /// is no unsubscribe.
    fn add_listener(&self, event: MapEvent, listener: Listener);

    /// Posts a one-shot task to the single-threaded event loop that delivers
    /// this map's notifications. The task runs on a later turn, after
    /// pending viewport mutations have settled.
    fn defer(&self, task: DeferredTask);
}
