use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use logger::{Color, Logger};

use crate::{
    map::{MapEvent, MapHandle, TILE_SIZE},
    types::{BoundsOffsets, GeoBounds, GeoPosition},
};

/// Keeps the visible area of one map inside a maximum boundary.
///
/// The limiter listens to the map's viewport events and, whenever a move
/// puts part of the viewport outside the allowed bounds, snaps the center
/// back to the last position known to be valid (or to a recomputed safe
/// center if there is none yet). After zoom and resize changes it also
/// raises the map's minimum zoom so that tiles outside the boundary can
/// never become visible.
///
/// One instance per map; instances share no state with each other.
pub struct BoundaryLimiter<M: MapHandle> {
    map: Weak<M>,
    max_bounds: GeoBounds,
    state: Rc<RefCell<LimiterState>>,
    logger: Option<Logger>,
}

#[derive(Default)]
struct LimiterState {
    /// Most recent center confirmed to keep the viewport inside the bounds.
    last_valid_center: Option<GeoPosition>,
    /// Set right before a programmatic move, so the notification it causes
    /// is not mistaken for a user-driven one.
    ignore_next_move: bool,
    /// Highest minimum zoom this limiter has set on the map.
    min_zoom_floor: Option<f64>,
}

impl<M: MapHandle + 'static> BoundaryLimiter<M> {
    /// Subscribes the limiter to the map's viewport events and performs one
    /// immediate minimum-zoom check. The returned handle is kept alive by
    /// the registered listeners; it can be dropped.
    pub fn attach(map: &Rc<M>, max_bounds: GeoBounds) -> Rc<Self> {
        Self::attach_with_logger(map, max_bounds, None)
    }

    /// Like [`BoundaryLimiter::attach`], logging every corrective action.
    pub fn attach_with_logger(
        map: &Rc<M>,
        max_bounds: GeoBounds,
        logger: Option<Logger>,
    ) -> Rc<Self> {
        let limiter = Rc::new(Self {
            map: Rc::downgrade(map),
            max_bounds,
            state: Rc::new(RefCell::new(LimiterState::default())),
            logger,
        });

        let handler = Rc::clone(&limiter);
        map.add_listener(
            MapEvent::CenterChanged,
            Box::new(move || handler.on_center_changed()),
        );

        let handler = Rc::clone(&limiter);
        map.add_listener(
            MapEvent::ZoomChanged,
            Box::new(move || {
                handler.schedule_recenter();
                handler.enforce_min_zoom();
            }),
        );

        let handler = Rc::clone(&limiter);
        map.add_listener(
            MapEvent::Resized,
            Box::new(move || {
                handler.schedule_recenter();
                handler.enforce_min_zoom();
            }),
        );

        // The starting zoom level might already be too low.
        limiter.enforce_min_zoom();

        limiter
    }

    pub fn max_bounds(&self) -> GeoBounds {
        self.max_bounds
    }

    /// The last center the limiter confirmed or applied, if any.
    pub fn last_valid_center(&self) -> Option<GeoPosition> {
        self.state.borrow().last_valid_center
    }

    /// Handles a center-change notification, from user drags as well as from
    /// the limiter's own corrective moves.
    fn on_center_changed(&self) {
        let Some(map) = self.map.upgrade() else {
            return;
        };

        // Check-and-clear before anything else: this notification may be the
        // echo of our own corrective move.
        {
            let mut state = self.state.borrow_mut();
            if state.ignore_next_move {
                state.ignore_next_move = false;
                return;
            }
        }

        let viewport = map.viewport_bounds();
        if self.max_bounds.contains_bounds(&viewport) {
            self.state.borrow_mut().last_valid_center = Some(map.center());
            return;
        }

        // The viewport left the allowed area. Snap back to the last valid
        // center, or compute one if no move was ever valid.
        let corrected = {
            let mut state = self.state.borrow_mut();
            state.ignore_next_move = true;
            match state.last_valid_center {
                Some(center) => center,
                None => {
                    let center = recalculate_center(map.center(), viewport, &self.max_bounds);
                    state.last_valid_center = Some(center);
                    center
                }
            }
        };

        self.log(&format!(
            "Viewport left the allowed bounds, recentering at ({}, {}).",
            corrected.lat(),
            corrected.lon()
        ));
        // State borrow is released: the move below may notify synchronously.
        map.set_center(corrected);
    }

    /// Schedules the post-zoom/post-resize recentering pass. The widget only
    /// publishes its new viewport a turn after the event fires, so the pass
    /// has to wait for the next turn of the event loop.
    fn schedule_recenter(&self) {
        let Some(map) = self.map.upgrade() else {
            return;
        };

        let weak_map = Weak::clone(&self.map);
        let state = Rc::clone(&self.state);
        let max_bounds = self.max_bounds;
        map.defer(Box::new(move || {
            // The map may be gone by the time the deferred turn runs.
            let Some(map) = weak_map.upgrade() else {
                return;
            };

            let center = recalculate_center(map.center(), map.viewport_bounds(), &max_bounds);
            state.borrow_mut().last_valid_center = Some(center);
            map.set_center(center);
        }));
    }

    /// Raises the map's minimum zoom when zooming out one more level would
    /// leave the world map shorter than the display element, which would
    /// expose out-of-range tiles.
    fn enforce_min_zoom(&self) {
        let Some(map) = self.map.upgrade() else {
            return;
        };

        let zoom = map.zoom();
        let zoomed_out_height = TILE_SIZE * 2.0_f64.powf(zoom - 1.0);
        if zoomed_out_height >= map.viewport_height() {
            return;
        }

        // The floor only ever goes up, even if queued zoom events arrive out
        // of chronological order.
        let raised = {
            let mut state = self.state.borrow_mut();
            match state.min_zoom_floor {
                Some(floor) if zoom <= floor => false,
                _ => {
                    state.min_zoom_floor = Some(zoom);
                    true
                }
            }
        };

        if raised {
            self.log(&format!("Minimum zoom raised to {}.", zoom));
            map.set_min_zoom(zoom);
        }
    }

    fn log(&self, message: &str) {
        if let Some(logger) = &self.logger {
            let _ = logger.info(message, Color::Cyan, false);
        }
    }
}

/// Calculates a new center such that the visible area of the map falls
/// completely within `max_bounds`.
///
/// Each edge of the viewport that protrudes past the boundary pulls the
/// center back toward the interior by exactly the protruding amount. When
/// the viewport is larger than the allowed area on an axis, both edges of
/// that axis pull in opposite directions and the result is a best-effort
/// center; the minimum-zoom limit resolves that situation separately.
fn recalculate_center(
    center: GeoPosition,
    viewport: GeoBounds,
    max_bounds: &GeoBounds,
) -> GeoPosition {
    let offsets = BoundsOffsets::between(&viewport, max_bounds);

    let mut lat = center.lat();
    let mut lon = center.lon();

    if offsets.north > 0.0 {
        lat -= offsets.north;
    }
    if offsets.south > 0.0 {
        lat += offsets.south;
    }
    if offsets.east > 0.0 {
        lon -= offsets.east;
    }
    if offsets.west > 0.0 {
        lon += offsets.west;
    }

    GeoPosition::from_lat_lon(lat, lon)
}
