use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use limiter::{
    types::{GeoBounds, GeoPosition},
    DeferredTask, Listener, MapEvent, MapHandle,
};
use walkers::{Map, MapMemory, Plugin, Position, Tiles};

/// Adapter that lets the limiter drive a `walkers` map.
///
/// The widget is immediate mode, so there is no subscription mechanism to
/// hook into: listeners are kept here, viewport changes are detected by
/// comparing against the previous frame, and `pump` delivers the queued
/// notifications once per frame, one at a time. Tasks posted with `defer`
/// run at the start of the following frame, when the widget state for the
/// turn that posted them has settled.
pub struct MapView {
    inner: Rc<RefCell<ViewInner>>,
}

struct ViewInner {
    memory: MapMemory,
    home: Position,
    size: egui::Vec2,
    min_zoom: Option<f64>,
    last_center: GeoPosition,
    last_zoom: f64,
    last_size: egui::Vec2,
    listeners: Vec<(MapEvent, Listener)>,
    queued: VecDeque<MapEvent>,
    deferred: VecDeque<DeferredTask>,
}

impl MapView {
    pub fn new(home: Position, initial_zoom: f64) -> Rc<Self> {
        let mut memory = MapMemory::default();
        let _ = memory.set_zoom(initial_zoom);

        Rc::new(Self {
            inner: Rc::new(RefCell::new(ViewInner {
                memory,
                home,
                size: egui::Vec2::ZERO,
                min_zoom: None,
                last_center: GeoPosition::from_lat_lon(home.lat(), home.lon()),
                last_zoom: initial_zoom,
                last_size: egui::Vec2::ZERO,
                listeners: Vec::new(),
                queued: VecDeque::new(),
                deferred: VecDeque::new(),
            })),
        })
    }

    /// Renders the map widget and records its on-screen size.
    pub fn show(&self, ui: &mut egui::Ui, tiles: &mut dyn Tiles, plugin: impl Plugin + 'static) {
        let mut inner = self.inner.borrow_mut();
        let home = inner.home;
        let map = Map::new(Some(tiles), &mut inner.memory, home).with_plugin(plugin);
        let response = ui.add(map);
        inner.size = response.rect.size();
    }

    /// Runs one turn of the event loop: first the tasks deferred on an
    /// earlier frame, then the viewport changes observed since the last one.
    pub fn pump(&self) {
        let tasks: Vec<DeferredTask> = self.inner.borrow_mut().deferred.drain(..).collect();
        for task in tasks {
            task();
        }

        self.enforce_zoom_floor();
        self.detect_changes();
        self.dispatch_queued();
    }

    pub fn zoom_in(&self) {
        let _ = self.inner.borrow_mut().memory.zoom_in();
    }

    pub fn zoom_out(&self) {
        let mut inner = self.inner.borrow_mut();
        let _ = inner.memory.zoom_out();
        if let Some(min) = inner.min_zoom {
            if inner.memory.zoom() < min {
                let _ = inner.memory.set_zoom(min);
            }
        }
    }

    // walkers has no native minimum-zoom option, so the floor is re-applied
    // every frame.
    fn enforce_zoom_floor(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(min) = inner.min_zoom {
            if inner.memory.zoom() < min {
                let _ = inner.memory.set_zoom(min);
            }
        }
    }

    fn detect_changes(&self) {
        let mut inner = self.inner.borrow_mut();

        let pos = inner.memory.detached().unwrap_or(inner.home);
        let center = GeoPosition::from_lat_lon(pos.lat(), pos.lon());
        let zoom = inner.memory.zoom();
        let size = inner.size;

        if center != inner.last_center {
            inner.queued.push_back(MapEvent::CenterChanged);
            inner.last_center = center;
        }
        if zoom != inner.last_zoom {
            inner.queued.push_back(MapEvent::ZoomChanged);
            inner.last_zoom = zoom;
        }
        if size != inner.last_size {
            inner.queued.push_back(MapEvent::Resized);
            inner.last_size = size;
        }
    }

    fn dispatch_queued(&self) {
        loop {
            let Some(event) = self.inner.borrow_mut().queued.pop_front() else {
                break;
            };
            // Listeners get taken out while they run, so they are free to
            // call back into the view.
            let mut listeners = std::mem::take(&mut self.inner.borrow_mut().listeners);
            for (kind, listener) in listeners.iter_mut() {
                if *kind == event {
                    listener();
                }
            }
            let mut inner = self.inner.borrow_mut();
            let registered_meanwhile = std::mem::take(&mut inner.listeners);
            inner.listeners = listeners;
            inner.listeners.extend(registered_meanwhile);
        }
    }
}

impl MapHandle for MapView {
    fn center(&self) -> GeoPosition {
        let inner = self.inner.borrow();
        let pos = inner.memory.detached().unwrap_or(inner.home);
        GeoPosition::from_lat_lon(pos.lat(), pos.lon())
    }

    fn set_center(&self, center: GeoPosition) {
        let mut inner = self.inner.borrow_mut();
        inner
            .memory
            .center_at(Position::from_lat_lon(center.lat(), center.lon()));
    }

    fn viewport_bounds(&self) -> GeoBounds {
        let inner = self.inner.borrow();
        let pos = inner.memory.detached().unwrap_or(inner.home);
        let zoom = inner.memory.zoom();

        // Rough estimate of the visible area based on zoom; walkers does not
        // expose the on-screen bounds directly.
        let lat_span = 180.0 * (0.4 / zoom);
        let lon_span = 300.0 * (0.4 / zoom);

        GeoBounds::new(
            GeoPosition::from_lat_lon(pos.lat() + lat_span / 2.0, pos.lon() + lon_span / 2.0),
            GeoPosition::from_lat_lon(pos.lat() - lat_span / 2.0, pos.lon() - lon_span / 2.0),
        )
    }

    fn zoom(&self) -> f64 {
        self.inner.borrow().memory.zoom()
    }

    fn set_min_zoom(&self, min_zoom: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.min_zoom = Some(min_zoom);
        if inner.memory.zoom() < min_zoom {
            let _ = inner.memory.set_zoom(min_zoom);
        }
    }

    fn viewport_height(&self) -> f64 {
        self.inner.borrow().size.y as f64
    }

    fn add_listener(&self, event: MapEvent, listener: Listener) {
        self.inner.borrow_mut().listeners.push((event, listener));
    }

    fn defer(&self, task: DeferredTask) {
        self.inner.borrow_mut().deferred.push_back(task);
    }
}
