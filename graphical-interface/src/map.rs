use std::{path::Path, rc::Rc};

use egui::Context;
use egui_extras::install_image_loaders;
use limiter::{
    types::{GeoBounds, GeoPosition},
    BoundaryLimiter,
};
use logger::Logger;
use walkers::{HttpOptions, HttpTiles, Position, Tiles};

use crate::{plugins::BoundsOverlay, view::MapView, windows};

const INITIAL_LAT: f64 = -34.608406;
const INITIAL_LON: f64 = -58.372159;
const INITIAL_ZOOM: f64 = 5.0;

// Roughly South America; panning further away gets snapped back.
const MAX_BOUNDS_NE: (f64, f64) = (15.0, -30.0);
const MAX_BOUNDS_SW: (f64, f64) = (-60.0, -90.0);

/// The main application struct: a tile map whose panning and zooming are
/// constrained by a [`BoundaryLimiter`].
pub struct MyApp {
    tiles: Box<dyn Tiles>,
    map_view: Rc<MapView>,
    max_bounds: GeoBounds,
}

impl MyApp {
    /// Creates a new `MyApp` instance, initializing the map view and
    /// attaching the limiter to it.
    pub fn new(egui_ctx: Context) -> Self {
        install_image_loaders(&egui_ctx);

        let map_view = MapView::new(
            Position::from_lat_lon(INITIAL_LAT, INITIAL_LON),
            INITIAL_ZOOM,
        );

        let max_bounds = GeoBounds::new(
            GeoPosition::from_lat_lon(MAX_BOUNDS_NE.0, MAX_BOUNDS_NE.1),
            GeoPosition::from_lat_lon(MAX_BOUNDS_SW.0, MAX_BOUNDS_SW.1),
        );

        let logger = Logger::new(Path::new("/tmp"), "principal").ok();
        BoundaryLimiter::attach_with_logger(&map_view, max_bounds, logger);

        Self {
            tiles: Box::new(HttpTiles::with_options(
                walkers::sources::OpenStreetMap,
                HttpOptions::default(),
                egui_ctx.to_owned(),
            )),
            map_view,
            max_bounds,
        }
    }
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            ..Default::default()
        };

        egui::CentralPanel::default()
            .frame(rimless)
            .show(ctx, |ui| {
                let overlay = BoundsOverlay::new(self.max_bounds);
                self.map_view.show(ui, self.tiles.as_mut(), overlay);

                // Una vuelta del bucle de eventos por cuadro
                self.map_view.pump();

                windows::zoom(ui, &self.map_view);
            });
    }
}
