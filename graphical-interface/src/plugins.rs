use egui::{Color32, Response, Stroke};
use limiter::types::GeoBounds;
use walkers::{Plugin, Position, Projector};

/// Draws the maximum allowed boundary as a rectangle over the map, so it is
/// visible how far the view can be panned.
pub struct BoundsOverlay {
    bounds: GeoBounds,
}

impl BoundsOverlay {
    pub fn new(bounds: GeoBounds) -> Self {
        Self { bounds }
    }
}

impl Plugin for BoundsOverlay {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        let ne = projector.project(Position::from_lat_lon(
            self.bounds.north_east.lat(),
            self.bounds.north_east.lon(),
        ));
        let sw = projector.project(Position::from_lat_lon(
            self.bounds.south_west.lat(),
            self.bounds.south_west.lon(),
        ));

        let rect = egui::Rect::from_two_pos(ne.to_pos2(), sw.to_pos2());
        ui.painter()
            .rect_stroke(rect, 0.0, Stroke::new(2.0, Color32::RED));
    }
}
