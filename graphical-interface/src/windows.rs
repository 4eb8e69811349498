use egui::{Align2, RichText, Ui, Window};

use crate::view::MapView;

/// Zoom in/out buttons over the bottom left corner of the map.
pub fn zoom(ui: &Ui, view: &MapView) {
    Window::new("Map")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::LEFT_BOTTOM, [10., -10.])
        .show(ui.ctx(), |ui| {
            ui.horizontal(|ui| {
                if ui.button(RichText::new("➕").heading()).clicked() {
                    view.zoom_in();
                }
                if ui.button(RichText::new("➖").heading()).clicked() {
                    view.zoom_out();
                }
            });
        });
}
