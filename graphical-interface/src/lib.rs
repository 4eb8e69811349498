mod map;
mod plugins;
mod view;
mod windows;

use map::MyApp;

pub fn run() -> Result<(), eframe::Error> {
    eframe::run_native(
        "Bounded Map",
        Default::default(),
        Box::new(|cc| Ok(Box::new(MyApp::new(cc.egui_ctx.clone())))),
    )
}
