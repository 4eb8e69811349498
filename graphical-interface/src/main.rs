fn main() -> Result<(), eframe::Error> {
    graphical_interface::run()
}
