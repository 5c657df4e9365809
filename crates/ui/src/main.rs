mod app;
mod config;

use app::ChessApp;
use clap::Parser;
use config::Config;

fn main() -> eframe::Result<()> {
    let config = Config::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.size, config.size])
            .with_title("Chess"),
        ..Default::default()
    };

    eframe::run_native(
        "Chess",
        options,
        Box::new(move |_cc| Ok(Box::new(ChessApp::new(config)))),
    )
}
