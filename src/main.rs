//! Jump61 GUI
//!
//! A graphical interface for playing Jump61 against the AI or another player.

use clap::Parser;
use tracing::info;

use jump61::cli::{init_tracing, Cli};
use jump61::ui::Jump61App;

fn main() -> Result<(), eframe::Error> {
    let cli = Cli::parse();
    init_tracing("info");

    let config = cli.game_config();
    info!(size = config.size, depth = config.search.depth, human = ?config.human, "starting GUI");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Jump61"),
        ..Default::default()
    };

    eframe::run_native(
        "Jump61",
        options,
        Box::new(move |cc| Ok(Box::new(Jump61App::new(cc, config)))),
    )
}
