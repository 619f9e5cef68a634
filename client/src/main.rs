mod app;
mod board;
mod config;
mod tiles;

use std::path::PathBuf;

use clap::Parser;
use common::log;
use common::logger;
use common::replay::{RECORD_FILE_EXTENSION, load_record};
use eframe::egui;

use app::DuelApp;
use config::load_client_config;

#[derive(Parser)]
#[command(name = "grid_duel_client")]
struct Args {
    /// Play back a stored match record instead of starting a live match.
    #[arg(long)]
    replay: Option<PathBuf>,
    /// Choose a match record through a file dialog.
    #[arg(long)]
    pick_replay: bool,
    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = load_client_config()?;

    let replay_path = if args.pick_replay {
        rfd::FileDialog::new()
            .add_filter("Match records", &[RECORD_FILE_EXTENSION])
            .set_directory(&config.records_dir)
            .pick_file()
    } else {
        args.replay
    };

    let app = match replay_path {
        Some(path) => {
            let record = load_record(&path)?;
            log!("Playing replay {}", path.display());
            DuelApp::new_replay(&record, &config)?
        }
        None => {
            log!("Starting live match on the default board");
            DuelApp::new_live(&config)?
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title("Grid Duel"),
        ..Default::default()
    };

    eframe::run_native("Grid Duel", options, Box::new(|_cc| Ok(Box::new(app))))?;

    Ok(())
}
