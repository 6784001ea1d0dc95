use clap::Parser;
use framedeck::core::config::{self, CliOverrides, FramedeckConfig};
use framedeck::core::frame::{FrameLoadError, load_frames};
use framedeck::core::state::App;
use framedeck::tui;
use log::{error, info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "framedeck", about = "Browse and replay saved query frames")]
struct Args {
    /// JSON file with the frames to show
    #[arg(long, value_name = "PATH")]
    frames: Option<PathBuf>,

    /// Never take over the whole terminal for a single frame
    #[arg(long)]
    no_fullscreen: bool,

    /// Where to write the debug log
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let cli = CliOverrides {
        frames_file: args.frames,
        no_fullscreen: args.no_fullscreen,
        log_file: args.log_file,
    };
    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (FramedeckConfig::default(), Some(e)),
    };
    let config = config::resolve(&file_config, &cli);

    // The terminal owns stdout, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    info!("framedeck starting up");
    if let Some(e) = config_error {
        warn!("{}; using defaults", e);
        eprintln!("framedeck: {e}; using defaults");
    }
    info!("Resolved config: {:?}", config);

    let app = match &config.frames_file {
        None => App::new(Vec::new()),
        Some(path) => match load_frames(path) {
            Ok(frames) => App::new(frames),
            Err(FrameLoadError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                warn!("Frames file {} not found, starting empty", path.display());
                let mut app = App::new(Vec::new());
                app.status_message = format!("Frames file not found: {}", path.display());
                app
            }
            Err(e) => {
                error!("{}", e);
                return Err(std::io::Error::other(format!("{}: {e}", path.display())));
            }
        },
    };

    tui::run(&config, app)
}
