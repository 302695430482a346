mod ui;

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};
use macroquad::prelude::*;

use tetris::audio::Jukebox;
use tetris::settings::ConfigStore;
use ui::app::App;

#[derive(Parser, Debug)]
#[command(name = "tetris", version, about = "Falling-brick puzzle game")]
struct Args {
    /// Directory for settings.json and highscores.json
    #[arg(long, value_name = "PATH")]
    config_dir: Option<PathBuf>,

    /// Seed for the brick randomizer, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Start with all audio muted
    #[arg(long)]
    mute: bool,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Tetris".to_string(),
        window_width: 1000,
        window_height: 720,
        window_resizable: false,
        ..Default::default()
    }
}

fn open_store(config_dir: Option<PathBuf>) -> Option<ConfigStore> {
    match config_dir {
        Some(dir) => Some(ConfigStore::new(dir)),
        None => match ConfigStore::default_location() {
            Ok(store) => Some(store),
            Err(err) => {
                warn!("{err}; settings will not be saved");
                None
            }
        },
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let store = open_store(args.config_dir);
    let mut settings = store.as_ref().map(ConfigStore::load_settings).unwrap_or_default();
    if let Some(store) = &store {
        info!("using config directory {}", store.dir().display());
    }
    if args.mute {
        settings.audio.muted = true;
    }

    let jukebox = Jukebox::open(settings.audio.clone());
    let mut app = App::new(store, settings, jukebox, args.seed);

    prevent_quit();
    loop {
        app.update();
        app.draw();
        if is_quit_requested() {
            app.save();
            break;
        }
        if app.should_quit() {
            break;
        }
        next_frame().await;
    }
    info!("bye");
}
