//! Billboard → Spotify playlist builder.
//!
//! Scrapes the Hot 100 chart for a chosen week and turns it into a public
//! Spotify playlist through a small always-on-top form.

mod app;
mod config;
mod error;
mod spotify;
mod spotify_auth;
mod web_scraper;

#[cfg(test)]
mod test_support;

use dotenv::dotenv;
use env_logger::Env;

use crate::app::BillboardApp;
use crate::config::Config;

const APP_NAME: &str = "Billboard → Spotify Playlist Builder";
const APP_WIDTH: f32 = 460.0;
const APP_HEIGHT: f32 = 220.0;

fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("[Main] {err}");
            std::process::exit(1);
        }
    };

    // One runtime for the whole app; every network call runs on it via
    // block_on, so a multi-thread scheduler would buy nothing.
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            log::error!("[Main] Failed to start async runtime: {err}");
            std::process::exit(1);
        }
    };

    log::info!("[Main] Starting {APP_NAME}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([APP_WIDTH, APP_HEIGHT])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(BillboardApp::new(cc, config, runtime)))),
    )
}
