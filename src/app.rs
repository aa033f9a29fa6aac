//! The one-form desktop front end and the run it drives.
//!
//! A click queues the typed date; the next frame paints the busy indicator
//! and the frame after that blocks the UI thread on the whole pipeline.
//! The window is deliberately unresponsive while a run is in flight.

use egui::{Align, Align2, Button, Color32, CursorIcon, Layout, RichText, TextEdit, Vec2, Window};
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::spotify::{self, SpotifyApi};
use crate::spotify_auth;
use crate::web_scraper::{ChartScraper, ChartSource};

const SPOTIFY_GREEN: Color32 = Color32::from_rgb(0x1d, 0xb9, 0x54);
const SPOTIFY_DARK: Color32 = Color32::from_rgb(0x19, 0x14, 0x14);
const FIELD_DARK: Color32 = Color32::from_rgb(0x12, 0x12, 0x12);

/// The whole run, validation to share link, generic over the two remote
/// seams so tests can drive it without a network.
///
/// Order matters and mirrors the user-visible states: an empty date never
/// reaches Spotify, and an empty chart aborts before any playlist exists.
pub async fn create_chart_playlist(
    chart: &impl ChartSource,
    spotify: &impl SpotifyApi,
    date: &str,
) -> Result<String> {
    let date = date.trim();
    if date.is_empty() {
        return Err(Error::EmptyDate);
    }

    let user = spotify.current_user_id().await?;

    let titles = chart.fetch(date).await?;
    if titles.is_empty() {
        return Err(Error::NoSongsFound);
    }

    spotify::build_playlist(spotify, user, date, &titles).await
}

/// Production wrapper: validates before the interactive login so an empty
/// date cannot pop a browser, then wires up the real scraper and session.
async fn run(config: &Config, date: &str) -> Result<String> {
    if date.trim().is_empty() {
        return Err(Error::EmptyDate);
    }

    let spotify = spotify_auth::get_spotify_client(config).await?;
    let scraper = ChartScraper::new()?;
    create_chart_playlist(&scraper, &spotify, date).await
}

#[derive(Clone)]
enum Dialog {
    InputRequired(String),
    Success(String),
    Failure(String),
}

pub struct BillboardApp {
    config: Config,
    runtime: Runtime,
    date_input: String,
    /// Date queued by a click; executed one frame later so the busy frame
    /// gets painted first.
    queued_date: Option<String>,
    dialog: Option<Dialog>,
    focus_claimed: bool,
}

impl BillboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, runtime: Runtime) -> Self {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = SPOTIFY_DARK;
        visuals.extreme_bg_color = FIELD_DARK;
        visuals.hyperlink_color = SPOTIFY_GREEN;
        cc.egui_ctx.set_visuals(visuals);

        Self {
            config,
            runtime,
            date_input: String::new(),
            queued_date: None,
            dialog: None,
            focus_claimed: false,
        }
    }

    fn draw_form(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(28.0);
                ui.label(RichText::new("Enter a date (YYYY-MM-DD)").strong().size(15.0));
                ui.add_space(8.0);

                let field = ui.add(
                    TextEdit::singleline(&mut self.date_input)
                        .hint_text("2024-01-06")
                        .desired_width(240.0),
                );
                if !self.focus_claimed {
                    field.request_focus();
                    self.focus_claimed = true;
                }

                ui.add_space(18.0);
                let button = Button::new(
                    RichText::new("Create Playlist").strong().color(SPOTIFY_DARK),
                )
                .fill(SPOTIFY_GREEN)
                .min_size(Vec2::new(140.0, 30.0));

                if ui.add(button).clicked()
                    && self.queued_date.is_none()
                    && self.dialog.is_none()
                {
                    self.queued_date = Some(self.date_input.clone());
                }

                if self.queued_date.is_some() {
                    ui.add_space(10.0);
                    ui.spinner();
                }
            });

            ui.with_layout(Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(6.0);
                ui.label(
                    RichText::new("© Billboard to Spotify • OAuth required")
                        .size(10.0)
                        .weak(),
                );
            });
        });
    }

    fn draw_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.dialog.clone() else {
            return;
        };

        let (title, message, link) = match dialog {
            Dialog::InputRequired(message) => ("Input Required", message, None),
            Dialog::Success(link) => ("Success", "Playlist created!".to_string(), Some(link)),
            Dialog::Failure(message) => ("Error", message, None),
        };

        let mut close = false;
        Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(message);
                if let Some(link) = &link {
                    ui.hyperlink(link);
                }
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        close = true;
                    }
                });
            });
        if close {
            self.dialog = None;
        }
    }
}

impl eframe::App for BillboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Taken before drawing: the click that set it happened last frame,
        // so the spinner is already on screen while this blocks. Taking it
        // up front also guarantees the indicator clears on every outcome.
        if let Some(date) = self.queued_date.take() {
            log::info!("[App] Creating playlist for '{date}'");
            let outcome = self.runtime.block_on(run(&self.config, &date));
            self.dialog = Some(match outcome {
                Ok(link) => Dialog::Success(link),
                Err(err @ Error::EmptyDate) => Dialog::InputRequired(err.to_string()),
                Err(err) => Dialog::Failure(err.to_string()),
            });
        }

        self.draw_form(ctx);
        self.draw_dialog(ctx);

        if self.queued_date.is_some() {
            ctx.output_mut(|output| output.cursor_icon = CursorIcon::Wait);
            ctx.request_repaint();
        }
    }
}
