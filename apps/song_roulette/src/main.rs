//! Song Roulette
//!
//! A spinning wheel of songs: manage a short list, spin, and let the wheel
//! pick one. The winner's audio can play automatically once the wheel stops.

mod confetti;
mod drawing;
mod notice;
mod playback;
mod stage;
mod ui;

use std::fs;
use std::path::Path;
use std::time::Instant;

use nannou::prelude::*;
use nannou_egui::{self, Egui};
use serde::{Deserialize, Serialize};
use wheel_shared::{
    render_session, AudioClip, AudioRef, Theme, WheelSession, WheelView, DEFAULT_DURATION_SECS,
    SUPPORTED_EXTENSIONS,
};

use crate::confetti::Confetto;
use crate::notice::{Notice, NoticeKind};
use crate::playback::Player;
use crate::stage::WheelGeometry;
use crate::ui::{PanelSettings, PanelState, PickedFile};

const APP_NAME: &str = "song_roulette";
const SIDE_PANEL_WIDTH: f32 = 340.0;
const CONFETTI_COUNT: usize = 140;

fn main() {
    env_logger::init();
    nannou::app(model).update(update).run();
}

/// Persisted preferences; the song list itself is never saved
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct Config {
    theme: String,
    spin_duration_secs: f64,
    autoplay: bool,
    reduced_motion: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: wheel_shared::theme::DEFAULT_THEME.to_string(),
            spin_duration_secs: DEFAULT_DURATION_SECS,
            autoplay: true,
            reduced_motion: false,
        }
    }
}

/// Application state
pub struct Model {
    /// Entries, spin planner and spin lifecycle
    pub session: WheelSession,
    pub theme: Theme,

    /// Panel-edited settings
    pub spin_duration_secs: f64,
    pub autoplay: bool,
    pub reduced_motion: bool,

    /// Side panel forms and page
    pub panel: PanelState,

    pub confetti: Vec<Confetto>,
    pub last_frame: Option<Instant>,
    pub player: Player,
    pub notices: Vec<Notice>,

    /// egui integration
    egui: Egui,
}

impl Model {
    pub fn notify(&mut self, message: impl Into<String>) {
        notice::push(
            &mut self.notices,
            Notice::new(NoticeKind::Info, message, Instant::now()),
        );
    }

    pub fn report(&mut self, message: impl Into<String>) {
        notice::push(
            &mut self.notices,
            Notice::new(NoticeKind::Error, message, Instant::now()),
        );
    }

    pub fn view_at(&self, now: Instant) -> WheelView {
        render_session(&self.session, &self.theme, now)
    }

    /// Start a spin if the wheel allows it
    pub fn try_spin(&mut self) {
        if !self.session.is_spinnable() {
            return;
        }
        self.player.stop();
        self.confetti.clear();
        if let Err(e) = self.session.start_spin(Instant::now()) {
            log::warn!("Spin rejected: {}", e);
            self.report(e.to_string());
        }
    }

    /// React to the wheel coming to rest
    fn on_settled(&mut self, window_rect: Rect, winner: wheel_shared::Entry) {
        if !self.reduced_motion {
            let geometry = WheelGeometry::calculate(window_rect, SIDE_PANEL_WIDTH);
            self.confetti = confetti::burst(
                geometry.pointer[0],
                &self.theme.palette.colors,
                CONFETTI_COUNT,
            );
        }

        if self.autoplay {
            if let Some(audio) = &winner.audio {
                self.play_audio(audio);
            }
        }
    }

    fn play_audio(&mut self, audio: &AudioRef) {
        match self.player.play(audio) {
            Ok(true) => {}
            Ok(false) => log::debug!("Winner audio is a link, not playing inline"),
            Err(e) => {
                log::warn!("{}", e);
                self.report(e.to_string());
            }
        }
    }

    /// Add a song from the add form
    fn add_song(&mut self, request: ui::AddSongRequest) {
        let audio = request.file.map(|file| {
            AudioRef::Clip(AudioClip::from_upload(&file.name, file.bytes, None))
        });
        let link = Some(request.link.as_str());

        match self.session.state_mut().add_entry(&request.title, audio, link) {
            Ok(entry) => {
                log::info!("Added {:?}", entry.title);
                self.notify(format!("Added \"{}\"", entry.title));
                self.panel.clear_add_form();
            }
            Err(e) => self.report(e.to_string()),
        }
    }

    fn rename_song(&mut self, from: &str, to: &str) {
        match self.session.state_mut().rename_entry(from, to) {
            Ok(()) => {
                self.panel.rename_from = Some(to.trim().to_string());
                self.panel.rename_to.clear();
            }
            Err(e) => self.report(e.to_string()),
        }
    }

    fn remove_songs(&mut self, titles: &[String]) {
        let removed = self.session.state_mut().remove_entries(titles);
        log::info!("Removed {} songs", removed);
        self.notify(match removed {
            1 => "Removed 1 song".to_string(),
            n => format!("Removed {} songs", n),
        });
        self.panel.remove_selection.clear();
    }

    /// Forget saved preferences and go back to the defaults
    fn reset_settings(&mut self) {
        if let Err(e) = wheel_shared::delete_config(APP_NAME) {
            log::warn!("Could not delete config: {}", e);
            self.report(e.to_string());
            return;
        }
        self.apply_config(Config::default());
        self.notify("Settings reset");
    }

    fn apply_config(&mut self, config: Config) {
        self.theme = Theme::preset_or_default(&config.theme);
        self.session.set_spin_duration_secs(config.spin_duration_secs);
        self.spin_duration_secs = self.session.spin_duration_secs();
        self.autoplay = config.autoplay;
        self.reduced_motion = config.reduced_motion;
    }

    /// Open the native file dialog for the add form
    fn pick_audio_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Audio", &SUPPORTED_EXTENSIONS)
            .set_title("Choose an audio file")
            .pick_file()
        else {
            return;
        };

        match read_picked_file(&path) {
            Ok(file) => self.panel.picked_file = Some(file),
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                self.report(format!("Could not read {}", path.display()));
            }
        }
    }
}

fn read_picked_file(path: &Path) -> std::io::Result<PickedFile> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(PickedFile { name, bytes })
}

fn save_config(model: &Model) {
    let config = Config {
        theme: model.theme.name.clone(),
        spin_duration_secs: model.spin_duration_secs,
        autoplay: model.autoplay,
        reduced_motion: model.reduced_motion,
    };
    if let Err(e) = wheel_shared::save_config(APP_NAME, &config) {
        log::error!("Failed to save config: {}", e);
    }
}

fn load_config() -> Config {
    match wheel_shared::load_config(APP_NAME) {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            log::warn!("Ignoring unreadable config: {}", e);
            Config::default()
        }
    }
}

fn model(app: &App) -> Model {
    app.set_exit_on_escape(false);

    let window_id = app
        .new_window()
        .title("Song Roulette")
        .size(1100, 800)
        .min_size(760, 560)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let mut model = Model {
        session: WheelSession::default(),
        theme: Theme::default(),
        spin_duration_secs: DEFAULT_DURATION_SECS,
        autoplay: true,
        reduced_motion: false,
        panel: PanelState::default(),
        confetti: Vec::new(),
        last_frame: None,
        player: Player::default(),
        notices: Vec::new(),
        egui,
    };
    model.apply_config(load_config());
    model
}

fn update(app: &App, model: &mut Model, update: Update) {
    let now = Instant::now();
    let dt = model
        .last_frame
        .map(|last| now.duration_since(last).as_secs_f32())
        .unwrap_or(0.0);
    model.last_frame = Some(now);

    // Settle the spin once its duration has elapsed
    if let Some(winner) = model.session.tick(now) {
        model.on_settled(app.window_rect(), winner);
    }

    confetti::step(&mut model.confetti, dt);
    model.notices.retain(|n| !n.is_expired(now));

    let titles = model.session.state().titles();
    model.panel.retain_titles(&titles);

    let snapshot = model.view_at(now);
    let audio_playing = model.player.is_playing();

    // Begin egui frame
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let result = ui::draw_side_panel(
        &ctx,
        &mut model.panel,
        &snapshot,
        &model.theme,
        PanelSettings {
            spin_duration_secs: &mut model.spin_duration_secs,
            autoplay: &mut model.autoplay,
            reduced_motion: &mut model.reduced_motion,
        },
        audio_playing,
        SIDE_PANEL_WIDTH,
    );

    drop(ctx);

    // Apply UI results
    if result.settings_changed {
        model.session.set_spin_duration_secs(model.spin_duration_secs);
        save_config(model);
    }
    if let Some(name) = result.set_theme {
        model.theme = Theme::preset_or_default(&name);
        save_config(model);
    }
    if result.reset_settings {
        model.reset_settings();
    }
    if result.pick_file {
        model.pick_audio_file();
    }
    if let Some(request) = result.add_song {
        model.add_song(request);
    }
    if let Some((from, to)) = result.rename {
        model.rename_song(&from, &to);
    }
    if !result.remove.is_empty() {
        model.remove_songs(&result.remove);
    }
    if result.stop_audio {
        model.player.stop();
    }
    if result.play_winner {
        if let Some(audio) = snapshot.winner.as_ref().and_then(|w| w.audio.clone()) {
            model.play_audio(&audio);
        }
    }
    if result.spin {
        model.try_spin();
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();
    let now = Instant::now();

    let geometry = WheelGeometry::calculate(window_rect, SIDE_PANEL_WIDTH);
    let snapshot = model.view_at(now);

    draw.background().color(drawing::color(model.theme.background));

    drawing::draw_wheel(&draw, &geometry, &snapshot, &model.theme);
    drawing::draw_pointer(&draw, &geometry, &model.theme);
    drawing::draw_hub_hint(&draw, &geometry, &snapshot, &model.theme);

    if let Some(winner) = &snapshot.winner {
        drawing::draw_winner_banner(
            &draw,
            &geometry,
            winner,
            &model.theme,
            model.player.now_playing().is_some(),
        );
    }

    drawing::draw_confetti(&draw, &model.confetti);

    draw.text("SONG ROULETTE")
        .x_y(geometry.cx, window_rect.top() - 30.0)
        .color(drawing::color(model.theme.foreground))
        .font_size(20)
        .w(400.0);

    drawing::draw_notices(&draw, window_rect, &model.theme, &model.notices, now);

    draw.to_frame(app, &frame).unwrap();

    // Render egui on top
    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    // Typing in a text field must not trigger shortcuts
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    match key {
        // Space - spin
        Key::Space => model.try_spin(),

        // Tab - switch side panel page
        Key::Tab => model.panel.page = model.panel.page.toggled(),

        // Escape - stop playback
        Key::Escape => model.player.stop(),

        _ => {}
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || model.egui.ctx().is_pointer_over_area() {
        return;
    }

    let pos = app.mouse.position();
    let geometry = WheelGeometry::calculate(app.window_rect(), SIDE_PANEL_WIDTH);
    if geometry.contains(pos.x, pos.y) {
        model.try_spin();
    }
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
