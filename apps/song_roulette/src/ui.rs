//! UI module for the Song Roulette
//!
//! Side panel with two pages: the wheel controls and song management.
//! The panel only collects requests; `main` applies them to the session.

use std::collections::BTreeSet;

use nannou_egui::egui;
use wheel_shared::{
    is_supported_file, AudioRef, ChipView, Rgb, Theme, WheelView, DURATION_STEP_SECS,
    MAX_DURATION_SECS, MIN_DURATION_SECS, SUPPORTED_EXTENSIONS,
};

/// Side panel page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Wheel,
    ManageSongs,
}

impl Page {
    pub fn toggled(self) -> Self {
        match self {
            Page::Wheel => Page::ManageSongs,
            Page::ManageSongs => Page::Wheel,
        }
    }
}

/// Audio file picked for the add form, not yet on the wheel
#[derive(Debug, Clone)]
pub struct PickedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Editable panel state that survives between frames
#[derive(Default)]
pub struct PanelState {
    pub page: Page,
    pub add_title: String,
    pub add_link: String,
    pub picked_file: Option<PickedFile>,
    pub rename_from: Option<String>,
    pub rename_to: String,
    pub remove_selection: BTreeSet<String>,
}

impl PanelState {
    /// Clear the add form after a successful submit
    pub fn clear_add_form(&mut self) {
        self.add_title.clear();
        self.add_link.clear();
        self.picked_file = None;
    }

    /// Drop selections that no longer match an entry
    pub fn retain_titles(&mut self, titles: &[String]) {
        self.remove_selection.retain(|t| titles.contains(t));
        if let Some(from) = &self.rename_from {
            if !titles.contains(from) {
                self.rename_from = None;
            }
        }
    }
}

/// Request to add a song, taken from the add form
#[derive(Debug, Clone)]
pub struct AddSongRequest {
    pub title: String,
    pub link: String,
    pub file: Option<PickedFile>,
}

/// Result of side panel interactions
#[derive(Default)]
pub struct PanelResult {
    pub spin: bool,
    pub pick_file: bool,
    pub add_song: Option<AddSongRequest>,
    pub rename: Option<(String, String)>,
    pub remove: Vec<String>,
    pub set_theme: Option<String>,
    pub reset_settings: bool,
    /// Duration, autoplay or reduced motion changed
    pub settings_changed: bool,
    pub play_winner: bool,
    pub stop_audio: bool,
}

/// Live values the panel edits in place
pub struct PanelSettings<'a> {
    pub spin_duration_secs: &'a mut f64,
    pub autoplay: &'a mut bool,
    pub reduced_motion: &'a mut bool,
}

fn color32(c: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

/// Draw the side panel (left)
pub fn draw_side_panel(
    ctx: &egui::Context,
    panel: &mut PanelState,
    view: &WheelView,
    theme: &Theme,
    settings: PanelSettings<'_>,
    audio_playing: bool,
    width: f32,
) -> PanelResult {
    let mut result = PanelResult::default();

    egui::SidePanel::left("roulette_panel")
        .resizable(false)
        .exact_width(width)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("🎛 Song Roulette");
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.selectable_value(&mut panel.page, Page::Wheel, "🎯 Wheel");
                ui.selectable_value(&mut panel.page, Page::ManageSongs, "🎵 Manage songs");
            });
            ui.label(
                egui::RichText::new("Tab switches pages")
                    .size(11.0)
                    .color(egui::Color32::from_rgb(140, 150, 170)),
            );
            ui.separator();

            let page = panel.page;
            egui::ScrollArea::vertical().show(ui, |ui| match page {
                Page::Wheel => {
                    draw_wheel_page(ui, view, theme, settings, audio_playing, &mut result)
                }
                Page::ManageSongs => draw_manage_page(ui, panel, view, &mut result),
            });
        });

    result
}

fn draw_wheel_page(
    ui: &mut egui::Ui,
    view: &WheelView,
    theme: &Theme,
    settings: PanelSettings<'_>,
    audio_playing: bool,
    result: &mut PanelResult,
) {
    let spin_button = egui::Button::new(
        egui::RichText::new("SPIN THE WHEEL 🚀")
            .strong()
            .color(color32(wheel_shared::contrast_text_color(theme.accent))),
    )
    .fill(color32(theme.accent))
    .min_size(egui::vec2(ui.available_width(), 40.0));

    let hover = if view.spinning {
        "Spinning…"
    } else if !view.spinnable {
        "Add at least two songs first"
    } else {
        "Keyboard: Space"
    };
    let response = ui
        .add_enabled(view.spinnable, spin_button)
        .on_hover_text(hover)
        .on_disabled_hover_text(hover);
    if response.clicked() {
        result.spin = true;
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label("Duration:");
        let slider = egui::Slider::new(
            settings.spin_duration_secs,
            MIN_DURATION_SECS..=MAX_DURATION_SECS,
        )
        .step_by(DURATION_STEP_SECS)
        .suffix(" s");
        if ui.add_enabled(!view.spinning, slider).changed() {
            result.settings_changed = true;
        }
    });

    if ui
        .checkbox(settings.autoplay, "Autoplay the winner")
        .on_hover_text("Play the winning song's audio when the wheel stops")
        .changed()
    {
        result.settings_changed = true;
    }
    if ui
        .checkbox(settings.reduced_motion, "Reduced motion")
        .on_hover_text("Skip the confetti")
        .changed()
    {
        result.settings_changed = true;
    }

    ui.horizontal(|ui| {
        ui.label("Theme:");
        egui::ComboBox::from_id_source("theme_picker")
            .selected_text(theme.display_name())
            .show_ui(ui, |ui| {
                for preset in Theme::presets() {
                    let selected = preset.name == theme.name;
                    if ui.selectable_label(selected, preset.display_name()).clicked() && !selected {
                        result.set_theme = Some(preset.name.clone());
                    }
                }
            });
    });

    if ui
        .add_enabled(!view.spinning, egui::Button::new("Reset settings"))
        .on_hover_text("Forget the saved theme, duration and playback choices")
        .clicked()
    {
        result.reset_settings = true;
    }

    ui.separator();

    match &view.winner {
        Some(winner) => {
            ui.heading("🏆 Winning song");
            ui.label(egui::RichText::new(&winner.title).size(18.0).strong());

            match &winner.audio {
                Some(AudioRef::Clip(clip)) => {
                    ui.label(format!("{} · {}", clip.file_name, clip.mime));
                    ui.horizontal(|ui| {
                        if ui.button("▶ Play").clicked() {
                            result.play_winner = true;
                        }
                        if ui.add_enabled(audio_playing, egui::Button::new("⏹ Stop")).clicked() {
                            result.stop_audio = true;
                        }
                    });
                }
                Some(AudioRef::Url(url)) => {
                    ui.hyperlink_to("🔊 Open audio", url);
                }
                None => {}
            }

            if let Some(link) = &winner.link_url {
                ui.hyperlink_to("Open song link", link);
            }
        }
        None if view.spinning => {
            ui.label("Spinning…");
        }
        None => {
            ui.label("No winner yet.");
        }
    }
}

fn draw_chips(ui: &mut egui::Ui, chips: &[ChipView]) {
    ui.horizontal_wrapped(|ui| {
        for chip in chips {
            egui::Frame::none()
                .fill(color32(chip.fill))
                .rounding(12.0)
                .inner_margin(egui::Margin::symmetric(10.0, 6.0))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(&chip.title).color(color32(chip.text)));
                });
        }
    });
}

fn draw_manage_page(
    ui: &mut egui::Ui,
    panel: &mut PanelState,
    view: &WheelView,
    result: &mut PanelResult,
) {
    let locked = view.spinning;

    ui.heading("Add a song");
    ui.add_enabled_ui(!locked, |ui| {
        ui.horizontal(|ui| {
            ui.label("Title:");
            ui.text_edit_singleline(&mut panel.add_title);
        });

        ui.horizontal(|ui| {
            let label = match &panel.picked_file {
                Some(file) => format!("📎 {}", file.name),
                None => "No audio file".to_string(),
            };
            ui.label(label);
            if ui
                .button("Choose…")
                .on_hover_text(format!("Supported: {}", SUPPORTED_EXTENSIONS.join(", ")))
                .clicked()
            {
                result.pick_file = true;
            }
            if panel.picked_file.is_some() && ui.small_button("✕").clicked() {
                panel.picked_file = None;
            }
        });
        if let Some(file) = &panel.picked_file {
            if !is_supported_file(&file.name) {
                ui.colored_label(
                    egui::Color32::from_rgb(255, 150, 80),
                    "Unrecognized extension, playback may fail",
                );
            }
        }

        ui.horizontal(|ui| {
            ui.label("Link:");
            ui.text_edit_singleline(&mut panel.add_link);
        });

        if ui.button("Add ➕").clicked() {
            result.add_song = Some(AddSongRequest {
                title: panel.add_title.clone(),
                link: panel.add_link.clone(),
                file: panel.picked_file.clone(),
            });
        }
    });

    ui.separator();

    if view.chips.is_empty() {
        ui.label("No songs yet. Add at least two.");
        return;
    }

    ui.heading(format!("On the wheel ({})", view.chips.len()));
    draw_chips(ui, &view.chips);

    ui.separator();
    ui.add_enabled_ui(!locked, |ui| {
        ui.heading("Rename");
        egui::ComboBox::from_id_source("rename_from")
            .selected_text(panel.rename_from.clone().unwrap_or_else(|| "Choose a song".to_string()))
            .show_ui(ui, |ui| {
                for chip in &view.chips {
                    ui.selectable_value(
                        &mut panel.rename_from,
                        Some(chip.title.clone()),
                        chip.title.as_str(),
                    );
                }
            });
        ui.horizontal(|ui| {
            ui.label("New title:");
            ui.text_edit_singleline(&mut panel.rename_to);
        });
        if ui.button("Rename").clicked() {
            if let Some(from) = &panel.rename_from {
                result.rename = Some((from.clone(), panel.rename_to.clone()));
            }
        }

        ui.separator();
        ui.heading("Remove");
        for chip in &view.chips {
            let mut checked = panel.remove_selection.contains(&chip.title);
            if ui.checkbox(&mut checked, chip.title.as_str()).changed() {
                if checked {
                    panel.remove_selection.insert(chip.title.clone());
                } else {
                    panel.remove_selection.remove(&chip.title);
                }
            }
        }
        let has_selection = !panel.remove_selection.is_empty();
        if ui
            .add_enabled(has_selection, egui::Button::new("Remove selected"))
            .clicked()
        {
            result.remove = panel.remove_selection.iter().cloned().collect();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_toggle() {
        assert_eq!(Page::Wheel.toggled(), Page::ManageSongs);
        assert_eq!(Page::ManageSongs.toggled(), Page::Wheel);
    }

    #[test]
    fn test_retain_titles() {
        let mut panel = PanelState::default();
        panel.remove_selection.insert("A".into());
        panel.remove_selection.insert("B".into());
        panel.rename_from = Some("B".into());

        panel.retain_titles(&["A".to_string()]);
        assert_eq!(panel.remove_selection.len(), 1);
        assert!(panel.rename_from.is_none());
    }
}
