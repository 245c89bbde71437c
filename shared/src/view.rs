//! Presentation snapshot
//!
//! [`render`] turns session state into plain values a front end can draw
//! directly. The focused entry (pending winner while spinning, else the last
//! winner) is placed in the pointer slot so a whole-turn spin stops on it.

use std::time::Instant;

use crate::audio::AudioRef;
use crate::geometry::{slice_geometry, SliceAngleRange};
use crate::palette::{contrast_text_color, Rgb};
use crate::session::{SpinPhase, WheelSession};
use crate::theme::Theme;
use crate::wheel::{EntryId, WheelState};

/// One wheel slice ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct SliceView {
    /// `None` for the placeholder slice of an empty wheel
    pub entry_id: Option<EntryId>,
    pub label: String,
    pub range: SliceAngleRange,
    pub fill: Rgb,
    pub text: Rgb,
    pub highlighted: bool,
}

/// One colored chip in the entry list
#[derive(Debug, Clone, PartialEq)]
pub struct ChipView {
    pub entry_id: EntryId,
    pub title: String,
    pub fill: Rgb,
    pub text: Rgb,
}

/// The winner card shown once a spin has settled
#[derive(Debug, Clone, PartialEq)]
pub struct WinnerView {
    pub entry_id: EntryId,
    pub title: String,
    pub audio: Option<AudioRef>,
    pub link_url: Option<String>,
}

/// Everything a frame needs
#[derive(Debug, Clone, PartialEq)]
pub struct WheelView {
    pub slices: Vec<SliceView>,
    pub chips: Vec<ChipView>,
    /// Clockwise rotation to apply to the whole wheel this frame
    pub rotation_degrees: f64,
    pub winner: Option<WinnerView>,
    pub spinnable: bool,
    pub spinning: bool,
}

/// Entry index drawn in each slot, starting from the pointer slot
///
/// Rotates list order so `focus` lands in slot 0; with no focus the list
/// order is kept.
pub fn slot_order(total_count: usize, focus: Option<usize>) -> Vec<usize> {
    let offset = focus.filter(|&f| f < total_count).unwrap_or(0);
    (0..total_count).map(|slot| (slot + offset) % total_count).collect()
}

fn chips(state: &WheelState, theme: &Theme) -> Vec<ChipView> {
    let n = state.len();
    state
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let fill = theme.palette.color_for(i, n);
            ChipView {
                entry_id: entry.id,
                title: entry.title.clone(),
                fill,
                text: contrast_text_color(fill),
            }
        })
        .collect()
}

fn slices(state: &WheelState, theme: &Theme, focus: Option<EntryId>) -> Vec<SliceView> {
    let n = state.len();
    if n == 0 {
        let fill = theme.palette.color_for(0, 1);
        return slice_geometry(1)
            .into_iter()
            .map(|range| SliceView {
                entry_id: None,
                label: String::new(),
                range,
                fill,
                text: contrast_text_color(fill),
                highlighted: false,
            })
            .collect();
    }

    let focus_index = focus.and_then(|id| state.index_of(id));
    let order = slot_order(n, focus_index);

    slice_geometry(n)
        .into_iter()
        .zip(order)
        .map(|(range, index)| {
            let entry = &state.entries()[index];
            let highlighted = Some(index) == focus_index;
            let fill = if highlighted {
                theme.highlight
            } else {
                theme.palette.color_for(index, n)
            };
            SliceView {
                entry_id: Some(entry.id),
                label: entry.title.clone(),
                range,
                fill,
                text: contrast_text_color(fill),
                highlighted,
            }
        })
        .collect()
}

/// Build the frame snapshot for `state` in `phase` at `now`
pub fn render(state: &WheelState, theme: &Theme, phase: &SpinPhase, now: Instant) -> WheelView {
    let spinning = phase.is_spinning();
    let focus = phase.pending_winner().or_else(|| state.last_winner_id());

    let winner = if spinning {
        None
    } else {
        state.last_winner().map(|entry| WinnerView {
            entry_id: entry.id,
            title: entry.title.clone(),
            audio: entry.audio.clone(),
            link_url: entry.link_url.clone(),
        })
    };

    WheelView {
        slices: slices(state, theme, focus),
        chips: chips(state, theme),
        rotation_degrees: phase.rotation_at(now),
        winner,
        spinnable: !spinning && state.is_spinnable(),
        spinning,
    }
}

/// Snapshot of a whole session
pub fn render_session(session: &WheelSession, theme: &Theme, now: Instant) -> WheelView {
    render(session.state(), theme, session.phase(), now)
}
