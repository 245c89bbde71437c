//! Drawing module for the Song Roulette
//!
//! Renders a `WheelView` snapshot: ring slices, labels, pointer, hub,
//! winner banner, confetti and notices.

use std::time::Instant;

use nannou::prelude::*;
use wheel_shared::geometry::{polar, wedge_outline};
use wheel_shared::{Rgb, Theme, WheelView, WinnerView};

use crate::confetti::Confetto;
use crate::notice::{Notice, NoticeKind};
use crate::stage::WheelGeometry;

/// Longest label drawn on a slice before it is shortened
const MAX_LABEL_CHARS: usize = 18;

/// Convert a core color to a nannou color
pub fn color(c: Rgb) -> Srgb<u8> {
    Srgb::new(c.r, c.g, c.b)
}

fn with_alpha(c: Rgb, alpha: f32) -> Srgba<u8> {
    srgba(c.r, c.g, c.b, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

/// Draw the wheel, rotated clockwise by the view's rotation
pub fn draw_wheel(draw: &Draw, geometry: &WheelGeometry, view: &WheelView, theme: &Theme) {
    // nannou rotates counter-clockwise for positive angles
    let wheel = draw
        .x_y(geometry.cx, geometry.cy)
        .rotate(-(view.rotation_degrees as f32).to_radians());

    let inner = geometry.inner_radius as f64;
    let outer = geometry.outer_radius as f64;

    for slice in &view.slices {
        let segments = geometry.arc_segments(slice.range.span());
        let outline: Vec<Point2> = wedge_outline(&slice.range, inner, outer, segments)
            .into_iter()
            .map(|(x, y)| pt2(x as f32, y as f32))
            .collect();

        wheel
            .polygon()
            .points(outline.iter().cloned())
            .color(color(slice.fill));

        if view.slices.len() > 1 {
            let mut border = outline.clone();
            border.push(outline[0]);
            wheel
                .polyline()
                .weight(2.0)
                .points(border)
                .color(color(theme.slice_border));
        }

        if !slice.label.is_empty() {
            let mid = slice.range.mid();
            let (lx, ly) = polar(0.0, 0.0, geometry.label_radius as f64, mid);
            wheel
                .text(&shorten(&slice.label))
                .x_y(lx as f32, ly as f32)
                .z_radians((mid as f32 - 90.0).to_radians())
                .color(color(slice.text))
                .font_size(geometry.label_font_size(slice.range.span()))
                .w(geometry.outer_radius - geometry.inner_radius);
        }
    }

    // Outer rim keeps the ring crisp while spinning
    draw.ellipse()
        .x_y(geometry.cx, geometry.cy)
        .radius(geometry.outer_radius)
        .no_fill()
        .stroke(color(theme.slice_border))
        .stroke_weight(2.0);

    draw.ellipse()
        .x_y(geometry.cx, geometry.cy)
        .radius(geometry.hub_radius)
        .color(color(theme.hub));
}

/// Draw the fixed pointer above the wheel
pub fn draw_pointer(draw: &Draw, geometry: &WheelGeometry, theme: &Theme) {
    draw.tri()
        .points(geometry.pointer[0], geometry.pointer[1], geometry.pointer[2])
        .color(color(theme.pointer));
}

/// Draw the hint in the hub when the wheel cannot spin
pub fn draw_hub_hint(draw: &Draw, geometry: &WheelGeometry, view: &WheelView, theme: &Theme) {
    if view.spinning {
        return;
    }
    let hint = if view.chips.len() < 2 {
        "Add at least\ntwo songs"
    } else {
        "Click or\nSpace to spin"
    };
    draw.text(hint)
        .x_y(geometry.cx, geometry.cy)
        .color(color(theme.foreground))
        .font_size(13)
        .w(geometry.hub_radius * 1.8);
}

/// Draw the winner banner below the wheel
pub fn draw_winner_banner(
    draw: &Draw,
    geometry: &WheelGeometry,
    winner: &WinnerView,
    theme: &Theme,
    now_playing: bool,
) {
    let width = (geometry.outer_radius * 2.0).max(260.0);
    let height = 56.0;

    draw.rect()
        .x_y(geometry.cx, geometry.banner_y)
        .w_h(width, height)
        .color(with_alpha(theme.highlight, 0.92));

    let title = format!("🏆 {}", winner.title);
    draw.text(&title)
        .x_y(geometry.cx, geometry.banner_y + 8.0)
        .color(color(wheel_shared::contrast_text_color(theme.highlight)))
        .font_size(22)
        .w(width - 20.0);

    let subtitle = if now_playing {
        "♪ playing"
    } else if winner.link_url.is_some() {
        "link available in the panel"
    } else {
        "winning song"
    };
    draw.text(subtitle)
        .x_y(geometry.cx, geometry.banner_y - 16.0)
        .color(color(wheel_shared::contrast_text_color(theme.highlight)))
        .font_size(11)
        .w(width - 20.0);
}

/// Draw confetti pieces
pub fn draw_confetti(draw: &Draw, confetti: &[Confetto]) {
    for c in confetti {
        draw.rect()
            .xy(c.pos)
            .w_h(c.size, c.size * 0.6)
            .z_radians(c.angle)
            .color(with_alpha(c.color, c.fade()));
    }
}

/// Draw notices stacked down from the top right corner, sliding in from the edge
pub fn draw_notices(
    draw: &Draw,
    window_rect: Rect,
    theme: &Theme,
    notices: &[Notice],
    now: Instant,
) {
    let width = 300.0;
    let height = 34.0;
    let gap = 8.0;
    let margin = 16.0;
    let stripe = 5.0;

    let rest_x = window_rect.right() - margin - width / 2.0;
    let hidden_x = window_rect.right() + width / 2.0;
    let top = window_rect.top() - 60.0;

    // Newest on top
    for (slot, notice) in notices.iter().rev().enumerate() {
        let opacity = notice.opacity(now);
        if opacity <= 0.0 {
            continue;
        }
        let x = hidden_x + (rest_x - hidden_x) * notice.slide(now);
        let y = top - slot as f32 * (height + gap);

        let accent = match notice.kind {
            NoticeKind::Info => theme.accent,
            NoticeKind::Error => theme.pointer,
        };

        draw.rect()
            .x_y(x, y)
            .w_h(width, height)
            .color(with_alpha(theme.hub, 0.9 * opacity));
        draw.rect()
            .x_y(x - width / 2.0 + stripe / 2.0, y)
            .w_h(stripe, height)
            .color(with_alpha(accent, opacity));
        draw.text(&notice.message)
            .x_y(x + stripe / 2.0, y)
            .color(with_alpha(wheel_shared::contrast_text_color(theme.hub), opacity))
            .font_size(12)
            .left_justify()
            .w(width - stripe - 20.0);
    }
}

/// Shorten long titles so they fit inside a slice
fn shorten(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        label.to_string()
    } else {
        let head: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
        format!("{}…", head.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("Short"), "Short");
        let long = "A very long song title that never ends";
        let short = shorten(long);
        assert!(short.ends_with('…'));
        assert!(short.chars().count() <= MAX_LABEL_CHARS);
    }
}
