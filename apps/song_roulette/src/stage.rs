//! Stage geometry for the wheel
//!
//! Places the wheel in the window area left free by the side panel and
//! provides hit testing so a click on the wheel can start a spin.

use nannou::prelude::*;

/// Ring thickness as a fraction of the outer radius
const RING_FRACTION: f32 = 0.5;

/// Wheel placement for the current window size
#[derive(Debug, Clone)]
pub struct WheelGeometry {
    /// Center X position
    pub cx: f32,
    /// Center Y position
    pub cy: f32,
    pub outer_radius: f32,
    /// Radius of the hole in the ring
    pub inner_radius: f32,
    pub hub_radius: f32,
    /// Radius where slice labels are centered
    pub label_radius: f32,
    /// Pointer triangle: tip first, then the two base corners
    pub pointer: [Point2; 3],
    /// Vertical position of the winner banner
    pub banner_y: f32,
}

impl WheelGeometry {
    /// Calculate geometry from window dimensions
    ///
    /// The wheel fills the area right of a side panel of `panel_width`,
    /// keeping room above it for the title and below it for the banner.
    pub fn calculate(window_rect: Rect, panel_width: f32) -> Self {
        let available_width = (window_rect.w() - panel_width).max(200.0);
        let available_height = window_rect.h() - 200.0; // title + banner

        let stage_size = available_width.min(available_height).max(160.0);
        let outer_radius = 0.45 * stage_size;
        let inner_radius = outer_radius * (1.0 - RING_FRACTION);

        let cx = window_rect.left() + panel_width + available_width / 2.0;
        let cy = window_rect.y() + 20.0;

        // Pointer sits just above the wheel and points down into the ring
        let pointer_height = 0.08 * stage_size;
        let pointer_half_width = 0.045 * stage_size;
        let tip = pt2(cx, cy + outer_radius - pointer_height * 0.35);
        let base_y = tip.y + pointer_height;
        let pointer = [
            tip,
            pt2(cx - pointer_half_width, base_y),
            pt2(cx + pointer_half_width, base_y),
        ];

        Self {
            cx,
            cy,
            outer_radius,
            inner_radius,
            hub_radius: 0.4 * outer_radius,
            label_radius: (outer_radius + inner_radius) / 2.0,
            pointer,
            banner_y: cy - outer_radius - 50.0,
        }
    }

    /// Hit test for the wheel disc
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        dx * dx + dy * dy <= self.outer_radius * self.outer_radius
    }

    /// Label font size that still fits a slice of `span_deg`
    pub fn label_font_size(&self, span_deg: f64) -> u32 {
        let arc = self.label_radius * (span_deg as f32).to_radians();
        (arc * 0.35).clamp(9.0, 18.0) as u32
    }

    /// Arc segments per slice edge for smooth outlines
    pub fn arc_segments(&self, span_deg: f64) -> usize {
        ((span_deg / 4.0).ceil() as usize).clamp(2, 90)
    }
}
