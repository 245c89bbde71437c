//! Slice geometry
//!
//! Angles are in degrees, screen convention: 0° points right and angles grow
//! counter-clockwise, so the pointer at the top of the wheel sits at 90°.
//! Slice 0 is always centered under the pointer and later slices follow
//! counter-clockwise, matching how a pie chart lays out from its start angle.

/// Angle of the fixed pointer
pub const POINTER_ANGLE_DEG: f64 = 90.0;

/// Angular span of one slice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceAngleRange {
    pub start_deg: f64,
    pub end_deg: f64,
}

impl SliceAngleRange {
    pub fn span(&self) -> f64 {
        self.end_deg - self.start_deg
    }

    /// Angle through the middle of the slice, where labels go
    pub fn mid(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }

    /// Whether `angle_deg` (any winding) falls inside the slice
    pub fn contains(&self, angle_deg: f64) -> bool {
        let offset = (angle_deg - self.start_deg).rem_euclid(360.0);
        offset < self.span()
    }
}

/// First slice start for `total_count` slices; the pointer itself for none
fn start_angle(total_count: usize) -> f64 {
    if total_count == 0 {
        return POINTER_ANGLE_DEG;
    }
    POINTER_ANGLE_DEG - 360.0 / (2.0 * total_count as f64)
}

/// Divide the circle into `total_count` equal contiguous slices
///
/// Returns an empty vector for zero slices. The last slice ends exactly one
/// full turn after the first one starts.
pub fn slice_geometry(total_count: usize) -> Vec<SliceAngleRange> {
    if total_count == 0 {
        return Vec::new();
    }

    let span = 360.0 / total_count as f64;
    let start = start_angle(total_count);

    (0..total_count)
        .map(|i| {
            let start_deg = start + i as f64 * span;
            let end_deg = if i + 1 == total_count {
                start + 360.0
            } else {
                start + (i + 1) as f64 * span
            };
            SliceAngleRange { start_deg, end_deg }
        })
        .collect()
}

/// Index of the slice under the pointer after rotating the wheel clockwise
/// by `rotation_deg`
pub fn slice_under_pointer(total_count: usize, rotation_deg: f64) -> Option<usize> {
    // Clockwise wheel rotation moves the pointer counter-clockwise relative to the slices
    let local = POINTER_ANGLE_DEG + rotation_deg;
    slice_geometry(total_count)
        .iter()
        .position(|range| range.contains(local))
}

/// Point on a circle of `radius` around `(cx, cy)` at `angle_deg`
pub fn polar(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    let theta = angle_deg.to_radians();
    (cx + radius * theta.cos(), cy + radius * theta.sin())
}

/// Outline of a ring wedge for a slice, as a closed point list
///
/// Walks the outer arc forward then the inner arc back. `segments` is the
/// number of arc steps on each edge (at least one).
pub fn wedge_outline(
    range: &SliceAngleRange,
    inner_radius: f64,
    outer_radius: f64,
    segments: usize,
) -> Vec<(f64, f64)> {
    let segments = segments.max(1);
    let step = range.span() / segments as f64;
    let mut points = Vec::with_capacity(2 * (segments + 1));

    for k in 0..=segments {
        points.push(polar(0.0, 0.0, outer_radius, range.start_deg + k as f64 * step));
    }
    for k in (0..=segments).rev() {
        points.push(polar(0.0, 0.0, inner_radius, range.start_deg + k as f64 * step));
    }
    points
}
