//! Short-lived notices shown over the wheel

use std::time::Instant;

/// Seconds an info notice stays up
const INFO_SECS: f32 = 2.5;
/// Seconds an error notice stays up
const ERROR_SECS: f32 = 5.0;
/// Slide-in and fade-out time
const TRANSITION_SECS: f32 = 0.25;
/// Most notices on screen at once; older ones are dropped first
pub const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub shown_at: Instant,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: now,
        }
    }

    fn lifetime(&self) -> f32 {
        match self.kind {
            NoticeKind::Info => INFO_SECS,
            NoticeKind::Error => ERROR_SECS,
        }
    }

    fn age(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.shown_at).as_secs_f32()
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.age(now) >= self.lifetime()
    }

    /// How far the notice has slid in, `0` offscreen to `1` in place
    pub fn slide(&self, now: Instant) -> f32 {
        let t = (self.age(now) / TRANSITION_SECS).clamp(0.0, 1.0);
        // Ease out so it settles softly
        1.0 - (1.0 - t) * (1.0 - t)
    }

    /// Opacity, fading over the last moments of its lifetime
    pub fn opacity(&self, now: Instant) -> f32 {
        let remaining = self.lifetime() - self.age(now);
        (remaining / TRANSITION_SECS).clamp(0.0, 1.0)
    }
}

/// Queue a notice, keeping at most [`MAX_VISIBLE`]
pub fn push(notices: &mut Vec<Notice>, notice: Notice) {
    notices.push(notice);
    if notices.len() > MAX_VISIBLE {
        let excess = notices.len() - MAX_VISIBLE;
        notices.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn test_errors_outlive_info() {
        let start = Instant::now();
        let info = Notice::new(NoticeKind::Info, "Added", start);
        let error = Notice::new(NoticeKind::Error, "Nope", start);

        let later = start + secs(3.0);
        assert!(info.is_expired(later));
        assert!(!error.is_expired(later));
        assert!(error.is_expired(start + secs(5.0)));
    }

    #[test]
    fn test_slide_and_fade() {
        let start = Instant::now();
        let notice = Notice::new(NoticeKind::Info, "Hi", start);

        assert_eq!(notice.slide(start), 0.0);
        assert_eq!(notice.slide(start + secs(1.0)), 1.0);
        assert_eq!(notice.opacity(start + secs(1.0)), 1.0);
        let fading = notice.opacity(start + secs(INFO_SECS - 0.1));
        assert!(fading > 0.0 && fading < 1.0);
        assert_eq!(notice.opacity(start + secs(INFO_SECS + 1.0)), 0.0);
    }

    #[test]
    fn test_push_drops_oldest() {
        let now = Instant::now();
        let mut notices = Vec::new();
        for i in 0..6 {
            push(&mut notices, Notice::new(NoticeKind::Info, format!("n{}", i), now));
        }
        assert_eq!(notices.len(), MAX_VISIBLE);
        assert_eq!(notices[0].message, "n2");
        assert_eq!(notices[MAX_VISIBLE - 1].message, "n5");
    }
}
