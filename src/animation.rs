//! Time-based animation helpers
//!
//! All helpers take times in milliseconds (the game clock handed to every
//! state) so they stay deterministic under test.

/// Quadratic ease-out: fast start, gentle landing. `t` is clamped to 0..=1.
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Linear progress of `elapsed` through `duration`, clamped to 0..=1
pub fn progress(elapsed: u64, duration: u64) -> f32 {
    if duration == 0 {
        return 1.0;
    }
    (elapsed as f32 / duration as f32).min(1.0)
}

/// True during the "on" half of a blink cycle of `period` ms on, `period` ms off
pub fn blink_visible(now: u64, period: u64) -> bool {
    period == 0 || (now / period) % 2 == 0
}

/// A one-dimensional slide from `from` to `to`, eased out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slide {
    pub from: i32,
    pub to: i32,
    pub start_time: u64,
    pub duration: u64,
}

impl Slide {
    pub fn new(from: i32, to: i32, start_time: u64, duration: u64) -> Self {
        Slide {
            from,
            to,
            start_time,
            duration,
        }
    }

    /// Position at `now`; before the start it sits at `from`, after the end at `to`
    pub fn position(&self, now: u64) -> i32 {
        let elapsed = now.saturating_sub(self.start_time);
        let eased = ease_out_quad(progress(elapsed, self.duration));
        self.from + ((self.to - self.from) as f32 * eased).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_quad_endpoints() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert_eq!(ease_out_quad(0.5), 0.75);
        assert_eq!(ease_out_quad(-3.0), 0.0);
        assert_eq!(ease_out_quad(7.0), 1.0);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert_eq!(progress(0, 0), 1.0);
        assert_eq!(progress(1200, 2400), 0.5);
        assert_eq!(progress(5000, 2400), 1.0);
    }

    #[test]
    fn test_blink_cycle() {
        assert!(blink_visible(0, 400));
        assert!(blink_visible(399, 400));
        assert!(!blink_visible(400, 400));
        assert!(!blink_visible(799, 400));
        assert!(blink_visible(800, 400));
    }

    #[test]
    fn test_slide_positions() {
        let slide = Slide::new(-500, 50, 1000, 400);
        assert_eq!(slide.position(900), -500);
        assert_eq!(slide.position(1000), -500);
        // Halfway in time is three quarters of the way in space
        assert_eq!(slide.position(1200), -500 + 413);
        assert_eq!(slide.position(1400), 50);
        assert_eq!(slide.position(9000), 50);
    }
}
