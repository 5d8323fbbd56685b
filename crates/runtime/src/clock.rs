use crate::frame::Frame;

/// Turns host frame timestamps (e.g. `requestAnimationFrame` milliseconds)
/// into [`Frame`]s with explicit elapsed time.
///
/// The first tick after construction or [`FrameClock::reset`] has `dt_s == 0`.
/// Timestamps that go backwards yield `dt_s == 0` rather than negative time.
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    frame: Option<Frame>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now_ms: f64) -> Frame {
        let dt_s = match self.last_ms {
            Some(last) if now_ms > last => (now_ms - last) / 1000.0,
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);

        let frame = match self.frame {
            Some(prev) => prev.next(dt_s),
            None => Frame::first(),
        };
        self.frame = Some(frame);
        frame
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::FrameClock;

    #[test]
    fn first_tick_has_no_elapsed_time() {
        let mut clock = FrameClock::new();
        let f = clock.tick(1234.0);
        assert_eq!(f.index, 0);
        assert_eq!(f.dt_s, 0.0);
    }

    #[test]
    fn ticks_report_elapsed_seconds() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0);
        let f = clock.tick(1016.0);
        assert_eq!(f.index, 1);
        assert!((f.dt_s - 0.016).abs() < 1e-12);
        let f = clock.tick(1050.0);
        assert_eq!(f.index, 2);
        assert!((f.dt_s - 0.034).abs() < 1e-12);
        assert!((f.time.seconds() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn backwards_timestamps_do_not_rewind() {
        let mut clock = FrameClock::new();
        clock.tick(500.0);
        let f = clock.tick(400.0);
        assert_eq!(f.dt_s, 0.0);
    }

    #[test]
    fn reset_starts_over() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.tick(16.0);
        clock.reset();
        let f = clock.tick(99.0);
        assert_eq!(f.index, 0);
        assert_eq!(f.dt_s, 0.0);
    }
}
