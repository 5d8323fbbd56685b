use foundation::time::Time;

/// Frame metadata handed to per-frame updates.
///
/// Elapsed time is always explicit so updates can be recorded and replayed
/// without touching a wall clock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Time elapsed since the previous frame (seconds).
    pub dt_s: f64,
    /// Accumulated time at this frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn first() -> Self {
        Self {
            index: 0,
            dt_s: 0.0,
            time: Time::ZERO,
        }
    }

    /// Fixed-timestep frame, handy for tests and replays.
    pub fn fixed(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn next(self, dt_s: f64) -> Self {
        Self {
            index: self.index + 1,
            dt_s,
            time: self.time.advanced_by(dt_s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;
    use foundation::time::Time;

    #[test]
    fn fixed_frame_time_is_deterministic() {
        let a = Frame::fixed(10, 1.0 / 60.0);
        let b = Frame::fixed(10, 1.0 / 60.0);
        assert_eq!(a, b);
        assert_eq!(a.time, Time(10.0 / 60.0));
    }

    #[test]
    fn next_advances_index_and_time() {
        let f0 = Frame::fixed(0, 0.5);
        let f1 = f0.next(0.25);
        assert_eq!(f1.index, 1);
        assert_eq!(f1.dt_s, 0.25);
        assert_eq!(f1.time, Time(0.25));
    }
}
