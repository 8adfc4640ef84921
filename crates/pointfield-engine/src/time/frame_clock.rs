use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the first tick; exactly 0 on frame 0. This is the
    /// animation time that particle birth stamps are measured against.
    pub elapsed: f32,

    /// Frame counter; the first tick reports 0.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// One clock per window. The time origin is the first tick rather than
/// construction, so window and device setup never count as animation time.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    origin: Option<Instant>,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let origin = *self.origin.get_or_insert(now);

        let ft = FrameTime {
            elapsed: now.saturating_duration_since(origin).as_secs_f32(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointfield_sim::StreamRecord;
    use pointfield_sim::motion::point_size_at;
    use std::time::Duration;

    #[test]
    fn first_tick_is_frame_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }

    #[test]
    fn elapsed_never_decreases() {
        let mut clock = FrameClock::new();
        let mut prev = clock.tick().elapsed;
        for _ in 0..50 {
            let ft = clock.tick();
            assert!(ft.elapsed >= prev);
            prev = ft.elapsed;
        }
    }

    #[test]
    fn setup_time_before_first_frame_is_not_counted() {
        let mut clock = FrameClock::new();
        // Stands in for window creation and device acquisition.
        std::thread::sleep(Duration::from_millis(50));

        let first = clock.tick();
        assert_eq!(first.frame_index, 0);
        assert_eq!(first.elapsed, 0.0);

        // A fast particle spawned at time zero is still on screen at frame 0.
        let record = StreamRecord {
            start: [0.0, 0.0],
            target: [1.0, 0.0],
            velocity: [0.03, 0.0],
            birth: 0.0,
            ..Default::default()
        };
        assert_eq!(point_size_at(&record, first.elapsed, 10.0), 10.0);

        std::thread::sleep(Duration::from_millis(20));
        let second = clock.tick();
        assert!(second.elapsed >= 0.02 && second.elapsed < 0.05, "{}", second.elapsed);
    }
}
