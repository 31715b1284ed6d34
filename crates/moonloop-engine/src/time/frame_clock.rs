use super::FramePacing;

/// Frame timing snapshot for a rendered frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Milliseconds since the previous rendered frame.
    ///
    /// On the first frame this is the raw timestamp, i.e. time since the time
    /// source's epoch, not a meaningful inter-frame delta.
    pub delta_ms: f64,

    /// Milliseconds since the first rendered frame.
    pub elapsed_ms: f64,

    /// Timestamp taken at the tick.
    pub now_ms: f64,

    /// Monotonic counter of rendered frames.
    pub frame_index: u64,
}

impl FrameTime {
    /// Instantaneous frame rate, `1000 / delta`. `None` when the delta is not positive.
    pub fn frames_per_second(&self) -> Option<f64> {
        (self.delta_ms > 0.0).then(|| 1000.0 / self.delta_ms)
    }
}

/// Frame clock producing `FrameTime` snapshots and applying the pacing gate.
///
/// The gate compares against the last *rendered* timestamp. Skipped frames leave
/// the clock untouched, so a run of early frames cannot starve rendering.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_frame: Option<f64>,
    first_frame: Option<f64>,
    min_interval_ms: f64,
    frame_index: u64,
}

impl FrameClock {
    /// Creates a clock with no frame observed yet.
    pub fn new(pacing: FramePacing) -> Self {
        Self {
            last_frame: None,
            first_frame: None,
            min_interval_ms: pacing.min_interval_ms(),
            frame_index: 0,
        }
    }

    /// Timestamp of the last rendered frame, if any.
    pub fn last_frame(&self) -> Option<f64> {
        self.last_frame
    }

    pub fn min_interval_ms(&self) -> f64 {
        self.min_interval_ms
    }

    /// Forgets the last rendered frame; the next tick always passes the gate.
    ///
    /// Useful when resuming from suspension.
    pub fn reset(&mut self) {
        self.last_frame = None;
    }

    /// Earliest timestamp at which the next frame passes the gate.
    ///
    /// `None` before the first frame, when any timestamp passes.
    pub fn next_frame_due(&self) -> Option<f64> {
        self.last_frame.map(|last| last + self.min_interval_ms)
    }

    /// Advances the clock, or returns `None` when the frame is paced out.
    ///
    /// Frames whose delta is negative (timestamps out of order) and non-finite
    /// timestamps are also dropped.
    pub fn tick(&mut self, now_ms: f64) -> Option<FrameTime> {
        if !now_ms.is_finite() {
            return None;
        }

        let delta_ms = match self.last_frame {
            Some(last) => {
                let delta = now_ms - last;
                if delta < 0.0 || delta < self.min_interval_ms {
                    return None;
                }
                delta
            }
            None => now_ms.max(0.0),
        };

        self.last_frame = Some(now_ms);
        let first = *self.first_frame.get_or_insert(now_ms);

        let ft = FrameTime {
            delta_ms,
            elapsed_ms: (now_ms - first).max(0.0),
            now_ms,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        Some(ft)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FramePacing::Uncapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deltas(clock: &mut FrameClock, stamps: &[f64]) -> Vec<Option<f64>> {
        stamps.iter().map(|t| clock.tick(*t).map(|ft| ft.delta_ms)).collect()
    }

    #[test]
    fn uncapped_renders_every_frame() {
        let mut clock = FrameClock::default();
        assert_eq!(
            deltas(&mut clock, &[0.0, 16.0, 33.0]),
            vec![Some(0.0), Some(16.0), Some(17.0)]
        );
    }

    #[test]
    fn gate_tracks_last_rendered_timestamp() {
        let mut clock = FrameClock::new(FramePacing::MinInterval(33.3));
        assert_eq!(
            deltas(&mut clock, &[0.0, 16.0, 35.0, 50.0]),
            vec![Some(0.0), None, Some(35.0), None]
        );
        assert_eq!(clock.last_frame(), Some(35.0));
    }

    #[test]
    fn gate_is_inclusive_at_the_interval() {
        let mut clock = FrameClock::new(FramePacing::MinInterval(20.0));
        assert!(clock.tick(100.0).is_some());
        assert!(clock.tick(119.9).is_none());
        assert!(clock.tick(120.0).is_some());
    }

    #[test]
    fn first_frame_always_passes_and_reports_raw_timestamp() {
        let mut clock = FrameClock::new(FramePacing::MinInterval(1000.0));
        let ft = clock.tick(5.0).unwrap();
        assert_eq!(ft.delta_ms, 5.0);
        assert_eq!(ft.elapsed_ms, 0.0);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn skipped_frames_do_not_advance_index() {
        let mut clock = FrameClock::new(FramePacing::MinInterval(10.0));
        clock.tick(0.0);
        clock.tick(5.0);
        let ft = clock.tick(12.0).unwrap();
        assert_eq!(ft.frame_index, 1);
        assert_eq!(ft.elapsed_ms, 12.0);
    }

    #[test]
    fn out_of_order_timestamp_is_dropped() {
        let mut clock = FrameClock::default();
        clock.tick(50.0);
        assert!(clock.tick(40.0).is_none());
        assert_eq!(clock.last_frame(), Some(50.0));
    }

    #[test]
    fn non_finite_timestamps_are_dropped() {
        let mut clock = FrameClock::new(FramePacing::MinInterval(33.3));
        assert!(clock.tick(f64::NAN).is_none());
        assert!(clock.tick(0.0).is_some());
        assert!(clock.tick(f64::NAN).is_none());
        assert!(clock.tick(f64::INFINITY).is_none());
        assert_eq!(clock.last_frame(), Some(0.0));
        assert!(clock.tick(5.0).is_none());
        assert_eq!(clock.tick(40.0).unwrap().delta_ms, 40.0);
    }

    #[test]
    fn next_frame_due_follows_last_render() {
        let mut clock = FrameClock::new(FramePacing::MinInterval(20.0));
        assert_eq!(clock.next_frame_due(), None);
        clock.tick(100.0);
        assert_eq!(clock.next_frame_due(), Some(120.0));
        clock.tick(110.0);
        assert_eq!(clock.next_frame_due(), Some(120.0));
    }

    #[test]
    fn reset_lets_next_frame_through() {
        let mut clock = FrameClock::new(FramePacing::MinInterval(100.0));
        clock.tick(0.0);
        clock.reset();
        let ft = clock.tick(10.0).unwrap();
        assert_eq!(ft.delta_ms, 10.0);
        assert_eq!(ft.elapsed_ms, 10.0);
    }

    #[test]
    fn frames_per_second_needs_positive_delta() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(0.0).unwrap().frames_per_second(), None);
        assert_eq!(clock.tick(20.0).unwrap().frames_per_second(), Some(50.0));
    }
}
