use std::cell::Cell;
use std::rc::Rc;

/// Cloneable stop flag, sampled once per frame.
///
/// Once set, the loop stops requesting frames and ignores any frame already
/// scheduled. Not `Send`: the loop is single-threaded.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// Observer for the instantaneous frame rate (`1000 / delta`).
///
/// Purely observational: nothing it does affects the loop.
pub trait FrameRateSink {
    fn publish(&mut self, frames_per_second: f64);
}

impl<F: FnMut(f64)> FrameRateSink for F {
    fn publish(&mut self, frames_per_second: f64) {
        self(frames_per_second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let a = StopHandle::new();
        let b = a.clone();
        assert!(!b.is_stopped());
        a.stop();
        assert!(b.is_stopped());
    }
}
