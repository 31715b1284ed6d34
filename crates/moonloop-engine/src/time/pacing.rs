use crate::error::DriverError;

/// Minimum-frame-interval policy.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum FramePacing {
    /// Render on every scheduled frame.
    #[default]
    Uncapped,

    /// Skip frames that arrive less than this many milliseconds after the last
    /// rendered frame.
    MinInterval(f64),
}

impl FramePacing {
    /// Caps rendering at roughly `fps` frames per second.
    pub fn fps_limit(fps: f64) -> Result<Self, DriverError> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(DriverError::InvalidFrameRate(fps));
        }
        Ok(Self::MinInterval(1000.0 / fps))
    }

    /// Returns the gate threshold in milliseconds (`0` when uncapped).
    pub fn min_interval_ms(self) -> f64 {
        match self {
            Self::Uncapped => 0.0,
            Self::MinInterval(ms) => ms,
        }
    }

    /// Rejects negative, NaN and infinite intervals.
    pub fn validate(self) -> Result<Self, DriverError> {
        if let Self::MinInterval(ms) = self {
            if !ms.is_finite() || ms < 0.0 {
                return Err(DriverError::InvalidPacing(ms));
            }
        }
        Ok(self)
    }
}
