use std::fmt;

/// Width and height of a drawing surface in pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Returns the size with each dimension raised to at least 1.
    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(self.width.max(1), self.height.max(1))
    }
}

impl From<(u32, u32)> for SurfaceSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

impl fmt::Display for SurfaceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The size last applied to the drawing surface and forwarded to the renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ViewportState {
    size: SurfaceSize,
}

impl ViewportState {
    /// Creates a viewport; zero dimensions are clamped to 1.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size: size.clamped(),
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Compares an observed surface size against the applied one.
    ///
    /// Returns the size to apply when it is valid and differs, `None` otherwise.
    pub fn observe(&self, observed: SurfaceSize) -> Option<SurfaceSize> {
        (observed.is_valid() && observed != self.size).then_some(observed)
    }

    pub fn apply(&mut self, size: SurfaceSize) {
        debug_assert!(size.is_valid());
        self.size = size;
    }
}
