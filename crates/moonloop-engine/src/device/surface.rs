use crate::coords::SurfaceSize;

/// The on-screen buffer a renderer draws into.
pub trait DrawingSurface {
    /// Current displayed size. May be zero-area while the surface is hidden.
    fn current_size(&self) -> SurfaceSize;

    /// Sets the backing-buffer dimensions.
    fn set_backing_size(&mut self, size: SurfaceSize);

    /// Whether a rendering context is available. Checked once, at startup.
    fn has_context(&self) -> bool {
        true
    }
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for Box<S> {
    fn current_size(&self) -> SurfaceSize {
        (**self).current_size()
    }

    fn set_backing_size(&mut self, size: SurfaceSize) {
        (**self).set_backing_size(size)
    }

    fn has_context(&self) -> bool {
        (**self).has_context()
    }
}
