/// The host's "call me again next frame" primitive.
///
/// Hosts guarantee that frame callbacks never overlap.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

impl<F: FnMut()> FrameScheduler for F {
    fn request_frame(&mut self) {
        self()
    }
}
