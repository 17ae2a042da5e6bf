use wolfcast_render::Framebuffer;

use crate::game_loop::StopSignal;

/// Errors from the presentation surface. These are fatal to the loop.
#[derive(Debug, thiserror::Error)]
pub enum PresentError {
    #[error("failed to create window: {0}")]
    WindowCreation(String),
    #[error("failed to create presentation surface: {0}")]
    SurfaceCreation(String),
    #[error("presentation backend failed: {0}")]
    Backend(String),
}

/// Where finished frames go: a window, a test harness, nothing at all.
pub trait Presenter {
    /// Drain pending platform events (input, window close) before the loop
    /// checks its stop signal. Presenters without an event source do nothing.
    fn poll_events(&mut self) {}

    /// Show a fully rendered frame. The framebuffer carries its own size;
    /// any scaling to the display is the presenter's concern.
    fn present(&mut self, frame: &Framebuffer) -> Result<(), PresentError>;

    /// Release the surface. Called once, when the loop stops.
    fn close(&mut self);
}

/// Presenter with no display. Counts frames, optionally keeps the latest
/// one, and can raise a stop signal after a fixed number of frames.
#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    presented: u64,
    keep_last: bool,
    last: Option<Framebuffer>,
    stop_after: Option<(u64, StopSignal)>,
    closed: bool,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep a copy of the most recent frame.
    pub fn keeping_last_frame(mut self) -> Self {
        self.keep_last = true;
        self
    }

    /// Raise `signal` once `frames` frames have been presented.
    pub fn stopping_after(mut self, frames: u64, signal: StopSignal) -> Self {
        self.stop_after = Some((frames, signal));
        self
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn last_frame(&self) -> Option<&Framebuffer> {
        self.last.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Presenter for HeadlessPresenter {
    fn present(&mut self, frame: &Framebuffer) -> Result<(), PresentError> {
        if self.closed {
            return Err(PresentError::Backend("presenter already closed".into()));
        }
        self.presented += 1;
        if self.keep_last {
            match &mut self.last {
                Some(last) => last.clone_from(frame),
                None => self.last = Some(frame.clone()),
            }
        }
        if let Some((limit, signal)) = &self.stop_after {
            if self.presented >= *limit {
                signal.raise();
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
        tracing::debug!(frames = self.presented, "headless presenter closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wolfcast_common::Color;

    #[test]
    fn counts_and_keeps_frames() {
        let mut presenter = HeadlessPresenter::new().keeping_last_frame();
        let mut frame = Framebuffer::new(2, 2);
        presenter.present(&frame).unwrap();
        frame.clear(Color::WHITE);
        presenter.present(&frame).unwrap();

        assert_eq!(presenter.presented(), 2);
        assert_eq!(presenter.last_frame(), Some(&frame));
    }

    #[test]
    fn does_not_keep_frames_by_default() {
        let mut presenter = HeadlessPresenter::new();
        presenter.present(&Framebuffer::new(1, 1)).unwrap();
        assert!(presenter.last_frame().is_none());
    }

    #[test]
    fn raises_stop_after_limit() {
        let signal = StopSignal::new();
        let mut presenter = HeadlessPresenter::new().stopping_after(2, signal.clone());
        let frame = Framebuffer::new(1, 1);

        presenter.present(&frame).unwrap();
        assert!(!signal.is_raised());
        presenter.present(&frame).unwrap();
        assert!(signal.is_raised());
    }

    #[test]
    fn present_after_close_fails() {
        let mut presenter = HeadlessPresenter::new();
        presenter.close();
        assert!(presenter.is_closed());
        assert!(matches!(
            presenter.present(&Framebuffer::new(1, 1)),
            Err(PresentError::Backend(_))
        ));
    }
}
