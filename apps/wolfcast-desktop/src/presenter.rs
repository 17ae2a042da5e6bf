use std::sync::Arc;
use std::time::Duration;

use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};
use wolfcast_common::EngineConfig;
use wolfcast_engine::{PresentError, Presenter, StopSignal};
use wolfcast_input::{Action, SharedInput};
use wolfcast_render::Framebuffer;

/// Arrow keys, with WAD as alternates.
fn bind(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(Action::TurnLeft),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Action::TurnRight),
        KeyCode::ArrowUp | KeyCode::KeyW => Some(Action::MoveForward),
        _ => None,
    }
}

/// Window state driven by winit. Acts as the input-capture collaborator
/// (key events into `SharedInput`) and the close signal (`StopSignal`).
struct WindowApp {
    title: String,
    render_size: (u32, u32),
    window_size: (u32, u32),
    input: SharedInput,
    stop: StopSignal,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    init_error: Option<PresentError>,
}

impl WindowApp {
    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PresentError> {
        let (width, height) = self.window_size;
        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(width, height))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| PresentError::WindowCreation(e.to_string()))?,
        );

        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window.clone());
        let (render_width, render_height) = self.render_size;
        let pixels = Pixels::new(render_width, render_height, surface)
            .map_err(|e| PresentError::SurfaceCreation(e.to_string()))?;

        tracing::info!(
            width = size.width,
            height = size.height,
            "window opened"
        );
        self.window = Some(window);
        self.pixels = Some(pixels);
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if key == KeyCode::Escape && pressed {
            tracing::info!("escape pressed, stopping");
            self.stop.raise();
            return;
        }
        let Some(action) = bind(key) else {
            return;
        };
        if pressed {
            self.input.press(action);
        } else {
            self.input.release(action);
        }
    }
}

impl ApplicationHandler for WindowApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_error.is_some() {
            return;
        }
        if let Err(e) = self.create_surface(event_loop) {
            tracing::error!("{e}");
            self.init_error = Some(e);
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window close requested");
                self.stop.raise();
            }
            WindowEvent::Focused(false) => {
                self.input.release_all();
            }
            WindowEvent::Resized(size) => {
                if let Some(pixels) = &mut self.pixels {
                    if let Err(e) = pixels.resize_surface(size.width.max(1), size.height.max(1)) {
                        tracing::warn!("failed to resize surface: {e}");
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.handle_key(key, state == ElementState::Pressed);
            }
            _ => {}
        }
    }
}

/// Presents frames in a non-resizable window sized `render * scale`, with the
/// `pixels` surface doing the scaling.
pub struct WinitPresenter {
    event_loop: EventLoop<()>,
    app: WindowApp,
}

impl WinitPresenter {
    pub fn new(
        config: &EngineConfig,
        input: SharedInput,
        stop: StopSignal,
    ) -> Result<Self, EventLoopError> {
        let event_loop = EventLoop::new()?;
        Ok(Self {
            event_loop,
            app: WindowApp {
                title: config.title.clone(),
                render_size: (config.render_width as u32, config.render_height as u32),
                window_size: config.window_size(),
                input,
                stop,
                window: None,
                pixels: None,
                init_error: None,
            },
        })
    }
}

impl Presenter for WinitPresenter {
    fn poll_events(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app);
        if let PumpStatus::Exit(code) = status {
            tracing::debug!(code, "event loop exited");
            self.app.stop.raise();
        }
    }

    fn present(&mut self, frame: &Framebuffer) -> Result<(), PresentError> {
        if let Some(e) = self.app.init_error.take() {
            return Err(e);
        }
        // Not resumed yet; nothing to draw on.
        let Some(pixels) = &mut self.app.pixels else {
            return Ok(());
        };
        frame.write_rgba8(pixels.frame_mut());
        pixels
            .render()
            .map_err(|e| PresentError::Backend(e.to_string()))
    }

    fn close(&mut self) {
        self.app.pixels = None;
        self.app.window = None;
        tracing::debug!("window closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_and_wad_are_bound() {
        assert_eq!(bind(KeyCode::ArrowLeft), Some(Action::TurnLeft));
        assert_eq!(bind(KeyCode::KeyA), Some(Action::TurnLeft));
        assert_eq!(bind(KeyCode::ArrowRight), Some(Action::TurnRight));
        assert_eq!(bind(KeyCode::KeyD), Some(Action::TurnRight));
        assert_eq!(bind(KeyCode::ArrowUp), Some(Action::MoveForward));
        assert_eq!(bind(KeyCode::KeyW), Some(Action::MoveForward));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(bind(KeyCode::Space), None);
        assert_eq!(bind(KeyCode::ArrowDown), None);
        assert_eq!(bind(KeyCode::Escape), None);
    }
}
