//=========================================================================
// Platform
//=========================================================================
//
// Window and input on the main thread (winit requires it on macOS/iOS).
//
// ```text
//  Main thread                         Core thread
//  ┌───────────────────────────┐       ┌──────────────────────┐
//  │ winit event loop          │       │ EventCollector       │
//  │   InputProcessor          │       │   ↓                  │
//  │   InputBuffer             │       │ Game::tick           │
//  │   RedrawRequested: flush ─┼──────►│                      │
//  │                           │       │                      │
//  │   shutdown flag set? ◄────┼───────┤ loop ended           │
//  │     → exit                │       └──────────────────────┘
//  └───────────────────────────┘
// ```
//
// Input is flushed once per redraw as a single `PlatformEvent::Inputs`;
// empty frames send nothing. Resize and focus loss are sent as they
// happen. When the core loop stops (game exit, panic) the window closes
// on the next redraw.
//
//=========================================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;
use log::{debug, error, info, trace, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::{InputProcessor, Translated};

//=== WindowConfig ========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub size: (u32, u32),
}

//=== Platform ============================================================

pub(crate) struct Platform {
    config: WindowConfig,
    window: Option<Window>,
    buffer: InputBuffer,
    processor: InputProcessor,
    sender: Sender<PlatformEvent>,
    core_stopped: Arc<AtomicBool>,
    failure: Option<PlatformError>,
}

impl Platform {
    pub(crate) fn new(
        config: WindowConfig,
        sender: Sender<PlatformEvent>,
        core_stopped: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            window: None,
            buffer: InputBuffer::new(),
            processor: InputProcessor::new(),
            sender,
            core_stopped,
            failure: None,
        }
    }

    /// Blocks until the window closes.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        debug!(target: "platform", "Event loop running");
        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))?;

        match self.failure.take() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    //--- Channel ----------------------------------------------------------

    /// Returns `false` once the core thread has hung up.
    fn send(&self, event: PlatformEvent) -> bool {
        if self.sender.send(event).is_err() {
            warn!(target: "platform", "Core thread gone, event dropped");
            return false;
        }
        true
    }

    fn flush_input(&mut self) -> bool {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return true;
        };
        trace!(
            target: "platform::input",
            "Flushing {} discrete, {} continuous",
            discrete.len(),
            continuous.len()
        );
        self.send(PlatformEvent::Inputs { discrete, continuous })
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        let _ = self.sender.send(PlatformEvent::WindowClosed);
        self.window = None;
        event_loop.exit();
    }

    #[cfg(test)]
    fn has_window(&self) -> bool {
        self.window.is_some()
    }
}

//=== ApplicationHandler ==================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.config.size;
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.as_str())
            .with_inner_size(PhysicalSize::new(width, height));

        match event_loop.create_window(attributes) {
            Ok(window) => {
                let size = window.inner_size();
                info!(target: "platform", "Window \"{}\" {}x{}", self.config.title, size.width, size.height);
                if (size.width, size.height) != self.config.size {
                    self.send(PlatformEvent::Resized { width: size.width, height: size.height });
                }
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.failure = Some(PlatformError::WindowCreation(e.to_string()));
                self.close(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.close(event_loop);
            }
            WindowEvent::Resized(size) => {
                self.send(PlatformEvent::Resized { width: size.width, height: size.height });
            }
            WindowEvent::Focused(false) => {
                self.send(PlatformEvent::FocusLost);
            }
            WindowEvent::RedrawRequested => {
                let connected = self.flush_input();
                if !connected || self.core_stopped.load(Ordering::Acquire) {
                    info!(target: "platform", "Core stopped, closing window");
                    self.close(event_loop);
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            other => match self.processor.translate(&other) {
                Some(Translated::Discrete(input)) => self.buffer.push_discrete(input),
                Some(Translated::Continuous(input)) => self.buffer.push_continuous(input),
                None => {}
            },
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use crossbeam_channel::unbounded;

    fn platform() -> (Platform, crossbeam_channel::Receiver<PlatformEvent>) {
        let (tx, rx) = unbounded();
        let config = WindowConfig { title: "test".into(), size: (320, 240) };
        (Platform::new(config, tx, Arc::new(AtomicBool::new(false))), rx)
    }

    #[test]
    fn window_is_created_lazily() {
        let (platform, _rx) = platform();
        assert!(!platform.has_window());
    }

    #[test]
    fn empty_flush_sends_nothing() {
        let (mut platform, rx) = platform();
        assert!(platform.flush_input());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn flush_sends_one_batch() {
        let (mut platform, rx) = platform();
        platform.buffer.push_discrete(InputEvent::key_down(KeyCode::Space));
        platform.buffer.push_continuous(InputEvent::MouseMoved { x: 1.0, y: 2.0 });

        assert!(platform.flush_input());
        assert!(platform.flush_input());

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                assert_eq!(discrete, vec![InputEvent::key_down(KeyCode::Space)]);
                assert_eq!(continuous.len(), 1);
            }
            other => panic!("expected one Inputs batch, got {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn flush_reports_disconnect() {
        let (mut platform, rx) = platform();
        drop(rx);
        platform.buffer.push_discrete(InputEvent::key_down(KeyCode::Escape));
        assert!(!platform.flush_input());
    }

    #[test]
    fn error_messages() {
        let err = PlatformError::WindowCreation("no display".into());
        assert_eq!(err.to_string(), "could not open window: no display");
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }
}
