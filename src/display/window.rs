// Window module - Presents the digit canvas and worker status
//
// The canvas renders into a software raster; the window uploads that raster
// through the pixels crate. Worker status messages are drained on the event
// loop's own turn and shown in the window title.

use super::canvas::{DigitCanvas, RenderConfig};
use super::context::{SoftwareContext, SurfaceRegistry};
use crate::config::AppConfig;
use crate::worker::{BackgroundTask, TaskListener};
use log::{error, info, warn};
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Identifier of the main drawing surface
pub const MAIN_SURFACE_ID: &str = "canvas1";

/// Base window title
const WINDOW_TITLE: &str = "MNIST View";

/// How often the event loop wakes to collect worker messages
const MESSAGE_POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Window title for an optional status line
fn window_title(status: Option<&str>) -> String {
    match status {
        Some(status) => format!("{} - {}", WINDOW_TITLE, status),
        None => WINDOW_TITLE.to_string(),
    }
}

/// Window showing a rendered digit and the background task status
pub struct ViewerWindow {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    canvas: DigitCanvas,
    task: BackgroundTask,
    listener: TaskListener,
}

impl ViewerWindow {
    /// Create a viewer over an already rendered canvas and a started task
    pub fn new(canvas: DigitCanvas, task: BackgroundTask, listener: TaskListener) -> Self {
        Self {
            window: None,
            pixels: None,
            canvas,
            task,
            listener,
        }
    }

    fn render_config(&self) -> &RenderConfig {
        self.canvas.config()
    }

    /// Upload the canvas to the window
    fn render(&mut self) -> Result<(), pixels::Error> {
        if let Some(pixels) = &mut self.pixels {
            self.canvas.pixels().copy_to(pixels.frame_mut());
            pixels.render()?;
        }
        Ok(())
    }

    /// Create the window and its pixel surface
    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn std::error::Error>> {
        let side = self.render_config().surface_size() as u32;
        let window_attributes = Window::default_attributes()
            .with_title(window_title(None))
            .with_inner_size(LogicalSize::new(side, side))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let window_size = window.inner_size();

        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        let pixels = Pixels::new(side, side, surface_texture)?;

        let title_target = Arc::clone(&window);
        self.listener.on_message(move |message| {
            info!("{}", message);
            title_target.set_title(&window_title(Some(&message.to_string())));
        });

        window.request_redraw();
        self.window = Some(window);
        self.pixels = Some(pixels);
        Ok(())
    }

    fn terminate_worker(&mut self) {
        if self.task.is_running() {
            info!("Terminate requested");
            self.task.terminate();
            // Deliver what was queued before shutdown
            self.listener.dispatch_pending();
        }
    }
}

impl ApplicationHandler for ViewerWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_surface(event_loop) {
            error!("Failed to create window: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting...");
                self.terminate_worker();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::KeyT | KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.terminate_worker();
            }
            WindowEvent::Resized(size) => {
                if let Some(pixels) = &mut self.pixels {
                    if let Err(e) = pixels.resize_surface(size.width, size.height) {
                        warn!("Surface resize failed: {}", e);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.render() {
                    error!("Render error: {}", err);
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.listener.dispatch_pending();
        event_loop.set_control_flow(poll_control_flow(
            self.listener.is_closed(),
            Instant::now(),
        ));
    }
}

/// Keep polling for worker messages until the channel closes, then sleep
/// until the next window event
fn poll_control_flow(channel_closed: bool, now: Instant) -> ControlFlow {
    if channel_closed {
        ControlFlow::Wait
    } else {
        ControlFlow::WaitUntil(now + MESSAGE_POLL_INTERVAL)
    }
}

/// Render the configured source and run the viewer until the window closes
///
/// # Returns
/// Result indicating success or error
pub fn run_viewer(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    let mut registry = SurfaceRegistry::new();
    registry.register(MAIN_SURFACE_ID, SoftwareContext::default());
    let mut canvas = DigitCanvas::bind(&mut registry, MAIN_SURFACE_ID, config.render)?;

    let source = config.source.build(config.render.grid_size);
    canvas.display_source(source.as_ref())?;

    let mut task = BackgroundTask::new(config.worker)?;
    let listener = task.start()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    info!("Starting viewer...");
    info!(
        "  Grid: {}x{} cells",
        config.render.grid_size, config.render.grid_size
    );
    info!(
        "  Window size: {}x{}",
        config.render.surface_size(),
        config.render.surface_size()
    );
    info!("  Cell size: {}px", config.render.cell_size);
    info!("  Grid overlay: {}", config.render.show_grid);
    info!("  Source: {:?}", config.source);
    info!("Press T or Escape to stop the worker.");

    let mut viewer = ViewerWindow::new(canvas, task, listener);
    event_loop.run_app(&mut viewer)?;
    viewer.terminate_worker();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_title() {
        assert_eq!(window_title(None), "MNIST View");
        assert_eq!(
            window_title(Some("Counter reached: 1000")),
            "MNIST View - Counter reached: 1000"
        );
    }

    #[test]
    fn test_poll_stops_after_channel_closes() {
        let now = Instant::now();
        assert_eq!(
            poll_control_flow(false, now),
            ControlFlow::WaitUntil(now + MESSAGE_POLL_INTERVAL)
        );
        assert_eq!(poll_control_flow(true, now), ControlFlow::Wait);
    }

    #[test]
    fn test_terminated_worker_closes_viewer_channel() {
        let mut task = BackgroundTask::new(crate::WorkerConfig::new()).unwrap();
        let mut listener = task.start().unwrap();
        listener.on_message(|_| {});
        task.terminate();

        listener.dispatch_pending();
        assert_eq!(
            poll_control_flow(listener.is_closed(), Instant::now()),
            ControlFlow::Wait
        );
    }
}
