// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

// External crate imports
use bon::Builder;
use log::warn;
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;

// Standard library imports
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub mod config;
pub mod gauge;
pub mod render;
pub mod shader;

pub use config::{ArcStyle, BoundPolicy, Color, Theme, WindowConfig};
pub use gauge::{ArcGauge, RatingError};
pub use render::{Canvas, DrawCommand, Scene};

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Command enum for streaming score updates into a running view
#[derive(Debug, Clone)]
pub enum RatingCommand {
    SetProgress(f32),
    SetMax(f32),
    SetRating(f32, f32), // max, progress
}

/// Main rating view struct - the primary public interface
#[derive(Debug, Clone)]
pub struct RatingView {
    config: RatingViewConfig,
    gauge: ArcGauge,
}

#[derive(Debug, Clone, Builder)]
pub struct RatingViewConfig {
    #[builder(default = "Rating".to_string())]
    pub title: String,

    /// Scale upper bound.
    #[builder(default = 100.0)]
    pub max: f32,
    /// Initial score; validated against `max` by `RatingView::new`.
    #[builder(default = 0.0)]
    pub progress: f32,

    #[builder(default)]
    pub style: ArcStyle,
    #[builder(default)]
    pub theme: Theme,
    #[builder(default = Color::rgb(0xfa, 0xfa, 0xfa))]
    pub background_color: Color,

    #[builder(default)]
    pub window: WindowConfig,

    /// TTF/OTF bytes for the score label. The typeface belongs to the
    /// host, like the theme colors, so it is passed in rather than
    /// embedded.
    pub font_data: Vec<u8>,
}

impl RatingView {
    /// Builds a view from its configuration. Fails if the configured
    /// initial progress violates the style's bound policy.
    pub fn new(config: RatingViewConfig) -> Result<Self, RatingError> {
        let mut gauge = ArcGauge::new(config.style, config.theme);
        gauge.set_max(config.max);
        gauge.set_progress(config.progress)?;
        Ok(Self { config, gauge })
    }

    pub fn gauge(&self) -> &ArcGauge {
        &self.gauge
    }

    pub fn set_max(&mut self, max: f32) {
        self.gauge.set_max(max);
    }

    pub fn set_progress(&mut self, progress: f32) -> Result<(), RatingError> {
        self.gauge.set_progress(progress)
    }

    pub fn rating(&self) -> &str {
        self.gauge.rating()
    }

    pub fn show(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(None)
    }

    pub fn show_with_commands(
        &mut self,
        receiver: Receiver<RatingCommand>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(Some(receiver))
    }

    // ========================================================================
    // WINDOW RUNNER (host framework collaborator)
    // ========================================================================

    fn run_window(
        &self,
        receiver: Option<Receiver<RatingCommand>>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let font = Font::try_from_vec(self.config.font_data.clone())
            .ok_or("font data is not a valid TTF/OTF")?;

        let logical_width = self.config.window.width;
        let logical_height = self.config.window.height;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                logical_width as f64,
                logical_height as f64,
            ))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);
        let window_clone = window.clone();

        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        // The event loop owns its own copy of the gauge state.
        let mut gauge = self.gauge.clone();
        gauge.measure(size.width, size.height);

        let background = self.config.background_color;
        let frame_duration = Duration::from_secs_f64(1.0 / self.config.window.max_framerate);
        let mut last_frame = Instant::now();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                        let _ = pixels.resize_buffer(new_size.width, new_size.height);
                        let _ = pixels.resize_surface(new_size.width, new_size.height);
                        gauge.measure(new_size.width, new_size.height);
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            apply_commands(&mut gauge, receiver);
                        }
                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, fb_width, fb_height);
                        Scene::for_gauge(&gauge, background).render(&mut canvas, &font);
                        let _ = pixels.render();
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

/// Drains pending commands without blocking. A rejected progress value is
/// logged and skipped; inside the event loop there is no caller to hand
/// the error back to.
fn apply_commands(gauge: &mut ArcGauge, receiver: &Receiver<RatingCommand>) {
    while let Ok(command) = receiver.try_recv() {
        let result = match command {
            RatingCommand::SetProgress(progress) => gauge.set_progress(progress),
            RatingCommand::SetMax(max) => {
                gauge.set_max(max);
                Ok(())
            }
            RatingCommand::SetRating(max, progress) => {
                gauge.set_max(max);
                gauge.set_progress(progress)
            }
        };
        if let Err(err) = result {
            warn!("dropping rating update: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn test_config() -> RatingViewConfig {
        // Font bytes are only touched by the window runner, never by the
        // state machinery under test.
        RatingViewConfig::builder().font_data(Vec::new()).build()
    }

    #[test]
    fn config_defaults_match_the_widget_defaults() {
        let config = test_config();
        assert_eq!(config.max, 100.0);
        assert_eq!(config.progress, 0.0);
        assert_eq!(config.window.width, 600);
    }

    #[test]
    fn new_applies_the_configured_score() {
        let config = RatingViewConfig::builder()
            .max(100.0)
            .progress(99.0)
            .font_data(Vec::new())
            .build();
        let view = RatingView::new(config).unwrap();
        assert_eq!(view.rating(), "9.9");
    }

    #[test]
    fn new_rejects_an_invalid_initial_score() {
        let config = RatingViewConfig::builder()
            .max(10.0)
            .progress(50.0)
            .font_data(Vec::new())
            .build();
        assert!(RatingView::new(config).is_err());
    }

    #[test]
    fn commands_update_the_gauge_and_skip_invalid_ones() {
        let view = RatingView::new(test_config()).unwrap();
        let mut gauge = view.gauge().clone();
        let (sender, receiver) = mpsc::channel();
        sender.send(RatingCommand::SetRating(100.0, 75.0)).unwrap();
        sender.send(RatingCommand::SetProgress(500.0)).unwrap();
        apply_commands(&mut gauge, &receiver);
        // The invalid 500 was dropped, 75 survived.
        assert_eq!(gauge.progress(), 75.0);
        assert_eq!(gauge.rating(), "7.5");
    }

    #[test]
    fn set_max_alone_rescales_the_rating() {
        let mut view = RatingView::new(test_config()).unwrap();
        view.set_progress(50.0).unwrap();
        assert_eq!(view.rating(), "5.0");
        view.set_max(200.0);
        assert_eq!(view.rating(), "2.5");
    }
}
