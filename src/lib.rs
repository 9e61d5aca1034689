use std::{
    fmt::Display,
    time::{Duration, Instant},
};

pub mod config;
pub mod core;
pub mod pipeline;
pub mod renderers;

pub use config::{Config, RenderTarget};
pub use crate::core::geometry;
pub use crate::core::Color;
pub use crate::core::Scene;

/// Frame timing, reported roughly once per second.
pub struct Metrics {
    pub frame_time: Duration,
    pub fps_counter: u32,
    pub fps_update_timer: Instant,
    pub current_fps: f32,
    pub frame_times: Vec<f32>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            frame_time: Duration::from_secs_f32(1.0 / 60.0),
            fps_counter: 0,
            fps_update_timer: Instant::now(),
            current_fps: 0.0,
            frame_times: Vec::with_capacity(120),
        }
    }

    /// Records how long one tick took to render and present.
    pub fn update(&mut self, render_time: Duration) {
        self.fps_counter += 1;
        self.frame_times.push(render_time.as_secs_f32() * 1000.0);
        if self.frame_times.len() > 120 {
            self.frame_times.remove(0);
        }
    }

    /// Closes the current one-second window and returns a summary of it, or
    /// `None` if the window is still open.
    pub fn take_report(&mut self) -> Option<String> {
        let elapsed = self.fps_update_timer.elapsed();
        if elapsed < Duration::from_secs(1) || self.frame_times.is_empty() {
            return None;
        }

        self.current_fps = self.fps_counter as f32 / elapsed.as_secs_f32();
        self.frame_time = Duration::from_secs_f32(
            self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32 / 1000.0,
        );
        self.fps_counter = 0;
        self.fps_update_timer = Instant::now();
        Some(self.to_string())
    }
}

impl Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FPS: {:.2} | Avg: {:.2}ms | Min: {:.2}ms | Max: {:.2}ms",
            self.current_fps,
            self.frame_time.as_secs_f32() * 1000.0,
            self.frame_times
                .iter()
                .copied()
                .reduce(f32::min)
                .unwrap_or(0.0),
            self.frame_times
                .iter()
                .copied()
                .reduce(f32::max)
                .unwrap_or(0.0)
        )
    }
}
