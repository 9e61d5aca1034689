use minifb::{Key, Scale, Window, WindowOptions};
use std::io;
use std::thread;
use std::time::Duration;

use crate::core::{Color, Host};
use crate::pipeline::{draw_frame, FrameBuffer, ScreenPolygon};

/// minifb window with a white canvas, closed with Esc or Q.
pub struct WindowRenderer {
    window: Window,
    buffer: FrameBuffer,
}

impl WindowRenderer {
    pub fn new(title: &str, size: usize) -> io::Result<Self> {
        let mut window = Window::new(
            title,
            size,
            size,
            WindowOptions {
                resize: false,
                scale: Scale::X1,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        // Frame pacing is the animator's job.
        window.set_target_fps(0);

        Ok(Self {
            window,
            buffer: FrameBuffer::new(size, size, Color::WHITE),
        })
    }

    fn wants_close(&self) -> bool {
        !self.window.is_open()
            || self.window.is_key_down(Key::Escape)
            || self.window.is_key_down(Key::Q)
    }
}

impl Host for WindowRenderer {
    fn present(&mut self, frame: &[ScreenPolygon]) -> io::Result<()> {
        draw_frame(&mut self.buffer, frame);
        self.buffer.present_window(&mut self.window)
    }

    fn wait(&mut self, delay: Duration) -> io::Result<bool> {
        thread::sleep(delay);
        Ok(!self.wants_close())
    }
}
