use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::error;
use std::io::{self, stdout};
use std::panic;
use std::time::{Duration, Instant};

use crate::core::{Color, Host};
use crate::pipeline::{draw_frame, ScreenPolygon, TermBuffer};

/// Draws into the alternate screen with half-block characters. Quits on
/// q or Esc. The canvas size is fixed when the renderer is created.
pub struct TerminalRenderer {
    buffer: TermBuffer,
    size: usize,
}

impl TerminalRenderer {
    pub fn new() -> io::Result<Self> {
        // Set up panic hook for terminal cleanup
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = Self::cleanup_terminal();
            eprintln!("\n=== Panic Occurred ===");
            original_hook(panic_info);
            error!("Panic occurred: {:?}", panic_info);
        }));

        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        let (cols, rows) = terminal::size()?;
        let size = TermBuffer::square_for_terminal(cols, rows);
        Ok(Self {
            buffer: TermBuffer::new(size, size, Color::WHITE),
            size,
        })
    }

    /// Side of the square canvas in (half-cell) pixels.
    pub fn size(&self) -> usize {
        self.size
    }

    fn cleanup_terminal() -> io::Result<()> {
        disable_raw_mode()?;
        execute!(stdout(), Show, LeaveAlternateScreen)
    }
}

impl Host for TerminalRenderer {
    fn present(&mut self, frame: &[ScreenPolygon]) -> io::Result<()> {
        draw_frame(&mut self.buffer, frame);
        self.buffer.present()
    }

    fn wait(&mut self, delay: Duration) -> io::Result<bool> {
        let deadline = Instant::now() + delay;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(true);
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
                {
                    return Ok(false);
                }
            }
        }
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = Self::cleanup_terminal();
    }
}
