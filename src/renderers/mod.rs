pub mod terminal;
pub mod window;

pub use terminal::TerminalRenderer;
pub use window::WindowRenderer;
