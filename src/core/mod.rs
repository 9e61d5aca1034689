pub mod color;
pub mod engine;
pub mod geometry;
pub mod transform;

pub use color::Color;
pub use engine::{Animator, DriverState, Host};
pub use geometry::{Face, MaterialTable, Scene, Vertex};
pub use transform::{project, rotate, RotationState, RotationStep};
