pub mod builtin;
mod error;
mod mat;
mod mesh;

pub use error::LoadError;
pub use mat::{parse_materials, MaterialTable};
pub use mesh::{parse_geometry, Face, Scene, Vertex};
