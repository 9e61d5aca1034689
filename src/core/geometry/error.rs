use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while turning OBJ/MTL text into a [`Scene`](super::Scene).
///
/// Loading is fail-fast: the first offending line aborts the whole load.
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("line {line}: vertex needs exactly 3 numeric coordinates")]
    MalformedVertex { line: usize },

    #[error("line {line}: face references a non-numeric vertex index")]
    MalformedFace { line: usize },

    #[error("line {line}: face has {count} vertices, at least 3 are required")]
    DegenerateFace { line: usize, count: usize },

    #[error("line {line}: diffuse color needs exactly 3 numeric channels")]
    MalformedColor { line: usize },

    #[error("face {face} references vertex {reference}, but only {vertex_count} vertices exist")]
    FaceIndexOutOfRange {
        face: usize,
        reference: i64,
        vertex_count: usize,
    },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
