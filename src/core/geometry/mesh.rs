use std::fs;
use std::path::Path;

use glam::DVec3;
use log::{debug, warn};

use super::{parse_materials, LoadError, MaterialTable};
use crate::core::Color;

/// Object-space vertex position.
pub type Vertex = DVec3;

/// A flat-colored polygon referencing vertices of its [`Scene`] by 0-based index.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub indices: Vec<usize>,
    pub color: Color,
}

/// Geometry as loaded from OBJ text. Never mutated by rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

#[derive(Debug, PartialEq)]
enum ObjLine<'a> {
    Vertex(Vertex),
    /// 1-based positional references exactly as written.
    Face(Vec<i64>),
    UseMaterial(Option<&'a str>),
    Other,
}

impl<'a> ObjLine<'a> {
    fn classify(text: &'a str, line: usize) -> Result<Self, LoadError> {
        let mut tokens = text.split_whitespace();
        let kind = match tokens.next() {
            Some("v") => {
                let coords = tokens
                    .map(|t| t.parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| LoadError::MalformedVertex { line })?;
                match coords[..] {
                    [x, y, z] => ObjLine::Vertex(DVec3::new(x, y, z)),
                    _ => return Err(LoadError::MalformedVertex { line }),
                }
            }
            Some("f") => {
                // Only the position part of `v/vt/vn` matters.
                let refs = tokens
                    .map(|t| t.split('/').next().unwrap_or_default().parse::<i64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| LoadError::MalformedFace { line })?;
                if refs.len() < 3 {
                    return Err(LoadError::DegenerateFace {
                        line,
                        count: refs.len(),
                    });
                }
                ObjLine::Face(refs)
            }
            Some("usemtl") => ObjLine::UseMaterial(tokens.next()),
            _ => ObjLine::Other,
        };
        Ok(kind)
    }
}

/// Parses the `v`/`f`/`usemtl` subset of OBJ text.
///
/// Faces take the color of the material active when they are read, starting
/// from `default_color`; a `usemtl` naming an unknown material falls back to
/// `default_color`. Face indices are checked against the final vertex count,
/// so a bad reference is reported here rather than at render time.
pub fn parse_geometry(
    obj: &str,
    materials: &MaterialTable,
    default_color: Color,
) -> Result<Scene, LoadError> {
    let mut scene = Scene::default();
    let mut current = default_color;

    for (idx, text) in obj.lines().enumerate() {
        match ObjLine::classify(text, idx + 1)? {
            ObjLine::Vertex(v) => scene.vertices.push(v),
            ObjLine::Face(refs) => {
                let face = scene.faces.len();
                let indices = refs
                    .into_iter()
                    .map(|r| {
                        r.checked_sub(1)
                            .and_then(|i| usize::try_from(i).ok())
                            .ok_or(LoadError::FaceIndexOutOfRange {
                                face,
                                reference: r,
                                vertex_count: scene.vertices.len(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                scene.faces.push(Face {
                    indices,
                    color: current,
                });
            }
            ObjLine::UseMaterial(name) => {
                let name = name.unwrap_or_default();
                if materials.get(name).is_none() {
                    warn!(
                        "line {}: unknown material {:?}, using {}",
                        idx + 1,
                        name,
                        default_color
                    );
                }
                current = materials.resolve(name, default_color);
            }
            ObjLine::Other => {}
        }
    }

    scene.validate()?;
    debug!(
        "Loaded scene with {} vertices and {} faces",
        scene.vertices.len(),
        scene.faces.len()
    );
    Ok(scene)
}

impl Scene {
    /// Parses MTL text first, then OBJ text against the resulting table.
    pub fn load(obj: &str, mtl: &str, default_color: Color) -> Result<Self, LoadError> {
        let materials = parse_materials(mtl)?;
        parse_geometry(obj, &materials, default_color)
    }

    /// Same as [`Scene::load`], reading the text from disk. A missing MTL path
    /// means an empty material table.
    pub fn from_files(
        obj_path: &Path,
        mtl_path: Option<&Path>,
        default_color: Color,
    ) -> Result<Self, LoadError> {
        let read = |path: &Path| {
            fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        let mtl = mtl_path.map(read).transpose()?.unwrap_or_default();
        let obj = read(obj_path)?;
        Self::load(&obj, &mtl, default_color)
    }

    fn validate(&self) -> Result<(), LoadError> {
        let vertex_count = self.vertices.len();
        for (face, f) in self.faces.iter().enumerate() {
            if let Some(&bad) = f.indices.iter().find(|&&i| i >= vertex_count) {
                return Err(LoadError::FaceIndexOutOfRange {
                    face,
                    reference: bad as i64 + 1,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\n";

    #[test]
    fn face_indices_become_zero_based() {
        let obj = format!("{TRIANGLE}f 1 2 3\n");
        let scene = parse_geometry(&obj, &MaterialTable::new(), Color::MISSING).unwrap();
        assert_eq!(scene.vertices.len(), 3);
        assert_eq!(scene.faces[0].indices, vec![0, 1, 2]);
        assert_eq!(scene.faces[0].color, Color::MISSING);
    }

    #[test]
    fn texture_and_normal_references_are_dropped() {
        let obj = format!("{TRIANGLE}vn 0 0 1\nvt 0 0\nf 3/1/1 2//1 1/2\n");
        let scene = parse_geometry(&obj, &MaterialTable::new(), Color::MISSING).unwrap();
        assert_eq!(scene.faces[0].indices, vec![2, 1, 0]);
    }

    #[test]
    fn usemtl_switches_color_for_following_faces() {
        let mut materials = MaterialTable::new();
        materials.insert("Red", Color::RED);
        let obj = format!(
            "{TRIANGLE}f 1 2 3\nusemtl Red\nf 1 2 3\nusemtl unknown_material\nf 1 2 3\n"
        );
        let scene = parse_geometry(&obj, &materials, Color::BLUE).unwrap();
        let colors: Vec<_> = scene.faces.iter().map(|f| f.color).collect();
        assert_eq!(colors, vec![Color::BLUE, Color::RED, Color::BLUE]);
    }

    #[test]
    fn unknown_material_with_empty_table_uses_default() {
        let obj = format!("usemtl unknown_material\n{TRIANGLE}f 1 2 3\n");
        let scene = Scene::load(&obj, "", Color::MISSING).unwrap();
        assert_eq!(scene.faces[0].color, Color::MISSING);
    }

    #[test]
    fn other_lines_are_ignored() {
        let obj = format!("# comment\no Cube\ng side\ns off\nmtllib cube.mtl\n{TRIANGLE}\n");
        let scene = parse_geometry(&obj, &MaterialTable::new(), Color::MISSING).unwrap();
        assert_eq!(scene.vertices.len(), 3);
        assert!(scene.faces.is_empty());
    }

    #[test]
    fn malformed_vertices() {
        let table = MaterialTable::new();
        for obj in ["v 1 2\n", "v 1 2 3 4\n", "v 1 two 3\n"] {
            let err = parse_geometry(obj, &table, Color::MISSING).unwrap_err();
            assert!(matches!(err, LoadError::MalformedVertex { line: 1 }), "{obj}");
        }
    }

    #[test]
    fn malformed_and_degenerate_faces() {
        let table = MaterialTable::new();
        let err = parse_geometry(&format!("{TRIANGLE}f 1 b 3\n"), &table, Color::MISSING)
            .unwrap_err();
        assert!(matches!(err, LoadError::MalformedFace { line: 4 }));

        let err = parse_geometry(&format!("{TRIANGLE}f 1 2\n"), &table, Color::MISSING)
            .unwrap_err();
        assert!(matches!(err, LoadError::DegenerateFace { line: 4, count: 2 }));
    }

    #[test]
    fn out_of_range_indices_fail_at_load() {
        let table = MaterialTable::new();
        let err = parse_geometry(&format!("{TRIANGLE}f 1 2 3\nf 1 2 9\n"), &table, Color::MISSING)
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::FaceIndexOutOfRange {
                face: 1,
                reference: 9,
                vertex_count: 3
            }
        ));

        let err = parse_geometry(&format!("{TRIANGLE}f 0 1 2\n"), &table, Color::MISSING)
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::FaceIndexOutOfRange { face: 0, reference: 0, .. }
        ));

        let err = parse_geometry(
            &format!("{TRIANGLE}f -9223372036854775808 1 2\n"),
            &table,
            Color::MISSING,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::FaceIndexOutOfRange { face: 0, reference: i64::MIN, .. }
        ));
    }

    #[test]
    fn empty_input_is_an_empty_scene() {
        let scene = Scene::load("", "", Color::MISSING).unwrap();
        assert!(scene.vertices.is_empty());
        assert!(scene.faces.is_empty());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Scene::from_files(Path::new("/nonexistent/model.obj"), None, Color::MISSING)
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("model.obj"));
    }
}
