//! Model shown when no OBJ file is given on the command line.

use super::{LoadError, Scene};
use crate::core::Color;

pub const CUBE_OBJ: &str = "\
# unit cube, one material per side
mtllib cube.mtl
o Cube
v -1.0 -1.0 -1.0
v 1.0 -1.0 -1.0
v 1.0 1.0 -1.0
v -1.0 1.0 -1.0
v -1.0 -1.0 1.0
v 1.0 -1.0 1.0
v 1.0 1.0 1.0
v -1.0 1.0 1.0
usemtl Front
f 1 2 3 4
usemtl Back
f 6 5 8 7
usemtl Bottom
f 5 6 2 1
usemtl Top
f 4 3 7 8
usemtl Left
f 5 1 4 8
usemtl Right
f 2 6 7 3
";

pub const CUBE_MTL: &str = "\
newmtl Front
Kd 0.80 0.20 0.20
newmtl Back
Kd 0.20 0.80 0.20
newmtl Bottom
Kd 0.20 0.20 0.80
newmtl Top
Kd 0.90 0.90 0.20
newmtl Left
Kd 0.20 0.80 0.80
newmtl Right
Kd 0.80 0.20 0.80
";

pub fn cube(default_color: Color) -> Result<Scene, LoadError> {
    Scene::load(CUBE_OBJ, CUBE_MTL, default_color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_loads_with_six_colored_sides() {
        let scene = cube(Color::MISSING).unwrap();
        assert_eq!(scene.vertices.len(), 8);
        assert_eq!(scene.faces.len(), 6);
        assert!(scene.faces.iter().all(|f| f.indices.len() == 4));
        assert!(scene.faces.iter().all(|f| f.color != Color::MISSING));
        assert_eq!(scene.faces[0].color, Color::new(204, 51, 51));
    }
}
