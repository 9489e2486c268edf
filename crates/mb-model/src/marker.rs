//! Persisted marker blocks.

use mb_asmt::{AsmtResult, AsmtWriter, LineCursor};
use nalgebra::{Isometry3, Matrix3, Rotation3, Translation3, UnitQuaternion};

use crate::error::{ModelError, ModelResult};

const ORTHONORMAL_TOL: f64 = 1e-6;

/// A named frame: origin plus rotation matrix (rows), in model units.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDescriptor {
    pub name: String,
    pub position: [f64; 3],
    pub rotation: [[f64; 3]; 3],
}

impl Default for MarkerDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: [0.0; 3],
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }
}

impl MarkerDescriptor {
    pub fn new(name: impl Into<String>, frame: &Isometry3<f64>) -> Self {
        let m = frame.rotation.to_rotation_matrix().into_inner();
        let t = frame.translation.vector;
        Self {
            name: name.into(),
            position: [t.x, t.y, t.z],
            rotation: std::array::from_fn(|r| std::array::from_fn(|c| m[(r, c)])),
        }
    }

    /// Reads the block body after the `Marker` line:
    /// `Name`, `Position3D` (one row), `RotationMatrix` (three rows).
    ///
    /// Atomic: on error the cursor is back where it started.
    pub fn parse(&mut self, cursor: &mut LineCursor<'_>) -> AsmtResult<usize> {
        let start = cursor.checkpoint();
        let read = (|| -> AsmtResult<_> {
            let name = cursor.read_keyword_string("Name")?;
            let position = cursor.read_keyword_rows::<3>("Position3D", 1)?;
            let rotation = cursor.read_keyword_rows::<3>("RotationMatrix", 3)?;
            Ok((name, position, rotation))
        })();
        let (name, position, rotation) = match read {
            Ok(fields) => fields,
            Err(e) => {
                cursor.rewind(start);
                return Err(e);
            }
        };
        self.name = name;
        self.position = position[0];
        self.rotation = [rotation[0], rotation[1], rotation[2]];
        Ok(cursor.consumed_since(start))
    }

    /// Writes `Marker` at `level` and the fields below it.
    pub fn store(&self, writer: &mut AsmtWriter, level: usize) {
        writer.store_string(level, "Marker");
        writer.store_keyword_string(level + 1, "Name", &self.name);
        writer.store_string(level + 1, "Position3D");
        writer.store_row(level + 2, &self.position);
        writer.store_string(level + 1, "RotationMatrix");
        for row in &self.rotation {
            writer.store_row(level + 2, row);
        }
    }

    /// Frame in model units. The rotation rows must be orthonormal.
    pub fn frame(&self) -> ModelResult<Isometry3<f64>> {
        let m = Matrix3::from_fn(|r, c| self.rotation[r][c]);
        let defect = (m * m.transpose() - Matrix3::identity()).abs().max();
        if defect > ORTHONORMAL_TOL || m.determinant() <= 0.0 {
            return Err(ModelError::Structural {
                what: format!("marker '{}' rotation matrix is not a rotation", self.name),
            });
        }
        let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(m));
        let [x, y, z] = self.position;
        Ok(Isometry3::from_parts(Translation3::new(x, y, z), rotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    const BLOCK: &str = "\t\tName\n\t\t\t/Assembly/Marker1\n\t\tPosition3D\n\t\t\t1\t2\t3\n\t\tRotationMatrix\n\t\t\t0\t-1\t0\n\t\t\t1\t0\t0\n\t\t\t0\t0\t1\n";

    #[test]
    fn parses_full_block() {
        let mut cursor = LineCursor::new(BLOCK);
        let mut marker = MarkerDescriptor::default();
        assert_eq!(marker.parse(&mut cursor).unwrap(), 8);
        assert_eq!(marker.name, "/Assembly/Marker1");
        assert_eq!(marker.position, [1.0, 2.0, 3.0]);

        let frame = marker.frame().unwrap();
        let x_axis = frame.rotation * Vector3::x();
        assert!((x_axis - Vector3::y()).norm() < 1e-12);
    }

    #[test]
    fn store_then_parse_is_identity() {
        let frame = Isometry3::new(Vector3::new(0.1, -2.5, 7.0), Vector3::new(0.3, -0.2, 1.1));
        let marker = MarkerDescriptor::new("/m", &frame);
        let mut w = AsmtWriter::new();
        marker.store(&mut w, 1);

        let text = w.into_string();
        let mut cursor = LineCursor::new(&text);
        cursor.expect_keyword("Marker").unwrap();
        let mut back = MarkerDescriptor::default();
        back.parse(&mut cursor).unwrap();
        assert_eq!(back, marker);
    }

    #[test]
    fn short_rotation_rewinds() {
        let text = "Name\nm\nPosition3D\n0 0 0\nRotationMatrix\n1 0 0\n0 1 0\n";
        let mut cursor = LineCursor::new(text);
        let mut marker = MarkerDescriptor::default();
        assert!(marker.parse(&mut cursor).is_err());
        assert_eq!(cursor.position(), 0);
        assert_eq!(marker, MarkerDescriptor::default());
    }

    #[test]
    fn skewed_matrix_is_rejected() {
        let marker = MarkerDescriptor {
            rotation: [[1.0, 0.5, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            ..MarkerDescriptor::default()
        };
        assert!(matches!(
            marker.frame(),
            Err(ModelError::Structural { .. })
        ));
    }
}
