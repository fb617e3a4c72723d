/// Translation plus uniform scale that puts a model in a canonical frame
use nalgebra::{Matrix4, Point3, Vector3};

use crate::geometry::{Mesh, Model};

/// Translate by `translation`, then scale uniformly by `scale` about the origin.
///
/// Derived once per loaded model and never applied in place: the renderer
/// uses it to position the original geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationTransform {
    pub translation: Vector3<f32>,
    pub scale: f32,
}

impl NormalizationTransform {
    pub const IDENTITY: Self = Self {
        translation: Vector3::new(0.0, 0.0, 0.0),
        scale: 1.0,
    };

    pub fn new(translation: Vector3<f32>, scale: f32) -> Self {
        Self { translation, scale }
    }

    /// Map one point: `(p + translation) * scale`.
    pub fn apply(&self, point: &Point3<f32>) -> Point3<f32> {
        Point3::from((point.coords + self.translation) * self.scale)
    }

    /// Homogeneous matrix equivalent to [`apply`](Self::apply).
    pub fn matrix(&self) -> Matrix4<f32> {
        Self::scale_matrix(self.scale) * Self::translation_matrix(&self.translation)
    }

    /// Copy of `model` with every vertex transformed. The input is left untouched.
    pub fn apply_to_model(&self, model: &Model) -> Model {
        Model {
            name: model.name.clone(),
            meshes: model
                .meshes
                .iter()
                .map(|mesh| Mesh {
                    vertices: mesh.vertices.iter().map(|p| self.apply(p)).collect(),
                    indices: mesh.indices.clone(),
                })
                .collect(),
            children: model
                .children
                .iter()
                .map(|child| self.apply_to_model(child))
                .collect(),
        }
    }

    fn translation_matrix(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(translation)
    }

    fn scale_matrix(scale: f32) -> Matrix4<f32> {
        Matrix4::new_scaling(scale)
    }
}

impl Default for NormalizationTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(NormalizationTransform::IDENTITY.apply(&p), p);
        assert!((NormalizationTransform::IDENTITY.matrix() - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_translate_then_scale() {
        let t = NormalizationTransform::new(Vector3::new(-1.0, -1.0, -1.0), 0.5);
        let p = t.apply(&Point3::new(3.0, 1.0, -1.0));
        assert!((p - Point3::new(1.0, 0.0, -1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_matrix_matches_apply() {
        let t = NormalizationTransform::new(Vector3::new(2.0, -3.0, 0.5), 0.25);
        let p = Point3::new(-4.0, 7.0, 1.5);
        let via_matrix = t.matrix().transform_point(&p);
        assert!((via_matrix - t.apply(&p)).norm() < 1e-6);
    }

    #[test]
    fn test_apply_to_model_keeps_original() {
        let model = Model::from_mesh(Mesh::tetrahedron(2.0))
            .with_child(Model::from_mesh(Mesh::cube(1.0)));
        let t = NormalizationTransform::new(Vector3::new(-1.0, 0.0, 0.0), 2.0);
        let moved = t.apply_to_model(&model);

        assert_eq!(model.meshes[0].vertices[1], Point3::new(2.0, 0.0, 0.0));
        assert_eq!(moved.meshes[0].vertices[1], Point3::new(2.0, 0.0, 0.0));
        assert_eq!(moved.meshes[0].vertices[0], Point3::new(-2.0, 0.0, 0.0));
        assert_eq!(moved.children[0].meshes[0].indices, model.children[0].meshes[0].indices);
    }
}
