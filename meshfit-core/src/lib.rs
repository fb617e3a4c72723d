/// meshfit Core Library - Model statistics and normalization
///
/// This library provides the stateless core for the model viewers: vertex, face
/// and edge statistics over raw mesh buffers, and the centering/rescale
/// transform that brings models of any native scale into a common frame.
/// Loaders for OBJ, STL and glTF turn file bytes into the [`Model`] tree.

pub mod bounds;
pub mod error;
pub mod format;
pub mod geometry;
pub mod gltf_loader;
pub mod normalize;
pub mod obj;
pub mod stats;
pub mod stl;
pub mod transform;

// Re-export commonly used types
pub use bounds::{BoundingBox, BoundingSphere};
pub use error::{Error, Result};
pub use format::{load_model, load_model_from, ModelFormat};
pub use geometry::{Mesh, Model};
pub use normalize::{
    compute_bounding_box, compute_normalization, Normalization, Normalizer, RadiusMode,
    TargetRange,
};
pub use stats::{compute_stats, DisplayStats, MeshStats};
pub use transform::NormalizationTransform;
