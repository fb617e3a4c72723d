/// Error type shared by the loaders and the normalizer
use thiserror::Error;

/// Everything that can go wrong while ingesting or normalizing a model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The model has no vertices at all, so no bounding volume exists.
    #[error("model contains no vertices")]
    EmptyGeometry,

    #[error("invalid target range [{low}, {high}]")]
    InvalidTargetRange { low: f32, high: f32 },

    /// The format could not be determined or is not recognized.
    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to parse STL: {0}")]
    Stl(String),

    #[error("failed to parse OBJ at line {line}: {message}")]
    Obj { line: usize, message: String },

    #[error("failed to load glTF: {0}")]
    Gltf(String),
}

pub type Result<T> = std::result::Result<T, Error>;
