/// On-disk model formats and loader dispatch
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::geometry::Model;
use crate::{gltf_loader, obj, stl};

/// Model file formats the viewers accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFormat {
    Obj,
    Stl,
    /// Both `.gltf` and binary `.glb`.
    Gltf,
}

impl ModelFormat {
    pub const ALL: [ModelFormat; 3] = [ModelFormat::Obj, ModelFormat::Stl, ModelFormat::Gltf];

    /// Guess the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "obj" => Some(Self::Obj),
            "stl" => Some(Self::Stl),
            "gltf" | "glb" => Some(Self::Gltf),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Guess the format from the leading bytes.
    ///
    /// Binary STL has no magic, so anything unrecognized is treated as STL.
    pub fn sniff(data: &[u8]) -> Self {
        let text = String::from_utf8_lossy(&data[..data.len().min(512)]);
        let trimmed = text.trim_start();
        if data.starts_with(b"glTF") || (trimmed.starts_with('{') && trimmed.contains("\"asset\"")) {
            Self::Gltf
        } else if trimmed.starts_with("solid") {
            Self::Stl
        } else if trimmed
            .lines()
            .any(|line| line.starts_with("v ") || line.starts_with("f ") || line.starts_with('#'))
        {
            Self::Obj
        } else {
            Self::Stl
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Obj => "OBJ",
            Self::Stl => "STL",
            Self::Gltf => "GLB/GLTF",
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s.trim_start_matches('.'))
            .ok_or_else(|| Error::UnsupportedFormat(s.to_string()))
    }
}

/// Parse file bytes with the loader for `format`.
pub fn load_model(format: ModelFormat, data: &[u8]) -> Result<Model> {
    load_model_from(format, data, None)
}

/// Like [`load_model`], resolving files a glTF references relative to `base`.
pub fn load_model_from(format: ModelFormat, data: &[u8], base: Option<&Path>) -> Result<Model> {
    log::debug!("Loading {} model from {} bytes", format, data.len());
    match format {
        ModelFormat::Obj => {
            let text = std::str::from_utf8(data).map_err(|err| Error::Obj {
                line: 0,
                message: format!("file is not UTF-8: {}", err),
            })?;
            obj::parse_obj(text)
        }
        ModelFormat::Stl => stl::parse_stl(data),
        ModelFormat::Gltf => gltf_loader::parse_gltf_with_base(data, base),
    }
}
