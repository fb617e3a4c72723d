/// meshfit Web - WASM bindings for the browser model viewers
///
/// The viewers hand over either raw file bytes or the position/index buffers
/// of each mesh they traversed, and read back statistics for the info panel
/// and the transform to apply to the displayed object.

use wasm_bindgen::prelude::*;

use meshfit_core::{
    compute_stats, load_model, Mesh, MeshStats, Model, ModelFormat, Normalization, Normalizer,
    RadiusMode, TargetRange,
};

/// A model assembled on the JS side or parsed from file bytes.
#[wasm_bindgen]
#[derive(Default)]
pub struct WebModel {
    model: Model,
}

#[wasm_bindgen]
impl WebModel {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebModel {
        WebModel::default()
    }

    /// Parse file bytes. An empty `format` sniffs the contents.
    pub fn load(bytes: &[u8], format: &str) -> Result<WebModel, JsError> {
        Ok(Self::load_inner(bytes, format)?)
    }

    /// Add one traversed mesh: flat xyz positions and optional flat triangle indices.
    #[wasm_bindgen(js_name = addMesh)]
    pub fn add_mesh(&mut self, positions: &[f32], indices: Option<Vec<u32>>) {
        let mesh = Mesh::from_flat(positions, indices.as_deref());
        self.model.children.push(Model::from_mesh(mesh));
    }

    #[wasm_bindgen(js_name = meshCount)]
    pub fn mesh_count(&self) -> usize {
        self.model.mesh_count()
    }

    pub fn stats(&self) -> WebStats {
        compute_stats(&self.model).into()
    }

    /// Centering/rescale transform. Fails on a model without vertices.
    pub fn normalize(
        &self,
        low: f32,
        high: f32,
        bounding_sphere: bool,
    ) -> Result<WebNormalization, JsError> {
        Ok(self.normalize_inner(low, high, bounding_sphere)?)
    }
}

impl WebModel {
    fn load_inner(bytes: &[u8], format: &str) -> meshfit_core::Result<WebModel> {
        let format = if format.is_empty() {
            ModelFormat::sniff(bytes)
        } else {
            format.parse()?
        };
        let model = load_model(format, bytes)?;
        log::debug!("Loaded {} model with {} meshes", format, model.mesh_count());
        Ok(WebModel { model })
    }

    fn normalize_inner(
        &self,
        low: f32,
        high: f32,
        bounding_sphere: bool,
    ) -> meshfit_core::Result<WebNormalization> {
        let mode = if bounding_sphere {
            RadiusMode::BoundingSphere
        } else {
            RadiusMode::HalfMaxDimension
        };
        let normalizer = Normalizer::new(TargetRange::new(low, high)?, mode);
        Ok(normalizer.normalize(&self.model)?.into())
    }
}

/// Counts for the info panel.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebStats {
    pub vertices: usize,
    pub faces: f64,
    pub edges: f64,
}

#[wasm_bindgen]
impl WebStats {
    #[wasm_bindgen(js_name = roundedFaces)]
    pub fn rounded_faces(&self) -> f64 {
        self.faces.round()
    }

    #[wasm_bindgen(js_name = roundedEdges)]
    pub fn rounded_edges(&self) -> f64 {
        self.edges.round()
    }
}

impl From<MeshStats> for WebStats {
    fn from(stats: MeshStats) -> Self {
        Self {
            vertices: stats.vertex_count,
            faces: stats.face_count,
            edges: stats.edge_count,
        }
    }
}

/// Position and uniform scale for the displayed object.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebNormalization {
    translation: [f32; 3],
    pub scale: f32,
    pub radius: f32,
}

#[wasm_bindgen]
impl WebNormalization {
    /// `[x, y, z]`, to be applied before the scale.
    pub fn translation(&self) -> Vec<f32> {
        self.translation.to_vec()
    }
}

impl From<Normalization> for WebNormalization {
    fn from(normalization: Normalization) -> Self {
        let t = normalization.transform.translation;
        Self {
            translation: [t.x, t.y, t.z],
            scale: normalization.transform.scale,
            radius: normalization.radius,
        }
    }
}
