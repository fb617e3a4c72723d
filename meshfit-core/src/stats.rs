/// Vertex, face and edge counts over a model's raw buffers
///
/// Edge counts come from the closed-manifold identity `E = 3F/2`: every edge is
/// assumed to border exactly two triangles. The estimate is exact for closed
/// 2-manifolds and drifts for meshes with boundary or non-manifold edges. It is
/// kept as-is because callers display it.
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::geometry::{Mesh, Model};

/// Aggregated counts for a mesh or model.
///
/// Faces and edges stay fractional; round only for display.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub face_count: f64,
    pub edge_count: f64,
}

impl MeshStats {
    pub fn of_mesh(mesh: &Mesh) -> Self {
        let vertex_count = mesh.vertices.len();
        match &mesh.indices {
            Some(indices) => {
                let faces = indices.len() as f64;
                Self {
                    vertex_count,
                    face_count: faces,
                    edge_count: faces * 3.0 / 2.0,
                }
            }
            None => {
                let remainder = vertex_count % 3;
                if remainder != 0 {
                    log::warn!(
                        "Unindexed mesh has {} vertices; ignoring {} trailing vertices",
                        vertex_count,
                        remainder
                    );
                }
                let counted = (vertex_count - remainder) as f64;
                Self {
                    vertex_count,
                    face_count: counted / 3.0,
                    edge_count: counted / 2.0,
                }
            }
        }
    }

    /// Integer counts for presentation.
    pub fn rounded(&self) -> DisplayStats {
        DisplayStats {
            vertices: self.vertex_count,
            faces: self.face_count.round() as u64,
            edges: self.edge_count.round() as u64,
        }
    }
}

impl Add for MeshStats {
    type Output = MeshStats;

    fn add(self, other: MeshStats) -> MeshStats {
        MeshStats {
            vertex_count: self.vertex_count + other.vertex_count,
            face_count: self.face_count + other.face_count,
            edge_count: self.edge_count + other.edge_count,
        }
    }
}

impl AddAssign for MeshStats {
    fn add_assign(&mut self, other: MeshStats) {
        *self = *self + other;
    }
}

impl Sum for MeshStats {
    fn sum<I: Iterator<Item = MeshStats>>(iter: I) -> Self {
        iter.fold(MeshStats::default(), Add::add)
    }
}

/// Counts rounded to whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayStats {
    pub vertices: usize,
    pub faces: u64,
    pub edges: u64,
}

impl fmt::Display for DisplayStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} faces, {} edges",
            self.vertices, self.faces, self.edges
        )
    }
}

/// Sum the stats of every mesh in the model. Never fails; an empty model
/// yields all zeros.
pub fn compute_stats(model: &Model) -> MeshStats {
    let stats: MeshStats = model
        .meshes()
        .enumerate()
        .map(|(i, mesh)| {
            let stats = MeshStats::of_mesh(mesh);
            log::debug!(
                "Mesh {}: {} vertices, {} faces, indexed: {}",
                i,
                stats.vertex_count,
                stats.face_count,
                mesh.is_indexed()
            );
            stats
        })
        .sum();

    log::info!(
        "Model stats: {} vertices, {} faces, {} edges",
        stats.vertex_count,
        stats.face_count,
        stats.edge_count
    );
    stats
}
