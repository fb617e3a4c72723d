/// Mesh and model value types produced by the loaders
use nalgebra::Point3;

/// One triangle surface: a vertex buffer plus an optional index buffer.
///
/// Without an index buffer the vertex buffer is read as consecutive,
/// unshared triangles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub vertices: Vec<Point3<f32>>,
    pub indices: Option<Vec<[u32; 3]>>,
}

impl Mesh {
    pub fn new(vertices: Vec<Point3<f32>>) -> Self {
        Self {
            vertices,
            indices: None,
        }
    }

    pub fn indexed(vertices: Vec<Point3<f32>>, indices: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            indices: Some(indices),
        }
    }

    /// Build a mesh from flat `[x, y, z, x, y, z, ...]` and `[a, b, c, ...]` buffers.
    ///
    /// Trailing components that do not complete a point or triangle are dropped.
    pub fn from_flat(positions: &[f32], indices: Option<&[u32]>) -> Self {
        let vertices = positions
            .chunks_exact(3)
            .map(|p| Point3::new(p[0], p[1], p[2]))
            .collect();
        let indices = indices.map(|idx| {
            idx.chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect()
        });
        Self { vertices, indices }
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Indexed cube centered on the origin: 8 shared corners, 12 triangles.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Point3::new(-half, -half, -half),
            Point3::new(half, -half, -half),
            Point3::new(half, half, -half),
            Point3::new(-half, half, -half),
            Point3::new(-half, -half, half),
            Point3::new(half, -half, half),
            Point3::new(half, half, half),
            Point3::new(-half, half, half),
        ];
        let indices = vec![
            // Front
            [4, 5, 6],
            [4, 6, 7],
            // Back
            [0, 3, 2],
            [0, 2, 1],
            // Top
            [3, 7, 6],
            [3, 6, 2],
            // Bottom
            [0, 1, 5],
            [0, 5, 4],
            // Right
            [1, 2, 6],
            [1, 6, 5],
            // Left
            [0, 4, 7],
            [0, 7, 3],
        ];
        Self::indexed(vertices, indices)
    }

    /// Indexed tetrahedron spanning the corner of the unit cube scaled by `size`.
    pub fn tetrahedron(size: f32) -> Self {
        Self::indexed(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(size, 0.0, 0.0),
                Point3::new(0.0, size, 0.0),
                Point3::new(0.0, 0.0, size),
            ],
            vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]],
        )
    }
}

/// A tree of meshes as loaded from one file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub name: Option<String>,
    pub meshes: Vec<Mesh>,
    pub children: Vec<Model>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_mesh(mesh: Mesh) -> Self {
        Self {
            name: None,
            meshes: vec![mesh],
            children: Vec::new(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.meshes.push(mesh);
        self
    }

    pub fn with_child(mut self, child: Model) -> Self {
        self.children.push(child);
        self
    }

    /// Every mesh in the tree, parents before children.
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> + '_ {
        let mut stack: Vec<&Model> = self.children.iter().rev().collect();
        let mut pending = self.meshes.iter();
        std::iter::from_fn(move || loop {
            if let Some(mesh) = pending.next() {
                return Some(mesh);
            }
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            pending = node.meshes.iter();
        })
    }

    /// Every vertex of every mesh, in tree order.
    pub fn vertices(&self) -> impl Iterator<Item = &Point3<f32>> + '_ {
        self.meshes().flat_map(|mesh| mesh.vertices.iter())
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes().count()
    }

    pub fn total_vertices(&self) -> usize {
        self.meshes().map(|mesh| mesh.vertices.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_vertices() == 0
    }
}

impl From<Mesh> for Model {
    fn from(mesh: Mesh) -> Self {
        Self::from_mesh(mesh)
    }
}
