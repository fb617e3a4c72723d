/// glTF / GLB ingestion
///
/// The default scene is walked depth-first and every node's world transform is
/// baked into its vertex positions, so downstream bounds see final geometry.
use std::path::Path;

use nalgebra::{Matrix4, Point3};

use crate::error::{Error, Result};
use crate::geometry::{Mesh, Model};

/// Parse a `.gltf` (with embedded buffers) or `.glb` file.
pub fn parse_gltf(data: &[u8]) -> Result<Model> {
    parse_gltf_with_base(data, None)
}

/// Parse a glTF file whose external buffer URIs resolve against `base`.
///
/// Without a base directory only embedded and data-URI buffers load.
pub fn parse_gltf_with_base(data: &[u8], base: Option<&Path>) -> Result<Model> {
    let gltf = gltf::Gltf::from_slice(data).map_err(|err| Error::Gltf(err.to_string()))?;
    let buffers = gltf::import_buffers(&gltf.document, base, gltf.blob.clone())
        .map_err(|err| Error::Gltf(format!("Load buffers failed: {}", err)))?;

    let scene = gltf.default_scene().or_else(|| gltf.scenes().next());
    let model = match scene {
        Some(scene) => {
            if gltf.scenes().len() > 1 {
                log::warn!(
                    "More than one scene in glTF file. Only \"{}\" will be loaded.",
                    scene.name().unwrap_or("<Unnamed>")
                );
            }
            log::debug!("Loading scene \"{}\".", scene.name().unwrap_or("<Unnamed>"));
            let mut root = Model {
                name: scene.name().map(str::to_owned),
                ..Model::default()
            };
            for node in scene.nodes() {
                root.children.push(load_node(&node, &Matrix4::identity(), &buffers)?);
            }
            root
        }
        None => {
            log::warn!("No scene in glTF file. Loading meshes without node transforms.");
            let mut root = Model::new();
            for mesh in gltf.meshes() {
                root.meshes.extend(load_mesh(&mesh, &Matrix4::identity(), &buffers)?);
            }
            root
        }
    };

    Ok(model)
}

fn load_node(
    node: &gltf::Node,
    parent: &Matrix4<f32>,
    buffers: &[gltf::buffer::Data],
) -> Result<Model> {
    let world = parent * Matrix4::from(node.transform().matrix());
    let mut model = Model {
        name: node.name().map(str::to_owned),
        ..Model::default()
    };

    if let Some(mesh) = node.mesh() {
        model.meshes = load_mesh(&mesh, &world, buffers)?;
    }
    for child in node.children() {
        model.children.push(load_node(&child, &world, buffers)?);
    }

    Ok(model)
}

fn load_mesh(
    mesh: &gltf::Mesh,
    world: &Matrix4<f32>,
    buffers: &[gltf::buffer::Data],
) -> Result<Vec<Mesh>> {
    let mesh_name = mesh.name().unwrap_or("<Unnamed>");
    log::debug!("Loading mesh \"{}\".", mesh_name);

    let mut loaded = Vec::new();
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!(
                "Skipping primitive {} of mesh \"{}\": mode {:?} is not a triangle list.",
                primitive.index(),
                mesh_name,
                primitive.mode()
            );
            continue;
        }

        let reader = primitive
            .reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
        let positions = reader.read_positions().ok_or_else(|| {
            Error::Gltf(format!(
                "Read positions from primitive {} of mesh \"{}\" failed.",
                primitive.index(),
                mesh_name
            ))
        })?;
        let vertices = positions
            .map(|p| world.transform_point(&Point3::from(p)))
            .collect::<Vec<_>>();

        let mesh = match reader.read_indices() {
            Some(indices) => {
                let flat = indices.into_u32().collect::<Vec<_>>();
                Mesh::indexed(
                    vertices,
                    flat.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect(),
                )
            }
            None => Mesh::new(vertices),
        };
        loaded.push(mesh);
    }

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::compute_stats;

    // Three positions (0,0,0) (1,0,0) (0,1,0) followed by u16 indices 0 1 2.
    const BUFFER_BASE64: &str = "AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIAAAA=";

    fn document(buffer: &str) -> String {
        format!(
            r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "name": "demo", "nodes": [0] }}],
  "nodes": [
    {{ "name": "root", "translation": [10, 0, 0], "mesh": 0, "children": [1] }},
    {{ "name": "child", "scale": [2, 2, 2], "mesh": 1 }}
  ],
  "meshes": [
    {{ "primitives": [{{ "attributes": {{ "POSITION": 0 }}, "indices": 1 }}] }},
    {{ "primitives": [{{ "attributes": {{ "POSITION": 0 }} }}] }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
       "min": [0, 0, 0], "max": [1, 1, 0] }},
    {{ "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }}
  ],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }},
    {{ "buffer": 0, "byteOffset": 36, "byteLength": 6 }}
  ],
  "buffers": [{}]
}}"#,
            buffer
        )
    }

    fn embedded_gltf() -> String {
        document(&format!(
            r#"{{ "byteLength": 44, "uri": "data:application/octet-stream;base64,{}" }}"#,
            BUFFER_BASE64
        ))
    }

    fn glb() -> Vec<u8> {
        let mut json = document(r#"{ "byteLength": 44 }"#).into_bytes();
        while json.len() % 4 != 0 {
            json.push(b' ');
        }
        let mut bin = Vec::new();
        for f in [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0] {
            bin.extend_from_slice(&f.to_le_bytes());
        }
        for i in [0u16, 1, 2, 0] {
            bin.extend_from_slice(&i.to_le_bytes());
        }

        let total = 12 + 8 + json.len() + 8 + bin.len();
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(b"glTF");
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());
        out.extend_from_slice(&(json.len() as u32).to_le_bytes());
        out.extend_from_slice(b"JSON");
        out.extend_from_slice(&json);
        out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        out.extend_from_slice(b"BIN\0");
        out.extend_from_slice(&bin);
        out
    }

    #[test]
    fn test_external_buffer_needs_base() {
        let json = document(r#"{ "byteLength": 44, "uri": "mesh.bin" }"#);
        assert!(matches!(parse_gltf(json.as_bytes()), Err(Error::Gltf(_))));
    }

    fn check_model(model: &Model) {
        assert_eq!(model.name.as_deref(), Some("demo"));
        let root = &model.children[0];
        assert_eq!(root.name.as_deref(), Some("root"));
        assert_eq!(root.meshes[0].indices, Some(vec![[0, 1, 2]]));
        assert_eq!(root.meshes[0].vertices[1], Point3::new(11.0, 0.0, 0.0));

        let child = &root.children[0];
        assert!(!child.meshes[0].is_indexed());
        assert_eq!(child.meshes[0].vertices[1], Point3::new(12.0, 0.0, 0.0));
        assert_eq!(child.meshes[0].vertices[2], Point3::new(10.0, 2.0, 0.0));

        let stats = compute_stats(model);
        assert_eq!(stats.vertex_count, 6);
        assert_eq!(stats.face_count, 2.0);
        assert_eq!(stats.edge_count, 3.0);
    }

    #[test]
    fn test_embedded_gltf() {
        let model = parse_gltf(embedded_gltf().as_bytes()).unwrap();
        check_model(&model);
    }

    #[test]
    fn test_glb() {
        let model = parse_gltf(&glb()).unwrap();
        check_model(&model);
    }

    #[test]
    fn test_invalid_document() {
        assert!(matches!(parse_gltf(b"{ not json"), Err(Error::Gltf(_))));
    }
}
