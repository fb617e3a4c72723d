/// Wavefront OBJ parser
///
/// Only geometry is read: `v` positions and `f` faces, split into child models
/// at every `o` or `g` record. Each child gets a compact vertex buffer holding
/// just the positions its faces reference, plus an index buffer. Polygons are
/// fan-triangulated. Unreferenced positions are not part of any mesh.
///
/// Loaders that expand every face corner into its own vertex (the three.js
/// `OBJLoader` does) report three vertices per triangle. Here corners share
/// positions, so the same file reports fewer vertices: a quad counts 4, not 6.
/// Face and edge counts agree with the expanding loaders.
use std::collections::HashMap;

use nalgebra::Point3;
use nom::{
    bytes::complete::is_not,
    character::complete::{char, i64 as parse_i64, space0, space1},
    combinator::opt,
    multi::many1,
    number::complete::float,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::error::{Error, Result};
use crate::geometry::{Mesh, Model};

/// Faces collected for one object or group.
#[derive(Default)]
struct GroupBuilder {
    name: Option<String>,
    remap: HashMap<usize, u32>,
    vertices: Vec<Point3<f32>>,
    triangles: Vec<[u32; 3]>,
}

impl GroupBuilder {
    fn named(name: &str) -> Self {
        Self {
            name: (!name.is_empty()).then(|| name.to_string()),
            ..Self::default()
        }
    }

    fn local_index(&mut self, global: usize, positions: &[Point3<f32>]) -> u32 {
        let vertices = &mut self.vertices;
        *self.remap.entry(global).or_insert_with(|| {
            vertices.push(positions[global]);
            (vertices.len() - 1) as u32
        })
    }

    fn add_polygon(&mut self, corners: &[usize], positions: &[Point3<f32>]) {
        let local: Vec<u32> = corners
            .iter()
            .map(|&global| self.local_index(global, positions))
            .collect();
        for i in 1..local.len() - 1 {
            self.triangles.push([local[0], local[i], local[i + 1]]);
        }
    }

    fn finish(self) -> Option<Model> {
        if self.triangles.is_empty() {
            return None;
        }
        log::debug!(
            "OBJ group {:?}: {} vertices, {} triangles",
            self.name,
            self.vertices.len(),
            self.triangles.len()
        );
        let mesh = Mesh::indexed(self.vertices, self.triangles);
        Some(Model {
            name: self.name,
            meshes: vec![mesh],
            children: Vec::new(),
        })
    }
}

/// Parse OBJ text into a model.
pub fn parse_obj(input: &str) -> Result<Model> {
    let mut positions: Vec<Point3<f32>> = Vec::new();
    let mut root = Model::new();
    // Faces before the first `o`/`g` belong to the root
    let mut root_group = GroupBuilder::default();
    let mut group: Option<GroupBuilder> = None;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (keyword, rest) = line
            .split_once(|c: char| c.is_whitespace())
            .map_or((line, ""), |(k, r)| (k, r.trim()));

        match keyword {
            "v" => {
                let (_, (x, y, z)) = parse_position(rest).map_err(|e| Error::Obj {
                    line: line_no,
                    message: format!("invalid vertex: {:?}", e),
                })?;
                positions.push(Point3::new(x, y, z));
            }
            "f" => {
                let (_, refs) = parse_face(rest).map_err(|e| Error::Obj {
                    line: line_no,
                    message: format!("invalid face: {:?}", e),
                })?;
                if refs.len() < 3 {
                    return Err(Error::Obj {
                        line: line_no,
                        message: format!("face has {} corners, need at least 3", refs.len()),
                    });
                }
                let corners = refs
                    .iter()
                    .map(|&r| resolve_index(r, positions.len()))
                    .collect::<Option<Vec<usize>>>()
                    .ok_or_else(|| Error::Obj {
                        line: line_no,
                        message: format!(
                            "face references a vertex outside 1..={}",
                            positions.len()
                        ),
                    })?;
                group
                    .as_mut()
                    .unwrap_or(&mut root_group)
                    .add_polygon(&corners, &positions);
            }
            "o" | "g" => {
                if let Some(child) = group.take().and_then(GroupBuilder::finish) {
                    root.children.push(child);
                }
                group = Some(GroupBuilder::named(rest));
            }
            // Normals, texture coordinates, materials and smoothing groups
            _ => {}
        }
    }

    if let Some(child) = group.and_then(GroupBuilder::finish) {
        root.children.push(child);
    }
    if let Some(own) = root_group.finish() {
        root.meshes = own.meshes;
    }

    log::debug!(
        "Parsed OBJ: {} positions, {} meshes",
        positions.len(),
        root.mesh_count()
    );
    Ok(root)
}

/// Map a 1-based or negative (relative) OBJ index to a 0-based position.
fn resolve_index(reference: i64, count: usize) -> Option<usize> {
    let resolved = if reference > 0 {
        usize::try_from(reference - 1).ok()?
    } else if reference < 0 {
        count.checked_sub(usize::try_from(reference.unsigned_abs()).ok()?)?
    } else {
        return None;
    };
    (resolved < count).then_some(resolved)
}

fn parse_position(input: &str) -> IResult<&str, (f32, f32, f32)> {
    tuple((
        preceded(space0, float),
        preceded(space1, float),
        preceded(space1, float),
    ))(input)
}

/// Face corners: `v`, `v/vt`, `v//vn` or `v/vt/vn`. Only `v` is kept.
fn parse_face(input: &str) -> IResult<&str, Vec<i64>> {
    many1(preceded(
        space0,
        terminated(parse_i64, opt(preceded(char('/'), is_not(" \t")))),
    ))(input)
}
