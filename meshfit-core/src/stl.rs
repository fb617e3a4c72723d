/// STL file parser for binary and ASCII formats
///
/// STL stores independent facets, so every parsed model holds one unindexed
/// mesh with three vertices per facet.
use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::many0,
    number::complete::float,
    sequence::preceded,
    IResult,
};
use nalgebra::Point3;

use crate::error::{Error, Result};
use crate::geometry::{Mesh, Model};

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<Model> {
    if data.len() < HEADER_LEN + 4 {
        return Err(Error::Stl("file too small to be a valid STL".to_string()));
    }

    // Skip 80-byte header
    let data = &data[HEADER_LEN..];

    // Read triangle count (4 bytes, little-endian)
    let triangle_count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
    let body = &data[4..];
    let body_len = triangle_count.checked_mul(FACET_LEN).ok_or_else(|| {
        Error::Stl(format!("facet count {} is too large", triangle_count))
    })?;
    if body.len() < body_len {
        return Err(Error::Stl(format!(
            "unexpected end of file: {} facets declared, {} bytes present",
            triangle_count,
            body.len()
        )));
    }

    // Bounded by the body length checked above
    let mut vertices = Vec::with_capacity(triangle_count * 3);
    for facet in body.chunks_exact(FACET_LEN).take(triangle_count) {
        // Skip the 12-byte normal and trailing 2-byte attribute count
        for corner in facet[12..48].chunks_exact(12) {
            vertices.push(Point3::new(
                read_f32(&corner[0..4]),
                read_f32(&corner[4..8]),
                read_f32(&corner[8..12]),
            ));
        }
    }

    log::debug!("Parsed binary STL with {} facets", triangle_count);
    Ok(Model::from_mesh(Mesh::new(vertices)))
}

fn read_f32(bytes: &[u8]) -> f32 {
    f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<Model> {
    match parse_ascii_stl_impl(input) {
        Ok((_, (name, vertices))) => {
            log::debug!("Parsed ASCII STL with {} facets", vertices.len() / 3);
            let mut model = Model::from_mesh(Mesh::new(vertices));
            if !name.is_empty() {
                model.name = Some(name.to_string());
            }
            Ok(model)
        }
        Err(e) => Err(Error::Stl(format!("{:?}", e))),
    }
}

fn parse_ascii_stl_impl(input: &str) -> IResult<&str, (&str, Vec<Point3<f32>>)> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, name) = not_line_ending(input)?; // Optional name
    let (input, facets) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;

    let vertices = facets.into_iter().flatten().collect();
    Ok((input, (name.trim(), vertices)))
}

fn parse_facet(input: &str) -> IResult<&str, [Point3<f32>; 3]> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = parse_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, v1) = parse_vertex(input)?;
    let (input, v2) = parse_vertex(input)?;
    let (input, v3) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((input, [v1, v2, v3]))
}

fn parse_vertex(input: &str) -> IResult<&str, Point3<f32>> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    let (input, (x, y, z)) = parse_vector3(input)?;
    Ok((input, Point3::new(x, y, z)))
}

fn parse_vector3(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, (x, y, z)))
}

/// Detect and parse STL file (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> Result<Model> {
    // Binary files may also start with "solid", so fall back on failure
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            match parse_ascii_stl(text) {
                Ok(model) => return Ok(model),
                Err(e) => log::debug!("ASCII STL parse failed, trying binary: {}", e),
            }
        }
    }

    parse_binary_stl(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::compute_stats;

    fn binary_stl(facets: &[[[f32; 3]; 3]]) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data.extend_from_slice(&(facets.len() as u32).to_le_bytes());
        for facet in facets {
            data.extend_from_slice(&[0u8; 12]);
            for corner in facet {
                for c in corner {
                    data.extend_from_slice(&c.to_le_bytes());
                }
            }
            data.extend_from_slice(&[0u8; 2]);
        }
        data
    }

    #[test]
    fn test_parse_binary_header() {
        let mut data = vec![0u8; 84];
        // Set triangle count to 0
        data[80..84].copy_from_slice(&0u32.to_le_bytes());

        let model = parse_binary_stl(&data).unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_parse_binary_facets() {
        let data = binary_stl(&[
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        ]);
        let model = parse_stl(&data).unwrap();
        let mesh = &model.meshes[0];
        assert!(!mesh.is_indexed());
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.vertices[5], Point3::new(0.0, 0.0, 1.0));

        let stats = compute_stats(&model);
        assert_eq!(stats.face_count, 2.0);
        assert_eq!(stats.edge_count, 3.0);
    }

    #[test]
    fn test_truncated_binary() {
        let mut data = binary_stl(&[[[0.0; 3]; 3]]);
        data.truncate(data.len() - 10);
        assert!(matches!(parse_binary_stl(&data), Err(Error::Stl(_))));
        assert!(parse_binary_stl(&[0u8; 20]).is_err());
    }

    #[test]
    fn test_forged_triangle_count() {
        let mut data = binary_stl(&[[[1.0; 3]; 3]]);
        data[80..84].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(parse_binary_stl(&data), Err(Error::Stl(_))));
        assert!(matches!(parse_stl(&data), Err(Error::Stl(_))));
    }

    #[test]
    fn test_parse_ascii_named() {
        let text = "solid part\n\
            facet normal 0 0 1\n\
              outer loop\n\
                vertex 0 0 0\n\
                vertex 2.5 0 0\n\
                vertex 0 2.5 0\n\
              endloop\n\
            endfacet\n\
            endsolid part\n";
        let model = parse_stl(text.as_bytes()).unwrap();
        assert_eq!(model.name.as_deref(), Some("part"));
        assert_eq!(model.meshes[0].vertices.len(), 3);
        assert_eq!(model.meshes[0].vertices[1], Point3::new(2.5, 0.0, 0.0));
    }

    #[test]
    fn test_binary_with_solid_header() {
        let mut data = binary_stl(&[[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
        data[..5].copy_from_slice(b"solid");
        let model = parse_stl(&data).unwrap();
        assert_eq!(model.total_vertices(), 3);
    }
}
