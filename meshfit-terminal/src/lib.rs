/// Terminal frontend: load a model file and print its info panel
use anyhow::Context;
use std::fs;
use std::io::{stdout, Write};
use std::path::Path;

use meshfit_core::{load_model_from, Model, ModelFormat, Normalizer, TargetRange};

pub mod args;
pub mod panel;

pub use args::Args;
pub use panel::ModelReport;

/// Pick the format: explicit override, then extension, then file contents.
pub fn resolve_format(path: &Path, data: &[u8], forced: Option<ModelFormat>) -> ModelFormat {
    if let Some(format) = forced {
        return format;
    }
    ModelFormat::from_path(path).unwrap_or_else(|| {
        let format = ModelFormat::sniff(data);
        log::info!("No recognized extension on {:?}; detected {}", path, format);
        format
    })
}

/// Read and parse a model file. Buffers a glTF names by URI are read from
/// the file's directory.
pub fn load_file(path: &Path, forced: Option<ModelFormat>) -> anyhow::Result<(ModelFormat, Model)> {
    let data = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    let format = resolve_format(path, &data, forced);
    let model = load_model_from(format, &data, path.parent())
        .with_context(|| format!("Failed to load {:?} as {}", path, format))?;
    Ok((format, model))
}

/// Build the normalizer requested on the command line.
pub fn normalizer(args: &Args) -> anyhow::Result<Normalizer> {
    let range = TargetRange::new(args.low, args.high).context("Invalid --low/--high")?;
    Ok(Normalizer::new(range, args.radius_mode.into()))
}

pub fn run<W: Write>(args: &Args, writer: &mut W) -> anyhow::Result<ModelReport> {
    let normalizer = normalizer(args)?;
    let (format, model) = load_file(&args.path, args.format.map(Into::into))?;
    let report = ModelReport::new(format, &model, &normalizer);
    report.draw(writer)?;
    Ok(report)
}

/// Run against stdout.
pub fn run_stdout(args: &Args) -> anyhow::Result<ModelReport> {
    run(args, &mut stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    /// Scratch directory removed when dropped.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(test: &str) -> Self {
            let dir = std::env::temp_dir()
                .join(format!("meshfit-terminal-{}-{}", std::process::id(), test));
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
            let path = self.0.join(name);
            fs::write(&path, contents).unwrap();
            path
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    const TRIANGLE_OBJ: &[u8] = b"v 0 0 0\nv 40 0 0\nv 0 40 0\nf 1 2 3\n";

    #[test]
    fn test_resolve_format() {
        assert_eq!(
            resolve_format(Path::new("a.glb"), b"", None),
            ModelFormat::Gltf
        );
        assert_eq!(
            resolve_format(Path::new("a.glb"), b"", Some(ModelFormat::Stl)),
            ModelFormat::Stl
        );
        assert_eq!(
            resolve_format(Path::new("model"), TRIANGLE_OBJ, None),
            ModelFormat::Obj
        );
    }

    #[test]
    fn test_run_obj_file() {
        let scratch = ScratchDir::new("run_obj");
        let path = scratch.write("triangle.obj", TRIANGLE_OBJ);
        let args = Args::try_parse_from(["meshfit", path.to_str().unwrap()]).unwrap();
        let mut out = Vec::new();
        let report = run(&args, &mut out).unwrap();

        assert_eq!(report.format, ModelFormat::Obj);
        assert_eq!(report.stats.vertex_count, 3);
        let normalization = report.normalization.unwrap();
        assert!((normalization.radius - 20.0).abs() < 1e-6);
        assert!((normalization.transform.scale - 0.05).abs() < 1e-6);
        assert!(String::from_utf8(out).unwrap().contains("Vertices:"));
    }

    #[test]
    fn test_run_missing_file() {
        let args = Args::try_parse_from(["meshfit", "/nonexistent/meshfit/model.stl"]).unwrap();
        let err = run(&args, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_invalid_range() {
        let scratch = ScratchDir::new("invalid_range");
        let path = scratch.write("range.obj", TRIANGLE_OBJ);
        let args = Args::try_parse_from([
            "meshfit",
            path.to_str().unwrap(),
            "--low",
            "5",
            "--high",
            "1",
        ])
        .unwrap();
        assert!(run(&args, &mut Vec::new()).is_err());
    }

    #[test]
    fn test_scratch_dir_removed() {
        let dir = {
            let scratch = ScratchDir::new("cleanup");
            scratch.write("left.obj", TRIANGLE_OBJ);
            scratch.0.clone()
        };
        assert!(!dir.exists());
    }

    #[test]
    fn test_gltf_with_external_buffer() {
        let scratch = ScratchDir::new("external_gltf");
        let mut bin = Vec::new();
        for f in [0.0f32, 0.0, 0.0, 30.0, 0.0, 0.0, 0.0, 30.0, 0.0] {
            bin.extend_from_slice(&f.to_le_bytes());
        }
        scratch.write("triangle.bin", &bin);
        let path = scratch.write(
            "triangle.gltf",
            br#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "nodes": [0] }],
  "nodes": [{ "mesh": 0 }],
  "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }],
  "accessors": [{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                  "min": [0, 0, 0], "max": [30, 30, 0] }],
  "bufferViews": [{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }],
  "buffers": [{ "byteLength": 36, "uri": "triangle.bin" }]
}"#,
        );

        let (format, model) = load_file(&path, None).unwrap();
        assert_eq!(format, ModelFormat::Gltf);
        assert_eq!(model.total_vertices(), 3);

        let args = Args::try_parse_from(["meshfit", path.to_str().unwrap()]).unwrap();
        let report = run(&args, &mut Vec::new()).unwrap();
        assert_eq!(report.stats.face_count, 1.0);
        let normalization = report.normalization.unwrap();
        assert!((normalization.radius - 15.0).abs() < 1e-6);
    }
}
