/// Command line arguments for the `meshfit` binary
use std::path::PathBuf;

use clap::Parser;
use meshfit_core::{ModelFormat, RadiusMode, TargetRange};

/// Format override for files with a missing or misleading extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    Obj,
    Stl,
    /// glTF JSON with embedded buffers, or binary GLB.
    Gltf,
}

impl From<CliFormat> for ModelFormat {
    fn from(cli: CliFormat) -> Self {
        match cli {
            CliFormat::Obj => ModelFormat::Obj,
            CliFormat::Stl => ModelFormat::Stl,
            CliFormat::Gltf => ModelFormat::Gltf,
        }
    }
}

/// Measurement compared against the target range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CliRadiusMode {
    /// Half of the largest bounding box extent.
    #[default]
    HalfMaxDimension,
    /// Distance from the box center to the farthest vertex.
    BoundingSphere,
}

impl From<CliRadiusMode> for RadiusMode {
    fn from(cli: CliRadiusMode) -> Self {
        match cli {
            CliRadiusMode::HalfMaxDimension => RadiusMode::HalfMaxDimension,
            CliRadiusMode::BoundingSphere => RadiusMode::BoundingSphere,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "meshfit",
    about = "Print vertex/face/edge statistics and the normalization transform of a 3D model",
    version
)]
pub struct Args {
    /// Model file (.obj, .stl, .gltf or .glb).
    pub path: PathBuf,

    /// Force the file format instead of guessing from extension and contents.
    #[arg(long, value_enum)]
    pub format: Option<CliFormat>,

    /// Models with a smaller radius are scaled up to radius 1.
    #[arg(long, default_value_t = TargetRange::DEFAULT_LOW)]
    pub low: f32,

    /// Models with a larger radius are scaled down to radius 1.
    #[arg(long, default_value_t = TargetRange::DEFAULT_HIGH)]
    pub high: f32,

    /// How the model radius is measured.
    #[arg(long, value_enum, default_value = "half-max-dimension")]
    pub radius_mode: CliRadiusMode,

    /// Increase log output (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Default log filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
