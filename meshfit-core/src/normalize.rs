/// Bounding volume and centering/rescale computation for loaded models
use crate::bounds::{BoundingBox, BoundingSphere};
use crate::error::{Error, Result};
use crate::geometry::Model;
use crate::transform::NormalizationTransform;

/// Radius interval a model may occupy without being rescaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRange {
    low: f32,
    high: f32,
}

impl TargetRange {
    pub const DEFAULT_LOW: f32 = 0.1;
    pub const DEFAULT_HIGH: f32 = 10.0;

    pub fn new(low: f32, high: f32) -> Result<Self> {
        let valid = low.is_finite() && high.is_finite() && low >= 0.0 && high > 0.0 && low <= high;
        if !valid {
            return Err(Error::InvalidTargetRange { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f32 {
        self.low
    }

    pub fn high(&self) -> f32 {
        self.high
    }

    /// Scale that brings a model of the given radius into canonical size.
    ///
    /// Radii strictly outside the range are mapped to exactly 1.0. A zero or
    /// non-finite radius is left alone, as is one too small to invert in `f32`.
    pub fn scale_for(&self, radius: f32) -> f32 {
        if !radius.is_finite() || radius <= 0.0 {
            return 1.0;
        }
        if radius <= self.high && radius >= self.low {
            return 1.0;
        }
        let scale = 1.0 / radius;
        if !scale.is_finite() {
            log::warn!("Radius {:e} is too small to rescale; keeping unit scale", radius);
            return 1.0;
        }
        scale
    }
}

impl Default for TargetRange {
    fn default() -> Self {
        Self {
            low: Self::DEFAULT_LOW,
            high: Self::DEFAULT_HIGH,
        }
    }
}

/// Which measurement stands in for the model's radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadiusMode {
    /// Half of the largest box extent.
    #[default]
    HalfMaxDimension,
    /// Distance from the box center to the farthest vertex.
    BoundingSphere,
}

/// Box over the union of every vertex buffer in the model.
///
/// Vertex positions are read as-is; node transforms are expected to be baked
/// in by the loader.
pub fn compute_bounding_box(model: &Model) -> Result<BoundingBox> {
    model
        .meshes()
        .filter_map(|mesh| BoundingBox::from_points(&mesh.vertices))
        .reduce(|acc, bounds| acc.union(&bounds))
        .ok_or(Error::EmptyGeometry)
}

/// Center the box on the origin and rescale it when its half max dimension
/// falls outside `range`.
pub fn compute_normalization(bounds: &BoundingBox, range: TargetRange) -> NormalizationTransform {
    transform_for(bounds, bounds.max_half_extent(), range)
}

fn transform_for(bounds: &BoundingBox, radius: f32, range: TargetRange) -> NormalizationTransform {
    NormalizationTransform {
        translation: -bounds.center().coords,
        scale: range.scale_for(radius),
    }
}

/// Everything derived while normalizing one model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub bounds: BoundingBox,
    pub radius: f32,
    pub transform: NormalizationTransform,
}

/// Normalization with an explicit range and radius measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Normalizer {
    pub range: TargetRange,
    pub mode: RadiusMode,
}

impl Normalizer {
    pub fn new(range: TargetRange, mode: RadiusMode) -> Self {
        Self { range, mode }
    }

    pub fn normalize(&self, model: &Model) -> Result<Normalization> {
        let bounds = compute_bounding_box(model)?;
        let radius = match self.mode {
            RadiusMode::HalfMaxDimension => bounds.max_half_extent(),
            RadiusMode::BoundingSphere => BoundingSphere::around(&bounds, model.vertices()).radius,
        };
        let transform = transform_for(&bounds, radius, self.range);

        log::info!(
            "Normalized model: radius {} ({:?}), translation {:?}, scale {}",
            radius,
            self.mode,
            transform.translation.as_slice(),
            transform.scale
        );

        Ok(Normalization {
            bounds,
            radius,
            transform,
        })
    }
}
