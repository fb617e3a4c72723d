/// Axis-aligned bounding box and bounding sphere primitives
use nalgebra::{Point3, Vector3};

/// Axis-aligned bounding box. `min[i] <= max[i]` holds on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl BoundingBox {
    /// Degenerate box around a single point.
    pub fn from_point(point: Point3<f32>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Fold a set of points into a box. `None` when there are no points.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<f32>>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self::from_point(*first);
        for point in points {
            bounds.encapsulate_point(point);
        }
        Some(bounds)
    }

    /// Grow the box to include the given point.
    pub fn encapsulate_point(&mut self, point: &Point3<f32>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Midpoint, taken from halved corners so boxes near `f32::MAX` stay finite.
    pub fn center(&self) -> Point3<f32> {
        Point3::from(self.min.coords * 0.5 + self.max.coords * 0.5)
    }

    /// Half of the per-axis extent, finite for any finite box.
    pub fn half_extents(&self) -> Vector3<f32> {
        self.max.coords * 0.5 - self.min.coords * 0.5
    }

    /// Half of the largest per-axis extent.
    pub fn max_half_extent(&self) -> f32 {
        self.half_extents().max()
    }
}

/// Sphere around the box center reaching the farthest vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Point3<f32>,
    pub radius: f32,
}

impl BoundingSphere {
    /// Center the sphere on `bounds` and size it to the farthest of `points`.
    pub fn around<'a, I>(bounds: &BoundingBox, points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3<f32>>,
    {
        let center = bounds.center();
        let radius = points
            .into_iter()
            .map(|point| scaled_norm(point.coords * 0.5 - center.coords * 0.5) * 2.0)
            .fold(0.0_f32, f32::max);

        Self { center, radius }
    }
}

/// Euclidean length without squaring components of magnitude near `f32::MAX`.
fn scaled_norm(v: Vector3<f32>) -> f32 {
    let largest = v.amax();
    if largest == 0.0 {
        0.0
    } else {
        largest * (v / largest).norm()
    }
}
