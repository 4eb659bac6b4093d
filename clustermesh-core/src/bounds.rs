//! Axis-aligned bounding boxes

use crate::point::*;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box over a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3f,
    pub max: Point3f,
}

impl BoundingBox {
    /// Component-wise minimum and maximum of `points`, or `None` if there are none.
    pub fn from_points(points: &[Point3f]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);

            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some(Self { min, max })
    }

    /// Size of the box along each axis.
    pub fn extent(&self) -> Vector3f {
        self.max - self.min
    }

    pub fn max_extent(&self) -> f32 {
        let e = self.extent();
        e.x.max(e.y).max(e.z)
    }

    pub fn center(&self) -> Point3f {
        Point3f::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_has_no_box() {
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_single_point_box_is_flat() {
        let p = Point3f::new(1.0, -2.0, 3.0);
        let bbox = BoundingBox::from_points(&[p]).unwrap();
        assert_eq!(bbox.min, p);
        assert_eq!(bbox.max, p);
        assert_eq!(bbox.extent(), Vector3f::zeros());
    }

    #[test]
    fn test_min_max_and_center() {
        let bbox = BoundingBox::from_points(&[
            Point3f::new(-1.0, 2.0, 0.5),
            Point3f::new(3.0, -4.0, 0.0),
            Point3f::new(0.0, 0.0, 2.5),
        ])
        .unwrap();

        assert_eq!(bbox.min, Point3f::new(-1.0, -4.0, 0.0));
        assert_eq!(bbox.max, Point3f::new(3.0, 2.0, 2.5));
        assert_relative_eq!(bbox.max_extent(), 6.0);
        assert_relative_eq!(bbox.center(), Point3f::new(1.0, -1.0, 1.25));
    }
}
