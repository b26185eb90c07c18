// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point3, Vector3};

/// Calculate the normal of a triangle given three vertices
pub fn calculate_triangle_normal(
    p0: &Point3<f32>,
    p1: &Point3<f32>,
    p2: &Point3<f32>,
) -> Vector3<f32> {
    let v1 = p1 - p0;
    let v2 = p2 - p0;
    v1.cross(&v2).normalize()
}

/// Normal of a planar polygon (Newell's method).
/// Falls back to +Z when the polygon has no area.
pub fn polygon_normal(points: &[Point3<f32>]) -> Vector3<f32> {
    if points.len() == 3 {
        let normal = calculate_triangle_normal(&points[0], &points[1], &points[2]);
        if normal.iter().all(|c| c.is_finite()) {
            return normal;
        }
    }

    let mut normal = Vector3::zeros();
    for (i, current) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::z)
}

/// Parameter in `[0, 1]` where a linear function going from `d0` to `d1`
/// crosses zero. Only meaningful when the signs differ.
pub fn linear_zero_crossing(d0: f32, d1: f32) -> f32 {
    d0 / (d0 - d1)
}

/// Point at parameter `t` on the segment `a -> b`
pub fn lerp_point(a: &Point3<f32>, b: &Point3<f32>, t: f32) -> Point3<f32> {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_triangle_normal() {
        let n = calculate_triangle_normal(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(n, Vector3::z());
    }

    #[test]
    fn test_polygon_normal_quad() {
        let quad = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        assert_relative_eq!(polygon_normal(&quad), Vector3::x(), epsilon = 1e-6);
    }

    #[test]
    fn test_polygon_normal_collinear() {
        let line = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert_eq!(polygon_normal(&line), Vector3::z());
    }

    #[test]
    fn test_zero_crossing() {
        assert_eq!(linear_zero_crossing(1.0, -1.0), 0.5);
        assert_relative_eq!(linear_zero_crossing(-1.0, 0.5), 2.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_lerp_point() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(10.0, 0.0, -10.0);
        assert_eq!(lerp_point(&a, &b, 0.0), a);
        assert_eq!(lerp_point(&a, &b, 1.0), b);
        assert_eq!(lerp_point(&a, &b, 0.5), Point3::new(5.0, 0.0, -5.0));
    }
}
