// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Face centroid computation

use nalgebra::{Point3, Vector3};

/// Arithmetic mean of a set of points, `None` when there are none
pub fn vertex_centroid<'a, I>(points: I) -> Option<Point3<f32>>
where
    I: IntoIterator<Item = &'a Point3<f32>>,
{
    let mut sum = Vector3::zeros();
    let mut count = 0usize;
    for point in points {
        sum += point.coords;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(Point3::from(sum / count as f32))
}
