use glam::Vec3;

/// `true` when `a` and `b` are strictly more than `distance` apart.
#[inline]
pub fn farther_than(a: Vec3, b: Vec3, distance: f32) -> bool {
    a.distance_squared(b) > distance * distance
}

/// `true` when `point` lies within `tolerance` of the plane of `tri` and its
/// projection onto that plane falls inside the triangle (edges included).
///
/// Degenerate triangles never contain anything.
pub fn point_near_triangle(point: Vec3, tri: &[Vec3; 3], tolerance: f32) -> bool {
    let [a, b, c] = *tri;
    let ab = b - a;
    let ac = c - a;
    let normal = ab.cross(ac);
    let normal_len_sq = normal.length_squared();
    if normal_len_sq <= f32::EPSILON {
        return false;
    }

    let ap = point - a;
    let plane_dist = ap.dot(normal) / normal_len_sq.sqrt();
    if plane_dist.abs() > tolerance {
        return false;
    }

    // Barycentric coordinates of the projection
    let d00 = ab.dot(ab);
    let d01 = ab.dot(ac);
    let d11 = ac.dot(ac);
    let d20 = ap.dot(ab);
    let d21 = ap.dot(ac);
    let denom = d00 * d11 - d01 * d01;
    if denom.abs() <= f32::EPSILON {
        return false;
    }
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    v >= 0.0 && w >= 0.0 && v + w <= 1.0
}

/// Component sum of absolute values.
#[inline]
pub fn manhattan_length(v: Vec3) -> f32 {
    v.x.abs() + v.y.abs() + v.z.abs()
}
