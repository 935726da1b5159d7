//! Range correction: widen the projector so displaced waves still cover the
//! visible part of the ocean.
//!
//! The grid is projected onto a flat plane, but the waves occupy a band
//! around it. Every point of the camera frustum that can hold a wave is
//! flattened onto the plane and pushed through the projector; the bounding
//! box of those screen positions becomes the range matrix. Only vertical
//! displacement is accounted for.

use glam::{Mat4, Vec3, Vec4};

/// Clip-space corners of the view frustum, near plane first.
const FRUSTUM_CORNERS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

/// Corner pairs forming the 12 frustum edges.
const FRUSTUM_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Smallest screen extent accepted for a range box.
const MIN_EXTENT: f32 = 1e-6;

/// World-space frustum corners from an inverse view-projection matrix.
pub fn frustum_corners(inverse_view_proj: Mat4) -> [Vec3; 8] {
    FRUSTUM_CORNERS.map(|c| inverse_view_proj.project_point3(c))
}

/// Intersection of segment `a→b` with the plane `n·p = d`.
///
/// Parametrised as `a + t·(b − a)`; only `t ∈ (0, 1]` counts.
pub fn segment_plane_intersection(a: Vec3, b: Vec3, n: Vec3, d: f32) -> Option<Vec3> {
    let ab = b - a;
    let denom = n.dot(ab);
    if denom == 0.0 {
        return None;
    }

    let t = (d - n.dot(a)) / denom;
    if t > 0.0 && t <= 1.0 {
        Some(a + ab * t)
    } else {
        None
    }
}

/// Frustum corners inside `[level − range, level + range]` plus every edge
/// crossing of the two band planes.
pub fn band_points(corners: &[Vec3; 8], level: f32, range: f32) -> Vec<Vec3> {
    let top = level + range;
    let bottom = level - range;

    let mut points: Vec<Vec3> = corners
        .iter()
        .copied()
        .filter(|c| c.y <= top && c.y >= bottom)
        .collect();

    for &(i, j) in &FRUSTUM_EDGES {
        let (p0, p1) = (corners[i], corners[j]);
        if let Some(q) = segment_plane_intersection(p0, p1, Vec3::Y, top) {
            points.push(q);
        }
        if let Some(q) = segment_plane_intersection(p0, p1, Vec3::Y, bottom) {
            points.push(q);
        }
    }

    points
}

/// Range matrix mapping the unit square onto the screen bounds of `points`
/// flattened to the plane at `level`.
///
/// The inverse of the result remaps `[xmin, xmax]×[ymin, ymax]` to
/// `[0, 1]×[0, 1]`. `None` when nothing usable is left: no points, only
/// non-finite projections, or a box with no area.
pub fn range_from_points(points: &[Vec3], projector_vp: Mat4, level: f32) -> Option<Mat4> {
    let mut min = glam::Vec2::splat(f32::INFINITY);
    let mut max = glam::Vec2::splat(f32::NEG_INFINITY);

    for p in points {
        let q = projector_vp * Vec4::new(p.x, level, p.z, 1.0);
        let screen = q.truncate().truncate() / q.w;
        if !screen.is_finite() {
            continue;
        }
        min = min.min(screen);
        max = max.max(screen);
    }

    let extent = max - min;
    if !extent.is_finite() || extent.x < MIN_EXTENT || extent.y < MIN_EXTENT {
        return None;
    }

    Some(Mat4::from_cols(
        Vec4::new(extent.x, 0.0, 0.0, 0.0),
        Vec4::new(0.0, extent.y, 0.0, 0.0),
        Vec4::Z,
        Vec4::new(min.x, min.y, 0.0, 1.0),
    ))
}
