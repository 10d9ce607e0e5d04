//! Ray casting for pointer picking.
//!
//! A pointer position on the canvas becomes a world-space ray through the
//! camera; the hover coordinator intersects it with the room solids to find
//! the nearest room under the cursor.

use crate::geom::solid::RoomSolid;
use crate::{Point, Vector};

/// A ray defined by an origin point and a direction vector.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray
    pub origin: Point,
    /// Direction vector (normalized)
    pub direction: Vector,
}

impl Ray {
    /// Creates a new ray from origin point and direction vector.
    ///
    /// The direction vector is automatically normalized. Returns `None` for
    /// a zero-length direction.
    pub fn new(origin: Point, direction: Vector) -> Option<Self> {
        let normalized = direction.normalize()?;
        Some(Self {
            origin,
            direction: normalized,
        })
    }

    /// Creates a ray from two points (origin to target).
    pub fn from_points(origin: Point, target: Point) -> Option<Self> {
        Self::new(origin, target - origin)
    }

    /// Returns the point along the ray at parameter t.
    pub fn point_at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Möller–Trumbore ray/triangle intersection.
    ///
    /// Returns the ray parameter `t` if the ray hits the triangle in front
    /// of its origin (`t > 0`), `None` otherwise.
    pub fn intersect_triangle(&self, p0: Point, p1: Point, p2: Point) -> Option<f64> {
        const TOL: f64 = 1e-10;

        let edge1 = p1 - p0;
        let edge2 = p2 - p0;

        let pvec = self.direction.cross(edge2);
        let det = edge1.dot(pvec);
        if det.abs() < TOL {
            return None; // Ray parallel to triangle plane
        }
        let inv_det = 1. / det;

        let tvec = self.origin - p0;
        let u = tvec.dot(pvec) * inv_det;
        if !(-TOL..=1. + TOL).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(edge1);
        let v = self.direction.dot(qvec) * inv_det;
        if v < -TOL || u + v > 1. + TOL {
            return None;
        }

        let t = edge2.dot(qvec) * inv_det;
        // Small epsilon to avoid self-intersection at the origin
        if t > TOL { Some(t) } else { None }
    }

    /// Calculates the intersection of this ray with a room solid.
    ///
    /// Returns the smallest positive `t` over all of the solid's triangles.
    pub fn intersect_solid(&self, solid: &RoomSolid) -> Option<f64> {
        let vertices = solid.vertices();
        let mut closest: Option<f64> = None;

        for tri in solid.all_triangles() {
            let hit = self.intersect_triangle(vertices[tri.0], vertices[tri.1], vertices[tri.2]);
            if let Some(t) = hit {
                match closest {
                    None => closest = Some(t),
                    Some(tc) if t < tc => closest = Some(t),
                    _ => {}
                }
            }
        }

        closest
    }
}
