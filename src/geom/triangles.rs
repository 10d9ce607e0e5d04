//! Planar polygon triangulation for the extrusion caps.
//!
//! Room boundary rings are always horizontal, so triangulation works on the
//! XZ plane directly. Ear clipping handles convex and concave simple
//! polygons in either winding.

use crate::geom::EPS;
use anyhow::{Result, anyhow};

/// Type for holding vertex indices for a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleIndex(pub usize, pub usize, pub usize);

impl TriangleIndex {
    /// Returns the triangle with reversed winding.
    pub fn flipped(&self) -> Self {
        Self(self.2, self.1, self.0)
    }
}

/// Twice the signed area of the ring (shoelace formula).
///
/// Positive for counter-clockwise order in the XZ plane.
pub fn signed_area_2(ring: &[(f64, f64)]) -> f64 {
    let n = ring.len();
    let mut area = 0.;
    for i in 0..n {
        let (x0, z0) = ring[i];
        let (x1, z1) = ring[(i + 1) % n];
        area += x0 * z1 - x1 * z0;
    }
    area
}

fn cross_2d(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

/// Strict interior test; boundary points do not count as inside.
fn is_point_inside_triangle_2d(p: (f64, f64), a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> bool {
    let d1 = cross_2d(a, b, p);
    let d2 = cross_2d(b, c, p);
    let d3 = cross_2d(c, a, p);
    (d1 > EPS && d2 > EPS && d3 > EPS) || (d1 < -EPS && d2 < -EPS && d3 < -EPS)
}

/// Triangulates a simple polygon ring via ear clipping.
///
/// Returned triangles reference indices into `ring` and are wound
/// counter-clockwise in the XZ plane regardless of the input winding.
/// Fails for rings with fewer than 3 points or rings no ear can be clipped
/// from (self-intersecting input).
pub fn triangulate_ring(ring: &[(f64, f64)]) -> Result<Vec<TriangleIndex>> {
    if ring.len() < 3 {
        return Err(anyhow!(
            "Cannot triangulate a ring with {} points",
            ring.len()
        ));
    }

    // Work on a CCW index list so ears are always positive-cross corners
    let mut indices: Vec<usize> = (0..ring.len()).collect();
    if signed_area_2(ring) < 0. {
        indices.reverse();
    }

    let mut triangles: Vec<TriangleIndex> = Vec::with_capacity(ring.len() - 2);

    while indices.len() > 3 {
        let n = indices.len();
        let mut clipped = false;

        for pos in 0..n {
            let i_prev = indices[(pos + n - 1) % n];
            let i_cur = indices[pos];
            let i_next = indices[(pos + 1) % n];

            let a = ring[i_prev];
            let b = ring[i_cur];
            let c = ring[i_next];

            // Reflex corner, not an ear
            if cross_2d(a, b, c) <= EPS {
                continue;
            }

            // Any remaining vertex strictly inside disqualifies the ear
            let contains_other = indices.iter().any(|&i| {
                i != i_prev
                    && i != i_cur
                    && i != i_next
                    && is_point_inside_triangle_2d(ring[i], a, b, c)
            });
            if contains_other {
                continue;
            }

            triangles.push(TriangleIndex(i_prev, i_cur, i_next));
            indices.remove(pos);
            clipped = true;
            break;
        }

        if !clipped {
            // Collinear corners produce zero-area ears; drop one and retry
            let n = indices.len();
            let collinear = (0..n).find(|&pos| {
                let a = ring[indices[(pos + n - 1) % n]];
                let b = ring[indices[pos]];
                let c = ring[indices[(pos + 1) % n]];
                cross_2d(a, b, c).abs() <= EPS
            });
            match collinear {
                Some(pos) => {
                    indices.remove(pos);
                }
                None => return Err(anyhow!("Ear-clipping failed, ring may self-intersect")),
            }
        }
    }

    if indices.len() == 3 {
        let t = TriangleIndex(indices[0], indices[1], indices[2]);
        // Skip a final zero-area sliver
        if cross_2d(ring[t.0], ring[t.1], ring[t.2]).abs() > EPS {
            triangles.push(t);
        }
    }

    if triangles.is_empty() {
        return Err(anyhow!("Ring has no area"));
    }

    Ok(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square() -> Result<()> {
        let ring = vec![(0., 0.), (10., 0.), (10., 10.), (0., 10.)];
        let tri = triangulate_ring(&ring)?;
        assert_eq!(tri.len(), 2);
        Ok(())
    }

    #[test]
    fn test_concave_l_shape() -> Result<()> {
        let ring = vec![
            (0., 0.),
            (4., 0.),
            (4., 1.),
            (1., 1.),
            (1., 3.),
            (0., 3.),
        ];
        let tri = triangulate_ring(&ring)?;
        assert_eq!(tri.len(), ring.len() - 2);

        // Total triangle area must match the polygon area (4*1 + 1*2 = 6)
        let area: f64 = tri
            .iter()
            .map(|t| cross_2d(ring[t.0], ring[t.1], ring[t.2]).abs() / 2.)
            .sum();
        assert!((area - 6.).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_clockwise_input_is_reoriented() -> Result<()> {
        let ccw = vec![(0., 0.), (10., 0.), (10., 10.), (0., 10.)];
        let mut cw = ccw.clone();
        cw.reverse();

        for t in triangulate_ring(&cw)? {
            assert!(cross_2d(cw[t.0], cw[t.1], cw[t.2]) > 0.);
        }
        Ok(())
    }

    #[test]
    fn test_too_few_points() {
        let ring = vec![(0., 0.), (1., 0.)];
        assert!(triangulate_ring(&ring).is_err());
    }

    #[test]
    fn test_zero_area_ring() {
        let ring = vec![(0., 0.), (1., 1.), (2., 2.)];
        assert!(triangulate_ring(&ring).is_err());
    }
}
