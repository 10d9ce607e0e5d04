//! Extruded room volumes.
//!
//! A room's boundary polygon is re-centered around the building center,
//! mirrored on X to match the viewing convention, and extruded along the
//! vertical axis into a solid with three face groups: a floor cap (normal
//! down), a ring of wall quads, and a ceiling cap (normal up). Material mode
//! maps one material onto each group.

use crate::Point;
use crate::geom::triangles::{TriangleIndex, triangulate_ring};
use crate::model::RoomShape;
use anyhow::{Result, anyhow};

#[derive(Debug, Clone)]
pub struct RoomSolid {
    /// Floor ring followed by ceiling ring, both in input vertex order.
    vertices: Vec<Point>,
    floor_tris: Vec<TriangleIndex>,
    wall_tris: Vec<TriangleIndex>,
    ceiling_tris: Vec<TriangleIndex>,
    centroid: Point,
}

impl RoomSolid {
    /// Builds the solid for one room.
    ///
    /// Every polygon vertex is translated by the negative of `center` with
    /// the X axis mirrored, then the translated ring is extruded from
    /// `floor_offset` up to `floor_offset + height`. The vertical placement
    /// is baked into the vertices so picking and rendering share one set of
    /// world-space coordinates.
    ///
    /// Fails for shapes with fewer than 3 points.
    pub fn extrude(
        shape: &RoomShape,
        center: (f64, f64),
        floor_offset: f64,
        height: f64,
    ) -> Result<Self> {
        let n = shape.coords.len();
        if n < 3 {
            return Err(anyhow!("Degenerate room shape: {n} points (need at least 3)"));
        }

        let (cx, cz) = center;
        let ring: Vec<(f64, f64)> = shape
            .coords
            .iter()
            .map(|&[x, z]| (-(x - cx), z - cz))
            .collect();

        let cap = triangulate_ring(&ring)?;

        let y0 = floor_offset;
        let y1 = floor_offset + height;

        let mut vertices: Vec<Point> = Vec::with_capacity(2 * n);
        vertices.extend(ring.iter().map(|&(x, z)| Point::new(x, y0, z)));
        vertices.extend(ring.iter().map(|&(x, z)| Point::new(x, y1, z)));

        // CCW in the XZ plane points down, which is what the floor wants;
        // the ceiling gets the flipped winding, shifted to the upper ring.
        let floor_tris = cap.clone();
        let ceiling_tris: Vec<TriangleIndex> = cap
            .iter()
            .map(|t| TriangleIndex(t.0 + n, t.1 + n, t.2 + n).flipped())
            .collect();

        // One quad (two triangles) per boundary edge, closing back to the
        // first point.
        let mut wall_tris: Vec<TriangleIndex> = Vec::with_capacity(2 * n);
        for i in 0..n {
            let j = (i + 1) % n;
            wall_tris.push(TriangleIndex(i, j, j + n));
            wall_tris.push(TriangleIndex(i, j + n, i + n));
        }

        // Arithmetic mean of the ring vertices, not the bbox center
        let (sx, sz) = ring
            .iter()
            .fold((0., 0.), |(sx, sz), &(x, z)| (sx + x, sz + z));
        let centroid = Point::new(sx / n as f64, floor_offset + height / 2., sz / n as f64);

        Ok(Self {
            vertices,
            floor_tris,
            wall_tris,
            ceiling_tris,
            centroid,
        })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn floor_tris(&self) -> &[TriangleIndex] {
        &self.floor_tris
    }

    pub fn wall_tris(&self) -> &[TriangleIndex] {
        &self.wall_tris
    }

    pub fn ceiling_tris(&self) -> &[TriangleIndex] {
        &self.ceiling_tris
    }

    /// All triangles of the solid (floor, walls, ceiling).
    pub fn all_triangles(&self) -> impl Iterator<Item = &TriangleIndex> {
        self.floor_tris
            .iter()
            .chain(self.wall_tris.iter())
            .chain(self.ceiling_tris.iter())
    }

    /// Polygon centroid at mid-extrusion height; the label anchor.
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Boundary edges for wireframe rendering: the bottom ring, the top
    /// ring, and one vertical per ring vertex.
    pub fn outline_edges(&self) -> Vec<(Point, Point)> {
        let n = self.vertices.len() / 2;
        let mut edges: Vec<(Point, Point)> = Vec::with_capacity(3 * n);
        for i in 0..n {
            let j = (i + 1) % n;
            edges.push((self.vertices[i], self.vertices[j]));
            edges.push((self.vertices[i + n], self.vertices[j + n]));
            edges.push((self.vertices[i], self.vertices[i + n]));
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(coords: Vec<[f64; 2]>) -> RoomShape {
        RoomShape {
            coords,
            degree: 1,
            is_closed: true,
            is_periodic: false,
        }
    }

    #[test]
    fn test_extrude_square() -> Result<()> {
        let s = shape(vec![[0., 0.], [10., 0.], [10., 10.], [0., 10.]]);
        let solid = RoomSolid::extrude(&s, (5., 5.), 0., 10.)?;

        assert_eq!(solid.vertices().len(), 8);
        assert_eq!(solid.floor_tris().len(), 2);
        assert_eq!(solid.ceiling_tris().len(), 2);
        assert_eq!(solid.wall_tris().len(), 8);
        assert_eq!(solid.all_triangles().count(), 12);
        assert_eq!(solid.outline_edges().len(), 12);
        Ok(())
    }

    #[test]
    fn test_translation_mirrors_x() -> Result<()> {
        let s = shape(vec![[0., 0.], [10., 0.], [10., 10.], [0., 10.]]);
        let solid = RoomSolid::extrude(&s, (5., 5.), 0., 10.)?;

        // [0, 0] maps to x' = -(0 - 5) = 5, z' = -5
        assert!(solid.vertices()[0].is_close(&Point::new(5., 0., -5.)));
        // [10, 0] maps to x' = -5
        assert!(solid.vertices()[1].is_close(&Point::new(-5., 0., -5.)));
        Ok(())
    }

    #[test]
    fn test_centroid_is_vertex_mean_not_bbox_center() -> Result<()> {
        // L-shape: mean of vertices differs from the bbox center
        let s = shape(vec![
            [0., 0.],
            [4., 0.],
            [4., 1.],
            [1., 1.],
            [1., 3.],
            [0., 3.],
        ]);
        let solid = RoomSolid::extrude(&s, (0., 0.), 0., 10.)?;

        let c = solid.centroid();
        // Mean x of (0,4,4,1,1,0) = 10/6, mirrored; mean z of (0,0,1,1,3,3) = 8/6
        assert!((c.x - (-10. / 6.)).abs() < 1e-12);
        assert!((c.z - 8. / 6.).abs() < 1e-12);
        assert!((c.y - 5.).abs() < 1e-12);
        // Bbox center would be (-2, 1.5)
        assert!((c.x - (-2.)).abs() > 0.1);
        Ok(())
    }

    #[test]
    fn test_centroid_independent_of_point_order() -> Result<()> {
        let coords = vec![
            [0., 0.],
            [4., 0.],
            [4., 1.],
            [1., 1.],
            [1., 3.],
            [0., 3.],
        ];
        let mut rotated = coords.clone();
        rotated.rotate_left(2);

        let a = RoomSolid::extrude(&shape(coords), (1., 1.), 0., 10.)?;
        let b = RoomSolid::extrude(&shape(rotated), (1., 1.), 0., 10.)?;
        assert!(a.centroid().is_close(&b.centroid()));
        Ok(())
    }

    #[test]
    fn test_floor_offset_is_baked_in() -> Result<()> {
        let s = shape(vec![[0., 0.], [2., 0.], [2., 2.], [0., 2.]]);
        let solid = RoomSolid::extrude(&s, (1., 1.), 30., 10.)?;

        for v in &solid.vertices()[..4] {
            assert!((v.y - 30.).abs() < 1e-12);
        }
        for v in &solid.vertices()[4..] {
            assert!((v.y - 40.).abs() < 1e-12);
        }
        assert!((solid.centroid().y - 35.).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_degenerate_shape_rejected() {
        let s = shape(vec![[0., 0.], [1., 0.]]);
        let result = RoomSolid::extrude(&s, (0., 0.), 0., 10.);
        assert!(result.is_err());
    }
}
