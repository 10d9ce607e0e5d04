pub mod bounds;
pub mod point;
pub mod ray;
pub mod solid;
pub mod triangles;
pub mod vector;

/// Geometric precision
pub(crate) const EPS: f64 = 1e-10;
