//! Horizontal extent of a whole building.
//!
//! The bounds are used to compute the center point that room geometry is
//! re-centered around. Only the X/Z plane matters; the vertical axis is
//! governed by floor stacking.

use crate::model::Building;

/// Horizontal (X/Z) bounding extent over every vertex of every room shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Bounds {
    /// Scans all rooms across all floors. The result is independent of the
    /// order of floors, rooms and vertices.
    ///
    /// Returns `None` for a building with no vertices at all.
    pub fn of_building(building: &Building) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;
        for floor in &building.floors {
            for room in &floor.rooms {
                for &[x, z] in &room.room_shape.coords {
                    bounds = Some(match bounds {
                        None => Bounds {
                            min_x: x,
                            max_x: x,
                            min_z: z,
                            max_z: z,
                        },
                        Some(b) => Bounds {
                            min_x: b.min_x.min(x),
                            max_x: b.max_x.max(x),
                            min_z: b.min_z.min(z),
                            max_z: b.max_z.max(z),
                        },
                    });
                }
            }
        }
        bounds
    }

    /// Center of the extent in the XZ plane.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.,
            (self.min_z + self.max_z) / 2.,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }

    /// Larger of the two horizontal dimensions, used for camera framing.
    pub fn max_dimension(&self) -> f64 {
        self.width().max(self.depth())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Floor, Room, RoomShape};

    fn room(coords: Vec<[f64; 2]>) -> Room {
        Room {
            room_type: "Office".to_string(),
            room_id: None,
            room_name: None,
            room_shape: RoomShape {
                coords,
                degree: 1,
                is_closed: true,
                is_periodic: false,
            },
            room_inner_shapes: Vec::new(),
        }
    }

    fn building(floors: Vec<Vec<Room>>) -> Building {
        Building {
            floors: floors
                .into_iter()
                .map(|rooms| Floor {
                    floor_height: 10.,
                    rooms,
                })
                .collect(),
        }
    }

    #[test]
    fn test_bounds_over_two_floors() {
        let b = building(vec![
            vec![room(vec![[0., 0.], [10., 0.], [10., 5.]])],
            vec![room(vec![[-2., 1.], [3., 8.], [4., 4.]])],
        ]);
        let bounds = Bounds::of_building(&b).unwrap();
        assert_eq!(bounds.min_x, -2.);
        assert_eq!(bounds.max_x, 10.);
        assert_eq!(bounds.min_z, 0.);
        assert_eq!(bounds.max_z, 8.);
        assert_eq!(bounds.center(), (4., 4.));
        assert_eq!(bounds.max_dimension(), 12.);
    }

    #[test]
    fn test_bounds_permutation_invariant() {
        let r1 = vec![[0., 0.], [10., 0.], [10., 5.]];
        let r2 = vec![[-2., 1.], [3., 8.], [4., 4.]];

        let original = building(vec![vec![room(r1.clone())], vec![room(r2.clone())]]);

        // Swap floors, swap rooms into one floor, reverse vertex order
        let mut r1_rev = r1;
        r1_rev.reverse();
        let permuted = building(vec![vec![room(r2), room(r1_rev)], vec![]]);

        assert_eq!(
            Bounds::of_building(&original).unwrap(),
            Bounds::of_building(&permuted).unwrap()
        );
    }

    #[test]
    fn test_bounds_empty_building() {
        let b = building(vec![vec![]]);
        assert!(Bounds::of_building(&b).is_none());
    }
}
