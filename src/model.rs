//! In-memory building model matching the JSON wire format.
//!
//! A building is an ordered list of floors, each holding an ordered list of
//! rooms. Floors are stacked by index at a fixed extrusion height; the
//! `floor_height` field from the payload is preserved but not used for
//! stacking.

use serde::{Deserialize, Serialize};

/// Boundary polygon of a single room, as delivered in the payload.
///
/// `degree`, `is_closed` and `is_periodic` describe the source curve and are
/// carried through without being consumed by geometry construction. The first
/// and last coordinate are connected implicitly during extrusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomShape {
    pub coords: Vec<[f64; 2]>,
    #[serde(default)]
    pub degree: u32,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub is_periodic: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub room_type: String,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub room_name: Option<String>,
    pub room_shape: RoomShape,
    /// Secondary boundary shapes. Reserved data: stored, never used for
    /// geometry (no hole subtraction).
    #[serde(default)]
    pub room_inner_shapes: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floor {
    pub floor_height: f64,
    pub rooms: Vec<Room>,
}

/// An ordered stack of floors, floor 0 at the base.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Building {
    pub floors: Vec<Floor>,
}

impl Building {
    pub fn num_floors(&self) -> usize {
        self.floors.len()
    }

    pub fn num_rooms(&self) -> usize {
        self.floors.iter().map(|f| f.rooms.len()).sum()
    }
}

impl Room {
    /// Returns the room identifier, falling back to a deterministic
    /// derivation from the room's position in the building.
    ///
    /// Two rebuilds of the same data always agree on the fallback id.
    pub fn resolved_id(&self, floor_index: usize, room_index: usize) -> String {
        match &self.room_id {
            Some(id) => id.clone(),
            None => format!("{floor_index}:{room_index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_room(id: Option<&str>) -> Room {
        Room {
            room_type: "Office".to_string(),
            room_id: id.map(|s| s.to_string()),
            room_name: None,
            room_shape: RoomShape {
                coords: vec![[0., 0.], [1., 0.], [1., 1.]],
                degree: 1,
                is_closed: true,
                is_periodic: false,
            },
            room_inner_shapes: Vec::new(),
        }
    }

    #[test]
    fn test_resolved_id_present() {
        let room = sample_room(Some("r-42"));
        assert_eq!(room.resolved_id(3, 7), "r-42");
    }

    #[test]
    fn test_resolved_id_fallback_is_deterministic() {
        let room = sample_room(None);
        assert_eq!(room.resolved_id(3, 7), "3:7");
        assert_eq!(room.resolved_id(3, 7), "3:7");
        assert_eq!(room.resolved_id(0, 0), "0:0");
    }

    #[test]
    fn test_room_counts() {
        let floor = Floor {
            floor_height: 10.,
            rooms: vec![sample_room(None), sample_room(Some("a"))],
        };
        let building = Building {
            floors: vec![floor.clone(), floor],
        };
        assert_eq!(building.num_floors(), 2);
        assert_eq!(building.num_rooms(), 4);
    }
}
