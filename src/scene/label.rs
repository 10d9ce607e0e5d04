//! Screen-space room annotations.
//!
//! One label per room regardless of how many layers exist for it, anchored
//! at the room's polygon centroid at mid-extrusion height. Labels start
//! hidden and become visible while their room is hovered.

use crate::Point;
use crate::model::Room;

#[derive(Debug, Clone)]
pub struct Label {
    pub room_id: String,
    pub text: String,
    pub anchor: Point,
    pub visible: bool,
}

impl Label {
    /// Composes the label for one room, initially hidden.
    pub fn compose(room: &Room, room_id: &str, floor_index: usize, anchor: Point) -> Self {
        let mut lines = vec![
            format!("Type: {}", room.room_type),
            format!("Floor: {floor_index}"),
        ];
        if let Some(&[x, z]) = room.room_shape.coords.first() {
            lines.push(format!("Coords: [{x}, {z}]"));
        }
        lines.push(format!("ID: {room_id}"));
        if let Some(name) = &room.room_name {
            lines.push(format!("Name: {name}"));
        }

        Self {
            room_id: room_id.to_string(),
            text: lines.join("\n"),
            anchor,
            visible: false,
        }
    }
}
