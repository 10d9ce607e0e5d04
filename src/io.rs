//! Building payload I/O.
//!
//! Buildings arrive as a JSON array of floors (see [`crate::model`]). A
//! malformed payload is reported as a distinct error and leaves any
//! previously loaded model untouched on the caller's side.

use crate::model::Building;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parses a building from a JSON string.
pub fn parse_building(payload: &str) -> Result<Building> {
    serde_json::from_str(payload).context("Invalid building JSON payload")
}

/// Reads a building from a JSON file.
pub fn read_building(path: &Path) -> Result<Building> {
    let payload = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    parse_building(&payload)
        .with_context(|| format!("Failed to load building from: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_ROOM_PAYLOAD: &str = r#"[
        {
            "floor_height": 10,
            "rooms": [
                {
                    "room_type": "Office",
                    "room_id": "office-1",
                    "room_shape": {
                        "coords": [[0, 0], [10, 0], [10, 10], [0, 10]],
                        "degree": 1,
                        "is_closed": true,
                        "is_periodic": false
                    },
                    "room_inner_shapes": []
                },
                {
                    "room_type": "Kitchen",
                    "room_shape": {
                        "coords": [[10, 0], [20, 0], [20, 10], [10, 10]],
                        "degree": 1,
                        "is_closed": true,
                        "is_periodic": false
                    }
                }
            ]
        }
    ]"#;

    #[test]
    fn test_parse_building() -> Result<()> {
        let building = parse_building(TWO_ROOM_PAYLOAD)?;
        assert_eq!(building.num_floors(), 1);
        assert_eq!(building.num_rooms(), 2);

        let office = &building.floors[0].rooms[0];
        assert_eq!(office.room_type, "Office");
        assert_eq!(office.room_id.as_deref(), Some("office-1"));
        assert_eq!(office.room_shape.coords.len(), 4);

        // Optional fields default
        let kitchen = &building.floors[0].rooms[1];
        assert!(kitchen.room_id.is_none());
        assert!(kitchen.room_name.is_none());
        assert!(kitchen.room_inner_shapes.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_invalid_payload() {
        assert!(parse_building("not json").is_err());
        assert!(parse_building(r#"{"floors": 3}"#).is_err());
    }

    #[test]
    fn test_read_building_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(TWO_ROOM_PAYLOAD.as_bytes())?;

        let building = read_building(file.path())?;
        assert_eq!(building.num_rooms(), 2);
        Ok(())
    }

    #[test]
    fn test_read_building_missing_file() {
        let result = read_building(Path::new("/nonexistent/building.json"));
        assert!(result.is_err());
    }
}
