//! Scene assembly.
//!
//! Turns a building into the full scene model: bounds, one extruded solid
//! per room, the enabled layers, one label per room, and an id-keyed index
//! mapping each room to its layers and label. The model is rebuilt wholesale
//! whenever the building data or the enabled modes change; there is no
//! incremental diffing.

use crate::Ray;
use crate::config::ViewerConfig;
use crate::geom::bounds::Bounds;
use crate::geom::solid::RoomSolid;
use crate::model::Building;
use crate::scene::label::Label;
use crate::scene::layer::{Layer, LayerMode, MaterialStyle};
use log::warn;
use std::collections::HashMap;

/// One room's share of the scene: identity, metadata and picking geometry.
#[derive(Debug, Clone)]
pub struct SceneRoom {
    pub room_id: String,
    pub room_type: String,
    pub room_name: Option<String>,
    pub floor_index: usize,
    pub solid: RoomSolid,
}

/// Index entry: where to find a room's layers and label in O(1).
#[derive(Debug, Clone, Copy)]
pub struct RoomHandles {
    pub room: usize,
    /// Layer index per mode slot ([`LayerMode::index`]); at most one layer
    /// per mode per room.
    pub layers: [Option<usize>; 3],
    pub label: Option<usize>,
}

impl RoomHandles {
    fn empty(room: usize) -> Self {
        Self {
            room,
            layers: [None; 3],
            label: None,
        }
    }

    pub fn has_any_layer(&self) -> bool {
        self.layers.iter().any(|l| l.is_some())
    }
}

#[derive(Debug, Clone)]
pub struct SceneModel {
    pub bounds: Option<Bounds>,
    rooms: Vec<SceneRoom>,
    pub layers: Vec<Layer>,
    pub labels: Vec<Label>,
    index: HashMap<String, RoomHandles>,
    num_floors: usize,
    floor_height: f64,
}

impl SceneModel {
    /// An empty scene; picking against it is a no-op.
    pub fn empty() -> Self {
        Self {
            bounds: None,
            rooms: Vec::new(),
            layers: Vec::new(),
            labels: Vec::new(),
            index: HashMap::new(),
            num_floors: 0,
            floor_height: 0.,
        }
    }

    /// Builds the scene for `building` with the modes enabled in `config`.
    ///
    /// Rooms with degenerate shapes (fewer than 3 points, or no area) are
    /// skipped with a warning; the rest of the building still loads.
    pub fn build(building: &Building, config: &ViewerConfig) -> Self {
        let bounds = Bounds::of_building(building);
        let center = match bounds {
            Some(b) => b.center(),
            None => (0., 0.),
        };

        let mut scene = Self {
            bounds,
            rooms: Vec::new(),
            layers: Vec::new(),
            labels: Vec::new(),
            index: HashMap::new(),
            num_floors: building.num_floors(),
            floor_height: config.floor_height,
        };

        for (floor_index, floor) in building.floors.iter().enumerate() {
            // Floors stack by index, not by the stored height field
            let floor_offset = floor_index as f64 * config.floor_height;

            for (room_index, room) in floor.rooms.iter().enumerate() {
                let room_id = room.resolved_id(floor_index, room_index);

                let solid = match RoomSolid::extrude(
                    &room.room_shape,
                    center,
                    floor_offset,
                    config.floor_height,
                ) {
                    Ok(solid) => solid,
                    Err(err) => {
                        warn!("Skipping room '{room_id}' on floor {floor_index}: {err:#}");
                        continue;
                    }
                };

                if scene.index.contains_key(&room_id) {
                    warn!("Duplicate room id '{room_id}', keeping the first occurrence");
                    continue;
                }

                let anchor = solid.centroid();
                let room_slot = scene.rooms.len();
                let mut handles = RoomHandles::empty(room_slot);

                if config.modes.color_box {
                    handles.layers[LayerMode::ColorBox.index()] = Some(scene.layers.len());
                    scene.layers.push(Layer::new(
                        room_slot,
                        room_id.clone(),
                        LayerMode::ColorBox,
                        floor_index,
                        anchor,
                        vec![MaterialStyle::new(config.color_box_base_opacity)],
                    ));
                }

                if config.modes.material {
                    // Glass-walled rooms own three material instances mapped
                    // to the floor/walls/ceiling face groups; everything else
                    // gets a single opaque one. Styles are per room, never
                    // shared, since hover mutation is destructive.
                    let styles = if config.is_glass_walled(&room.room_type) {
                        vec![
                            MaterialStyle::new(1.0),
                            MaterialStyle::new(config.glass_base_opacity),
                            MaterialStyle::new(1.0),
                        ]
                    } else {
                        vec![MaterialStyle::new(1.0)]
                    };
                    handles.layers[LayerMode::Material.index()] = Some(scene.layers.len());
                    scene.layers.push(Layer::new(
                        room_slot,
                        room_id.clone(),
                        LayerMode::Material,
                        floor_index,
                        anchor,
                        styles,
                    ));
                }

                if config.modes.wireframe {
                    handles.layers[LayerMode::Wireframe.index()] = Some(scene.layers.len());
                    scene.layers.push(Layer::new(
                        room_slot,
                        room_id.clone(),
                        LayerMode::Wireframe,
                        floor_index,
                        anchor,
                        vec![MaterialStyle::new(config.wireframe_base_opacity)],
                    ));
                }

                if config.modes.labels {
                    handles.label = Some(scene.labels.len());
                    scene
                        .labels
                        .push(Label::compose(room, &room_id, floor_index, anchor));
                }

                scene.rooms.push(SceneRoom {
                    room_id: room_id.clone(),
                    room_type: room.room_type.clone(),
                    room_name: room.room_name.clone(),
                    floor_index,
                    solid,
                });
                scene.index.insert(room_id, handles);
            }
        }

        scene
    }

    pub fn rooms(&self) -> &[SceneRoom] {
        &self.rooms
    }

    pub fn handles(&self, room_id: &str) -> Option<&RoomHandles> {
        self.index.get(room_id)
    }

    pub fn num_floors(&self) -> usize {
        self.num_floors
    }

    /// Total extruded height of the building.
    pub fn building_height(&self) -> f64 {
        self.num_floors as f64 * self.floor_height
    }

    /// Casts a ray into the scene and returns the nearest room that owns at
    /// least one layer, together with the ray parameter of the hit.
    ///
    /// Geometry without layers (e.g. a room present only as a label) is not
    /// pickable. Picking an empty scene returns `None`.
    pub fn pick(&self, ray: &Ray) -> Option<(&str, f64)> {
        let mut closest: Option<(&str, f64)> = None;

        for handles in self.index.values() {
            if !handles.has_any_layer() {
                continue;
            }
            let room = &self.rooms[handles.room];
            if let Some(t) = ray.intersect_solid(&room.solid) {
                match closest {
                    None => closest = Some((&room.room_id, t)),
                    Some((_, tc)) if t < tc => closest = Some((&room.room_id, t)),
                    _ => {}
                }
            }
        }

        closest
    }
}
