//! Pointer-driven hover coordination.
//!
//! The coordinator is a two-state machine: idle, or hovering exactly one
//! room. On every pointer move it picks the nearest room under the pointer
//! ray and transitions by *fully reverting* the previous highlight before
//! applying the new one. Reverting late or out of order would leave stale
//! highlight residue, so revert-then-apply is the load-bearing invariant
//! here.

use crate::Ray;
use crate::config::HoverConfig;
use crate::scene::assemble::SceneModel;
use crate::scene::layer::LayerMode;

/// Observable description of the currently hovered room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoveredRoom {
    pub id: String,
    pub room_type: String,
    pub name: Option<String>,
}

/// At most one active room, plus per-mode references to the layer currently
/// showing the highlighted appearance (for O(1) revert per mode).
///
/// Invariant: if `active` is `None`, every per-mode reference and the label
/// reference are `None` too.
#[derive(Debug, Clone, Default)]
struct HoverState {
    active: Option<String>,
    layers: [Option<usize>; 3],
    label: Option<usize>,
}

/// Owns the hover state and mutates layer styles and label visibility in
/// response to pointer events.
#[derive(Debug, Default)]
pub struct HoverCoordinator {
    state: HoverState,
}

impl HoverCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets all references without touching any scene. Called when the
    /// scene it pointed into has been torn down and rebuilt.
    pub fn reset(&mut self) {
        self.state = HoverState::default();
    }

    /// Handles a pointer movement.
    ///
    /// Picks the nearest room the ray hits. No tagged hit reverts to idle;
    /// hitting the already-active room is a no-op; anything else reverts the
    /// previous highlight first and then applies the new one.
    pub fn pointer_move(&mut self, scene: &mut SceneModel, ray: &Ray, hover: &HoverConfig) {
        let picked = scene.pick(ray).map(|(id, _)| id.to_string());

        match picked {
            None => self.revert(scene),
            Some(room_id) => {
                if self.state.active.as_deref() == Some(room_id.as_str()) {
                    return;
                }
                self.revert(scene);
                self.apply(scene, &room_id, hover);
            }
        }
    }

    /// Handles the pointer leaving the canvas: unconditional revert.
    pub fn pointer_leave(&mut self, scene: &mut SceneModel) {
        self.revert(scene);
    }

    pub fn active_room_id(&self) -> Option<&str> {
        self.state.active.as_deref()
    }

    /// Per-mode reference to the layer currently highlighted, if any.
    pub fn layer_ref(&self, mode: LayerMode) -> Option<usize> {
        self.state.layers[mode.index()]
    }

    /// The observable hovered-room value for the UI.
    pub fn hovered(&self, scene: &SceneModel) -> Option<HoveredRoom> {
        let id = self.state.active.as_deref()?;
        let handles = scene.handles(id)?;
        let room = &scene.rooms()[handles.room];
        Some(HoveredRoom {
            id: room.room_id.clone(),
            room_type: room.room_type.clone(),
            name: room.room_name.clone(),
        })
    }

    /// Restores every referenced layer to its baseline, hides the previous
    /// label, and clears all references.
    fn revert(&mut self, scene: &mut SceneModel) {
        for slot in self.state.layers.iter_mut() {
            if let Some(layer_index) = slot.take() {
                scene.layers[layer_index].restore_baseline();
            }
        }
        if let Some(label_index) = self.state.label.take() {
            scene.labels[label_index].visible = false;
        }
        self.state.active = None;
    }

    /// Applies the highlight to every layer of `room_id` and shows its
    /// label. Must only run on a fully reverted state.
    fn apply(&mut self, scene: &mut SceneModel, room_id: &str, hover: &HoverConfig) {
        let Some(handles) = scene.handles(room_id).copied() else {
            return;
        };

        for mode in LayerMode::ALL {
            let Some(layer_index) = handles.layers[mode.index()] else {
                continue;
            };
            let layer = &mut scene.layers[layer_index];
            match mode {
                LayerMode::ColorBox => {
                    for style in layer.styles.iter_mut() {
                        style.opacity = hover.color_box_opacity;
                        style.emissive = hover.color_box_emissive;
                    }
                }
                LayerMode::Material => {
                    // Emissive tint on every material clone, singleton or
                    // floor/walls/ceiling triple
                    for style in layer.styles.iter_mut() {
                        style.emissive = hover.material_emissive;
                    }
                }
                LayerMode::Wireframe => {
                    for style in layer.styles.iter_mut() {
                        style.opacity = hover.wireframe_opacity;
                    }
                }
            }
            self.state.layers[mode.index()] = Some(layer_index);
        }

        if let Some(label_index) = handles.label {
            scene.labels[label_index].visible = true;
            self.state.label = Some(label_index);
        }

        self.state.active = Some(room_id.to_string());
    }
}
