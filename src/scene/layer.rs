//! Visual layers.
//!
//! A layer is one visual-mode rendering of a single room's volume. Each
//! layer owns the styles of its material instances; styles are mutated by
//! hover and mirrored into GPU materials by the renderer. The baseline
//! snapshot is captured at creation and restored when a hover ends.

use crate::Point;
use crate::config::Rgb;

/// Visual mode of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerMode {
    ColorBox,
    Material,
    Wireframe,
}

impl LayerMode {
    pub const ALL: [LayerMode; 3] = [LayerMode::ColorBox, LayerMode::Material, LayerMode::Wireframe];

    /// Stable slot index, used by the hover state's per-mode references.
    pub fn index(self) -> usize {
        match self {
            LayerMode::ColorBox => 0,
            LayerMode::Material => 1,
            LayerMode::Wireframe => 2,
        }
    }
}

/// Hover-affected properties of one material instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialStyle {
    pub opacity: f32,
    pub emissive: Rgb,
}

impl MaterialStyle {
    pub fn new(opacity: f32) -> Self {
        Self {
            opacity,
            emissive: (0, 0, 0),
        }
    }
}

/// One rendered instance of a room's geometry under one visual mode.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Index of the owning room in the scene model.
    pub room: usize,
    pub room_id: String,
    pub mode: LayerMode,
    pub floor_index: usize,
    /// Label anchor of the owning room.
    pub anchor: Point,
    /// Current styles, one per material instance. Color box and wireframe
    /// layers carry one; glass-walled material layers carry three
    /// (floor/walls/ceiling).
    pub styles: Vec<MaterialStyle>,
    baselines: Vec<MaterialStyle>,
}

impl Layer {
    /// Creates a layer and captures the baseline snapshot from the initial
    /// styles.
    pub fn new(
        room: usize,
        room_id: String,
        mode: LayerMode,
        floor_index: usize,
        anchor: Point,
        styles: Vec<MaterialStyle>,
    ) -> Self {
        let baselines = styles.clone();
        Self {
            room,
            room_id,
            mode,
            floor_index,
            anchor,
            styles,
            baselines,
        }
    }

    pub fn baselines(&self) -> &[MaterialStyle] {
        &self.baselines
    }

    /// Restores every material style to its captured baseline.
    pub fn restore_baseline(&mut self) {
        self.styles.clear();
        self.styles.extend_from_slice(&self.baselines);
    }

    /// True if the current styles equal the baseline snapshot.
    pub fn is_at_baseline(&self) -> bool {
        self.styles == self.baselines
    }
}
