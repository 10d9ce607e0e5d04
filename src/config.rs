//! Viewer configuration.
//!
//! Everything the geometry and hover engine treats as an injected constant
//! lives here: the per-floor extrusion height, the room-type color table,
//! the glass-walled room set, camera/lighting parameters, hover effect
//! values and the default mode toggles.

/// RGB color tuple with 0..=255 channels.
pub type Rgb = (u8, u8, u8);

/// Which visual layers (and labels) the scene assembler produces.
///
/// Read on every rebuild; toggling any field triggers a full rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeToggles {
    pub color_box: bool,
    pub material: bool,
    pub wireframe: bool,
    pub labels: bool,
}

impl Default for ModeToggles {
    fn default() -> Self {
        Self {
            color_box: true,
            material: false,
            wireframe: false,
            labels: true,
        }
    }
}

/// Perspective camera parameters.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Initial position as multiples of (max horizontal dimension,
    /// building height, max horizontal dimension).
    pub position_multiplier: (f32, f32, f32),
}

/// Ambient + directional light parameters.
#[derive(Debug, Clone, Copy)]
pub struct LightingConfig {
    pub ambient_color: Rgb,
    pub ambient_intensity: f32,
    pub directional_color: Rgb,
    pub directional_intensity: f32,
    pub directional_position: (f32, f32, f32),
}

/// Highlight values applied while a room is hovered.
#[derive(Debug, Clone, Copy)]
pub struct HoverConfig {
    pub color_box_opacity: f32,
    pub color_box_emissive: Rgb,
    pub material_emissive: Rgb,
    pub wireframe_opacity: f32,
}

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Extrusion height of one floor; also the per-floor stacking offset.
    pub floor_height: f64,
    pub canvas_size: (u32, u32),

    /// Room type to flat color, for color box mode.
    pub room_colors: Vec<(String, Rgb)>,
    /// Color box color for room types missing from the table.
    pub fallback_room_color: Rgb,
    pub color_box_base_opacity: f32,

    /// Room types rendered with glass walls in material mode.
    /// Matched case-insensitively.
    pub glass_walled_types: Vec<String>,
    pub glass_base_opacity: f32,
    pub wireframe_base_opacity: f32,

    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub hover: HoverConfig,
    pub modes: ModeToggles,
}

impl ViewerConfig {
    pub fn new() -> Self {
        let room_colors = [
            ("Office", (0x87, 0xCE, 0xEB)),
            ("Kitchen", (0xFF, 0xA0, 0x7A)),
            ("Restroom", (0x98, 0xFB, 0x98)),
            ("Elevator Shaft", (0xDD, 0xA0, 0xDD)),
            ("Stairway", (0xF0, 0xE6, 0x8C)),
            ("Corridor & Elevator Lobby", (0xFF, 0xE4, 0xE1)),
            ("Mechanical Shaft", (0xB8, 0x86, 0x0B)),
            ("Electrical Room", (0xCD, 0x85, 0x3F)),
            ("Entry Lobby", (0xAD, 0xD8, 0xE6)),
        ]
        .into_iter()
        .map(|(name, rgb)| (name.to_string(), rgb))
        .collect();

        Self {
            floor_height: 10.,
            canvas_size: (800, 600),

            room_colors,
            fallback_room_color: (0x80, 0x80, 0x80),
            color_box_base_opacity: 0.5,

            glass_walled_types: vec!["office".to_string(), "entry lobby".to_string()],
            glass_base_opacity: 0.3,
            wireframe_base_opacity: 0.1,

            camera: CameraConfig {
                fov_deg: 75.,
                near: 0.1,
                far: 1000.,
                position_multiplier: (1.5, 1.2, 1.5),
            },
            lighting: LightingConfig {
                ambient_color: (255, 255, 255),
                ambient_intensity: 0.5,
                directional_color: (255, 255, 255),
                directional_intensity: 0.5,
                directional_position: (5., 100., 50.),
            },
            hover: HoverConfig {
                color_box_opacity: 1.0,
                color_box_emissive: (0x22, 0x22, 0x22),
                material_emissive: (0x22, 0x22, 0x22),
                wireframe_opacity: 0.5,
            },
            modes: ModeToggles::default(),
        }
    }

    /// Flat color for a room type, falling back to neutral gray.
    pub fn room_color(&self, room_type: &str) -> Rgb {
        self.room_colors
            .iter()
            .find(|(name, _)| name == room_type)
            .map(|&(_, rgb)| rgb)
            .unwrap_or(self.fallback_room_color)
    }

    /// Whether a room type gets glass walls in material mode.
    pub fn is_glass_walled(&self, room_type: &str) -> bool {
        let lower = room_type.to_lowercase();
        self.glass_walled_types.iter().any(|t| *t == lower)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_color_lookup() {
        let config = ViewerConfig::new();
        assert_eq!(config.room_color("Office"), (0x87, 0xCE, 0xEB));
        assert_eq!(config.room_color("Broom Closet"), (0x80, 0x80, 0x80));
    }

    #[test]
    fn test_glass_walled_is_case_insensitive() {
        let config = ViewerConfig::new();
        assert!(config.is_glass_walled("Office"));
        assert!(config.is_glass_walled("ENTRY LOBBY"));
        assert!(!config.is_glass_walled("Kitchen"));
    }

    #[test]
    fn test_default_modes() {
        let modes = ModeToggles::default();
        assert!(modes.color_box);
        assert!(!modes.material);
        assert!(!modes.wireframe);
        assert!(modes.labels);
    }
}
