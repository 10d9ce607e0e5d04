//! GPU mirrors of scene layers.
//!
//! Each scene layer gets one GPU counterpart holding its meshes and cloned
//! materials. Hover mutates the scene-side styles only; `sync` copies them
//! into the GPU materials once per frame, so the GPU side stays a write-only
//! mirror of the scene model.

use crate::config::{Rgb, ViewerConfig};
use crate::geom::solid::RoomSolid;
use crate::geom::triangles::TriangleIndex;
use crate::scene::assemble::SceneModel;
use crate::scene::layer::LayerMode;
use anyhow::Result;
use three_d::{
    ColorMaterial, Context, CpuMaterial, CpuMesh, Cull, Gm, Indices, InnerSpace, InstancedMesh,
    Instances, Mat4, Mesh, Object, PhysicalMaterial, Positions, Quat, Srgba, vec3,
};

fn alpha_u8(opacity: f32) -> u8 {
    (opacity.clamp(0., 1.) * 255.) as u8
}

fn srgba(rgb: Rgb, opacity: f32) -> Srgba {
    Srgba::new(rgb.0, rgb.1, rgb.2, alpha_u8(opacity))
}

/// Builds a CPU mesh for one face group of a room solid.
fn cpu_mesh(solid: &RoomSolid, tris: &[TriangleIndex]) -> CpuMesh {
    let mut cpu = CpuMesh {
        positions: Positions::F64(
            solid
                .vertices()
                .iter()
                .map(|p| vec3(p.x, p.y, p.z))
                .collect(),
        ),
        indices: Indices::U32(
            tris.iter()
                .flat_map(|t| [t.0 as u32, t.1 as u32, t.2 as u32])
                .collect(),
        ),
        ..Default::default()
    };
    cpu.compute_normals();
    cpu
}

fn physical_part(
    context: &Context,
    solid: &RoomSolid,
    tris: &[TriangleIndex],
    albedo: Srgba,
    metallic: f32,
    roughness: f32,
    transparent: bool,
) -> Gm<Mesh, PhysicalMaterial> {
    let cpu_material = CpuMaterial {
        albedo,
        metallic,
        roughness,
        ..Default::default()
    };
    let mut material = if transparent {
        PhysicalMaterial::new_transparent(context, &cpu_material)
    } else {
        PhysicalMaterial::new_opaque(context, &cpu_material)
    };
    material.render_states.cull = Cull::None;

    Gm::new(Mesh::new(context, &cpu_mesh(solid, tris)), material)
}

/// Transform placing a unit-length X-axis cylinder between two points.
fn edge_transform(p1: three_d::Vec3, p2: three_d::Vec3) -> Mat4 {
    Mat4::from_translation(p1)
        * Into::<Mat4>::into(Quat::from_arc(
            vec3(1.0, 0.0, 0.0),
            (p2 - p1).normalize(),
            None,
        ))
        * Mat4::from_nonuniform_scale((p2 - p1).magnitude(), 1.0, 1.0)
}

/// One scene layer's GPU objects.
pub enum GpuLayer {
    /// Color box and material layers: one mesh part per material instance.
    Solid {
        layer: usize,
        parts: Vec<Gm<Mesh, PhysicalMaterial>>,
    },
    /// Wireframe layers: instanced thin cylinders along the outline edges.
    Edges {
        layer: usize,
        gm: Gm<InstancedMesh, ColorMaterial>,
    },
}

impl GpuLayer {
    /// Builds the GPU counterpart of `scene.layers[layer_index]`.
    ///
    /// All materials are fresh instances owned by this layer; nothing is
    /// shared between rooms.
    pub fn build(
        context: &Context,
        scene: &SceneModel,
        layer_index: usize,
        config: &ViewerConfig,
        edge_radius: f32,
    ) -> Result<Self> {
        let layer = &scene.layers[layer_index];
        let room = &scene.rooms()[layer.room];
        let solid = &room.solid;

        Ok(match layer.mode {
            LayerMode::ColorBox => {
                let all: Vec<TriangleIndex> = solid.all_triangles().copied().collect();
                let color = srgba(config.room_color(&room.room_type), layer.styles[0].opacity);
                let part = physical_part(context, solid, &all, color, 0.0, 1.0, true);
                GpuLayer::Solid {
                    layer: layer_index,
                    parts: vec![part],
                }
            }
            LayerMode::Material => {
                let concrete = |tris: &[TriangleIndex]| {
                    physical_part(
                        context,
                        solid,
                        tris,
                        Srgba::new_opaque(0xCC, 0xCC, 0xCC),
                        0.1,
                        0.8,
                        false,
                    )
                };
                let parts = if layer.styles.len() == 3 {
                    // Glass-walled: opaque floor, glass walls, opaque ceiling
                    let glass = physical_part(
                        context,
                        solid,
                        solid.wall_tris(),
                        Srgba::new(255, 255, 255, alpha_u8(layer.styles[1].opacity)),
                        0.1,
                        0.1,
                        true,
                    );
                    vec![
                        concrete(solid.floor_tris()),
                        glass,
                        concrete(solid.ceiling_tris()),
                    ]
                } else {
                    let all: Vec<TriangleIndex> = solid.all_triangles().copied().collect();
                    vec![concrete(&all)]
                };
                GpuLayer::Solid {
                    layer: layer_index,
                    parts,
                }
            }
            LayerMode::Wireframe => {
                let mut cylinder = CpuMesh::cylinder(12);
                cylinder
                    .transform(Mat4::from_nonuniform_scale(1.0, edge_radius, edge_radius))?;

                let transformations = solid
                    .outline_edges()
                    .iter()
                    .map(|(a, b)| {
                        edge_transform(
                            vec3(a.x as f32, a.y as f32, a.z as f32),
                            vec3(b.x as f32, b.y as f32, b.z as f32),
                        )
                    })
                    .collect::<Vec<Mat4>>();
                let instances = Instances {
                    transformations,
                    ..Default::default()
                };

                let material = ColorMaterial::new_transparent(
                    context,
                    &CpuMaterial {
                        albedo: Srgba::new(0, 0, 0, alpha_u8(layer.styles[0].opacity)),
                        ..Default::default()
                    },
                );

                GpuLayer::Edges {
                    layer: layer_index,
                    gm: Gm::new(InstancedMesh::new(context, &instances, &cylinder), material),
                }
            }
        })
    }

    /// Copies the scene layer's current styles into the GPU materials.
    pub fn sync(&mut self, scene: &SceneModel) {
        match self {
            GpuLayer::Solid { layer, parts } => {
                let styles = &scene.layers[*layer].styles;
                for (part, style) in parts.iter_mut().zip(styles) {
                    part.material.albedo.a = alpha_u8(style.opacity);
                    let (r, g, b) = style.emissive;
                    part.material.emissive = Srgba::new_opaque(r, g, b);
                }
            }
            GpuLayer::Edges { layer, gm } => {
                gm.material.color.a = alpha_u8(scene.layers[*layer].styles[0].opacity);
            }
        }
    }

    /// Collects the renderable objects of this layer.
    pub fn collect_objects<'a>(&'a self, out: &mut Vec<&'a dyn Object>) {
        match self {
            GpuLayer::Solid { parts, .. } => {
                for part in parts {
                    out.push(part);
                }
            }
            GpuLayer::Edges { gm, .. } => out.push(gm),
        }
    }
}

/// Builds GPU mirrors for every layer in the scene.
pub fn build_gpu_layers(
    context: &Context,
    scene: &SceneModel,
    config: &ViewerConfig,
) -> Result<Vec<GpuLayer>> {
    // Edge thickness scales with the building footprint
    let edge_radius = scene
        .bounds
        .map(|b| (b.max_dimension() as f32) * 0.002)
        .unwrap_or(0.01)
        .max(1e-3);

    (0..scene.layers.len())
        .map(|i| GpuLayer::build(context, scene, i, config, edge_radius))
        .collect()
}
