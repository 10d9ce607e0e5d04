//! Interactive viewer window.
//!
//! Owns the render loop: orbit camera, lights, the GPU mirrors of the scene
//! layers, the egui toolbar (mode toggles, hovered-room readout) and the
//! screen-anchored room labels. Pointer events feed the hover coordinator;
//! toggling a mode tears the scene down and rebuilds it synchronously.

use crate::config::{Rgb, ViewerConfig};
use crate::draw::materials::{GpuLayer, build_gpu_layers};
use crate::model::Building;
use crate::scene::assemble::SceneModel;
use crate::scene::hover::HoverCoordinator;
use crate::{Point, Ray, Vector};
use anyhow::Result;
use three_d::control::OrbitControl;
use three_d::{
    AmbientLight, Camera, ClearState, DirectionalLight, Event, FrameOutput, GUI, InnerSpace,
    Object, Srgba, Vec3, Viewport, Window, WindowSettings, degrees, vec3,
};

fn srgb(rgb: Rgb) -> Srgba {
    Srgba::new_opaque(rgb.0, rgb.1, rgb.2)
}

/// Projects a world-space point to egui screen coordinates.
///
/// Returns `None` for points behind the camera.
fn project_to_screen(
    camera: &Camera,
    point: Point,
    viewport: Viewport,
    device_pixel_ratio: f32,
) -> Option<(f32, f32)> {
    let clip = camera.projection()
        * camera.view()
        * vec3(point.x as f32, point.y as f32, point.z as f32).extend(1.0);
    if clip.w <= 0. {
        return None;
    }
    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    let x = (ndc_x * 0.5 + 0.5) * viewport.width as f32 / device_pixel_ratio;
    let y = (1.0 - (ndc_y * 0.5 + 0.5)) * viewport.height as f32 / device_pixel_ratio;
    Some((x, y))
}

/// Pointer ray through the camera at the given pixel.
fn pointer_ray(camera: &Camera, position: impl Into<three_d::PhysicalPoint> + Copy) -> Option<Ray> {
    let origin = camera.position_at_pixel(position);
    let direction = camera.view_direction_at_pixel(position);
    Ray::new(
        Point::new(origin.x as f64, origin.y as f64, origin.z as f64),
        Vector::new(
            direction.x as f64,
            direction.y as f64,
            direction.z as f64,
        ),
    )
}

/// Opens the viewer window for `building` and blocks until it is closed.
pub fn run_viewer(building: Building, config: ViewerConfig) -> Result<()> {
    let mut config = config;

    let window = Window::new(WindowSettings {
        title: "Building viewer".to_string(),
        max_size: Some(config.canvas_size),
        ..Default::default()
    })?;
    let context = window.gl();

    let mut scene = SceneModel::build(&building, &config);
    let mut gpu: Vec<GpuLayer> = build_gpu_layers(&context, &scene, &config)?;
    let mut coordinator = HoverCoordinator::new();

    // Camera framing adapts to the building extent
    let max_dimension = scene.bounds.map(|b| b.max_dimension()).unwrap_or(10.) as f32;
    let building_height = scene.building_height() as f32;
    let (mx, my, mz) = config.camera.position_multiplier;
    let eye: Vec3 = vec3(
        max_dimension * mx,
        building_height * my,
        max_dimension * mz,
    );
    let target: Vec3 = vec3(0., building_height / 2., 0.);

    let mut camera = Camera::new_perspective(
        window.viewport(),
        eye,
        target,
        vec3(0., 1., 0.),
        degrees(config.camera.fov_deg),
        config.camera.near,
        config.camera.far.max(max_dimension * 10.),
    );
    let mut control = OrbitControl::new(
        target,
        max_dimension * 0.2,
        config.camera.far.max(max_dimension * 10.),
    );

    let lighting = config.lighting;
    let ambient = AmbientLight::new(
        &context,
        lighting.ambient_intensity,
        srgb(lighting.ambient_color),
    );
    let (lx, ly, lz) = lighting.directional_position;
    let directional = DirectionalLight::new(
        &context,
        lighting.directional_intensity,
        srgb(lighting.directional_color),
        vec3(-lx, -ly, -lz).normalize(),
    );

    let mut gui = GUI::new(&context);
    let mut modes = config.modes;

    window.render_loop(move |mut frame_input| {
        camera.set_viewport(frame_input.viewport);
        let viewport = frame_input.viewport;
        let device_pixel_ratio = frame_input.device_pixel_ratio;

        let mut rebuild = false;
        gui.update(
            &mut frame_input.events,
            frame_input.accumulated_time,
            viewport,
            device_pixel_ratio,
            |ctx| {
                use three_d::egui::{Area, Color32, Frame, Id, Order, RichText, TopBottomPanel};

                TopBottomPanel::top("toolbar").show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        rebuild |= ui.checkbox(&mut modes.color_box, "Color boxes").changed();
                        rebuild |= ui.checkbox(&mut modes.material, "Material").changed();
                        rebuild |= ui.checkbox(&mut modes.wireframe, "Wireframe").changed();
                        rebuild |= ui.checkbox(&mut modes.labels, "Labels").changed();
                        ui.separator();
                        ui.label(format!("Floors: {}", scene.num_floors()));
                        if let Some(hovered) = coordinator.hovered(&scene) {
                            let name = hovered.name.unwrap_or_default();
                            ui.separator();
                            ui.label(format!(
                                "{} {} ({})",
                                hovered.room_type, name, hovered.id
                            ));
                        }
                    });
                });

                // Screen-anchored labels for the hovered room
                for label in scene.labels.iter().filter(|l| l.visible) {
                    let projected =
                        project_to_screen(&camera, label.anchor, viewport, device_pixel_ratio);
                    if let Some((x, y)) = projected {
                        Area::new(Id::new(&label.room_id))
                            .fixed_pos((x, y))
                            .order(Order::Foreground)
                            .interactable(false)
                            .show(ctx, |ui| {
                                Frame::popup(ui.style()).show(ui, |ui| {
                                    ui.label(
                                        RichText::new(&label.text)
                                            .color(Color32::WHITE)
                                            .size(12.0),
                                    );
                                });
                            });
                    }
                }
            },
        );

        if rebuild {
            // Full teardown and reconstruct; dropping the old GPU layers
            // releases their geometry and material resources
            config.modes = modes;
            let rebuilt_scene = SceneModel::build(&building, &config);
            match build_gpu_layers(&context, &rebuilt_scene, &config) {
                Ok(rebuilt) => {
                    scene = rebuilt_scene;
                    gpu = rebuilt;
                    coordinator.reset();
                }
                Err(err) => log::error!("Failed to rebuild layers: {err:?}"),
            }
        }

        control.handle_events(&mut camera, &mut frame_input.events);

        for event in frame_input.events.iter() {
            match event {
                Event::MouseMotion { position, .. } => {
                    if let Some(ray) = pointer_ray(&camera, *position) {
                        coordinator.pointer_move(&mut scene, &ray, &config.hover);
                    }
                }
                Event::MouseLeave => {
                    coordinator.pointer_leave(&mut scene);
                }
                _ => {}
            }
        }

        for gpu_layer in gpu.iter_mut() {
            gpu_layer.sync(&scene);
        }

        let mut objects: Vec<&dyn Object> = Vec::new();
        for gpu_layer in gpu.iter() {
            gpu_layer.collect_objects(&mut objects);
        }

        frame_input
            .screen()
            .clear(ClearState::color_and_depth(0.94, 0.94, 0.94, 1.0, 1.0))
            .render(&camera, objects, &[&ambient, &directional])
            .write(|| gui.render())
            .unwrap();

        FrameOutput::default()
    });

    Ok(())
}
