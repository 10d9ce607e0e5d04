pub mod config;
pub mod draw;
pub mod geom;
pub mod io;
pub mod model;
pub mod scene;

// Prelude
pub use config::ViewerConfig;
pub use geom::bounds::Bounds;
pub use geom::point::Point;
pub use geom::ray::Ray;
pub use geom::solid::RoomSolid;
pub use geom::vector::Vector;
pub use model::{Building, Floor, Room, RoomShape};
pub use scene::assemble::SceneModel;
pub use scene::hover::{HoverCoordinator, HoveredRoom};
pub use scene::layer::{Layer, LayerMode};
// Viewer entry point
pub use draw::viewer::run_viewer;
