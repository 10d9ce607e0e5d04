use anyhow::{Result, anyhow};
use log::info;
use roomview::{ViewerConfig, io, run_viewer};
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("Usage: roomview <building.json>"))?;

    let building = io::read_building(&path)?;
    info!(
        "Loaded building: {} floors, {} rooms",
        building.num_floors(),
        building.num_rooms()
    );

    run_viewer(building, ViewerConfig::new())
}
