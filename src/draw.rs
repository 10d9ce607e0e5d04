pub mod materials;
pub mod viewer;
